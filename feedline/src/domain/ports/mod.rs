//! Domain ports (traits)
//!
//! Port traits define interfaces that the view model requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;

pub use repositories::{Cursor, PostRepository};
