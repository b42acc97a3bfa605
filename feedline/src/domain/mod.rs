//! Domain layer
//!
//! Contains pure business types with no knowledge of the console.
//! - `entities`: Posts, users and their identifiers
//! - `ports`: Trait definitions for the data source

pub mod entities;
pub mod ports;
