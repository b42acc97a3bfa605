//! Console view
//!
//! Parses typed commands and renders feed snapshots to a writer.

pub mod command;
pub mod console;

pub use command::{parse_command, FeedCommand};
#[allow(unused_imports)]
pub use console::{ConsoleRenderer, FeedView, Flow};
