//! Feed module
//!
//! Console rendering of feed snapshots and the plugins that render post bodies.

pub mod plugins;
pub mod renderer;

#[allow(unused_imports)]
pub use plugins::{DefaultPostPlugin, ImagePostPlugin, PluginRegistry, PostPlugin, VideoPostPlugin};
#[allow(unused_imports)]
pub use renderer::{render_feed, render_json, render_post};
