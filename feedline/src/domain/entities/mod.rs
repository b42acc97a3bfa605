//! Domain entities
//!
//! Plain value records shared by every layer.

pub mod post;
pub mod user;

pub use post::{NewPost, Post, PostId, PostVariant};
pub use user::{User, UserId};
