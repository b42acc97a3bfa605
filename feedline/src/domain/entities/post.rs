//! Post domain entity
//!
//! A single feed item. Content comes in a closed set of built-in variants
//! (text, image, video) plus free-form custom tags that plugins can claim.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content variant of a post
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostVariant {
    Text,
    Image,
    Video,
    /// Any other tag, rendered by whichever plugin claims it
    Custom(String),
}

impl PostVariant {
    /// Whether posts of this variant are expected to carry a media URL
    pub fn requires_media(&self) -> bool {
        matches!(self, PostVariant::Image | PostVariant::Video)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PostVariant::Text => "text",
            PostVariant::Image => "image",
            PostVariant::Video => "video",
            PostVariant::Custom(tag) => tag,
        }
    }
}

impl std::fmt::Display for PostVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for PostVariant {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" => PostVariant::Text,
            "image" => PostVariant::Image,
            "video" => PostVariant::Video,
            other => PostVariant::Custom(other.to_string()),
        }
    }
}

impl From<String> for PostVariant {
    fn from(s: String) -> Self {
        PostVariant::from(s.as_str())
    }
}

impl From<PostVariant> for String {
    fn from(variant: PostVariant) -> Self {
        variant.as_str().to_string()
    }
}

impl std::str::FromStr for PostVariant {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PostVariant::from(s))
    }
}

/// A post in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "user")]
    pub author: Arc<User>,
    pub content: String,
    #[serde(rename = "type")]
    pub variant: PostVariant,
    pub media_url: Option<String>,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    /// Liked by the current user
    pub liked: bool,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub shares: u32,
}

/// Data needed to create a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub content: String,
    pub variant: PostVariant,
    pub media_url: Option<String>,
}

impl NewPost {
    pub fn new(content: impl Into<String>, variant: PostVariant) -> Self {
        Self {
            content: content.into(),
            variant,
            media_url: None,
        }
    }

    pub fn with_media(mut self, media_url: impl Into<String>) -> Self {
        self.media_url = Some(media_url.into());
        self
    }
}
