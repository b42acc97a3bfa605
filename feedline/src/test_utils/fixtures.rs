//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::{Post, PostId, PostVariant, User};

/// Create a test user with a specific display name
pub fn test_user(name: &str) -> Arc<User> {
    Arc::new(User::new(name, name.to_lowercase().replace(' ', "")))
}

/// Create a text post with default values
pub fn test_post(content: &str) -> Post {
    Post {
        id: PostId::new(),
        author: test_user("Test Author"),
        content: content.to_string(),
        variant: PostVariant::Text,
        media_url: None,
        created_at: Utc::now(),
        likes: 3,
        liked: false,
        comments: 1,
        shares: 0,
    }
}

/// Create a post of a specific variant, with media where the variant needs it
pub fn test_post_with_variant(variant: PostVariant) -> Post {
    let media_url = variant
        .requires_media()
        .then(|| format!("https://media.test/{}.bin", variant));
    Post {
        variant,
        media_url,
        ..test_post("variant post")
    }
}

/// Create `count` text posts, newest first
pub fn test_posts(count: usize) -> Vec<Post> {
    let now = Utc::now();
    (0..count)
        .map(|i| Post {
            created_at: now - Duration::minutes(i as i64),
            likes: i as u32,
            ..test_post(&format!("Post #{}", i + 1))
        })
        .collect()
}
