//! Demo data for the in-memory repository

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::InMemoryPostRepository;
use crate::domain::entities::{Post, PostId, PostVariant, User, UserId};

/// The authors every generated post is attributed to
pub fn demo_users() -> Vec<Arc<User>> {
    vec![
        Arc::new(User::new("John Doe", "johndoe").with_avatar("https://example.com/avatar1.jpg")),
        Arc::new(User::new("Jane Smith", "janesmith").with_avatar("https://example.com/avatar2.jpg")),
        Arc::new(
            User::new("Bob Johnson", "bobjohnson").with_avatar("https://example.com/avatar3.jpg"),
        ),
    ]
}

/// Generate `count` posts, newest first.
///
/// Post `i` is between `i` and `i + 1` hours old, so the returned order is
/// strictly by descending timestamp.
pub fn generate_posts<R: Rng>(count: usize, authors: &[Arc<User>], rng: &mut R) -> Vec<Post> {
    let variants = [PostVariant::Text, PostVariant::Image, PostVariant::Video];
    let now = Utc::now();

    (0..count)
        .filter_map(|i| {
            let author = authors.choose(rng)?.clone();
            let variant = variants.choose(rng)?.clone();
            let number = i + 1;

            let (content, media_url) = match variant {
                PostVariant::Image => (
                    format!("Check out this image post #{}", number),
                    Some("https://example.com/image.jpg".to_string()),
                ),
                PostVariant::Video => (
                    format!("Video post #{} - watch this!", number),
                    Some("https://example.com/video.mp4".to_string()),
                ),
                _ => (
                    format!("This is a sample post #{} with some content.", number),
                    None,
                ),
            };

            let age = Duration::hours(i as i64) + Duration::minutes(rng.gen_range(0..60));

            Some(Post {
                id: PostId::new(),
                author,
                content,
                variant,
                media_url,
                created_at: now - age,
                likes: rng.gen_range(0..=100),
                liked: false,
                comments: rng.gen_range(0..=50),
                shares: rng.gen_range(0..=30),
            })
        })
        .collect()
}

impl InMemoryPostRepository {
    /// Repository pre-filled with `count` generated posts from the demo authors
    pub fn seeded(count: usize, viewer: UserId) -> Self {
        let authors = demo_users();
        let posts = generate_posts(count, &authors, &mut rand::thread_rng());

        authors
            .into_iter()
            .fold(InMemoryPostRepository::new(viewer), |repo, user| {
                repo.with_user(user)
            })
            .with_posts(posts)
    }
}
