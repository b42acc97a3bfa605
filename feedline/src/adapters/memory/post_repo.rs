//! In-memory adapter for PostRepository
//!
//! Holds every post for the lifetime of the process. Storage order is feed
//! order: newest first, with created posts inserted at the front.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewPost, Post, PostId, User, UserId};
use crate::domain::ports::{Cursor, PostRepository};
use crate::error::RepositoryError;

struct StoredPost {
    post: Post,
    liked_by: HashSet<UserId>,
}

/// In-memory implementation of PostRepository
pub struct InMemoryPostRepository {
    users: RwLock<HashMap<UserId, Arc<User>>>,
    posts: RwLock<Vec<StoredPost>>,
    /// User whose likes are reported through `Post::liked`
    viewer: UserId,
    latency: Duration,
}

impl InMemoryPostRepository {
    pub fn new(viewer: UserId) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            posts: RwLock::new(Vec::new()),
            viewer,
            latency: Duration::ZERO,
        }
    }

    /// Delay every call by `latency` to mimic a remote data source
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Register a user so it can author posts
    pub fn with_user(mut self, user: Arc<User>) -> Self {
        self.users.get_mut().insert(user.id, user);
        self
    }

    /// Append an existing post at the end of the feed
    pub fn with_post(mut self, post: Post) -> Self {
        self.users
            .get_mut()
            .entry(post.author.id)
            .or_insert_with(|| post.author.clone());

        let mut liked_by = HashSet::new();
        if post.liked {
            liked_by.insert(self.viewer);
        }
        self.posts.get_mut().push(StoredPost { post, liked_by });
        self
    }

    pub fn with_posts(self, posts: impl IntoIterator<Item = Post>) -> Self {
        posts.into_iter().fold(self, |repo, post| repo.with_post(post))
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn view_of(&self, stored: &StoredPost) -> Post {
        let mut post = stored.post.clone();
        post.liked = stored.liked_by.contains(&self.viewer);
        post
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn fetch_posts(
        &self,
        limit: usize,
        cursor: Cursor,
    ) -> Result<Vec<Post>, RepositoryError> {
        self.simulate_latency().await;

        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .skip(cursor.offset())
            .take(limit)
            .map(|stored| self.view_of(stored))
            .collect())
    }

    async fn toggle_like(&self, post_id: &PostId, user_id: &UserId) -> Result<u32, RepositoryError> {
        self.simulate_latency().await;

        let mut posts = self.posts.write().await;
        let stored = posts
            .iter_mut()
            .find(|s| s.post.id == *post_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Post {} not found", post_id)))?;

        if stored.liked_by.remove(user_id) {
            stored.post.likes = stored.post.likes.saturating_sub(1);
        } else {
            stored.liked_by.insert(*user_id);
            stored.post.likes = stored.post.likes.saturating_add(1);
        }

        tracing::debug!(post = %post_id, likes = stored.post.likes, "like toggled");
        Ok(stored.post.likes)
    }

    async fn create_post(
        &self,
        author_id: &UserId,
        new_post: &NewPost,
    ) -> Result<Post, RepositoryError> {
        self.simulate_latency().await;

        if new_post.content.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "post content must not be empty".to_string(),
            ));
        }
        if new_post.variant.requires_media() && new_post.media_url.is_none() {
            return Err(RepositoryError::Validation(format!(
                "{} posts require a media url",
                new_post.variant
            )));
        }

        let author = self
            .users
            .read()
            .await
            .get(author_id)
            .cloned()
            .ok_or_else(|| RepositoryError::Validation(format!("Unknown author {}", author_id)))?;

        let post = Post {
            id: PostId::new(),
            author,
            content: new_post.content.clone(),
            variant: new_post.variant.clone(),
            media_url: new_post.media_url.clone(),
            created_at: Utc::now(),
            likes: 0,
            liked: false,
            comments: 0,
            shares: 0,
        };

        self.posts.write().await.insert(
            0,
            StoredPost {
                post: post.clone(),
                liked_by: HashSet::new(),
            },
        );

        tracing::debug!(post = %post.id, variant = %post.variant, "post created");
        Ok(post)
    }
}
