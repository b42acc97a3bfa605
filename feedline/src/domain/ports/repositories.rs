//! Repository port traits
//!
//! The feed's data source. Implementations are provided by adapters
//! (the in-memory store) and by test mocks.

use async_trait::async_trait;

use crate::domain::entities::{NewPost, Post, PostId, UserId};
use crate::error::RepositoryError;

/// Position in the feed to fetch the next page from.
///
/// Offsets count posts as stored by the repository, newest first. Posts
/// created after a page was fetched shift later offsets, so consumers must
/// deduplicate by post id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor(pub usize);

impl Cursor {
    pub const START: Cursor = Cursor(0);

    pub fn offset(&self) -> usize {
        self.0
    }

    /// Cursor positioned after `count` more posts
    pub fn advance(self, count: usize) -> Self {
        Cursor(self.0.saturating_add(count))
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Repository for posts and likes
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch up to `limit` posts starting at `cursor`, newest first.
    ///
    /// The `liked` flag on each post is relative to the repository's viewer.
    async fn fetch_posts(&self, limit: usize, cursor: Cursor)
        -> Result<Vec<Post>, RepositoryError>;

    /// Toggle `user_id`'s like on a post, returning the updated like count
    async fn toggle_like(&self, post_id: &PostId, user_id: &UserId)
        -> Result<u32, RepositoryError>;

    /// Persist a new post authored by `author_id`
    async fn create_post(&self, author_id: &UserId, post: &NewPost)
        -> Result<Post, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_advances_by_count() {
        let cursor = Cursor::START.advance(10).advance(5);

        assert_eq!(cursor.offset(), 15);
        assert_eq!(cursor.to_string(), "@15");
    }

    #[test]
    fn cursor_advance_saturates() {
        assert_eq!(Cursor(usize::MAX).advance(1), Cursor(usize::MAX));
    }
}
