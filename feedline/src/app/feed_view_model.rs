//! Feed view model
//!
//! Owns the feed state, drives the repository, and notifies views after
//! every state change. Repository failures become state (`FeedState::error`)
//! and never escape to the caller.
//!
//! Everything runs on one thread. Each operation checks the in-flight flags
//! before its first `.await`, which is what keeps a second fetch from
//! starting while one is suspended.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use crate::app::observable::{Observable, Observer, Subscription};
use crate::domain::entities::{NewPost, Post, PostId, PostVariant, User};
use crate::domain::ports::{Cursor, PostRepository};
use crate::error::{FeedError, RepositoryError};

/// Snapshot of everything a view needs to render the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    /// Display order, newest first. Ids are unique.
    pub posts: Vec<Post>,
    /// Where the next page starts
    pub cursor: Cursor,
    pub page_size: usize,
    /// A first-page or next-page fetch is in flight
    pub is_loading: bool,
    /// A pull-to-refresh fetch is in flight
    pub is_refreshing: bool,
    /// False once a page came back short
    pub has_more: bool,
    /// Last failure, cleared by the next successful operation
    pub error: Option<RepositoryError>,
}

/// Conceptual state derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    Loading,
    Refreshing,
    Error,
    Exhausted,
}

impl std::fmt::Display for FeedPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedPhase::Idle => write!(f, "idle"),
            FeedPhase::Loading => write!(f, "loading"),
            FeedPhase::Refreshing => write!(f, "refreshing"),
            FeedPhase::Error => write!(f, "error"),
            FeedPhase::Exhausted => write!(f, "exhausted"),
        }
    }
}

impl FeedState {
    pub fn new(page_size: usize) -> Self {
        Self {
            posts: Vec::new(),
            cursor: Cursor::START,
            page_size,
            is_loading: false,
            is_refreshing: false,
            has_more: true,
            error: None,
        }
    }

    pub fn phase(&self) -> FeedPhase {
        if self.is_refreshing {
            FeedPhase::Refreshing
        } else if self.is_loading {
            FeedPhase::Loading
        } else if self.error.is_some() {
            FeedPhase::Error
        } else if !self.has_more {
            FeedPhase::Exhausted
        } else {
            FeedPhase::Idle
        }
    }

    /// A fetch is in flight
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_refreshing
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == *id)
    }

    fn post_mut(&mut self, id: &PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == *id)
    }

    fn contains(&self, id: &PostId) -> bool {
        self.post(id).is_some()
    }

    fn replace_posts(&mut self, page: Vec<Post>) {
        self.posts.clear();
        self.append_unseen(page);
    }

    /// Append posts whose ids are not already present. Returns how many were added.
    fn append_unseen(&mut self, page: Vec<Post>) -> usize {
        let mut seen: HashSet<PostId> = self.posts.iter().map(|p| p.id).collect();
        let before = self.posts.len();
        self.posts
            .extend(page.into_iter().filter(|post| seen.insert(post.id)));
        self.posts.len() - before
    }
}

/// What happened to a requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran and its result is in the state
    Completed,
    /// The repository failed; the failure is in `FeedState::error`
    Failed,
    /// The request was dropped without touching the repository
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Initial,
    More,
    Refresh,
}

/// View model for a paginated feed
pub struct FeedViewModel<R>
where
    R: PostRepository,
{
    repository: Arc<R>,
    current_user: Arc<User>,
    state: RefCell<FeedState>,
    /// Posts with a like toggle awaiting the repository
    pending_likes: RefCell<HashSet<PostId>>,
    observers: Observable<FeedState>,
}

impl<R> FeedViewModel<R>
where
    R: PostRepository,
{
    pub fn new(repository: Arc<R>, current_user: Arc<User>, page_size: usize) -> Self {
        Self {
            repository,
            current_user,
            state: RefCell::new(FeedState::new(page_size.max(1))),
            pending_likes: RefCell::new(HashSet::new()),
            observers: Observable::new(),
        }
    }

    pub fn subscribe(
        &self,
        observer: Rc<dyn Observer<FeedState>>,
    ) -> Option<Subscription<FeedState>> {
        self.observers.subscribe(observer)
    }

    /// Copy of the current state
    pub fn state(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> &Arc<User> {
        &self.current_user
    }

    /// Load the first page, replacing whatever is shown
    pub async fn load_initial(&self) -> Outcome {
        self.fetch(FetchKind::Initial).await
    }

    /// Append the next page
    pub async fn load_more(&self) -> Outcome {
        self.fetch(FetchKind::More).await
    }

    /// Re-fetch the first page and replace the feed with it
    pub async fn refresh(&self) -> Outcome {
        self.fetch(FetchKind::Refresh).await
    }

    /// Flip the current user's like on a post.
    ///
    /// The change is applied and published immediately, then confirmed with
    /// the repository. On success the post takes the confirmed flag and
    /// count. On failure it is restored to exactly its previous flag and
    /// count, unless a fetch has replaced it in the meantime.
    pub async fn toggle_like(&self, post_id: PostId) -> Outcome {
        let (previous, optimistic) = {
            let mut state = self.state.borrow_mut();
            let Some(post) = state.post_mut(&post_id) else {
                tracing::warn!(error = %FeedError::UnknownPost(post_id), "ignoring like toggle");
                return Outcome::Skipped;
            };
            if !self.pending_likes.borrow_mut().insert(post_id) {
                tracing::debug!(post = %post_id, "like toggle already in flight");
                return Outcome::Skipped;
            }

            let previous = (post.liked, post.likes);
            post.liked = !post.liked;
            post.likes = if post.liked {
                post.likes.saturating_add(1)
            } else {
                post.likes.saturating_sub(1)
            };
            (previous, (post.liked, post.likes))
        };
        self.publish();

        let result = self
            .repository
            .toggle_like(&post_id, &self.current_user.id)
            .await;
        self.pending_likes.borrow_mut().remove(&post_id);

        let outcome = {
            let mut state = self.state.borrow_mut();
            match result {
                Ok(likes) => {
                    // A fetch may have replaced the post while the toggle was
                    // in flight. The confirmed flag and count win either way.
                    if let Some(post) = state.post_mut(&post_id) {
                        post.liked = !previous.0;
                        post.likes = likes;
                    }
                    state.error = None;
                    Outcome::Completed
                }
                Err(e) => {
                    tracing::warn!(post = %post_id, error = %FeedError::from(e.clone()), "like toggle failed, reverting");
                    // Only undo our own flip, not data a fetch loaded since
                    if let Some(post) = state.post_mut(&post_id) {
                        if (post.liked, post.likes) == optimistic {
                            (post.liked, post.likes) = previous;
                        }
                    }
                    state.error = Some(e);
                    Outcome::Failed
                }
            }
        };
        self.publish();
        outcome
    }

    /// Create a post authored by the current user and put it at the top
    pub async fn create_post(&self, content: impl Into<String>, variant: PostVariant) -> Outcome {
        self.submit_post(NewPost::new(content, variant)).await
    }

    /// Create a post that carries a media reference
    pub async fn create_media_post(
        &self,
        content: impl Into<String>,
        variant: PostVariant,
        media_url: impl Into<String>,
    ) -> Outcome {
        self.submit_post(NewPost::new(content, variant).with_media(media_url))
            .await
    }

    async fn submit_post(&self, new_post: NewPost) -> Outcome {
        tracing::debug!(variant = %new_post.variant, "creating post");

        let result = self
            .repository
            .create_post(&self.current_user.id, &new_post)
            .await;

        let outcome = {
            let mut state = self.state.borrow_mut();
            match result {
                Ok(post) => {
                    if !state.contains(&post.id) {
                        state.posts.insert(0, post);
                    }
                    state.error = None;
                    Outcome::Completed
                }
                Err(e) => {
                    tracing::warn!(error = %FeedError::from(e.clone()), "create post failed");
                    state.error = Some(e);
                    Outcome::Failed
                }
            }
        };
        self.publish();
        outcome
    }

    async fn fetch(&self, kind: FetchKind) -> Outcome {
        let (limit, cursor) = {
            let mut state = self.state.borrow_mut();
            if state.is_busy() {
                tracing::debug!(?kind, phase = %state.phase(), "fetch already in flight, ignoring");
                return Outcome::Skipped;
            }
            if kind == FetchKind::More && !state.has_more {
                tracing::debug!("feed exhausted, ignoring load more");
                return Outcome::Skipped;
            }

            match kind {
                FetchKind::Refresh => state.is_refreshing = true,
                FetchKind::Initial | FetchKind::More => state.is_loading = true,
            }
            state.error = None;

            let cursor = match kind {
                FetchKind::More => state.cursor,
                FetchKind::Initial | FetchKind::Refresh => Cursor::START,
            };
            (state.page_size, cursor)
        };
        self.publish();

        tracing::debug!(?kind, %cursor, limit, "fetching posts");
        let result = self.repository.fetch_posts(limit, cursor).await;

        let outcome = {
            let mut state = self.state.borrow_mut();
            state.is_loading = false;
            state.is_refreshing = false;

            match result {
                Ok(page) => {
                    let fetched = page.len();
                    match kind {
                        FetchKind::More => {
                            let added = state.append_unseen(page);
                            tracing::debug!(fetched, added, "page appended");
                        }
                        FetchKind::Initial | FetchKind::Refresh => state.replace_posts(page),
                    }
                    state.cursor = cursor.advance(fetched);
                    state.has_more = fetched >= limit;
                    state.error = None;
                    Outcome::Completed
                }
                Err(e) => {
                    tracing::warn!(?kind, error = %FeedError::from(e.clone()), "fetch failed");
                    state.error = Some(e);
                    Outcome::Failed
                }
            }
        };
        self.publish();
        outcome
    }

    fn publish(&self) {
        let snapshot = self.state();
        let report = self.observers.notify(&snapshot);
        if report.failed > 0 {
            tracing::debug!(
                delivered = report.delivered,
                failed = report.failed,
                "notification pass had failures"
            );
        }
    }
}
