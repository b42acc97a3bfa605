//! Mock implementations of port traits
//!
//! `MockPostRepository` wraps the in-memory adapter and adds switches to
//! fail each operation, call counters, and latency. `RecordingObserver`
//! keeps every snapshot it is notified with. `SharedBuffer` is an output
//! sink the test can read back after a view has written to it.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::InMemoryPostRepository;
use crate::app::{FeedState, Observer};
use crate::domain::entities::{NewPost, Post, PostId, User, UserId};
use crate::domain::ports::{Cursor, PostRepository};
use crate::error::{ObserverError, RepositoryError};

// ============================================================================
// Mock Post Repository
// ============================================================================

pub struct MockPostRepository {
    inner: InMemoryPostRepository,
    latency: Duration,
    fail_fetch: AtomicBool,
    fail_like: AtomicBool,
    fail_create: AtomicBool,
    fetch_calls: AtomicUsize,
    like_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MockPostRepository {
    /// Empty repository where `viewer` can author posts
    pub fn new(viewer: &Arc<User>) -> Self {
        Self::from_inner(
            InMemoryPostRepository::new(viewer.id).with_user(viewer.clone()),
            Duration::ZERO,
        )
    }

    fn from_inner(inner: InMemoryPostRepository, latency: Duration) -> Self {
        Self {
            inner,
            latency,
            fail_fetch: AtomicBool::new(false),
            fail_like: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            like_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_posts(self, posts: impl IntoIterator<Item = Post>) -> Self {
        Self::from_inner(self.inner.with_posts(posts), self.latency)
    }

    /// Delay every call, failing ones included
    pub fn with_latency(self, latency: Duration) -> Self {
        Self::from_inner(self.inner.with_latency(latency), latency)
    }

    async fn fail_after_latency<T>(&self) -> Result<T, RepositoryError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Err(RepositoryError::Unavailable("Mock failure".to_string()))
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_like(&self, fail: bool) {
        self.fail_like.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn like_calls(&self) -> usize {
        self.like_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Direct access to the backing store, bypassing counters and failures
    pub fn inner(&self) -> &InMemoryPostRepository {
        &self.inner
    }
}

#[async_trait]
impl PostRepository for MockPostRepository {
    async fn fetch_posts(
        &self,
        limit: usize,
        cursor: Cursor,
    ) -> Result<Vec<Post>, RepositoryError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let posts = self.inner.fetch_posts(limit, cursor).await?;
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("Mock failure".to_string()));
        }
        Ok(posts)
    }

    async fn toggle_like(&self, post_id: &PostId, user_id: &UserId) -> Result<u32, RepositoryError> {
        self.like_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_like.load(Ordering::SeqCst) {
            return self.fail_after_latency().await;
        }
        self.inner.toggle_like(post_id, user_id).await
    }

    async fn create_post(
        &self,
        author_id: &UserId,
        post: &NewPost,
    ) -> Result<Post, RepositoryError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return self.fail_after_latency().await;
        }
        self.inner.create_post(author_id, post).await
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

#[derive(Default)]
pub struct RecordingObserver {
    snapshots: RefCell<Vec<FeedState>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.snapshots.borrow().len()
    }

    pub fn last(&self) -> Option<FeedState> {
        self.snapshots.borrow().last().cloned()
    }

    pub fn snapshots(&self) -> Vec<FeedState> {
        self.snapshots.borrow().clone()
    }
}

impl Observer<FeedState> for RecordingObserver {
    fn update(&self, snapshot: &FeedState) -> Result<(), ObserverError> {
        self.snapshots.borrow_mut().push(snapshot.clone());
        Ok(())
    }
}

// ============================================================================
// Shared Output Buffer
// ============================================================================

#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
