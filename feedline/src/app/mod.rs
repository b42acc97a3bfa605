//! Application layer
//!
//! The observable primitive and the feed view model built on it.
//! The view model coordinates between domain entities, the repository
//! port, and whatever views subscribe to it.

pub mod feed_view_model;
pub mod observable;

pub use feed_view_model::{FeedPhase, FeedState, FeedViewModel, Outcome};
#[allow(unused_imports)]
pub use observable::{NotifyReport, Observable, Observer, Subscription, SubscriptionId};
