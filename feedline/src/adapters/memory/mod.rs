//! In-memory adapters
//!
//! The process-lived data source the console runs against.

mod post_repo;
mod seed;

pub use post_repo::InMemoryPostRepository;
#[allow(unused_imports)]
pub use seed::{demo_users, generate_posts};
