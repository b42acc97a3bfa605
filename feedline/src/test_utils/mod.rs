//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! Mocks wrap the real in-memory adapter so tests exercise the same paging
//! and like bookkeeping the console uses, plus failure injection.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
