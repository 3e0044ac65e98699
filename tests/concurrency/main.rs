//! Optimistic concurrency integration tests
//!
//! Version monotonicity, conflict rejection, and reorder stability.

#[path = "../common/mod.rs"]
mod common;

mod conflict_rejection;
mod reorder_stability;
mod version_monotonicity;
