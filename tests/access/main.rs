//! Access control integration tests
//!
//! Authorization gating and the owner-protection rules for membership
//! removal.

#[path = "../common/mod.rs"]
mod common;
