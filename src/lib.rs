//! Pantry - collaboration engine for shared grocery lists
//!
//! Pantry keeps shared lists, product catalogs, and the workspaces that
//! group them consistent under concurrent edits, and notifies connected
//! clients of every change in near real time:
//!
//! - hierarchical membership decides who may read or mutate an entity,
//! - per-entity versions detect and reject conflicting concurrent writes,
//! - an authorization-gated broadcaster fans change events out per topic,
//! - cascade sharing keeps catalog visibility consistent when lists are
//!   shared.
//!
//! # Quick Start
//!
//! ```ignore
//! use pantry::{Pantry, CreateWorkspaceRequest, CreateListRequest};
//!
//! let pantry = Pantry::builder()
//!     .authenticator(auth)      // external credential validation
//!     .identities(directory)    // external invite-handle lookup
//!     .build();
//!
//! let alice = pantry.authenticate("alice-bearer-token")?;
//! let home = pantry.create_workspace(&alice, CreateWorkspaceRequest {
//!     name: "Home".into(),
//!     icon: None,
//! })?;
//! let groceries = pantry.create_list(&alice, CreateListRequest {
//!     workspace: home.id,
//!     name: "Groceries".into(),
//! })?;
//!
//! // Real-time: subscribe a session to the list's topic
//! let session = pantry.connect("alice-bearer-token")?;
//! let mut events = pantry.subscribe(&session, &format!("list/{}", groceries.id))?;
//! ```
//!
//! # Architecture
//!
//! Internal layers (storage, access resolution, concurrency, broadcast,
//! engine) are separate crates; only the facade API is re-exported here.

// Re-export the public API from pantry-api
pub use pantry_api::*;
