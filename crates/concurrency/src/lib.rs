//! Optimistic concurrency for entity mutations
//!
//! No locks are held across requests: every write validates the client's
//! version token against the stored version inside the entity's storage
//! critical section, applies the mutation, and advances the version as one
//! indivisible step. Two writers that read the same version race to commit;
//! exactly one wins, the other gets a stale-version rejection and must
//! re-fetch and resubmit. Nothing is retried server-side.
//!
//! Key rules:
//! - An absent client version skips validation entirely (unconditional
//!   write, kept for clients that do not track versions)
//! - A mismatched version rejects the mutation before anything is applied
//! - Mutations that change no persisted field do not advance the version
//!   (reordering into the current order is a no-op)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod guard;
mod reorder;

pub use guard::{guarded_update, VersionGuard};
pub use reorder::plan_reorder;
