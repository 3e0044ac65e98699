//! In-process domain-event bus
//!
//! Side-effecting rules triggered by domain events register here instead
//! of living inline in the mutation path; the invite operation stays
//! oblivious to what cascades off it, and new rules stack without
//! touching it.

use crate::hub::Hub;
use pantry_core::{DomainEvent, Result};

/// A rule that reacts to domain events
///
/// Handlers run synchronously on the mutating request's worker, in
/// registration order, after the triggering mutation has committed and
/// its change event has been published. A handler error propagates to the
/// caller of the triggering operation.
///
/// Handlers may perform further mutations through the hub; those dispatch
/// again, so a handler must converge (the cascade rule only reacts to
/// list grants and only ever emits category grants).
pub trait DomainHandler: Send + Sync {
    /// React to one domain event
    fn on_event(&self, hub: &Hub, event: &DomainEvent) -> Result<()>;
}
