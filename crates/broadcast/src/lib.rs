//! Authorization-gated real-time event distribution
//!
//! One topic per container instance. A session authenticates once at
//! connect; every subscribe request re-runs the read-access check for the
//! named container before the subscription is admitted, closing the leak
//! where an unauthorized client could receive change events by guessing
//! container ids.
//!
//! Delivery is best-effort: no acknowledgement, no persistence, no replay.
//! A disconnected client misses events published while it was away and
//! re-fetches current state on reconnect. Within one topic, every
//! subscriber observes events in publish order; across topics there is no
//! ordering guarantee and none is needed.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod broadcaster;
mod session;
mod topic;

pub use broadcaster::{Broadcaster, RecvError, Subscription, TopicAuthorizer};
pub use session::{Session, SessionId};
pub use topic::Topic;
