//! Access control resolution
//!
//! Answers "can user U read / write / own container C" against the
//! membership store, including the derived visibility that flows from a
//! workspace down to its lists and categories.
//!
//! Lookup order is fixed: resolve the container first (NotFound), then
//! check membership (AccessDenied). The two outcomes stay distinct so
//! callers can map them to different externally visible results.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod resolver;

pub use resolver::{AccessResolver, MembershipStrategy};
