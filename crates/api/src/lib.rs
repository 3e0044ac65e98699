//! Typed facade over the collaboration engine
//!
//! The facade is syntactic sugar over the hub: every call desugars to
//! exactly one hub operation. Request structs carry the optional `version`
//! field write endpoints accept; every response is the entity as
//! committed, current version included, so clients can chain writes.
//!
//! A transport maps the error taxonomy onto its status codes without
//! string inspection:
//!
//! | variant          | HTTP-style outcome |
//! |------------------|--------------------|
//! | `NotFound`       | 404                |
//! | `AccessDenied`   | 403                |
//! | `Unauthenticated`| 401                |
//! | `StaleVersion`   | 409                |
//! | `InvalidRequest` | 400                |
//! | `Storage`        | 500                |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod categories;
mod items;
mod lists;
mod members;
mod pantry;
mod products;
mod workspaces;

pub use categories::{CreateCategoryRequest, UpdateCategoryRequest};
pub use items::{AddItemRequest, CrossOffRequest, UpdateItemRequest};
pub use lists::{CreateListRequest, UpdateListRequest};
pub use members::InviteRequest;
pub use pantry::{Pantry, PantryBuilder};
pub use products::{CreateProductRequest, UpdateProductRequest};
pub use workspaces::{CreateWorkspaceRequest, UpdateWorkspaceRequest};

// The surface a host server needs, re-exported so it can depend on this
// crate alone.
pub use pantry_broadcast::{RecvError, Session, Subscription, Topic};
pub use pantry_core::{
    Actor, Category, CategoryId, ChangeEvent, ContainerId, ContainerKind, EntityKind, EntityRef,
    Error, EventKind, Identity, ItemId, ItemTarget, List, ListId, ListItem, Product, ProductId,
    Result, Role, UserId, Version, Workspace, WorkspaceId,
};
pub use pantry_engine::Member;
