//! Resource models as exchanged with the service.
//!
//! Each type implements [`Resource`], which ties it to a
//! [`ResourceKind`](crate::address::ResourceKind) and exposes the identity fields the
//! service stamps on it.

pub mod collection;
pub mod database;
pub mod document;
pub mod list;
pub mod resource;
pub mod user;

pub use collection::*;
pub use database::*;
pub use document::*;
pub use list::*;
pub use resource::*;
pub use user::*;
