//! # In-Process Document Service
//!
//! A single actor that plays the part of the remote database. Clients reach it through a
//! [`ChannelTransport`](crate::transport::ChannelTransport), so the client code path is the
//! same one a network transport would take.
//!
//! - [`DocumentService`]: the actor and its request loop.
//! - [`ServiceRequest`]: the message carried over the channel.
//! - [`ServiceError`]: rejections, rendered as status code plus JSON error body.
//! - [`ResourceTree`]: the owned store, with cascade delete and rename-on-replace.

pub mod actor;
pub mod error;
pub mod message;
pub mod store;

pub use actor::DocumentService;
pub use error::ServiceError;
pub use message::ServiceRequest;
pub use store::ResourceTree;
