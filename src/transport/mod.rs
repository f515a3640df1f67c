//! # Transport
//!
//! The seam between [`ResourceClient`](crate::client::ResourceClient) and whatever actually
//! serves requests. The client hands a [`RequestDescriptor`] to a [`Transport`] and gets
//! back either a [`RawResponse`] (status + JSON body) or a [`TransportError`] when no reply
//! could be obtained. Turning that into an envelope is the client's job.
//!
//! Implementations:
//! - [`ChannelTransport`] talks to the in-process
//!   [`DocumentService`](crate::service::DocumentService).
//! - [`MockTransport`](mock::MockTransport) replays scripted replies, for tests.

pub mod channel;
pub mod mock;

pub use channel::ChannelTransport;

use crate::response::RequestDescriptor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Status codes exchanged with the service.
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const NO_CONTENT: u16 = 204;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Failures that prevent a reply from being received at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Service closed")]
    Closed,
    #[error("Service dropped response channel")]
    Dropped,
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// A reply as received from the service, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, Vec::new())
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string().into_bytes())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Body of an error reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Sends requests to the service.
///
/// A transport performs exactly one attempt per call; retry policy belongs to callers.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError>;
}
