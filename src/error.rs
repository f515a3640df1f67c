//! # Operation Errors
//!
//! The error detail carried by an errored [`Response`](crate::response::Response).
//!
//! Every failure an operation can run into, whether it happened on the wire, inside the
//! service or while validating an address locally, ends up as a [`DataError`] tagged with
//! an [`ErrorKind`]. None of them escape the client as a panic or an early return: the
//! caller always receives an envelope.

use crate::address::AddressError;
use crate::transport::TransportError;
use serde::{Deserialize, Serialize};

/// Classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No response was received (connectivity, closed channel, dropped reply).
    Transport,
    /// The target, or one of its ancestors, does not exist.
    NotFound,
    /// A create or replace collided with an existing identifier.
    Conflict,
    /// The address was incomplete or malformed; the request was never sent.
    InvalidAddress,
    /// The service rejected the request body.
    MalformedPayload,
    /// The service answered with a status the client does not classify.
    Service,
    /// The service reported success but its body could not be used.
    Decode,
}

/// Error detail attached to an errored envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct DataError {
    pub kind: ErrorKind,
    pub message: String,
    /// Status code returned by the service, when the request reached it.
    pub status: Option<u16>,
}

impl DataError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ErrorKind::Conflict
    }
}

impl From<TransportError> for DataError {
    fn from(e: TransportError) -> Self {
        DataError::new(ErrorKind::Transport, e.to_string())
    }
}

impl From<AddressError> for DataError {
    fn from(e: AddressError) -> Self {
        DataError::new(ErrorKind::InvalidAddress, e.to_string())
    }
}
