//! Error types for the document service.

use crate::transport::{status, ErrorBody, RawResponse};
use thiserror::Error;

/// Reasons the service rejects a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The target, or one of its ancestors, does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A sibling with the same identifier already exists.
    #[error("Resource with id `{id}` already exists in {feed}")]
    Conflict { id: String, feed: String },

    /// The link, operation or body is unusable.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The service failed to render its own reply.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => status::NOT_FOUND,
            ServiceError::Conflict { .. } => status::CONFLICT,
            ServiceError::BadRequest(_) => status::BAD_REQUEST,
            ServiceError::Internal(_) => status::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "NotFound",
            ServiceError::Conflict { .. } => "Conflict",
            ServiceError::BadRequest(_) => "BadRequest",
            ServiceError::Internal(_) => "InternalServerError",
        }
    }

    /// Renders the error the way it travels back to the client.
    pub fn into_response(self) -> RawResponse {
        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        let bytes = serde_json::to_vec(&body).unwrap_or_default();
        RawResponse::new(self.status(), bytes)
    }
}
