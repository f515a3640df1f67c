//! # Response Envelopes
//!
//! Every operation concludes with exactly one envelope:
//!
//! | Operation              | Envelope            |
//! |------------------------|---------------------|
//! | create / get / replace | [`Response<T>`]     |
//! | list                   | [`ListResponse<T>`] |
//! | delete                 | [`DataResponse`]    |
//!
//! An envelope is either successful (it holds the resource) or errored (it holds a
//! [`DataError`]), never both and never neither. The originating [`RequestDescriptor`] and
//! the raw payload returned by the service are kept for diagnostics in both cases.
//!
//! Envelopes are only built by [`ResourceClient`](crate::client::ResourceClient).

use crate::address::ResourceKind;
use crate::error::DataError;
use crate::model::ResourceList;
use serde::{Deserialize, Serialize};

/// The verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Get,
    List,
    Replace,
    Delete,
}

/// What was asked of the service.
///
/// `link` is a resource link for get/replace/delete and a feed link for create/list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub operation: Operation,
    pub kind: ResourceKind,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    pub fn new(operation: Operation, kind: ResourceKind, link: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            link: link.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Outcome tag of a completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Error,
}

/// Normalized result of a single-resource operation.
#[derive(Debug, Clone)]
pub struct Response<T> {
    request: RequestDescriptor,
    result: Result<T, DataError>,
    json_data: Vec<u8>,
    status: Option<u16>,
}

/// Result of a list operation.
pub type ListResponse<T> = Response<ResourceList<T>>;

/// Result of a delete operation, which carries no resource body.
pub type DataResponse = Response<()>;

impl<T> Response<T> {
    pub(crate) fn success(
        request: RequestDescriptor,
        resource: T,
        json_data: Vec<u8>,
        status: u16,
    ) -> Self {
        Self {
            request,
            result: Ok(resource),
            json_data,
            status: Some(status),
        }
    }

    pub(crate) fn failure(
        request: RequestDescriptor,
        error: DataError,
        json_data: Vec<u8>,
    ) -> Self {
        let status = error.status;
        Self {
            request,
            result: Err(error),
            json_data,
            status,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.result {
            Ok(_) => Outcome::Success,
            Err(_) => Outcome::Error,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_errored(&self) -> bool {
        self.result.is_err()
    }

    pub fn resource(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&DataError> {
        self.result.as_ref().err()
    }

    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// Raw body returned by the service (empty when nothing was received).
    pub fn json_data(&self) -> &[u8] {
        &self.json_data
    }

    pub fn json_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.json_data).ok()
    }

    /// Status code of the service reply, if the request reached the service.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn into_result(self) -> Result<T, DataError> {
        self.result
    }

    pub fn into_resource(self) -> Option<T> {
        self.result.ok()
    }
}

impl<T> Response<ResourceList<T>> {
    /// Successful and holding at least one item.
    pub fn is_populated(&self) -> bool {
        self.resource().is_some_and(ResourceList::is_populated)
    }

    /// Items of a successful list; empty for an errored one.
    pub fn items(&self) -> &[T] {
        self.resource().map(|list| list.items.as_slice()).unwrap_or(&[])
    }
}
