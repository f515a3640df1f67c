//! # Mock Transport & Testing Guide
//!
//! `MockTransport` implements [`Transport`] entirely in memory. Instead of a service it
//! replays a queue of scripted replies, which makes failures that are hard to provoke
//! against a real service (dropped connections, odd status codes, truncated bodies)
//! trivial to test.
//!
//! ## When to use the Mock vs the Local Service
//!
//! | Feature | MockTransport | LocalService |
//! |---------|---------------|--------------|
//! | **State** | None (scripted replies) | Real resource tree |
//! | **Determinism** | 100% deterministic | Subject to scheduler |
//! | **Use Case** | Normalization, error mapping | End-to-end CRUD flows |
//! | **Error Injection** | Easy (`return_err`) | Only what the service produces |
//!
//! ## Example
//!
//! ```rust
//! use docdb_client::client::ResourceClient;
//! use docdb_client::config::ClientConfig;
//! use docdb_client::error::ErrorKind;
//! use docdb_client::transport::mock::MockTransport;
//! use docdb_client::transport::TransportError;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_send()
//!         .return_err(TransportError::Connection("reset by peer".into()));
//!
//!     let client = ResourceClient::new(mock.clone(), ClientConfig::default());
//!     let response = client.get_database("D1").await;
//!
//!     assert!(response.is_errored());
//!     assert_eq!(response.error().unwrap().kind, ErrorKind::Transport);
//!     mock.verify();
//! }
//! ```

use super::{RawResponse, Transport, TransportError};
use crate::response::{Operation, RequestDescriptor};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply, optionally constrained to a specific request.
struct Expectation {
    operation: Option<Operation>,
    link: Option<String>,
    response: Result<RawResponse, TransportError>,
}

impl Expectation {
    fn matches(&self, request: &RequestDescriptor) -> bool {
        self.operation.map_or(true, |op| op == request.operation)
            && self.link.as_deref().map_or(true, |link| link == request.link)
    }
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    received: Vec<RequestDescriptor>,
    mismatches: Vec<String>,
}

/// A transport with expectation tracking for fluent testing.
///
/// Clones share the same expectation queue, so one handle can be given to the client
/// while the test keeps another to script and verify.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one more request; replies are consumed in order.
    pub fn expect_send(&self) -> SendExpectationBuilder {
        SendExpectationBuilder {
            state: self.state.clone(),
            operation: None,
            link: None,
        }
    }

    /// Every request the transport has seen, in order.
    pub fn received(&self) -> Vec<RequestDescriptor> {
        self.state.lock().received.clone()
    }

    /// Panics if an expectation is left over or a request did not match its expectation.
    pub fn verify(&self) {
        let state = self.state.lock();
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        let mut state = self.state.lock();
        state.received.push(request.clone());

        match state.expectations.pop_front() {
            Some(expectation) if expectation.matches(&request) => expectation.response,
            Some(_) | None => {
                let description = format!("{:?} {}", request.operation, request.link);
                state.mismatches.push(description.clone());
                Err(TransportError::Connection(format!(
                    "no expectation for {description}"
                )))
            }
        }
    }
}

/// Builder for a single scripted reply.
pub struct SendExpectationBuilder {
    state: Arc<Mutex<MockState>>,
    operation: Option<Operation>,
    link: Option<String>,
}

impl SendExpectationBuilder {
    /// Only match a request with this operation.
    pub fn for_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Only match a request sent to this link.
    pub fn for_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Replies with `status` and a JSON body.
    pub fn return_json(self, status: u16, body: serde_json::Value) {
        self.push(Ok(RawResponse::json(status, &body)));
    }

    /// Replies with an arbitrary raw response.
    pub fn return_raw(self, response: RawResponse) {
        self.push(Ok(response));
    }

    /// Fails without a reply.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<RawResponse, TransportError>) {
        self.state.lock().expectations.push_back(Expectation {
            operation: self.operation,
            link: self.link,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::ResourceKind;
    use serde_json::json;

    fn get(link: &str) -> RequestDescriptor {
        RequestDescriptor::new(Operation::Get, ResourceKind::Database, link)
    }

    #[tokio::test]
    async fn test_replies_in_order() {
        let mock = MockTransport::new();
        mock.expect_send().return_json(200, json!({ "id": "D1" }));
        mock.expect_send().return_err(TransportError::Closed);

        let first = mock.send(get("dbs/D1")).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(mock.send(get("dbs/D1")).await, Err(TransportError::Closed));

        assert_eq!(mock.received().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_constrained_expectation_rejects_other_requests() {
        let mock = MockTransport::new();
        mock.expect_send()
            .for_operation(Operation::Delete)
            .for_link("dbs/D1")
            .return_raw(RawResponse::empty(204));

        let result = mock.send(get("dbs/D1")).await;
        assert!(matches!(result, Err(TransportError::Connection(_))));

        let verify = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verify.is_err());
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_detects_leftovers() {
        let mock = MockTransport::new();
        mock.expect_send().return_raw(RawResponse::empty(200));
        mock.verify();
    }
}
