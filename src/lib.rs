//! # docdb-client
//!
//! > **An async client for a hierarchical document database.**
//!
//! Resources live in a fixed tree (database → collection → document, database → user).
//! The client issues create, get, list, replace and delete requests against that tree,
//! and every request concludes with exactly one *response envelope*: a successful one
//! holding the resource, or an errored one holding a [`DataError`](error::DataError).
//! Nothing escapes as a panic or an early `Err`.
//!
//! ## Core Concepts
//!
//! ### Envelopes, not `Result`s
//! Operations return [`Response<T>`](response::Response),
//! [`ListResponse<T>`](response::ListResponse) or [`DataResponse`](response::DataResponse).
//! Each keeps the request descriptor and the raw payload for diagnostics, so a failed call
//! can be inspected after the fact.
//!
//! ### Waiting with a bound
//! Operations are futures. Callers that hand results to a continuation use
//! [`ResourceClient::dispatch`](client::ResourceClient::dispatch); callers that need to wait
//! for that continuation use a [`CompletionSignal`](signal::CompletionSignal), which fills
//! exactly once and reports a timeout separately from an errored envelope.
//!
//! ### One seam for the service
//! The client only sees a [`Transport`](transport::Transport). The crate ships an in-process
//! [`DocumentService`](service::DocumentService) actor behind a channel transport, and a
//! [`MockTransport`](transport::mock::MockTransport) for scripted failures.
//!
//! ## Module Tour
//!
//! ### 1. Identity ([`address`], [`model`])
//! - **Role**: validated addresses and alt/feed links; serde models for each resource kind.
//! - **Key items**: [`ResourceAddress`](address::ResourceAddress), [`Resource`](model::Resource).
//!
//! ### 2. Outcomes ([`response`], [`error`], [`signal`])
//! - **Role**: the envelope, the error taxonomy, and the single-assignment completion cell.
//!
//! ### 3. The Interface ([`client`])
//! - **Role**: generic operations, typed shorthands per kind, scoped handles, normalization.
//! - **Key items**: [`ResourceClient`](client::ResourceClient).
//!
//! ### 4. The Plumbing ([`transport`], [`service`])
//! - **Role**: request delivery, and the actor that owns the resource tree.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: configuration, startup and graceful shutdown, logging setup.
//! - **Key items**: [`LocalService`](lifecycle::LocalService),
//!   [`ClientConfig`](config::ClientConfig).
//!
//! ## Quick Start
//!
//! ```rust
//! use docdb_client::config::ClientConfig;
//! use docdb_client::lifecycle::LocalService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = LocalService::start(ClientConfig::default()).unwrap();
//!     let client = service.client();
//!
//!     client.create_database("D1").await;
//!     let user = client.create_user("U1", "D1").await;
//!     assert!(user.is_successful());
//!
//!     let renamed = client.replace_user("U1", "U2", "D1").await;
//!     assert_eq!(renamed.resource().unwrap().properties.id, "U2");
//!     assert!(client.get_user("U1", "D1").await.error().unwrap().is_not_found());
//!
//!     service.shutdown().await.unwrap();
//! }
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod address;
pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod response;
pub mod service;
pub mod signal;
pub mod transport;
