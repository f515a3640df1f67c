//! # Observability & Tracing
//!
//! Structured logging for the client and the local service, built on `tracing`.
//!
//! ## Configuration
//!
//! Levels come from `RUST_LOG`. The output uses the compact format and hides the module
//! prefix (`with_target(false)`); the structured fields (`entity_type`, `link`, `kind`,
//! `status`) carry the context instead.
//!
//! ```bash
//! # Mutations and lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Every request, with spans for each client call
//! RUST_LOG=debug cargo run
//!
//! # Only the client side
//! RUST_LOG=docdb_client::client=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Service lifecycle**: startup and shutdown with the final store size
//! - **Mutations**: `Created`, `Replaced`, `Deleted` with `entity_type` and `link`
//! - **Client calls**: one span per operation, `Sending request` on entry
//! - **Failures**: `Operation failed` with the error `kind` and `status`, and
//!   `Request rejected` on the service side
//!
//! With `RUST_LOG=debug` a user rename reads:
//!
//! ```text
//! DEBUG replace_user{id="U1" new_id="U2" database_id="D1"}: Sending request operation=Replace link=dbs/D1/users/U1
//! DEBUG Request operation=Replace link=dbs/D1/users/U1
//!  INFO Replaced entity_type="User" from=dbs/D1/users/U1 to="dbs/D1/users/U2"
//! DEBUG replace_user{id="U1" new_id="U2" database_id="D1"}: Operation succeeded status=Some(200)
//! ```

/// Installs the global subscriber. Panics if one is already installed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but a no-op when a subscriber is already installed.
///
/// Tests call this from every case; only the first call takes effect.
pub fn try_setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_test_writer()
        .try_init();
}
