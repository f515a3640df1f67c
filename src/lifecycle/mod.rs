//! Startup, shutdown and logging setup.

pub mod local_service;
pub mod tracing;

pub use local_service::{LocalService, ShutdownError};
pub use self::tracing::{setup_tracing, try_setup_tracing};
