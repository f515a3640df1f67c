use crate::client::ResourceClient;
use crate::config::{ClientConfig, ConfigError};
use crate::service::DocumentService;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Document service task failed: {0}")]
    ServiceFailed(#[from] tokio::task::JoinError),
}

/// An in-process document service with a client wired to it.
///
/// `LocalService` is responsible for:
/// - **Startup**: validating the configuration and spawning the [`DocumentService`] actor
/// - **Wiring**: connecting a [`ResourceClient`] to it through a channel transport
/// - **Shutdown**: closing the channel and waiting for the actor to drain
///
/// # Example
///
/// ```rust
/// use docdb_client::config::ClientConfig;
/// use docdb_client::lifecycle::LocalService;
///
/// #[tokio::main]
/// async fn main() {
///     let service = LocalService::start(ClientConfig::default()).unwrap();
///
///     let created = service.client().create_database("D1").await;
///     assert!(created.is_successful());
///
///     service.shutdown().await.unwrap();
/// }
/// ```
#[derive(Debug)]
pub struct LocalService {
    client: ResourceClient,
    handle: JoinHandle<()>,
}

impl LocalService {
    /// Spawns the service on the current runtime.
    pub fn start(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (service, transport) = DocumentService::new(config.channel_capacity);
        info!(
            account = %config.account,
            capacity = config.channel_capacity,
            "Starting local service"
        );
        let handle = tokio::spawn(service.run());

        Ok(Self {
            client: ResourceClient::new(transport, config),
            handle,
        })
    }

    /// The client connected to this service. Clone it to share across tasks.
    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    /// Stops the service once every clone of the client has been dropped.
    ///
    /// Requests already queued are still answered before the service exits.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down local service...");

        // Dropping the last transport sender closes the channel, which ends the actor loop.
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Document service task failed: {:?}", e);
            return Err(e.into());
        }

        info!("Local service shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_rejects_invalid_config() {
        let config = ClientConfig::default().with_channel_capacity(0);
        assert_eq!(
            LocalService::start(config).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_service() {
        let service = LocalService::start(ClientConfig::default()).unwrap();
        assert!(service.client().create_database("D1").await.is_successful());
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_client_fails_after_shutdown() {
        let service = LocalService::start(ClientConfig::default()).unwrap();
        let client = service.client().clone();

        // A surviving clone keeps the channel open, so stop the actor directly.
        service.handle.abort();
        let _ = service.handle.await;

        let response = client.get_database("D1").await;
        assert_eq!(
            response.error().unwrap().kind,
            crate::error::ErrorKind::Transport
        );
    }
}
