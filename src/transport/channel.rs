//! # Channel Transport
//!
//! Forwards requests over a Tokio mpsc channel to a running
//! [`DocumentService`](crate::service::DocumentService) and awaits the reply on a oneshot
//! channel. Cheap to clone: it only holds the sender.

use super::{RawResponse, Transport, TransportError};
use crate::response::RequestDescriptor;
use crate::service::ServiceRequest;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone, Debug)]
pub struct ChannelTransport {
    sender: mpsc::Sender<ServiceRequest>,
}

impl ChannelTransport {
    pub fn new(sender: mpsc::Sender<ServiceRequest>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ServiceRequest {
                request,
                respond_to,
            })
            .await
            .map_err(|_| TransportError::Closed)?;
        response.await.map_err(|_| TransportError::Dropped)
    }
}
