//! Messages exchanged between a [`ChannelTransport`](crate::transport::ChannelTransport)
//! and the [`DocumentService`](super::DocumentService).

use crate::response::RequestDescriptor;
use crate::transport::RawResponse;
use tokio::sync::oneshot;

/// One-shot channel the service answers on.
pub type Reply = oneshot::Sender<RawResponse>;

/// A request queued for the service, together with the channel to answer it on.
///
/// The service always answers with a [`RawResponse`]; failures are encoded in its status
/// and body, the same way a remote service would report them.
#[derive(Debug)]
pub struct ServiceRequest {
    pub request: RequestDescriptor,
    pub respond_to: Reply,
}
