//! # Document Service Actor
//!
//! `DocumentService` is the server half of the in-process database. It owns the
//! [`ResourceTree`] and the receiver end of the request channel, and processes requests
//! *sequentially*. Because exactly one task ever touches the tree, it needs no lock.
//!
//! Every request is answered with a [`RawResponse`]; rejections are rendered by
//! [`ServiceError::into_response`] into the status code and JSON error body a remote
//! service would send.
//!
//! ## Routing
//!
//! | Operation | Link target | Success status |
//! |-----------|-------------|----------------|
//! | Create    | feed        | 201            |
//! | List      | feed        | 200            |
//! | Get       | resource    | 200            |
//! | Replace   | resource    | 200            |
//! | Delete    | resource    | 204, no body   |

use super::error::ServiceError;
use super::message::ServiceRequest;
use super::store::ResourceTree;
use crate::address::LinkTarget;
use crate::response::{Operation, RequestDescriptor};
use crate::transport::{status, ChannelTransport, RawResponse};
use serde_json::{json, Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct DocumentService {
    receiver: mpsc::Receiver<ServiceRequest>,
    tree: ResourceTree,
}

impl DocumentService {
    /// Creates the service and a transport connected to it.
    ///
    /// `buffer_size` bounds the request channel; senders wait while it is full.
    /// The service does nothing until [`run`](Self::run) is spawned.
    pub fn new(buffer_size: usize) -> (Self, ChannelTransport) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            tree: ResourceTree::new(),
        };
        (service, ChannelTransport::new(sender))
    }

    /// Processes requests until every transport has been dropped.
    pub async fn run(mut self) {
        info!("Document service started");

        while let Some(ServiceRequest {
            request,
            respond_to,
        }) = self.receiver.recv().await
        {
            debug!(operation = ?request.operation, link = %request.link, "Request");
            let response = match self.handle(&request) {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        operation = ?request.operation,
                        link = %request.link,
                        status = e.status(),
                        error = %e,
                        "Request rejected"
                    );
                    e.into_response()
                }
            };
            // The caller may have given up waiting; nothing to do then.
            let _ = respond_to.send(response);
        }

        info!(size = self.tree.len(), "Document service shutdown");
    }

    fn handle(&mut self, request: &RequestDescriptor) -> Result<RawResponse, ServiceError> {
        let target = LinkTarget::parse(&request.link)
            .map_err(|e| ServiceError::BadRequest(e.to_string()))?;
        if target.kind() != request.kind {
            return Err(ServiceError::BadRequest(format!(
                "`{}` does not address a {}",
                request.link, request.kind
            )));
        }

        match (request.operation, target) {
            (Operation::Create, LinkTarget::Feed { parent, kind }) => {
                let created = self.tree.insert(parent.as_ref(), kind, object_body(request)?)?;
                info!(
                    entity_type = kind.name(),
                    link = %created["altLink"],
                    size = self.tree.len(),
                    "Created"
                );
                Ok(RawResponse::json(status::CREATED, &created))
            }
            (Operation::List, LinkTarget::Feed { parent, kind }) => {
                let (resource_id, items) = self.tree.list(parent.as_ref(), kind)?;
                debug!(entity_type = kind.name(), count = items.len(), "Listed");
                let feed = json!({
                    "_rid": resource_id,
                    "_count": items.len(),
                    "items": items,
                });
                Ok(RawResponse::json(status::OK, &feed))
            }
            (Operation::Get, LinkTarget::Resource(address)) => {
                let resource = self.tree.get(&address)?;
                Ok(RawResponse::json(status::OK, &resource))
            }
            (Operation::Replace, LinkTarget::Resource(address)) => {
                let replaced = self.tree.replace(&address, object_body(request)?)?;
                info!(
                    entity_type = address.kind().name(),
                    from = %address,
                    to = %replaced["altLink"],
                    "Replaced"
                );
                Ok(RawResponse::json(status::OK, &replaced))
            }
            (Operation::Delete, LinkTarget::Resource(address)) => {
                let removed = self.tree.remove(&address)?;
                info!(
                    entity_type = address.kind().name(),
                    link = %address,
                    removed,
                    size = self.tree.len(),
                    "Deleted"
                );
                Ok(RawResponse::empty(status::NO_CONTENT))
            }
            (operation, target) => Err(ServiceError::BadRequest(format!(
                "{operation:?} is not supported on `{}`",
                target.link()
            ))),
        }
    }
}

fn object_body(request: &RequestDescriptor) -> Result<Map<String, Value>, ServiceError> {
    let bytes = request
        .body
        .as_deref()
        .ok_or_else(|| ServiceError::BadRequest("request has no body".into()))?;
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ServiceError::BadRequest("body is not a JSON object".into())),
        Err(e) => Err(ServiceError::BadRequest(e.to_string())),
    }
}
