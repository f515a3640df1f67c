//! # Resource Client
//!
//! [`ResourceClient`] is the caller-facing half of the crate. It builds a
//! [`RequestDescriptor`] for each operation, hands it to a [`Transport`], and normalizes
//! whatever comes back into a response envelope. Every operation resolves to exactly one
//! envelope; nothing is reported through `Err` or a panic.
//!
//! ## Normalization
//!
//! | Reply                                       | Envelope                    |
//! |---------------------------------------------|-----------------------------|
//! | 2xx with a usable body                      | success                     |
//! | 2xx with an undecodable or incomplete body  | error, [`ErrorKind::Decode`] |
//! | 400                                         | error, `MalformedPayload`   |
//! | 404                                         | error, `NotFound`           |
//! | 409                                         | error, `Conflict`           |
//! | any other status                            | error, `Service`            |
//! | no reply (`TransportError`)                 | error, `Transport`          |
//! | address rejected locally (nothing sent)     | error, `InvalidAddress`     |
//!
//! ## Layout
//!
//! The generic operations (`create`, `get`, `list`, `replace`, `delete`) live here and
//! work for any [`Resource`]. Typed shorthands taking plain identifiers are grouped by
//! kind in the [`database`], [`collection`], [`document`] and [`user`] modules, together
//! with the scoped handles returned by [`ResourceClient::database`] and
//! [`ResourceClient::collection`].

pub mod collection;
pub mod database;
pub mod document;
pub mod user;

pub use collection::CollectionRef;
pub use database::DatabaseRef;

use crate::address::{AddressError, LinkTarget, ResourceAddress, ResourceKind};
use crate::config::ClientConfig;
use crate::error::{DataError, ErrorKind};
use crate::model::{Resource, ResourceList};
use crate::response::{DataResponse, ListResponse, Operation, RequestDescriptor, Response};
use crate::transport::{status, ErrorBody, RawResponse, Transport};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn, Instrument};

type Decoder<T> = fn(&[u8]) -> Result<T, DataError>;

/// Async client for databases, collections, documents and users.
///
/// Cheap to clone: clones share the transport and the configuration.
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("account", &self.config.account)
            .finish_non_exhaustive()
    }
}

impl ResourceClient {
    pub fn new(transport: impl Transport, config: ClientConfig) -> Self {
        Self::from_shared(Arc::new(transport), Arc::new(config))
    }

    pub fn from_shared(transport: Arc<dyn Transport>, config: Arc<ClientConfig>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Generic operations
    // =========================================================================

    /// Creates `resource` in the feed of its kind under `parent`.
    #[instrument(skip(self, resource), fields(id = resource.id()))]
    pub async fn create<R: Resource>(
        &self,
        parent: Option<&ResourceAddress>,
        resource: &R,
    ) -> Response<R> {
        self.create_at(Ok(parent.cloned()), resource).await
    }

    #[instrument(skip(self), fields(link = %address))]
    pub async fn get<R: Resource>(&self, address: &ResourceAddress) -> Response<R> {
        self.get_at(Ok(address.clone())).await
    }

    /// Lists every resource of kind `R` under `parent`.
    #[instrument(skip(self))]
    pub async fn list<R: Resource>(&self, parent: Option<&ResourceAddress>) -> ListResponse<R> {
        self.list_at(Ok(parent.cloned())).await
    }

    /// Replaces the resource at `address` with `resource`.
    ///
    /// When `resource` carries a different identifier the resource is renamed; it keeps
    /// its resource id and self link, and `address` becomes not-found.
    #[instrument(skip(self, resource), fields(link = %address, id = resource.id()))]
    pub async fn replace<R: Resource>(
        &self,
        address: &ResourceAddress,
        resource: &R,
    ) -> Response<R> {
        self.replace_at(Ok(address.clone()), resource).await
    }

    /// Deletes the resource at `address` and, for containers, everything below it.
    #[instrument(skip(self), fields(link = %address))]
    pub async fn delete(&self, address: &ResourceAddress) -> DataResponse {
        self.delete_at(address.kind(), Ok(address.clone())).await
    }

    /// Re-reads a resource previously returned by the service.
    #[instrument(skip(self, resource), fields(id = resource.id()))]
    pub async fn refresh<R: Resource>(&self, resource: &R) -> Response<R> {
        self.get_at(resource.address()).await
    }

    /// Deletes a resource previously returned by the service.
    #[instrument(skip(self, resource), fields(id = resource.id()))]
    pub async fn delete_resource<R: Resource>(&self, resource: &R) -> DataResponse {
        self.delete_at(R::KIND, resource.address()).await
    }

    // =========================================================================
    // Continuations
    // =========================================================================

    /// Runs `operation` on the runtime and hands its envelope to `continuation`.
    ///
    /// The continuation runs exactly once, on a runtime worker, after the operation
    /// completes. The caller is never blocked.
    ///
    /// ```rust
    /// use docdb_client::lifecycle::LocalService;
    /// use docdb_client::config::ClientConfig;
    /// use docdb_client::signal::CompletionSignal;
    /// use std::time::Duration;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let service = LocalService::start(ClientConfig::default()).unwrap();
    ///     let (signal, completer) = CompletionSignal::new();
    ///
    ///     service.client().dispatch(
    ///         |client| async move { client.create_database("D1").await },
    ///         completer.into_continuation(),
    ///     );
    ///
    ///     let response = signal.wait(Duration::from_secs(1)).await.unwrap();
    ///     assert!(response.is_successful());
    ///     service.shutdown().await.unwrap();
    /// }
    /// ```
    pub fn dispatch<F, Fut, C>(&self, operation: F, continuation: C) -> JoinHandle<()>
    where
        F: FnOnce(ResourceClient) -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
        C: FnOnce(Fut::Output) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(
            async move {
                let output = operation(client).await;
                continuation(output);
            }
            .in_current_span(),
        )
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    pub(crate) async fn create_at<R: Resource>(
        &self,
        parent: Result<Option<ResourceAddress>, AddressError>,
        resource: &R,
    ) -> Response<R> {
        let address = parent
            .and_then(|parent| ResourceAddress::new(R::KIND, resource.id(), parent.as_ref()));
        let address = match address {
            Ok(address) => address,
            Err(e) => return reject(Operation::Create, R::KIND, e),
        };

        let request = RequestDescriptor::new(Operation::Create, R::KIND, address.feed_link());
        match serde_json::to_vec(resource) {
            Ok(body) => self.execute(request.with_body(body), decode_resource::<R>).await,
            Err(e) => unserializable(request, e),
        }
    }

    pub(crate) async fn get_at<R: Resource>(
        &self,
        address: Result<ResourceAddress, AddressError>,
    ) -> Response<R> {
        match address.and_then(expect_kind(R::KIND)) {
            Ok(address) => {
                let request = RequestDescriptor::new(Operation::Get, R::KIND, address.link());
                self.execute(request, decode_resource::<R>).await
            }
            Err(e) => reject(Operation::Get, R::KIND, e),
        }
    }

    pub(crate) async fn list_at<R: Resource>(
        &self,
        parent: Result<Option<ResourceAddress>, AddressError>,
    ) -> ListResponse<R> {
        let feed = parent.and_then(|parent| {
            LinkTarget::feed(parent.as_ref(), R::KIND).map(|feed| feed.link())
        });
        match feed {
            Ok(link) => {
                let request = RequestDescriptor::new(Operation::List, R::KIND, link);
                self.execute(request, decode_list::<R>).await
            }
            Err(e) => reject(Operation::List, R::KIND, e),
        }
    }

    pub(crate) async fn replace_at<R: Resource>(
        &self,
        address: Result<ResourceAddress, AddressError>,
        resource: &R,
    ) -> Response<R> {
        let address = address
            .and_then(expect_kind(R::KIND))
            .and_then(|address| address.with_id(resource.id()).map(|_| address));
        let address = match address {
            Ok(address) => address,
            Err(e) => return reject(Operation::Replace, R::KIND, e),
        };

        let request = RequestDescriptor::new(Operation::Replace, R::KIND, address.link());
        match serde_json::to_vec(resource) {
            Ok(body) => self.execute(request.with_body(body), decode_resource::<R>).await,
            Err(e) => unserializable(request, e),
        }
    }

    pub(crate) async fn delete_at(
        &self,
        kind: ResourceKind,
        address: Result<ResourceAddress, AddressError>,
    ) -> DataResponse {
        match address.and_then(expect_kind(kind)) {
            Ok(address) => {
                let request = RequestDescriptor::new(Operation::Delete, kind, address.link());
                self.execute(request, decode_nothing).await
            }
            Err(e) => reject(Operation::Delete, kind, e),
        }
    }

    async fn execute<T>(&self, request: RequestDescriptor, decode: Decoder<T>) -> Response<T> {
        debug!(operation = ?request.operation, link = %request.link, "Sending request");

        let response = match self.transport.send(request.clone()).await {
            Ok(raw) => normalize(request, raw, decode),
            Err(e) => Response::failure(request, e.into(), Vec::new()),
        };

        match response.error() {
            Some(error) => warn!(
                kind = ?error.kind,
                status = ?error.status,
                link = %response.request().link,
                error = %error.message,
                "Operation failed"
            ),
            None => debug!(status = ?response.status(), "Operation succeeded"),
        }
        response
    }
}

// =============================================================================
// Normalization helpers
// =============================================================================

fn normalize<T>(request: RequestDescriptor, raw: RawResponse, decode: Decoder<T>) -> Response<T> {
    let success = raw.is_success();
    let RawResponse { status: code, body } = raw;

    if success {
        return match decode(&body) {
            Ok(value) => Response::success(request, value, body, code),
            Err(e) => Response::failure(request, e.with_status(code), body),
        };
    }

    let kind = match code {
        status::BAD_REQUEST => ErrorKind::MalformedPayload,
        status::NOT_FOUND => ErrorKind::NotFound,
        status::CONFLICT => ErrorKind::Conflict,
        _ => ErrorKind::Service,
    };
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .map(|error| error.message)
        .unwrap_or_else(|_| format!("Service answered with status {code}"));
    Response::failure(request, DataError::new(kind, message).with_status(code), body)
}

fn reject<T>(operation: Operation, kind: ResourceKind, error: AddressError) -> Response<T> {
    let request = RequestDescriptor::new(operation, kind, error.link());
    warn!(operation = ?operation, link = %request.link, error = %error, "Request not sent");
    Response::failure(request, error.into(), Vec::new())
}

fn unserializable<T>(request: RequestDescriptor, error: serde_json::Error) -> Response<T> {
    warn!(link = %request.link, error = %error, "Request not sent");
    Response::failure(
        request,
        DataError::new(ErrorKind::MalformedPayload, error.to_string()),
        Vec::new(),
    )
}

fn expect_kind(
    kind: ResourceKind,
) -> impl FnOnce(ResourceAddress) -> Result<ResourceAddress, AddressError> {
    move |address| {
        if address.kind() == kind {
            Ok(address)
        } else {
            Err(AddressError::KindMismatch {
                expected: kind,
                link: address.link(),
            })
        }
    }
}

fn decode_resource<R: Resource>(body: &[u8]) -> Result<R, DataError> {
    let resource: R =
        serde_json::from_slice(body).map_err(|e| DataError::new(ErrorKind::Decode, e.to_string()))?;
    check_identity(&resource)?;
    Ok(resource)
}

fn decode_list<R: Resource>(body: &[u8]) -> Result<ResourceList<R>, DataError> {
    let list: ResourceList<R> =
        serde_json::from_slice(body).map_err(|e| DataError::new(ErrorKind::Decode, e.to_string()))?;
    for item in &list {
        check_identity(item)?;
    }
    Ok(list)
}

fn decode_nothing(_body: &[u8]) -> Result<(), DataError> {
    Ok(())
}

fn check_identity<R: Resource>(resource: &R) -> Result<(), DataError> {
    let missing = resource.properties().missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::new(
            ErrorKind::Decode,
            format!("{} `{}` is missing {}", R::KIND, resource.id(), missing.join(", ")),
        ))
    }
}
