//! Shared fixture for the integration tests: a local service with one database and one
//! collection in place, plus envelope assertions.

#![allow(dead_code)]

use docdb_client::client::ResourceClient;
use docdb_client::config::ClientConfig;
use docdb_client::error::ErrorKind;
use docdb_client::lifecycle::{try_setup_tracing, LocalService};
use docdb_client::model::{Database, DocumentCollection, Resource, ResourceList};
use docdb_client::response::Response;

pub const DATABASE_ID: &str = "TestDb";
pub const COLLECTION_ID: &str = "TestColl";

pub struct Fixture {
    service: LocalService,
    pub database: Database,
    pub collection: DocumentCollection,
}

impl Fixture {
    /// Starts a service and ensures the test database and collection exist.
    pub async fn start() -> Self {
        try_setup_tracing();
        let service = LocalService::start(ClientConfig::default()).expect("valid config");

        let database = ensure_database(service.client(), DATABASE_ID).await;
        let collection = ensure_collection(service.client(), COLLECTION_ID, DATABASE_ID).await;

        Self {
            service,
            database,
            collection,
        }
    }

    pub fn client(&self) -> &ResourceClient {
        self.service.client()
    }

    /// Deletes the test database and stops the service.
    pub async fn teardown(self) {
        let deleted = self.client().delete_database(DATABASE_ID).await;
        assert!(deleted.is_successful(), "teardown failed: {:?}", deleted.error());
        self.service.shutdown().await.expect("clean shutdown");
    }
}

pub async fn ensure_database(client: &ResourceClient, id: &str) -> Database {
    let existing = client.get_database(id).await;
    if let Some(database) = existing.into_resource() {
        return database;
    }
    let created = client.create_database(id).await;
    assert_resource_response(&created);
    created.into_resource().expect("database created")
}

pub async fn ensure_collection(
    client: &ResourceClient,
    id: &str,
    database_id: &str,
) -> DocumentCollection {
    let existing = client.get_collection(id, database_id).await;
    if let Some(collection) = existing.into_resource() {
        return collection;
    }
    let created = client.create_collection(id, database_id).await;
    assert_resource_response(&created);
    created.into_resource().expect("collection created")
}

/// Successful, with every identity field populated.
pub fn assert_resource_response<R: Resource>(response: &Response<R>) {
    assert!(
        response.is_successful(),
        "expected success, got {:?}",
        response.error()
    );
    assert!(!response.is_errored());
    let resource = response.resource().expect("resource present");
    let properties = resource.properties();
    assert!(
        properties.is_populated(),
        "missing identity fields: {:?}",
        properties.missing_fields()
    );
    assert!(!response.json_data().is_empty());
}

pub fn assert_list_response<R: Resource>(response: &Response<ResourceList<R>>, populated: bool) {
    assert!(
        response.is_successful(),
        "expected success, got {:?}",
        response.error()
    );
    assert_eq!(response.is_populated(), populated);
    for item in response.items() {
        assert!(item.properties().is_populated());
    }
}

pub fn assert_error_response<T>(response: &Response<T>, kind: ErrorKind) {
    assert!(response.is_errored(), "expected {kind:?} error, got success");
    assert!(!response.is_successful());
    assert!(response.resource().is_none());
    assert_eq!(response.error().map(|e| e.kind), Some(kind));
}
