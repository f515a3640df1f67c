//! Database operations, and the [`DatabaseRef`] handle scoped to one database.

use super::{CollectionRef, ResourceClient};
use crate::address::{AddressError, ResourceAddress, ResourceKind};
use crate::model::{Database, DocumentCollection, Resource, User};
use crate::response::{DataResponse, ListResponse, Response};
use tracing::instrument;

impl ResourceClient {
    #[instrument(skip(self))]
    pub async fn create_database(&self, id: &str) -> Response<Database> {
        self.create_at(Ok(None), &Database::new(id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_database(&self, id: &str) -> Response<Database> {
        self.get_at(ResourceAddress::database(id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_databases(&self) -> ListResponse<Database> {
        self.list_at(Ok(None)).await
    }

    #[instrument(skip(self))]
    pub async fn replace_database(&self, id: &str, new_id: &str) -> Response<Database> {
        self.replace_at(ResourceAddress::database(id), &Database::new(new_id))
            .await
    }

    /// Deletes the database together with all of its collections, documents and users.
    #[instrument(skip(self))]
    pub async fn delete_database(&self, id: &str) -> DataResponse {
        self.delete_at(ResourceKind::Database, ResourceAddress::database(id))
            .await
    }

    /// Operations scoped to a database previously returned by the service.
    ///
    /// A database that never came back from the service has no address; every operation
    /// on its handle then yields an `InvalidAddress` envelope.
    pub fn database(&self, database: &Database) -> DatabaseRef<'_> {
        DatabaseRef {
            client: self,
            address: database.address(),
        }
    }
}

/// A [`ResourceClient`] bound to one database.
#[derive(Debug, Clone)]
pub struct DatabaseRef<'a> {
    client: &'a ResourceClient,
    address: Result<ResourceAddress, AddressError>,
}

impl<'a> DatabaseRef<'a> {
    pub fn address(&self) -> Result<&ResourceAddress, &AddressError> {
        self.address.as_ref()
    }

    fn parent(&self) -> Result<Option<ResourceAddress>, AddressError> {
        self.address.clone().map(Some)
    }

    fn child(&self, kind: ResourceKind, id: &str) -> Result<ResourceAddress, AddressError> {
        self.address
            .clone()
            .and_then(|database| ResourceAddress::new(kind, id, Some(&database)))
    }

    /// Re-reads the database itself.
    pub async fn read(&self) -> Response<Database> {
        self.client.get_at(self.address.clone()).await
    }

    /// Deletes the database itself, cascading to everything below it.
    pub async fn delete(&self) -> DataResponse {
        self.client
            .delete_at(ResourceKind::Database, self.address.clone())
            .await
    }

    // Collections

    pub async fn create_collection(&self, id: &str) -> Response<DocumentCollection> {
        self.client
            .create_at(self.parent(), &DocumentCollection::new(id))
            .await
    }

    pub async fn get_collection(&self, id: &str) -> Response<DocumentCollection> {
        self.client
            .get_at(self.child(ResourceKind::Collection, id))
            .await
    }

    pub async fn get_collections(&self) -> ListResponse<DocumentCollection> {
        self.client.list_at(self.parent()).await
    }

    pub async fn replace_collection(&self, id: &str, new_id: &str) -> Response<DocumentCollection> {
        self.client
            .replace_at(
                self.child(ResourceKind::Collection, id),
                &DocumentCollection::new(new_id),
            )
            .await
    }

    pub async fn delete_collection(&self, id: &str) -> DataResponse {
        self.client
            .delete_at(
                ResourceKind::Collection,
                self.child(ResourceKind::Collection, id),
            )
            .await
    }

    /// Scoped handle for a collection of this database, by identifier.
    pub fn collection(&self, id: &str) -> CollectionRef<'a> {
        CollectionRef::new(self.client, self.child(ResourceKind::Collection, id))
    }

    // Users

    pub async fn create_user(&self, id: &str) -> Response<User> {
        self.client.create_at(self.parent(), &User::new(id)).await
    }

    pub async fn get_user(&self, id: &str) -> Response<User> {
        self.client.get_at(self.child(ResourceKind::User, id)).await
    }

    pub async fn get_users(&self) -> ListResponse<User> {
        self.client.list_at(self.parent()).await
    }

    pub async fn replace_user(&self, id: &str, new_id: &str) -> Response<User> {
        self.client
            .replace_at(self.child(ResourceKind::User, id), &User::new(new_id))
            .await
    }

    pub async fn delete_user(&self, id: &str) -> DataResponse {
        self.client
            .delete_at(ResourceKind::User, self.child(ResourceKind::User, id))
            .await
    }
}
