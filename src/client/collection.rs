//! Collection operations, and the [`CollectionRef`] handle scoped to one collection.

use super::ResourceClient;
use crate::address::{AddressError, ResourceAddress, ResourceKind};
use crate::model::{Document, DocumentCollection, Resource};
use crate::response::{DataResponse, ListResponse, Response};
use tracing::instrument;

impl ResourceClient {
    #[instrument(skip(self))]
    pub async fn create_collection(
        &self,
        id: &str,
        database_id: &str,
    ) -> Response<DocumentCollection> {
        self.create_at(
            ResourceAddress::database(database_id).map(Some),
            &DocumentCollection::new(id),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_collection(
        &self,
        id: &str,
        database_id: &str,
    ) -> Response<DocumentCollection> {
        self.get_at(ResourceAddress::collection(database_id, id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_collections(&self, database_id: &str) -> ListResponse<DocumentCollection> {
        self.list_at(ResourceAddress::database(database_id).map(Some))
            .await
    }

    #[instrument(skip(self))]
    pub async fn replace_collection(
        &self,
        id: &str,
        new_id: &str,
        database_id: &str,
    ) -> Response<DocumentCollection> {
        self.replace_at(
            ResourceAddress::collection(database_id, id),
            &DocumentCollection::new(new_id),
        )
        .await
    }

    /// Deletes the collection and every document in it.
    #[instrument(skip(self))]
    pub async fn delete_collection(&self, id: &str, database_id: &str) -> DataResponse {
        self.delete_at(
            ResourceKind::Collection,
            ResourceAddress::collection(database_id, id),
        )
        .await
    }

    /// Operations scoped to a collection previously returned by the service.
    pub fn collection(&self, collection: &DocumentCollection) -> CollectionRef<'_> {
        CollectionRef::new(self, collection.address())
    }
}

/// A [`ResourceClient`] bound to one collection.
#[derive(Debug, Clone)]
pub struct CollectionRef<'a> {
    client: &'a ResourceClient,
    address: Result<ResourceAddress, AddressError>,
}

impl<'a> CollectionRef<'a> {
    pub(crate) fn new(
        client: &'a ResourceClient,
        address: Result<ResourceAddress, AddressError>,
    ) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Result<&ResourceAddress, &AddressError> {
        self.address.as_ref()
    }

    fn document(&self, id: &str) -> Result<ResourceAddress, AddressError> {
        self.address
            .clone()
            .and_then(|collection| {
                ResourceAddress::new(ResourceKind::Document, id, Some(&collection))
            })
    }

    pub async fn read(&self) -> Response<DocumentCollection> {
        self.client.get_at(self.address.clone()).await
    }

    pub async fn delete(&self) -> DataResponse {
        self.client
            .delete_at(ResourceKind::Collection, self.address.clone())
            .await
    }

    pub async fn create_document(&self, document: &Document) -> Response<Document> {
        self.client
            .create_at(self.address.clone().map(Some), document)
            .await
    }

    pub async fn get_document(&self, id: &str) -> Response<Document> {
        self.client.get_at(self.document(id)).await
    }

    pub async fn get_documents(&self) -> ListResponse<Document> {
        self.client.list_at(self.address.clone().map(Some)).await
    }

    /// Replaces the document `id` with `document`, renaming it if the identifiers differ.
    pub async fn replace_document(&self, id: &str, document: &Document) -> Response<Document> {
        self.client.replace_at(self.document(id), document).await
    }

    pub async fn delete_document(&self, id: &str) -> DataResponse {
        self.client
            .delete_at(ResourceKind::Document, self.document(id))
            .await
    }
}
