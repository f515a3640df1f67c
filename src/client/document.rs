//! Document operations addressed by identifiers.

use super::ResourceClient;
use crate::address::{ResourceAddress, ResourceKind};
use crate::model::Document;
use crate::response::{DataResponse, ListResponse, Response};
use tracing::instrument;

impl ResourceClient {
    /// Creates `document` in collection `collection_id` of database `database_id`.
    #[instrument(skip(self, document), fields(id = %document.properties.id))]
    pub async fn create_document(
        &self,
        document: &Document,
        collection_id: &str,
        database_id: &str,
    ) -> Response<Document> {
        self.create_at(
            ResourceAddress::collection(database_id, collection_id).map(Some),
            document,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_document(
        &self,
        id: &str,
        collection_id: &str,
        database_id: &str,
    ) -> Response<Document> {
        self.get_at(ResourceAddress::document(database_id, collection_id, id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_documents(
        &self,
        collection_id: &str,
        database_id: &str,
    ) -> ListResponse<Document> {
        self.list_at(ResourceAddress::collection(database_id, collection_id).map(Some))
            .await
    }

    /// Replaces the content of document `id`; a different `document.id` renames it.
    #[instrument(skip(self, document), fields(new_id = %document.properties.id))]
    pub async fn replace_document(
        &self,
        id: &str,
        document: &Document,
        collection_id: &str,
        database_id: &str,
    ) -> Response<Document> {
        self.replace_at(
            ResourceAddress::document(database_id, collection_id, id),
            document,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_document(
        &self,
        id: &str,
        collection_id: &str,
        database_id: &str,
    ) -> DataResponse {
        self.delete_at(
            ResourceKind::Document,
            ResourceAddress::document(database_id, collection_id, id),
        )
        .await
    }
}
