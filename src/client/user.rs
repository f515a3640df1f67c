//! User operations addressed by identifiers.

use super::ResourceClient;
use crate::address::{ResourceAddress, ResourceKind};
use crate::model::{Resource, User};
use crate::response::{DataResponse, ListResponse, Response};
use tracing::instrument;

impl ResourceClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, id: &str, database_id: &str) -> Response<User> {
        self.create_at(ResourceAddress::database(database_id).map(Some), &User::new(id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str, database_id: &str) -> Response<User> {
        self.get_at(ResourceAddress::user(database_id, id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_users(&self, database_id: &str) -> ListResponse<User> {
        self.list_at(ResourceAddress::database(database_id).map(Some))
            .await
    }

    /// Renames user `id` to `new_id`. The user keeps its resource id and self link.
    #[instrument(skip(self))]
    pub async fn replace_user(&self, id: &str, new_id: &str, database_id: &str) -> Response<User> {
        self.replace_at(ResourceAddress::user(database_id, id), &User::new(new_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str, database_id: &str) -> DataResponse {
        self.delete_at(ResourceKind::User, ResourceAddress::user(database_id, id))
            .await
    }

    /// Deletes `user` from database `database_id`, addressing it by its identifier.
    #[instrument(skip(self, user), fields(id = user.id()))]
    pub async fn delete_user_resource(&self, user: &User, database_id: &str) -> DataResponse {
        self.delete_at(ResourceKind::User, ResourceAddress::user(database_id, user.id()))
            .await
    }
}
