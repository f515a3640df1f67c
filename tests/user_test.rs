mod common;

use common::{
    assert_error_response, assert_list_response, assert_resource_response, Fixture, DATABASE_ID,
};
use docdb_client::error::ErrorKind;
use docdb_client::model::{Resource, User};

const USER_ID: &str = "TestUser";
const NEW_USER_ID: &str = "NewTestUser";

#[tokio::test]
async fn test_create_user() {
    let fixture = Fixture::start().await;

    let response = fixture.client().create_user(USER_ID, DATABASE_ID).await;
    assert_resource_response(&response);
    assert_eq!(response.resource().unwrap().id(), USER_ID);
    assert_eq!(
        response.resource().unwrap().properties.alt_link,
        format!("dbs/{DATABASE_ID}/users/{USER_ID}")
    );

    fixture.teardown().await;
}

#[tokio::test]
async fn test_create_user_twice_conflicts() {
    let fixture = Fixture::start().await;

    let first = fixture.client().create_user(USER_ID, DATABASE_ID).await;
    assert_resource_response(&first);

    let second = fixture.client().create_user(USER_ID, DATABASE_ID).await;
    assert_error_response(&second, ErrorKind::Conflict);
    assert_eq!(second.status(), Some(409));

    fixture.teardown().await;
}

#[tokio::test]
async fn test_get_user() {
    let fixture = Fixture::start().await;
    fixture.client().create_user(USER_ID, DATABASE_ID).await;

    let response = fixture.client().get_user(USER_ID, DATABASE_ID).await;
    assert_resource_response(&response);
    assert_eq!(response.resource().unwrap().id(), USER_ID);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_get_users() {
    let fixture = Fixture::start().await;

    let empty = fixture.client().get_users(DATABASE_ID).await;
    assert_list_response(&empty, false);

    fixture.client().create_user(USER_ID, DATABASE_ID).await;
    let listed = fixture.client().get_users(DATABASE_ID).await;
    assert_list_response(&listed, true);
    assert_eq!(listed.items().len(), 1);
    assert_eq!(listed.resource().unwrap().count, 1);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_get_users_from_database_resource() {
    let fixture = Fixture::start().await;
    let scoped = fixture.client().database(&fixture.database);

    let created = scoped.create_user(USER_ID).await;
    assert_resource_response(&created);

    let listed = scoped.get_users().await;
    assert_list_response(&listed, true);

    let fetched = scoped.get_user(USER_ID).await;
    assert_resource_response(&fetched);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_replace_user() {
    let fixture = Fixture::start().await;
    let created = fixture.client().create_user(USER_ID, DATABASE_ID).await;
    let original = created.resource().unwrap().clone();

    let replaced = fixture
        .client()
        .replace_user(USER_ID, NEW_USER_ID, DATABASE_ID)
        .await;
    assert_resource_response(&replaced);
    let renamed = replaced.resource().unwrap();
    assert_eq!(renamed.id(), NEW_USER_ID);
    assert_eq!(renamed.properties.resource_id, original.properties.resource_id);
    assert_eq!(renamed.properties.self_link, original.properties.self_link);

    let new_user = fixture.client().get_user(NEW_USER_ID, DATABASE_ID).await;
    assert_resource_response(&new_user);

    let old_user = fixture.client().get_user(USER_ID, DATABASE_ID).await;
    assert_error_response(&old_user, ErrorKind::NotFound);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_replace_missing_user_is_not_found() {
    let fixture = Fixture::start().await;

    let response = fixture
        .client()
        .replace_user(USER_ID, NEW_USER_ID, DATABASE_ID)
        .await;
    assert_error_response(&response, ErrorKind::NotFound);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_replace_missing_user_onto_existing_id_is_not_found() {
    let fixture = Fixture::start().await;
    let existing = fixture.client().create_user(NEW_USER_ID, DATABASE_ID).await;
    assert_resource_response(&existing);

    let response = fixture
        .client()
        .replace_user(USER_ID, NEW_USER_ID, DATABASE_ID)
        .await;
    assert_error_response(&response, ErrorKind::NotFound);
    assert_eq!(response.status(), Some(404));

    let untouched = fixture.client().get_user(NEW_USER_ID, DATABASE_ID).await;
    assert_resource_response(&untouched);
    assert_eq!(
        untouched.resource().unwrap().properties.resource_id,
        existing.resource().unwrap().properties.resource_id
    );

    fixture.teardown().await;
}

#[tokio::test]
async fn test_delete_user() {
    let fixture = Fixture::start().await;
    fixture.client().create_user(USER_ID, DATABASE_ID).await;

    let deleted = fixture.client().delete_user(USER_ID, DATABASE_ID).await;
    assert!(deleted.is_successful());
    assert!(deleted.json_data().is_empty());
    assert_eq!(deleted.status(), Some(204));

    let again = fixture.client().delete_user(USER_ID, DATABASE_ID).await;
    assert_error_response(&again, ErrorKind::NotFound);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_delete_user_by_resource() {
    let fixture = Fixture::start().await;
    let user: User = fixture
        .client()
        .create_user(USER_ID, DATABASE_ID)
        .await
        .into_resource()
        .unwrap();

    let deleted = fixture.client().delete_user_resource(&user, DATABASE_ID).await;
    assert!(deleted.is_successful());

    let refreshed = fixture.client().refresh(&user).await;
    assert_error_response(&refreshed, ErrorKind::NotFound);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_user_in_missing_database_is_not_found() {
    let fixture = Fixture::start().await;

    let response = fixture.client().create_user(USER_ID, "NoSuchDb").await;
    assert_error_response(&response, ErrorKind::NotFound);
    assert_eq!(response.request().link, "dbs/NoSuchDb/users");

    fixture.teardown().await;
}

#[tokio::test]
async fn test_user_with_empty_database_id_is_invalid() {
    let fixture = Fixture::start().await;

    let response = fixture.client().get_user(USER_ID, "").await;
    assert_error_response(&response, ErrorKind::InvalidAddress);
    assert_eq!(response.status(), None);
    assert_eq!(response.request().link, format!("dbs//users/{USER_ID}"));

    fixture.teardown().await;
}
