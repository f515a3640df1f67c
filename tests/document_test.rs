mod common;

use common::{
    assert_error_response, assert_list_response, assert_resource_response, Fixture, COLLECTION_ID,
    DATABASE_ID,
};
use docdb_client::error::ErrorKind;
use docdb_client::model::{Document, Resource};
use serde_json::json;

#[tokio::test]
async fn test_document_crud() {
    let fixture = Fixture::start().await;
    let client = fixture.client();

    let document = Document::new("doc-1").with("title", "Notes").with("pages", 3);
    let created = client
        .create_document(&document, COLLECTION_ID, DATABASE_ID)
        .await;
    assert_resource_response(&created);
    let stored = created.resource().unwrap();
    assert_eq!(stored.get("title"), Some(&json!("Notes")));
    assert_eq!(stored.attachments_link, "attachments/");

    let fetched = client
        .get_document("doc-1", COLLECTION_ID, DATABASE_ID)
        .await;
    assert_resource_response(&fetched);
    assert_eq!(fetched.resource().unwrap().get("pages"), Some(&json!(3)));

    let listed = client.get_documents(COLLECTION_ID, DATABASE_ID).await;
    assert_list_response(&listed, true);

    let deleted = client
        .delete_document("doc-1", COLLECTION_ID, DATABASE_ID)
        .await;
    assert!(deleted.is_successful());
    assert_list_response(&client.get_documents(COLLECTION_ID, DATABASE_ID).await, false);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_replace_document_overwrites_fields() {
    let fixture = Fixture::start().await;
    let client = fixture.client();

    let original = client
        .create_document(
            &Document::new("doc-1").with("title", "Draft").with("stale", true),
            COLLECTION_ID,
            DATABASE_ID,
        )
        .await
        .into_resource()
        .unwrap();

    let updated = Document::new("doc-1").with("title", "Final");
    let replaced = client
        .replace_document("doc-1", &updated, COLLECTION_ID, DATABASE_ID)
        .await;
    assert_resource_response(&replaced);
    let document = replaced.resource().unwrap();
    assert_eq!(document.get("title"), Some(&json!("Final")));
    assert_eq!(document.get("stale"), None);
    assert_eq!(document.properties.resource_id, original.properties.resource_id);
    assert_ne!(document.properties.etag, original.properties.etag);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_replace_document_renames() {
    let fixture = Fixture::start().await;
    let scoped = fixture.client().collection(&fixture.collection);

    scoped.create_document(&Document::new("old")).await;
    let renamed = scoped
        .replace_document("old", &Document::new("new").with("v", 2))
        .await;
    assert_resource_response(&renamed);
    assert_eq!(renamed.resource().unwrap().id(), "new");

    assert_error_response(&scoped.get_document("old").await, ErrorKind::NotFound);
    assert_resource_response(&scoped.get_document("new").await);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_collection_handle_by_id() {
    let fixture = Fixture::start().await;
    let scoped = fixture
        .client()
        .database(&fixture.database)
        .collection(COLLECTION_ID);

    let created = scoped.create_document(&Document::new("X")).await;
    assert_resource_response(&created);
    assert_eq!(scoped.get_documents().await.items().len(), 1);

    let collection = scoped.read().await;
    assert_resource_response(&collection);

    assert!(scoped.delete().await.is_successful());
    assert_error_response(&scoped.get_document("X").await, ErrorKind::NotFound);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_document_in_missing_collection_is_not_found() {
    let fixture = Fixture::start().await;

    let response = fixture
        .client()
        .create_document(&Document::new("X"), "NoSuchColl", DATABASE_ID)
        .await;
    assert_error_response(&response, ErrorKind::NotFound);
    assert_eq!(response.status(), Some(404));
    assert!(response.json_str().unwrap().contains("NotFound"));

    fixture.teardown().await;
}
