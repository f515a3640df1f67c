//! Demo: a short create/list/replace/delete flow against the local service.
//!
//! Operations are handed to
//! [`ResourceClient::dispatch`](docdb_client::client::ResourceClient::dispatch) and their
//! envelopes collected through [`CompletionSignal`]s, the way a callback-driven caller would.

use docdb_client::client::ResourceClient;
use docdb_client::config::ClientConfig;
use docdb_client::lifecycle::{setup_tracing, LocalService};
use docdb_client::model::Document;
use docdb_client::signal::{CompletionSignal, WaitError};
use std::future::Future;
use tracing::{error, info, Instrument};

/// Dispatches `operation` and waits for its continuation to fire.
async fn run<F, Fut>(client: &ResourceClient, operation: F) -> Result<Fut::Output, WaitError>
where
    F: FnOnce(ResourceClient) -> Fut + Send + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    let (signal, completer) = CompletionSignal::new();
    client.dispatch(operation, completer.into_continuation());
    signal.wait(client.config().default_timeout).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = ClientConfig::from_env()?;
    info!(account = %config.account, "Starting demo");
    let service = LocalService::start(config)?;
    let client = service.client().clone();

    let span = tracing::info_span!("setup");
    async {
        let database = run(&client, |c| async move { c.create_database("D1").await }).await?;
        info!(id = ?database.resource().map(|d| &d.properties.resource_id), "Database created");

        let collection =
            run(&client, |c| async move { c.create_collection("C1", "D1").await }).await?;
        info!(ok = collection.is_successful(), "Collection created");
        Ok::<_, WaitError>(())
    }
    .instrument(span)
    .await?;

    for (id, title) in [("doc-1", "Notes"), ("doc-2", "Plans")] {
        let document = Document::new(id).with("title", title);
        let created = run(&client, move |c| async move {
            c.create_document(&document, "C1", "D1").await
        })
        .await?;
        info!(id, ok = created.is_successful(), "Document created");
    }

    let listed = run(&client, |c| async move { c.get_documents("C1", "D1").await }).await?;
    info!(count = listed.items().len(), "Documents listed");

    let users = run(&client, |c| async move {
        c.create_user("U1", "D1").await;
        c.replace_user("U1", "U2", "D1").await
    })
    .await?;
    match users.into_result() {
        Ok(user) => info!(
            id = %user.properties.id,
            self_link = %user.properties.self_link,
            "User renamed"
        ),
        Err(e) => error!(error = %e, "Rename failed"),
    }

    let deleted = run(&client, |c| async move { c.delete_database("D1").await }).await?;
    info!(ok = deleted.is_successful(), "Database deleted");

    let gone = client.get_user("U2", "D1").await;
    info!(not_found = gone.error().is_some_and(|e| e.is_not_found()), "Cascade checked");

    drop(client);
    service.shutdown().await?;
    info!("Demo finished");
    Ok(())
}
