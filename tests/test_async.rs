//! AsyncImporter tests (requires the `async` feature).

#![cfg(feature = "async")]

mod common;

use common::RecordingStore;
use scryfall_import::{AsyncImporter, ImportOptions, Importer};
use std::time::Duration;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread")]
async fn async_import_runs_pipeline() {
    let server = MockServer::start().await;
    common::mount_set(&server, "tst", 3, 2).await;
    common::mount_pages(&server, "tst", vec![common::cards_json("tst", 0..3)], 1).await;

    let store = RecordingStore::default();
    let importer = AsyncImporter::build(
        Importer::builder()
            .base_url(&server.uri())
            .request_interval(Duration::ZERO)
            .store(store.clone()),
    )
    .await
    .unwrap();

    let result = importer
        .import_set("tst", ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(result.cards_imported, 3);
    assert!(result.validation_passed);
    assert_eq!(store.batch_sizes(), vec![3]);
    importer.close().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn run_exposes_importer() {
    let importer = AsyncImporter::build(Importer::builder().batch_size(42))
        .await
        .unwrap();

    let batch_size = importer.run(|i| Ok(i.batch_size())).await.unwrap();
    assert_eq!(batch_size, 42);
    importer.close().await.unwrap();
}
