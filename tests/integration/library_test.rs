//! Library model integration tests
//!
//! Upsert-by-book, the read shortcut, removal and the failure paths.

use std::time::Duration;

use assert_matches::assert_matches;
use bookworm::client::{AutoConfirm, ClientError, LibraryModel};
use bookworm::shared::{Shelf, ShelfPatch};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{FakeBackend, StoredEntry, TestSession, TestUser};
use crate::{assert_ok, assert_single_entry};

async fn signed_in(backend: &FakeBackend) -> (TestSession, LibraryModel) {
    let ada = TestUser::reader();
    backend.add_user(&ada).await;
    let session = TestSession::new(&backend.url());
    assert!(session.store.login(&ada.email, &ada.password).await);
    let library = LibraryModel::new(session.api.clone(), session.store.view());
    (session, library)
}

#[tokio::test]
async fn test_upsert_twice_keeps_one_entry() {
    let backend = FakeBackend::start().await;
    let (_session, mut library) = signed_in(&backend).await;

    assert_ok!(library.upsert("b1", ShelfPatch::shelf(Shelf::Want)).await);
    let entries = assert_ok!(library.upsert("b1", ShelfPatch::shelf(Shelf::Want)).await);

    let entry = assert_single_entry!(entries, "b1");
    assert_eq!(entry.shelf, Shelf::Want);
    assert_eq!(entry.progress, 0);
    assert_eq!(backend.library().len(), 1);
}

#[tokio::test]
async fn test_every_mutation_refetches() {
    let backend = FakeBackend::start().await;
    let (_session, mut library) = signed_in(&backend).await;

    assert_ok!(library.set_shelf("b1", Shelf::Current).await);
    assert_ok!(library.set_progress("b1", 40).await);

    assert_eq!(backend.requests("POST", "/api/library").await.len(), 2);
    assert_eq!(backend.requests("GET", "/api/library/me").await.len(), 2);
    assert_eq!(library.entry("b1").map(|e| e.progress), Some(40));
}

#[tokio::test]
async fn test_read_forces_full_progress_in_one_request() {
    let backend = FakeBackend::start().await;
    backend.seed_entry("b1", "current", 10);
    let (_session, mut library) = signed_in(&backend).await;

    let entries = assert_ok!(library.set_shelf("b1", Shelf::Read).await);
    let entry = assert_single_entry!(entries, "b1");
    assert_eq!(entry.shelf, Shelf::Read);
    assert_eq!(entry.progress, 100);

    let upserts = backend.requests("POST", "/api/library").await;
    assert_eq!(upserts.len(), 1);
    let body: Value = serde_json::from_slice(&upserts[0].body).unwrap();
    assert_eq!(body, json!({ "bookId": "b1", "shelf": "read", "progress": 100 }));
}

#[tokio::test]
async fn test_adding_straight_to_read_finishes_the_book() {
    let backend = FakeBackend::start().await;
    let (_session, mut library) = signed_in(&backend).await;

    let entries = assert_ok!(library.upsert("b1", ShelfPatch::shelf(Shelf::Read)).await);
    let entry = assert_single_entry!(entries, "b1");
    assert_eq!((entry.shelf, entry.progress), (Shelf::Read, 100));

    let upserts = backend.requests("POST", "/api/library").await;
    assert_eq!(upserts.len(), 1);
    let body: Value = serde_json::from_slice(&upserts[0].body).unwrap();
    assert_eq!(body, json!({ "bookId": "b1", "shelf": "read", "progress": 100 }));
}

#[tokio::test]
async fn test_progress_does_not_move_shelf() {
    let backend = FakeBackend::start().await;
    backend.seed_entry("b1", "want", 0);
    let (_session, mut library) = signed_in(&backend).await;

    assert_ok!(library.set_progress("b1", 100).await);

    assert_eq!(
        backend.library(),
        vec![StoredEntry {
            book_id: "b1".into(),
            shelf: "want".into(),
            progress: 100,
        }]
    );
    let upserts = backend.requests("POST", "/api/library").await;
    let body: Value = serde_json::from_slice(&upserts[0].body).unwrap();
    assert_eq!(body, json!({ "bookId": "b1", "progress": 100 }));
}

#[tokio::test]
async fn test_out_of_range_progress_is_not_sent() {
    let backend = FakeBackend::start().await;
    let (_session, mut library) = signed_in(&backend).await;

    let err = library.set_progress("b1", 150).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
    assert!(backend.requests("POST", "/api/library").await.is_empty());
}

#[tokio::test]
async fn test_empty_patch_is_rejected() {
    let backend = FakeBackend::start().await;
    let (_session, mut library) = signed_in(&backend).await;

    let err = library.upsert("b1", ShelfPatch::default()).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let backend = FakeBackend::start().await;
    let session = TestSession::new(&backend.url());
    session.store.restore().await;
    let mut library = LibraryModel::new(session.api.clone(), session.store.view());

    assert_matches!(library.fetch_mine().await, Err(ClientError::MissingCredential));
    assert_matches!(
        library.set_shelf("b1", Shelf::Want).await,
        Err(ClientError::MissingCredential)
    );
    let err = library.remove("b1", &AutoConfirm(true)).await.unwrap_err();
    assert_eq!(err.user_message(), "No token found. Please login again.");

    assert_eq!(backend.request_count().await, 0);
}

#[tokio::test]
async fn test_remove_asks_first() {
    let backend = FakeBackend::start().await;
    backend.seed_entry("b1", "want", 0);
    let (_session, mut library) = signed_in(&backend).await;
    assert_ok!(library.fetch_mine().await);

    assert!(!assert_ok!(library.remove("b1", &AutoConfirm(false)).await));
    assert_eq!(backend.library().len(), 1);
    assert_eq!(library.entries().len(), 1);

    assert!(assert_ok!(library.remove("b1", &AutoConfirm(true)).await));
    assert!(backend.library().is_empty());
    assert!(library.entry("b1").is_none());
}

#[tokio::test]
async fn test_failed_remove_keeps_local_list() {
    let backend = FakeBackend::start().await;
    backend.seed_entry("b1", "read", 100);
    let (_session, mut library) = signed_in(&backend).await;
    assert_ok!(library.fetch_mine().await);

    let err = library.remove("ghost", &AutoConfirm(true)).await.unwrap_err();
    assert_eq!(err.user_message(), "Not in library");
    assert_eq!(library.entries().len(), 1);
}

#[tokio::test]
async fn test_non_array_library_degrades_to_empty() {
    let backend = FakeBackend::start().await;
    let ada = TestUser::reader();
    backend.add_user(&ada).await;
    let session = TestSession::new(&backend.url());
    assert!(session.store.login(&ada.email, &ada.password).await);

    // Overrides the stateful list mounted by the fake backend for this server
    backend.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/library/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&backend.server)
        .await;

    let mut library = LibraryModel::new(session.api.clone(), session.store.view());
    let entries = assert_ok!(library.fetch_mine().await);
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_server_error_on_fetch_degrades_to_empty() {
    let backend = FakeBackend::start().await;
    let ada = TestUser::reader();
    backend.add_user(&ada).await;
    let session = TestSession::new(&backend.url());
    assert!(session.store.login(&ada.email, &ada.password).await);
    backend.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/library/me"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&backend.server)
        .await;

    let mut library = LibraryModel::new(session.api.clone(), session.store.view());
    assert!(assert_ok!(library.fetch_mine().await).is_empty());
    assert_eq!(library.stats().total(), 0);
}

#[tokio::test]
async fn test_teardown_discards_late_results() {
    let backend = FakeBackend::start().await;
    let (_session, mut library) = signed_in(&backend).await;

    library.teardown();
    assert_matches!(library.fetch_mine().await, Err(ClientError::Cancelled));
    assert!(backend.requests("GET", "/api/library/me").await.is_empty());
}

#[tokio::test]
async fn test_cancel_while_fetch_is_in_flight() {
    let backend = FakeBackend::start().await;
    backend.seed_entry("b1", "current", 30);
    let (_session, mut library) = signed_in(&backend).await;
    assert_ok!(library.fetch_mine().await);

    Mock::given(method("GET"))
        .and(path("/api/library/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(10)),
        )
        .with_priority(1)
        .mount(&backend.server)
        .await;

    let handle = library.scope_handle();
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.cancel();
    });

    let outcome = tokio::time::timeout(Duration::from_secs(5), library.fetch_mine())
        .await
        .expect("cancellation should not wait for the delayed response");
    assert_matches!(outcome, Err(ClientError::Cancelled));
    canceller.await.unwrap();

    assert_eq!(backend.requests("GET", "/api/library/me").await.len(), 2);
    let entry = assert_single_entry!(library.entries(), "b1");
    assert_eq!((entry.shelf, entry.progress), (Shelf::Current, 30));
}
