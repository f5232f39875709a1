//! Catalog, review and tutorial integration tests

use assert_matches::assert_matches;
use bookworm::client::catalog::{filter_books, paginate, BrowseFilter};
use bookworm::client::{CatalogClient, ClientError, LibraryModel};
use bookworm::shared::ReviewStatus;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::assert_ok;
use crate::common::{book_json, FakeBackend, TestSession, TestUser};

#[tokio::test]
async fn test_books_filter_and_paginate() {
    let backend = FakeBackend::start().await;
    let books: Vec<_> = (1..=8)
        .map(|i| book_json(&format!("b{}", i), &format!("Saga {}", i), "Herbert", "Sci-Fi"))
        .chain([book_json("e1", "Emma", "Austen", "Classic")])
        .collect();
    backend.serve_books(json!(books)).await;
    let session = TestSession::new(&backend.url());
    let catalog = CatalogClient::new(session.api.clone(), session.store.view());

    let books = assert_ok!(catalog.books().await);
    assert_eq!(books.len(), 9);
    assert_eq!(books[0].cover_image, "https://i.ibb.co/b1/cover.png");

    let sagas: Vec<_> = filter_books(&books, &BrowseFilter::new("saga", Some("Sci-Fi".into())))
        .into_iter()
        .cloned()
        .collect();
    let second = paginate(&sagas, 2, session.api.config().page_size());
    assert_eq!(second.total_pages, 2);
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.items[0].id, "b7");
}

#[tokio::test]
async fn test_lists_degrade_to_empty() {
    let backend = FakeBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "genres": "nope" })))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tutorials"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend.server)
        .await;
    let session = TestSession::new(&backend.url());
    let catalog = CatalogClient::new(session.api.clone(), session.store.view());

    assert!(assert_ok!(catalog.genres().await).is_empty());
    assert!(assert_ok!(catalog.tutorials().await).is_empty());
    // nothing mounted for books at all
    assert!(assert_ok!(catalog.books().await).is_empty());
}

#[tokio::test]
async fn test_missing_book_is_an_error() {
    let backend = FakeBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Book not found" })))
        .mount(&backend.server)
        .await;
    let session = TestSession::new(&backend.url());
    let catalog = CatalogClient::new(session.api.clone(), session.store.view());

    let err = catalog.book("missing").await.unwrap_err();
    assert_eq!(err.user_message(), "Book not found");
}

#[tokio::test]
async fn test_submit_review_sends_bearer_and_body() {
    let backend = FakeBackend::start().await;
    let ada = TestUser::reader();
    backend.add_user(&ada).await;
    Mock::given(method("POST"))
        .and(path("/api/reviews/books/b1"))
        .and(header("Authorization", ada.bearer().as_str()))
        .and(body_json(json!({ "rating": 4, "comment": "Great pacing" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Review submitted" })))
        .expect(1)
        .mount(&backend.server)
        .await;
    let session = TestSession::new(&backend.url());
    assert!(session.store.login(&ada.email, &ada.password).await);
    let catalog = CatalogClient::new(session.api.clone(), session.store.view());

    assert_ok!(catalog.submit_review("b1", 4, "  Great pacing ").await);
}

#[tokio::test]
async fn test_review_checks_run_before_sending() {
    let backend = FakeBackend::start().await;
    let session = TestSession::new(&backend.url());
    session.store.restore().await;
    let catalog = CatalogClient::new(session.api.clone(), session.store.view());

    assert_matches!(
        catalog.submit_review("b1", 4, "fine").await,
        Err(ClientError::MissingCredential)
    );

    let ada = TestUser::reader();
    backend.add_user(&ada).await;
    assert!(session.store.login(&ada.email, &ada.password).await);
    assert_matches!(
        catalog.submit_review("b1", 9, "fine").await,
        Err(ClientError::Validation(_))
    );
    assert!(backend.requests("POST", "/api/reviews/books/b1").await.is_empty());
}

#[tokio::test]
async fn test_approved_reviews_parse_populated_fields() {
    let backend = FakeBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reviews/books/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "r1",
            "bookId": "b1",
            "userId": { "name": "Ada", "email": "ada@example.com" },
            "rating": 5,
            "comment": "Loved it",
            "status": "approved",
            "createdAt": "2024-03-01T10:00:00Z"
        }])))
        .mount(&backend.server)
        .await;
    let session = TestSession::new(&backend.url());
    let catalog = CatalogClient::new(session.api.clone(), session.store.view());

    let reviews = assert_ok!(catalog.approved_reviews("b1").await);
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].status, ReviewStatus::Approved);
    assert_eq!(
        reviews[0].author.as_ref().map(|a| a.display()),
        Some("ada@example.com")
    );
    assert!(reviews[0].created_at.is_some());
}

#[tokio::test]
async fn test_dashboard_combines_catalog_and_library() {
    let backend = FakeBackend::start().await;
    let ada = TestUser::reader();
    backend.add_user(&ada).await;
    backend
        .serve_books(json!([
            book_json("b1", "Dune", "Herbert", "Sci-Fi"),
            book_json("b2", "Emma", "Austen", "Classic"),
            book_json("b3", "Ubik", "Dick", "Sci-Fi"),
        ]))
        .await;
    backend.seed_entry("b2", "current", 30);
    let session = TestSession::new(&backend.url());
    assert!(session.store.login(&ada.email, &ada.password).await);
    let catalog = CatalogClient::new(session.api.clone(), session.store.view());
    let mut library = LibraryModel::new(session.api.clone(), session.store.view());

    let dashboard = assert_ok!(catalog.dashboard(&mut library).await);
    assert_eq!(dashboard.stats.current, 1);
    assert_eq!(
        dashboard
            .recommendations
            .iter()
            .map(|b| b.id.as_str())
            .collect::<Vec<_>>(),
        vec!["b1", "b3"]
    );
}
