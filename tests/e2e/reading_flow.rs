//! Full reading session
//!
//! Anonymous visit, login, shelve a book, finish it, remove it, log out.

use bookworm::client::guard::enforce;
use bookworm::client::{AutoConfirm, GuardDecision, LibraryModel, Route, RouteGuard};
use bookworm::shared::{RoleMismatchPolicy, Shelf, ShelfPatch};
use pretty_assertions::assert_eq;

use crate::common::{FakeBackend, TestSession, TestUser};
use crate::{assert_ok, assert_redirect, assert_single_entry};

#[tokio::test]
async fn test_reader_journey() {
    let backend = FakeBackend::start().await;
    let ada = TestUser::reader();
    backend.add_user(&ada).await;
    let session = TestSession::new(&backend.url());
    let view = session.store.view();
    let my_library = RouteGuard::for_route(&Route::MyLibrary, RoleMismatchPolicy::Login);
    let login_screen = RouteGuard::for_route(&Route::Login, RoleMismatchPolicy::Login);

    // Startup
    assert_eq!(my_library.check(&view, &session.navigator), GuardDecision::Loading);
    assert!(session.navigator.history().is_empty());
    session.store.restore().await;

    // Anonymous visit to a protected screen
    assert_redirect!(my_library.check(&view, &session.navigator), Route::Login);
    assert!(login_screen.check(&view, &session.navigator).renders_content());

    // Login, then the public-only login screen sends the reader home
    assert!(session.store.login(&ada.email, &ada.password).await);
    assert_redirect!(login_screen.check(&view, &session.navigator), Route::Dashboard);
    assert_eq!(session.navigator.last(), Some(Route::Dashboard));
    assert!(my_library.check(&view, &session.navigator).renders_content());

    // Shelve B1
    let mut library = LibraryModel::new(session.api.clone(), session.store.view());
    let entries = assert_ok!(library.upsert("B1", ShelfPatch::shelf(Shelf::Want)).await);
    let entry = assert_single_entry!(entries, "B1");
    assert_eq!((entry.shelf, entry.progress), (Shelf::Want, 0));

    // Finish it
    let entries = assert_ok!(library.set_shelf("B1", Shelf::Read).await);
    let entry = assert_single_entry!(entries, "B1");
    assert_eq!((entry.shelf, entry.progress), (Shelf::Read, 100));

    // Remove it
    assert!(assert_ok!(library.remove("B1", &AutoConfirm(true)).await));
    assert!(library.entry("B1").is_none());
    assert!(backend.library().is_empty());

    // Logout, and the protected screen is closed again
    session.store.logout();
    assert!(view.user().is_none());
    assert_eq!(session.navigator.last(), Some(Route::Login));
    session.navigator.clear();
    assert_redirect!(my_library.check(&view, &session.navigator), Route::Login);
    assert_eq!(session.navigator.history(), vec![Route::Login]);
}

#[tokio::test]
async fn test_admin_lands_on_admin_dashboard() {
    let backend = FakeBackend::start().await;
    let root = TestUser::admin();
    let ada = TestUser::reader();
    backend.add_user(&root).await;
    backend.add_user(&ada).await;

    let session = TestSession::new(&backend.url());
    session.store.restore().await;
    assert!(session.store.login(&root.email, &root.password).await);

    let view = session.store.view();
    let login_screen = RouteGuard::for_route(&Route::Login, RoleMismatchPolicy::Login);
    assert_redirect!(login_screen.check(&view, &session.navigator), Route::AdminDashboard);

    let users_screen = RouteGuard::for_route(&Route::AdminUsers, RoleMismatchPolicy::Login);
    assert!(users_screen.check(&view, &session.navigator).renders_content());

    // A reader on an admin screen is sent away, per policy
    session.store.logout();
    assert!(session.store.login(&ada.email, &ada.password).await);
    assert_redirect!(users_screen.check(&view, &session.navigator), Route::Login);
    let strict = RouteGuard::for_route(&Route::AdminUsers, RoleMismatchPolicy::Forbidden);
    assert_redirect!(
        enforce(strict.decide(&view.snapshot()), &session.navigator),
        Route::Forbidden
    );
    assert_eq!(session.navigator.last(), Some(Route::Forbidden));
}
