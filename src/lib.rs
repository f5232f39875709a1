//! Bookworm - Main Library
//!
//! Bookworm is the client side of a personal reading tracker: members keep
//! books on three shelves (want, current, read) with a progress percentage,
//! browse the catalog, review books and watch reading tutorials; admins
//! moderate reviews and manage the catalog. All data lives behind a REST
//! backend; this crate holds the session, guards the screens and mediates
//! every call.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and configuration every consumer agrees on
//!   - Users and roles, shelves and library entries, catalog types
//!   - `SharedError`, `AppConfig`
//!
//! - **`client`** - Stateful client-side pieces
//!   - Session store and route guards
//!   - Library model, catalog and admin clients
//!   - REST client, credential persistence, cancellation
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookworm::client::{
//!     ApiClient, Config, FileCredentialStore, LibraryModel, RecordingNavigator, SessionStore,
//! };
//! use bookworm::shared::Shelf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let storage = FileCredentialStore::new(config.credential_path().ok_or("no config directory")?);
//! let api = ApiClient::new(config);
//! let session = SessionStore::new(api.clone(), Arc::new(storage), Arc::new(RecordingNavigator::new()));
//!
//! if session.login("ada@example.com", "Reader1").await {
//!     let mut library = LibraryModel::new(api, session.view());
//!     library.set_shelf("64f0c2", Shelf::Read).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `SharedError` for client-side validation
//! - `ApiError` for transport, HTTP status and decoding
//! - `ClientError` for every stateful client operation
//!
//! None of them is fatal; each carries a `user_message()` for a transient
//! notification.

/// Shared types and data structures
pub mod shared;

/// Session, guards and backend consumers
pub mod client;
