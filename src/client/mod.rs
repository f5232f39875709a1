//! Client Module
//!
//! Stateful, client-side half of the reading tracker: the session, the route
//! guards, the personal library and thin consumers of the catalog and admin
//! endpoints.
//!
//! # Architecture
//!
//! - **`config`** - Server URL, credential path, role-mismatch policy
//! - **`credentials`** - Single-slot bearer credential persistence
//! - **`api`** - Async REST client, one method per endpoint
//! - **`session`** - `SessionStore` (single owner) and `SessionView` (read-only)
//! - **`routes`** - Route table, landing routes, nav links, `Navigator`
//! - **`guard`** - Pure protected / public-only guard decisions
//! - **`library`** - Shelf and progress mutations with re-fetch
//! - **`catalog`** - Books, genres, reviews, tutorials, browse and dashboard
//! - **`admin`** - Admin-only moderation and catalog management
//! - **`validators`** - Form checks run before any request
//! - **`task`** - Cancellable task scope for in-flight requests
//! - **`confirm`** - Confirmation side effect
//! - **`error`** - `ClientError`
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs         - Module exports and documentation
//! ├── main.rs        - `bookworm` command-line entry point (binary)
//! ├── config.rs      - Configuration
//! ├── credentials.rs - Credential stores
//! ├── api.rs         - REST client
//! ├── session.rs     - Session store
//! ├── routes.rs      - Route table
//! ├── guard.rs       - Route guards
//! ├── library.rs     - Library model
//! ├── catalog.rs     - Catalog consumers
//! ├── admin.rs       - Admin client
//! ├── validators.rs  - Form validation
//! ├── task.rs        - Task scope
//! ├── confirm.rs     - Confirmation prompts
//! └── error.rs       - Error types
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookworm::client::{ApiClient, Config, MemoryCredentialStore, RecordingNavigator, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(Config::from_env()?);
//! let session = SessionStore::new(
//!     api,
//!     Arc::new(MemoryCredentialStore::new()),
//!     Arc::new(RecordingNavigator::new()),
//! );
//! session.restore().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credentials;
pub mod api;
pub mod error;
pub mod task;
pub mod validators;
pub mod confirm;
pub mod routes;
pub mod session;
pub mod guard;
pub mod library;
pub mod catalog;
pub mod admin;

// Re-export commonly used types
pub use admin::{AdminClient, AdminOutcome};
pub use api::{ApiClient, ApiError};
pub use catalog::{BrowseFilter, CatalogClient, Dashboard, Page};
pub use config::Config;
pub use confirm::{AutoConfirm, ConfirmPrompt, Confirmer};
pub use credentials::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{ClientError, ClientResult};
pub use guard::{GuardDecision, ProtectedGuard, PublicOnlyGuard, RouteGuard};
pub use library::LibraryModel;
pub use routes::{landing_route, allowed_routes, Navigator, RecordingNavigator, Route};
pub use session::{SessionState, SessionStore, SessionView};
pub use task::{ScopeHandle, TaskScope};
