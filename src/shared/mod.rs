//! Shared Module
//!
//! Types that every consumer of the crate agrees on: the JSON shapes of the
//! backend REST API, the shelf model, validation errors and the application
//! configuration. Nothing in here performs I/O.

/// Identity, role and auth request/response bodies
pub mod user;

/// Shelf, library entry and upsert bodies
pub mod library;

/// Books, genres, tutorials, reviews and admin statistics
pub mod catalog;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

pub use catalog::{AdminStats, Book, BookForm, Genre, Review, ReviewStatus, Tutorial, TutorialForm};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, RoleMismatchPolicy};
pub use error::SharedError;
pub use library::{BookRef, LibraryEntry, Shelf, ShelfPatch, ShelfStats};
pub use user::{Role, UserInfo};
