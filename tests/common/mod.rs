//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A stateful fake backend on top of wiremock
//! - Test users and session wiring
//! - Custom assertion macros

pub mod assertions;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use fake_backend::*;
