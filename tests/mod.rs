//! Test suite for Bookworm
//!
//! This module organizes all tests

pub mod common;
pub mod e2e;
pub mod integration;
pub mod property;
