//! Integration tests against the fake backend

pub mod catalog_test;
pub mod library_test;
