//! Property-based tests

pub mod catalog_proptest;
