//! End-to-end reading scenarios

pub mod reading_flow;
