//! Test utilities for filexpand
//!
//! This crate provides builders for on-disk directory fixtures used by the
//! core crate's tests and benchmarks.

pub mod builders;

// Re-export commonly used types
pub use builders::{TestTree, TestTreeBuilder};
