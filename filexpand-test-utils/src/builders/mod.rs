//! Builders for creating test fixtures

pub mod tree;

pub use tree::{TestTree, TestTreeBuilder};
