//! filexpand Core Library
//!
//! Turns path specifications (a file, a directory or a glob pattern) into the
//! flat list of regular files they denote, plus the small text helpers used
//! alongside it when preparing file lists and job configuration.
//!
//! ```no_run
//! use filexpand_core::{ExpandOptions, PathExpander};
//!
//! let expander = PathExpander::new(ExpandOptions::new().with_max_depth(Some(8)));
//! let files = expander.expand_all(["train.csv", "data/", "~/shards/*.csv"]);
//! ```

pub mod config;
pub mod error;
pub mod expand;
pub mod text;

// Re-export main types
pub use config::{ConfigLoader, ExpanderConfig};
pub use error::{Error, Result};
pub use expand::{ExpandOptions, NodeKind, PathExpander, PathSpec, expand, expand_all};
