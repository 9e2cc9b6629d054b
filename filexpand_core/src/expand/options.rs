//! Options controlling path expansion

use serde::{Deserialize, Serialize};

/// Options for path expansion
///
/// The defaults give plain expansion semantics: unlimited depth, tilde
/// expansion on, and every glob match returned as-is. Symlinked directories
/// are always followed, except where one leads back to its own ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandOptions {
    /// Maximum directory depth listed below a directory spec (None = unlimited)
    ///
    /// The directory itself is depth 0, so `Some(1)` keeps only its direct
    /// files and `Some(0)` yields nothing.
    pub max_depth: Option<usize>,
    /// Expand a leading `~` in glob patterns to the home directory
    pub tilde_expansion: bool,
    /// Keep only regular files among glob pattern matches
    pub pattern_files_only: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            tilde_expansion: true,
            pattern_files_only: false,
        }
    }
}

impl ExpandOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth for directory expansion
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set whether `~` is expanded in patterns
    pub fn with_tilde_expansion(mut self, enabled: bool) -> Self {
        self.tilde_expansion = enabled;
        self
    }

    /// Set whether glob matches are filtered down to regular files
    pub fn with_pattern_files_only(mut self, files_only: bool) -> Self {
        self.pattern_files_only = files_only;
        self
    }
}
