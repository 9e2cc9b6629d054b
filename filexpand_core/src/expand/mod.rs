//! Path expansion
//!
//! Resolves a path specification into the regular files it denotes. A spec
//! is classified against the live filesystem with a single `stat`:
//!
//! - an existing regular file expands to itself,
//! - an existing directory expands to every regular file below it, skipping
//!   hidden (dot-prefixed) entries,
//! - anything else is treated as a glob pattern and expands to its matches.
//!
//! Nothing here fails. Paths that cannot be inspected are treated as absent,
//! and a pattern that matches nothing expands to an empty list.

pub mod glob_listing;
mod options;
mod walker;

pub use options::ExpandOptions;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExpanderConfig;
use walker::DirectoryWalker;

/// Kind of filesystem node found at a path, following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A regular file
    File,
    /// A directory
    Directory,
    /// A device, socket or pipe
    Other,
    /// Nothing could be inspected at the path
    Missing,
}

impl NodeKind {
    /// Inspect `path` with one `stat` call
    pub fn inspect(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(m) if m.is_file() => Self::File,
            Ok(m) if m.is_dir() => Self::Directory,
            Ok(_) => Self::Other,
            Err(_) => Self::Missing,
        }
    }
}

/// A classified path specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Names an existing regular file
    ExistingFile(PathBuf),
    /// Names an existing directory
    ExistingDirectory(PathBuf),
    /// Neither; matched as a glob pattern
    PatternOrMissing(String),
}

impl PathSpec {
    /// Classify `spec` against the filesystem
    pub fn classify(spec: &str) -> Self {
        let kind = NodeKind::inspect(Path::new(spec));
        log::debug!("Classified {spec:?} as {kind:?}");
        match kind {
            NodeKind::File => Self::ExistingFile(PathBuf::from(spec)),
            NodeKind::Directory => Self::ExistingDirectory(PathBuf::from(spec)),
            NodeKind::Other | NodeKind::Missing => Self::PatternOrMissing(spec.to_string()),
        }
    }
}

/// Expands path specifications into regular files
///
/// Holds only its options; every call inspects the filesystem afresh, so a
/// single expander can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct PathExpander {
    options: ExpandOptions,
}

impl PathExpander {
    /// Create an expander with the given options
    pub fn new(options: ExpandOptions) -> Self {
        Self { options }
    }

    /// Create an expander from loaded configuration
    pub fn from_config(config: &ExpanderConfig) -> Self {
        Self::new(config.expand.clone())
    }

    /// Options in effect
    pub fn options(&self) -> &ExpandOptions {
        &self.options
    }

    /// Expand one path specification
    pub fn expand(&self, spec: &str) -> Vec<PathBuf> {
        if spec.is_empty() {
            log::debug!("Empty path spec expands to nothing");
            return Vec::new();
        }

        match PathSpec::classify(spec) {
            PathSpec::ExistingFile(path) => vec![path],
            PathSpec::ExistingDirectory(dir) => self.expand_dir(&dir),
            PathSpec::PatternOrMissing(pattern) => self.expand_pattern(&pattern),
        }
    }

    /// Expand each spec in order and concatenate the results
    ///
    /// Duplicates are kept when specs overlap.
    pub fn expand_all<I, S>(&self, specs: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        specs
            .into_iter()
            .flat_map(|spec| self.expand(spec.as_ref()))
            .collect()
    }

    /// Collect every non-hidden regular file below `dir`
    ///
    /// Results keep `dir` as their prefix exactly as it was written.
    pub fn expand_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let files: Vec<PathBuf> = DirectoryWalker::new(dir, &self.options).collect();
        log::debug!("Expanded {} to {} files", dir.display(), files.len());
        files
    }

    fn expand_pattern(&self, pattern: &str) -> Vec<PathBuf> {
        let listing = glob_listing::list(pattern, self.options.tilde_expansion);
        let matches: Vec<PathBuf> = if self.options.pattern_files_only {
            listing
                .filter(|path| NodeKind::inspect(path) == NodeKind::File)
                .collect()
        } else {
            listing.collect()
        };

        if matches.is_empty() {
            log::debug!("Pattern {pattern:?} matched nothing");
        }
        matches
    }
}

/// Expand one path specification with default options
pub fn expand(spec: &str) -> Vec<PathBuf> {
    PathExpander::default().expand(spec)
}

/// Expand a sequence of path specifications with default options
pub fn expand_all<I, S>(specs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    PathExpander::default().expand_all(specs)
}
