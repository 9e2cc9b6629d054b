//! Recursive directory expansion
//!
//! Streams the regular files below a root directory using walkdir. Symlinks
//! are followed, entries are visited in file name order, and hidden
//! (dot-prefixed) entries are pruned together with everything below them.
//! Output order is depth-first pre-order: a directory's files and subtrees
//! in name order.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::ExpandOptions;

/// Depth-first walker yielding every regular file below a root directory
pub(crate) struct DirectoryWalker {
    /// Walker for directory traversal
    walker: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
}

impl DirectoryWalker {
    /// Create a walker over the entries below `root`
    ///
    /// Paths are built by joining entry names onto `root` exactly as given,
    /// so a `./` prefix or doubled separator in `root` survives. A `root`
    /// that is not a directory yields nothing.
    pub(crate) fn new(root: &Path, options: &ExpandOptions) -> Self {
        let mut walker = WalkDir::new(root)
            .follow_links(true)
            .min_depth(1)
            .sort_by_file_name();

        if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }

        Self {
            walker: Box::new(
                walker
                    .into_iter()
                    .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name())),
            ),
        }
    }
}

impl Iterator for DirectoryWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        return Some(entry.into_path());
                    }
                    log::trace!("Not a regular file: {}", entry.path().display());
                }
                Err(e) => {
                    if let Some(ancestor) = e.loop_ancestor() {
                        log::debug!(
                            "Skipping {:?}: directory cycle back to {}",
                            e.path(),
                            ancestor.display()
                        );
                    } else {
                        // Dangling links and unreadable directories contribute nothing
                        log::debug!("Walk error: {e}");
                    }
                }
            }
        }
    }
}

/// Whether a file name starts with `.`, without requiring UTF-8
pub(crate) fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}
