//! Filesystem glob enumeration
//!
//! Wraps the `glob` crate with POSIX `glob(3)` matching rules: `*`, `?` and
//! `[...]` never match a path separator, and a leading `.` in a file name
//! must be matched literally, so hidden entries are skipped by `*`.
//!
//! The leading-dot rule is applied here on the matched paths rather than by
//! `glob` itself, which cannot evaluate it on names that are not UTF-8. Such
//! names are never matched by a wildcard.

use glob::{MatchOptions, Paths, Pattern};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use super::walker::is_hidden;

/// Matching rules for pattern specs
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

const RECURSIVE_WILDCARD: &str = "**";

/// Scoped iterator over the paths matching one pattern
///
/// Owns the underlying match state; it is released when the listing is
/// dropped, whether it was exhausted or not. Entries the filesystem refuses
/// to enumerate are skipped.
pub struct GlobListing {
    pattern: String,
    /// Named components of the pattern, in order
    components: Vec<String>,
    paths: Option<Paths>,
}

impl GlobListing {
    fn new(pattern: String, paths: Option<Paths>) -> Self {
        let components = normal_components(Path::new(&pattern))
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Self {
            pattern,
            components,
            paths,
        }
    }

    /// Whether `path` reaches a hidden entry through a wildcard
    ///
    /// Components are paired with the pattern component that produced them,
    /// from the front up to the first `**` and from the back after it. Names
    /// consumed by `**` have no literal counterpart.
    fn reveals_hidden(&self, path: &Path) -> bool {
        let names: Vec<&OsStr> = normal_components(path).collect();
        let split = self
            .components
            .iter()
            .position(|c| c == RECURSIVE_WILDCARD)
            .unwrap_or(self.components.len());
        let (head, tail) = self.components.split_at(split);
        let tail = tail.get(1..).unwrap_or_default();

        let front = names.len().min(head.len());
        let back = names.len().saturating_sub(front).min(tail.len());
        let (matched_head, rest) = names.split_at(front);
        let (middle, matched_tail) = rest.split_at(rest.len() - back);

        let unmatched = |(name, component): (&&OsStr, &String)| {
            is_hidden(name) && !component.starts_with('.')
        };

        matched_head.iter().zip(head).any(unmatched)
            || matched_tail.iter().zip(&tail[tail.len() - back..]).any(unmatched)
            || middle.iter().any(|name| is_hidden(name))
    }
}

impl Iterator for GlobListing {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.paths.as_mut()?.next()? {
                Ok(path) if self.reveals_hidden(&path) => {
                    log::trace!("{} skipped hidden {}", self.pattern, path.display());
                }
                Ok(path) => {
                    log::trace!("{} matched {}", self.pattern, path.display());
                    return Some(path);
                }
                Err(e) => {
                    log::debug!("Skipping unreadable match for {}: {e}", self.pattern);
                }
            }
        }
    }
}

/// List every path matching `pattern`
///
/// An invalid pattern matches nothing.
pub fn list(pattern: &str, tilde: bool) -> GlobListing {
    let pattern = if tilde {
        expand_tilde(pattern)
    } else {
        Cow::Borrowed(pattern)
    };

    match glob::glob_with(&pattern, MATCH_OPTIONS) {
        Ok(paths) => GlobListing::new(pattern.into_owned(), Some(paths)),
        Err(e) => {
            log::warn!("Invalid glob pattern {pattern:?}: {e}");
            GlobListing::new(pattern.into_owned(), None)
        }
    }
}

/// Replace a leading `~` or `~/` with the home directory
///
/// `~user` forms are left untouched, as is everything when no home directory
/// is known.
pub fn expand_tilde(pattern: &str) -> Cow<'_, str> {
    let Some(rest) = pattern.strip_prefix('~') else {
        return Cow::Borrowed(pattern);
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with(MAIN_SEPARATOR)) {
        return Cow::Borrowed(pattern);
    }

    match dirs::home_dir().as_deref().and_then(Path::to_str) {
        Some(home) => Cow::Owned(format!("{}{rest}", Pattern::escape(home))),
        None => Cow::Borrowed(pattern),
    }
}

fn normal_components(path: &Path) -> impl Iterator<Item = &OsStr> {
    path.components().filter_map(|c| match c {
        Component::Normal(name) => Some(name),
        _ => None,
    })
}
