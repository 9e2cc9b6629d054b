//! Temporary directory tree builder

use filexpand_core::{Error, Result, error::IoError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Entry queued for creation
#[derive(Debug, Clone)]
enum Node {
    File { path: PathBuf, content: Vec<u8> },
    Dir { path: PathBuf },
    #[cfg(unix)]
    Symlink { target: PathBuf, link: PathBuf },
}

/// Builder for a directory tree inside a fresh temporary directory
///
/// Paths are relative to the tree root; parent directories are created as
/// needed.
#[derive(Debug, Default)]
pub struct TestTreeBuilder {
    nodes: Vec<Node>,
}

/// A built tree, removed from disk when dropped
pub struct TestTree {
    dir: TempDir,
    files: Vec<PathBuf>,
}

impl TestTreeBuilder {
    /// Create an empty tree builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file with placeholder content
    pub fn file(self, path: &str) -> Self {
        self.file_with_content(path, b"test")
    }

    /// Add a regular file with specific content
    pub fn file_with_content(mut self, path: &str, content: &[u8]) -> Self {
        self.nodes.push(Node::File {
            path: PathBuf::from(path),
            content: content.to_vec(),
        });
        self
    }

    /// Add several regular files
    pub fn files(self, paths: &[&str]) -> Self {
        paths.iter().fold(self, |builder, path| builder.file(path))
    }

    /// Add an empty directory
    pub fn dir(mut self, path: &str) -> Self {
        self.nodes.push(Node::Dir {
            path: PathBuf::from(path),
        });
        self
    }

    /// Add a symlink at `link` pointing to `target`, both relative to the root
    #[cfg(unix)]
    pub fn symlink(mut self, target: &str, link: &str) -> Self {
        self.nodes.push(Node::Symlink {
            target: PathBuf::from(target),
            link: PathBuf::from(link),
        });
        self
    }

    /// Add files `file0..file{count}` nested `depth` directories deep
    pub fn nested_files(mut self, depth: usize, count: usize) -> Self {
        let dir: PathBuf = (0..depth).map(|level| format!("level{level}")).collect();
        for i in 0..count {
            self.nodes.push(Node::File {
                path: dir.join(format!("file{i}.dat")),
                content: b"test".to_vec(),
            });
        }
        self
    }

    /// Create the tree on disk
    pub fn build(self) -> Result<TestTree> {
        let dir = TempDir::new()?;
        let root = dir.path().to_path_buf();
        let mut files = Vec::new();

        for node in self.nodes {
            match node {
                Node::File { path, content } => {
                    let full = root.join(&path);
                    create_parent(&full)?;
                    fs::write(&full, content).map_err(|e| io_error(e, &full))?;
                    files.push(full);
                }
                Node::Dir { path } => {
                    let full = root.join(&path);
                    fs::create_dir_all(&full).map_err(|e| io_error(e, &full))?;
                }
                #[cfg(unix)]
                Node::Symlink { target, link } => {
                    let full = root.join(&link);
                    create_parent(&full)?;
                    std::os::unix::fs::symlink(root.join(target), &full)
                        .map_err(|e| io_error(e, &full))?;
                }
            }
        }

        Ok(TestTree { dir, files })
    }
}

impl TestTree {
    /// Start building a tree
    pub fn builder() -> TestTreeBuilder {
        TestTreeBuilder::new()
    }

    /// Root directory of the tree
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of an entry relative to the root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// `path` as a string spec
    pub fn spec(&self, relative: &str) -> String {
        self.path(relative).to_string_lossy().into_owned()
    }

    /// Root as a string spec
    pub fn root_spec(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Every regular file the builder created, in creation order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Created files sorted, for set comparisons
    pub fn sorted_files(&self) -> Vec<PathBuf> {
        let mut files = self.files.clone();
        files.sort();
        files
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(e, parent))?;
    }
    Ok(())
}

fn io_error(source: std::io::Error, path: &Path) -> Error {
    Error::Io(IoError::from_std(source).with_path(path))
}
