//! Filesystem collaborators used by artifact strategies

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Directory and file operations available to artifact strategies
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create a directory and all missing parents; succeeds if it exists
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write UTF-8 text, replacing any existing file at `path`
    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Filesystem backed by `tokio::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut file = fs::File::create(path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await
    }
}

/// One recorded filesystem call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    CreateDir(PathBuf),
    WriteFile(PathBuf),
}

#[derive(Debug, Default)]
struct MemoryState {
    directories: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    operations: Vec<FileOperation>,
}

/// In-memory filesystem recording every call; backs `--dry-run`
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls in the order they were made
    pub fn operations(&self) -> Vec<FileOperation> {
        self.lock().operations.clone()
    }

    /// Final file contents keyed by path
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.lock().files.clone()
    }

    pub fn directories(&self) -> BTreeSet<PathBuf> {
        self.lock().directories.clone()
    }

    pub fn read(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // a panic while holding the lock leaves the maps consistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        state.operations.push(FileOperation::CreateDir(path.to_path_buf()));
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            state.directories.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = self.lock();
        state.operations.push(FileOperation::WriteFile(path.to_path_buf()));
        state.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
