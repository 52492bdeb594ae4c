//! In-memory filesystem implementation

use std::collections::HashMap;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::traits::FileSystem;
use crate::error::Result;

/// In-memory filesystem.
///
/// Stores files and directories in a HashMap keyed by normalized path.
/// Backs tests and simulated device images; writing a file creates its
/// parent directories implicitly, the way flat flash layouts behave.
pub struct InMemoryFs {
    entries: RwLock<HashMap<PathBuf, FsEntry>>,
}

#[derive(Debug, Clone)]
enum FsEntry {
    File { content: Vec<u8> },
    Directory,
}

impl Default for InMemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFs {
    /// Create a new in-memory filesystem containing only the root.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(PathBuf::from("/"), FsEntry::Directory);
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Create a directory (and its parents).
    pub fn create_dir(&self, path: &str) {
        let path = Self::normalize_path(Path::new(path));
        let mut entries = self.entries.write().unwrap();
        let mut current = PathBuf::from("/");
        for component in path.components().skip(1) {
            current.push(component);
            entries.entry(current.clone()).or_insert(FsEntry::Directory);
        }
    }

    /// Seed a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) {
        if let Some(parent) = Path::new(path).parent() {
            if parent != Path::new("/") {
                self.create_dir(&parent.to_string_lossy());
            }
        }
        let path = Self::normalize_path(Path::new(path));
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            path,
            FsEntry::File {
                content: content.as_bytes().to_vec(),
            },
        );
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut result = PathBuf::new();

        for component in path.components() {
            match component {
                std::path::Component::RootDir => {
                    result.push("/");
                }
                std::path::Component::Normal(name) => {
                    result.push(name);
                }
                std::path::Component::ParentDir => {
                    result.pop();
                }
                std::path::Component::CurDir => {}
                std::path::Component::Prefix(_) => {}
            }
        }

        if result.as_os_str().is_empty() {
            result.push("/");
        }

        result
    }
}

impl FileSystem for InMemoryFs {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let path = Self::normalize_path(path);
        let entries = self.entries.read().unwrap();

        match entries.get(&path) {
            Some(FsEntry::File { content }) => Ok(content.clone()),
            Some(FsEntry::Directory) => Err(IoError::other("is a directory").into()),
            None => Err(IoError::new(ErrorKind::NotFound, "file not found").into()),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        let path = Self::normalize_path(path);
        let mut entries = self.entries.write().unwrap();

        if matches!(entries.get(&path), Some(FsEntry::Directory)) {
            return Err(IoError::other("is a directory").into());
        }

        let mut current = PathBuf::from("/");
        if let Some(parent) = path.parent() {
            for component in parent.components().skip(1) {
                current.push(component);
                entries.entry(current.clone()).or_insert(FsEntry::Directory);
            }
        }

        entries.insert(
            path,
            FsEntry::File {
                content: content.to_vec(),
            },
        );
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        {
            let normalized = Self::normalize_path(path);
            let mut entries = self.entries.write().unwrap();

            match entries.get_mut(&normalized) {
                Some(FsEntry::File { content: existing }) => {
                    existing.extend_from_slice(content);
                    return Ok(());
                }
                Some(FsEntry::Directory) => {
                    return Err(IoError::other("is a directory").into());
                }
                None => {}
            }
        }

        self.write_file(path, content)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        let path = Self::normalize_path(path);
        let entries = self.entries.read().unwrap();

        match entries.get(&path) {
            Some(FsEntry::File { content }) => Ok(content.len() as u64),
            Some(FsEntry::Directory) => Err(IoError::other("is a directory").into()),
            None => Err(IoError::new(ErrorKind::NotFound, "file not found").into()),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<String>> {
        let path = Self::normalize_path(path);
        let entries = self.entries.read().unwrap();

        if !matches!(entries.get(&path), Some(FsEntry::Directory)) {
            return Err(IoError::new(ErrorKind::NotFound, "directory not found").into());
        }

        let mut names = Vec::new();
        for candidate in entries.keys() {
            if candidate.parent() == Some(path.as_path()) {
                if let Some(name) = candidate.file_name() {
                    names.push(name.to_string_lossy().into_owned());
                }
            }
        }
        Ok(names)
    }
}
