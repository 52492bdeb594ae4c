//! Host filesystem implementation

use std::fs;
use std::io::Write;
use std::path::Path;

use super::traits::FileSystem;
use crate::error::Result;

/// Host filesystem.
///
/// Plain blocking std::fs operations; the CLI uses this to diagnose
/// against real script directories. Handles are scoped to each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl OsFs {
    /// Create a host filesystem handle.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFs {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        Ok(fs::write(path, content)?)
    }

    fn append_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new().append(true).create(true).open(path)?;
        file.write_all(content)?;
        Ok(())
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.py");
        let fs = OsFs::new();

        fs.write_file(&path, b"x = 1\n").unwrap();
        fs.append_file(&path, b"y = 2\n").unwrap();
        assert_eq!(fs.read_file(&path).unwrap(), b"x = 1\ny = 2\n");
        assert_eq!(fs.file_size(&path).unwrap(), 12);

        let names = fs.read_dir(dir.path()).unwrap();
        assert_eq!(names, vec!["sample.py"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFs::new();
        assert!(fs.read_file(&dir.path().join("absent.py")).is_err());
        assert!(fs.file_size(&dir.path().join("absent.py")).is_err());
    }
}
