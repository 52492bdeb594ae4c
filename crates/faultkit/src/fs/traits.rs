//! Filesystem trait definitions

use std::path::Path;

use crate::error::Result;

/// Blocking filesystem trait.
///
/// The launcher has exactly one run loop; all file access is synchronous
/// and scoped, so the trait is deliberately blocking. Implementations must
/// release any handle they acquire before returning.
pub trait FileSystem: Send + Sync {
    /// Read a file's contents.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace a file's contents, creating it if missing.
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Append to a file, creating it if missing.
    fn append_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Size of a file in bytes.
    fn file_size(&self, path: &Path) -> Result<u64>;

    /// Names of a directory's entries, in no particular order.
    fn read_dir(&self, path: &Path) -> Result<Vec<String>>;
}
