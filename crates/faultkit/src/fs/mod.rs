//! Filesystem abstraction
//!
//! The launcher only ever needs a handful of blocking operations: read a
//! source file, size and write the log, and list a directory for the
//! import-fault dump. Implementations cover the host filesystem and an
//! in-memory tree for tests and simulated devices.

mod memory;
mod os;
mod traits;

pub use memory::InMemoryFs;
pub use os::OsFs;
pub use traits::FileSystem;
