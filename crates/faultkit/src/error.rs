//! Error types for Faultkit
//!
//! The diagnosis pipeline itself never surfaces errors: a helper that
//! cannot produce information degrades to "no information" instead.
//! `Error` covers the genuine fallible boundaries, which are the
//! filesystem backends and fault replay from captured text.

use thiserror::Error;

/// Result type alias using Faultkit's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Faultkit error types.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from filesystem operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A fault could not be rebuilt from captured traceback text.
    #[error("replay error: {0}")]
    Replay(String),
}
