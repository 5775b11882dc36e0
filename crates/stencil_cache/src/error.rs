//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the cache.
///
/// Index reads are fail-safe and never produce these; they are raised by
/// writes and by artifact reads, where the caller needs to know the store
/// is unavailable rather than merely cold.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error against a cache file.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The record index could not be serialized.
    #[error("failed to serialize cache index: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
