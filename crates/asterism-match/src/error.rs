//! Error types for catalog construction, configuration and cache persistence.

use std::path::PathBuf;

/// Errors from building catalogs, validating configuration, and loading caches.
///
/// Matching itself never fails: unusable drawings and entries resolve to
/// "no match" or are skipped.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// Returned when a catalog entry is given an empty name.
    #[error("catalog entry name must be non-empty")]
    EmptyName,

    /// Returned when the configured sample count is zero.
    #[error("sample count must be at least 1, got {sample_count}")]
    InvalidSampleCount {
        /// The invalid sample count provided.
        sample_count: usize,
    },

    /// Returned when the normalize size is not a positive finite number.
    #[error("normalize size must be finite and positive, got {size}")]
    InvalidNormalizeSize {
        /// The invalid size provided.
        size: f64,
    },

    /// Returned when a prepared catalog was built with a different configuration.
    #[error(
        "prepared catalog uses sample count {found_samples} and size {found_size}, \
         expected {expected_samples} and {expected_size}"
    )]
    ConfigMismatch {
        /// Sample count requested by the caller.
        expected_samples: usize,
        /// Normalize size requested by the caller.
        expected_size: f64,
        /// Sample count the catalog was prepared with.
        found_samples: usize,
        /// Normalize size the catalog was prepared with.
        found_size: f64,
    },

    /// Returned when cache serialization fails.
    #[error("failed to serialize prepared catalog")]
    SerializeCache {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when cache deserialization fails.
    #[error("failed to deserialize prepared catalog from {path}")]
    DeserializeCache {
        /// Path to the cache file that could not be deserialized.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when writing the cache file fails.
    #[error("failed to write prepared catalog to {path}")]
    WriteCache {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading the cache file fails.
    #[error("failed to read prepared catalog from {path}")]
    ReadCache {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading a cache with an incompatible format version.
    #[error("incompatible cache version in {path}: expected {expected}, found {found}")]
    IncompatibleCacheVersion {
        /// The format version this build expects.
        expected: u32,
        /// The format version found in the file.
        found: u32,
        /// Path to the cache file.
        path: PathBuf,
    },
}
