//! Prepared catalog caching via bincode.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::catalog::PreparedCatalog;
use crate::error::MatchError;

/// Current binary cache format version.
pub(crate) const CACHE_FORMAT_VERSION: u32 = 1;

/// Versioned envelope for a serialized prepared catalog.
#[derive(serde::Serialize, serde::Deserialize)]
struct CacheEnvelope {
    /// Format version for compatibility checking.
    format_version: u32,
    /// The prepared catalog itself.
    prepared: PreparedCatalog,
}

impl PreparedCatalog {
    /// Save the prepared catalog to a binary file.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::SerializeCache`] | bincode encoding failed |
    /// | [`MatchError::WriteCache`] | file write failed |
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MatchError> {
        let path = path.as_ref();

        let envelope = CacheEnvelope {
            format_version: CACHE_FORMAT_VERSION,
            prepared: self.clone(),
        };

        let bytes =
            bincode::serialize(&envelope).map_err(|e| MatchError::SerializeCache { source: e })?;

        std::fs::write(path, &bytes).map_err(|e| MatchError::WriteCache {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(size_bytes = bytes.len(), n_entries = self.entries.len(), "catalog cache saved");
        Ok(())
    }

    /// Load a prepared catalog from a binary file.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::ReadCache`] | file read failed |
    /// | [`MatchError::DeserializeCache`] | bincode decoding failed |
    /// | [`MatchError::IncompatibleCacheVersion`] | format version mismatch |
    #[instrument(fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MatchError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| MatchError::ReadCache {
            path: path.to_path_buf(),
            source: e,
        })?;

        let envelope: CacheEnvelope =
            bincode::deserialize(&bytes).map_err(|e| MatchError::DeserializeCache {
                path: path.to_path_buf(),
                source: e,
            })?;

        if envelope.format_version != CACHE_FORMAT_VERSION {
            return Err(MatchError::IncompatibleCacheVersion {
                expected: CACHE_FORMAT_VERSION,
                found: envelope.format_version,
                path: path.to_path_buf(),
            });
        }

        debug!(
            n_entries = envelope.prepared.entries.len(),
            sample_count = envelope.prepared.config.sample_count(),
            "catalog cache loaded"
        );
        Ok(envelope.prepared)
    }
}
