//! Matching configuration.

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Configuration shared by catalog preparation and drawing matching.
///
/// Both sides of every comparison must be prepared with the same values, so a
/// [`PreparedCatalog`](crate::PreparedCatalog) remembers the configuration it
/// was built with.
///
/// # Defaults
///
/// | Parameter        | Default |
/// |------------------|---------|
/// | `sample_count`   | 10      |
/// | `normalize_size` | 100.0   |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub(crate) sample_count: usize,
    pub(crate) normalize_size: f64,
}

impl MatchConfig {
    /// Number of resampled points per shape used by default.
    pub const DEFAULT_SAMPLE_COUNT: usize = 10;

    /// Length of the longer bounding-box side after normalization, by default.
    pub const DEFAULT_NORMALIZE_SIZE: f64 = 100.0;

    /// Create a configuration with explicit sample count and normalize size.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::InvalidSampleCount`] | `sample_count` is zero |
    /// | [`MatchError::InvalidNormalizeSize`] | `normalize_size` is not finite or not positive |
    pub fn new(sample_count: usize, normalize_size: f64) -> Result<Self, MatchError> {
        if sample_count == 0 {
            return Err(MatchError::InvalidSampleCount { sample_count });
        }
        if !normalize_size.is_finite() || normalize_size <= 0.0 {
            return Err(MatchError::InvalidNormalizeSize {
                size: normalize_size,
            });
        }
        Ok(Self {
            sample_count,
            normalize_size,
        })
    }

    /// Return the number of points every shape is resampled to.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Return the normalized bounding-box size.
    #[must_use]
    pub fn normalize_size(&self) -> f64 {
        self.normalize_size
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sample_count: Self::DEFAULT_SAMPLE_COUNT,
            normalize_size: Self::DEFAULT_NORMALIZE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.sample_count(), 10);
        assert_eq!(config.normalize_size(), 100.0);
    }

    #[test]
    fn accepts_valid_values() {
        let config = MatchConfig::new(32, 1.0).unwrap();
        assert_eq!(config.sample_count(), 32);
        assert_eq!(config.normalize_size(), 1.0);
    }

    #[test]
    fn rejects_zero_samples() {
        let result = MatchConfig::new(0, 100.0);
        assert!(matches!(result, Err(MatchError::InvalidSampleCount { sample_count: 0 })));
    }

    #[test]
    fn rejects_bad_sizes() {
        for size in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = MatchConfig::new(10, size);
            assert!(
                matches!(result, Err(MatchError::InvalidNormalizeSize { .. })),
                "size {size} should be rejected"
            );
        }
    }
}
