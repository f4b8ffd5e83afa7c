//! Reference catalog types and the prepared (normalized + resampled) cache.

use asterism_shape::{normalize, resample, PointSequence, ShapeError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::MatchConfig;
use crate::error::MatchError;

/// Minimum number of points a drawing or catalog entry needs to be matched.
pub const MIN_POINTS: usize = 2;

/// A named reference polyline in planar coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    name: String,
    stars: PointSequence,
}

impl CatalogEntry {
    /// Create a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyName`] if `name` is empty.
    pub fn new(name: impl Into<String>, stars: PointSequence) -> Result<Self, MatchError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MatchError::EmptyName);
        }
        Ok(Self { name, stars })
    }

    /// Return the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the reference polyline.
    #[must_use]
    pub fn stars(&self) -> &PointSequence {
        &self.stars
    }
}

/// An ordered, immutable collection of catalog entries.
///
/// Order matters: when two entries score equally against a drawing, the one
/// that appears first wins. Names need not be unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create a catalog from entries in their significant order.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Return the entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Return the entry at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Return the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Normalize and resample `seq` into the form every comparison works on.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ShapeError::TooFewPoints`] | `seq` has fewer than [`MIN_POINTS`] points |
#[must_use = "returns the prepared samples; the original is unchanged"]
pub fn prepare(seq: &PointSequence, config: &MatchConfig) -> Result<PointSequence, ShapeError> {
    if seq.len() < MIN_POINTS {
        return Err(ShapeError::TooFewPoints {
            len: seq.len(),
            min: MIN_POINTS,
        });
    }
    resample(&normalize(seq, config.normalize_size), config.sample_count)
}

/// A catalog entry after normalization and resampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedEntry {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) samples: PointSequence,
}

impl PreparedEntry {
    /// Position of the source entry in its catalog.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the source entry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized, resampled reference points.
    #[must_use]
    pub fn samples(&self) -> &PointSequence {
        &self.samples
    }
}

/// Every usable catalog entry prepared once for a fixed [`MatchConfig`].
///
/// Entries with fewer than [`MIN_POINTS`] stars are left out and counted in
/// [`skipped`](PreparedCatalog::skipped). Catalog order is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedCatalog {
    pub(crate) config: MatchConfig,
    pub(crate) entries: Vec<PreparedEntry>,
    pub(crate) skipped: usize,
}

impl PreparedCatalog {
    /// Prepare every entry of `catalog` with `config`.
    #[instrument(skip(catalog), fields(n_entries = catalog.len()))]
    pub fn build(catalog: &Catalog, config: MatchConfig) -> Self {
        let mut entries = Vec::with_capacity(catalog.len());
        let mut skipped = 0;

        for (index, entry) in catalog.iter().enumerate() {
            match prepare(entry.stars(), &config) {
                Ok(samples) => entries.push(PreparedEntry {
                    index,
                    name: entry.name().to_string(),
                    samples,
                }),
                Err(err) => {
                    debug!(index, name = entry.name(), %err, "skipping catalog entry");
                    skipped += 1;
                }
            }
        }

        info!(usable = entries.len(), skipped, "catalog prepared");
        Self {
            config,
            entries,
            skipped,
        }
    }

    /// Return the configuration the catalog was prepared with.
    #[must_use]
    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Return the prepared entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[PreparedEntry] {
        &self.entries
    }

    /// Return the number of entries that were too short to prepare.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Return the number of usable entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if no entry was usable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
