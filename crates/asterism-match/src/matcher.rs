//! Drawing-to-catalog matching.

use asterism_shape::{align, mean_distance, reflect, PointSequence, ShapeDistance};
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::catalog::{prepare, Catalog, PreparedCatalog, PreparedEntry};
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::result::MatchResult;

/// Match `drawing` against `catalog` and return the closest entry.
///
/// Returns `None` when the drawing has fewer than two points or when no
/// catalog entry is usable. Prepares the catalog on every call; use
/// [`Matcher`] to prepare once and match many drawings.
#[must_use]
pub fn match_shape(
    drawing: &PointSequence,
    catalog: &Catalog,
    config: &MatchConfig,
) -> Option<MatchResult> {
    Matcher::new(catalog, *config).find(drawing)
}

/// Matches drawings against a catalog prepared once up front.
///
/// The prepared catalog is read-only; a `Matcher` can be shared across
/// threads and each call is an independent, synchronous computation.
#[derive(Debug, Clone)]
pub struct Matcher {
    prepared: PreparedCatalog,
}

impl Matcher {
    /// Prepare `catalog` with `config`.
    #[must_use]
    pub fn new(catalog: &Catalog, config: MatchConfig) -> Self {
        Self {
            prepared: PreparedCatalog::build(catalog, config),
        }
    }

    /// Use an already prepared catalog, checking it was built with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ConfigMismatch`] if `prepared` was built with a
    /// different sample count or normalize size.
    pub fn from_prepared(prepared: PreparedCatalog, config: MatchConfig) -> Result<Self, MatchError> {
        let found = prepared.config();
        if found != config {
            return Err(MatchError::ConfigMismatch {
                expected_samples: config.sample_count(),
                expected_size: config.normalize_size(),
                found_samples: found.sample_count(),
                found_size: found.normalize_size(),
            });
        }
        Ok(Self { prepared })
    }

    /// Return the configuration drawings are prepared with.
    #[must_use]
    pub fn config(&self) -> MatchConfig {
        self.prepared.config()
    }

    /// Return the prepared catalog.
    #[must_use]
    pub fn prepared(&self) -> &PreparedCatalog {
        &self.prepared
    }

    /// Return the closest catalog entry to `drawing`, if any.
    ///
    /// Both the drawing and its mirror image are aligned against every
    /// prepared entry. The lowest score wins; on equal scores the entry that
    /// appears first in the catalog is kept.
    #[must_use]
    #[instrument(skip_all, fields(n_points = drawing.len()))]
    pub fn find(&self, drawing: &PointSequence) -> Option<MatchResult> {
        let variants = self.variants(drawing)?;

        let mut best: Option<(&PreparedEntry, ShapeDistance)> = None;
        for entry in self.prepared.entries() {
            let Some(score) = entry_score(&variants, entry) else {
                continue;
            };
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((entry, score));
            }
        }

        let result = best.map(|(entry, score)| to_result(entry, score));
        match &result {
            Some(m) => debug!(name = %m.name, score = %m.score, "best match"),
            None => debug!("no usable catalog entries"),
        }
        result
    }

    /// Score `drawing` against every usable entry and return the `limit`
    /// closest, best first.
    ///
    /// Equal scores keep catalog order. Returns an empty list when the
    /// drawing cannot be matched.
    #[must_use]
    #[instrument(skip_all, fields(n_points = drawing.len(), limit))]
    pub fn rank(&self, drawing: &PointSequence, limit: usize) -> Vec<MatchResult> {
        let Some(variants) = self.variants(drawing) else {
            return Vec::new();
        };

        let mut scored: Vec<(&PreparedEntry, ShapeDistance)> = self
            .prepared
            .entries()
            .iter()
            .filter_map(|entry| entry_score(&variants, entry).map(|score| (entry, score)))
            .collect();
        // Stable sort: ties stay in catalog order.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        scored
            .into_iter()
            .take(limit)
            .map(|(entry, score)| to_result(entry, score))
            .collect()
    }

    /// Match many drawings independently, in parallel across drawings.
    ///
    /// Output position `i` holds the result for `drawings[i]`.
    #[must_use]
    #[instrument(skip_all, fields(n = drawings.len()))]
    pub fn find_batch(&self, drawings: &[PointSequence]) -> Vec<Option<MatchResult>> {
        drawings.par_iter().map(|d| self.find(d)).collect()
    }

    /// Prepare `drawing` and its mirror image, or `None` if it is too short.
    fn variants(&self, drawing: &PointSequence) -> Option<[PointSequence; 2]> {
        match prepare(drawing, &self.prepared.config) {
            Ok(samples) => {
                let mirrored = reflect(&samples);
                Some([samples, mirrored])
            }
            Err(err) => {
                debug!(%err, "drawing cannot be matched");
                None
            }
        }
    }
}

/// Best score of either drawing variant against one prepared entry.
///
/// Variants are tried in order and only a strictly lower score replaces the
/// running best, so the unmirrored drawing wins ties.
fn entry_score(variants: &[PointSequence; 2], entry: &PreparedEntry) -> Option<ShapeDistance> {
    let mut best: Option<ShapeDistance> = None;
    for variant in variants {
        let scored = align(variant, &entry.samples)
            .and_then(|alignment| mean_distance(&alignment.points, &entry.samples));
        match scored {
            Ok(score) => {
                if best.is_none_or(|b| score < b) {
                    best = Some(score);
                }
            }
            Err(err) => warn!(name = %entry.name, %err, "skipping variant"),
        }
    }
    best
}

fn to_result(entry: &PreparedEntry, score: ShapeDistance) -> MatchResult {
    MatchResult {
        name: entry.name.clone(),
        score,
        entry_index: entry.index,
    }
}
