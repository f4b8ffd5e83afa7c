//! Match result type.

use asterism_shape::ShapeDistance;
use serde::Serialize;

/// The catalog entry that best matches a drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Name of the matched catalog entry.
    pub name: String,
    /// Mean point distance after alignment; lower is closer.
    pub score: ShapeDistance,
    /// Position of the matched entry in the catalog, for redrawing its stars.
    pub entry_index: usize,
}
