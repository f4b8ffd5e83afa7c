//! Bounding-box normalization: removes translation and scale.

use crate::point::{Point, PointSequence};

/// Translate `seq` so its bounding box starts at the origin and scale it
/// uniformly so the longer box side equals `target_size`.
///
/// Both axes share one scale factor, so the aspect ratio is preserved.
/// Degenerate boxes fall back to a scale of 1:
///
/// - a single point maps to `(0, 0)`
/// - coincident points all map to `(0, 0)`
/// - a line along one axis keeps zero extent on the other axis
///
/// An empty sequence yields an empty sequence. Box sides and offsets are
/// taken from halved coordinates, so inputs near `f64::MAX` still produce
/// finite output.
#[must_use = "returns a new normalized sequence; the original is unchanged"]
pub fn normalize(seq: &PointSequence, target_size: f64) -> PointSequence {
    let points = seq.as_slice();
    let Some(&first) = points.first() else {
        return PointSequence::default();
    };

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let half_extent = (max_x * 0.5 - min_x * 0.5).max(max_y * 0.5 - min_y * 0.5);
    // offset <= half_extent, so the ratio stays in [0, 1]
    let place = |v: f64, min: f64| {
        if half_extent > 0.0 {
            (v * 0.5 - min * 0.5) / half_extent * target_size
        } else {
            v - min
        }
    };

    let normalized = points
        .iter()
        .map(|p| Point::new(place(p.x, min_x), place(p.y, min_y)))
        .collect();
    PointSequence::new_unchecked(normalized)
}
