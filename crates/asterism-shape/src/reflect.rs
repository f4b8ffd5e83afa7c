//! Mirror variant of a point sequence.

use crate::point::{Point, PointSequence};

/// Mirror `seq` across the x axis by negating every y coordinate.
#[must_use = "returns a new mirrored sequence; the original is unchanged"]
pub fn reflect(seq: &PointSequence) -> PointSequence {
    PointSequence::new_unchecked(seq.iter().map(|p| Point::new(p.x, -p.y)).collect())
}
