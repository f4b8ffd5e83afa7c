//! Rotation-only planar Procrustes alignment.

use crate::error::ShapeError;
use crate::point::{Point, PointSequence};

/// Result of aligning a moving sequence onto a target sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// The moving sequence after rotation and translation, in target coordinates.
    pub points: PointSequence,
    /// Rotation applied about the moving sequence's centroid, in radians.
    pub rotation: f64,
}

/// Coordinate-wise mean of `points`, or `None` if `points` is empty.
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Rotate and translate `moving` to best overlay `target` in the least-squares sense.
///
/// Point `i` of `moving` corresponds to point `i` of `target`. No scaling and
/// no reflection are applied. The optimal angle is
/// `atan2(Σ a×b, Σ a·b)` over the centered pairs; when both sums are exactly
/// zero the rotation is the identity. The rotated points are placed about
/// the target's centroid.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ShapeError::LengthMismatch`] | `moving.len() != target.len()` |
/// | [`ShapeError::EmptySequence`] | Both sequences are empty |
pub fn align(moving: &PointSequence, target: &PointSequence) -> Result<Alignment, ShapeError> {
    if moving.len() != target.len() {
        return Err(ShapeError::LengthMismatch {
            moving: moving.len(),
            target: target.len(),
        });
    }
    let a = moving.as_slice();
    let b = target.as_slice();
    let (Some(ca), Some(cb)) = (centroid(a), centroid(b)) else {
        return Err(ShapeError::EmptySequence);
    };

    let mut s_cross = 0.0;
    let mut s_dot = 0.0;
    for (p, q) in a.iter().zip(b) {
        let (ax, ay) = (p.x - ca.x, p.y - ca.y);
        let (bx, by) = (q.x - cb.x, q.y - cb.y);
        s_cross += ax * by - ay * bx;
        s_dot += ax * bx + ay * by;
    }

    let rotation = if s_cross == 0.0 && s_dot == 0.0 {
        0.0
    } else {
        s_cross.atan2(s_dot)
    };
    let (sin, cos) = rotation.sin_cos();

    let aligned = a
        .iter()
        .map(|p| {
            let (x, y) = (p.x - ca.x, p.y - ca.y);
            Point::new(cos * x - sin * y + cb.x, sin * x + cos * y + cb.y)
        })
        .collect();

    Ok(Alignment {
        points: PointSequence::new_unchecked(aligned),
        rotation,
    })
}
