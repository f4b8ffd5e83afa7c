//! Shape distance newtype and the mean point distance score.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::point::PointSequence;

/// A non-negative shape distance: lower means more similar.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ShapeDistance(f64);

impl ShapeDistance {
    /// Zero distance: identical shapes.
    pub const ZERO: Self = Self(0.0);

    /// Create a new distance from a raw value.
    pub(crate) fn new(value: f64) -> Self {
        debug_assert!(value >= 0.0, "distance must be non-negative, got {value}");
        Self(value)
    }

    /// Return the raw distance value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for ShapeDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Mean Euclidean distance between corresponding points of `a` and `b`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ShapeError::LengthMismatch`] | `a.len() != b.len()` |
/// | [`ShapeError::EmptySequence`] | Both sequences are empty |
pub fn mean_distance(a: &PointSequence, b: &PointSequence) -> Result<ShapeDistance, ShapeError> {
    if a.len() != b.len() {
        return Err(ShapeError::LengthMismatch {
            moving: a.len(),
            target: b.len(),
        });
    }
    if a.is_empty() {
        return Err(ShapeError::EmptySequence);
    }
    let total: f64 = a.iter().zip(b.iter()).map(|(p, q)| p.distance(*q)).sum();
    Ok(ShapeDistance::new(total / a.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let d = ShapeDistance::new(1.234567);
        assert_eq!(format!("{d}"), "1.234567");
    }

    #[test]
    fn total_cmp_ordering() {
        let a = ShapeDistance::new(1.0);
        let b = ShapeDistance::new(2.0);
        assert_eq!(a.total_cmp(&b), Ordering::Less);
        assert_eq!(b.total_cmp(&a), Ordering::Greater);
        assert_eq!(a.total_cmp(&a), Ordering::Equal);
        assert_eq!(ShapeDistance::ZERO.total_cmp(&a), Ordering::Less);
    }

    #[test]
    fn mean_of_pointwise_distances() {
        let a = PointSequence::from_xy([(0.0, 0.0), (0.0, 0.0)]).unwrap();
        let b = PointSequence::from_xy([(3.0, 4.0), (0.0, 1.0)]).unwrap();
        let d = mean_distance(&a, &b).unwrap();
        assert!((d.value() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn identical_is_zero() {
        let a = PointSequence::from_xy([(1.0, 2.0), (3.0, 5.0)]).unwrap();
        assert_eq!(mean_distance(&a, &a).unwrap(), ShapeDistance::ZERO);
    }

    #[test]
    fn mismatch_and_empty_rejected() {
        let a = PointSequence::from_xy([(0.0, 0.0)]).unwrap();
        let empty = PointSequence::default();
        assert!(matches!(
            mean_distance(&a, &empty),
            Err(ShapeError::LengthMismatch { moving: 1, target: 0 })
        ));
        assert!(matches!(mean_distance(&empty, &empty), Err(ShapeError::EmptySequence)));
    }
}
