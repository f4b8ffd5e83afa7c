//! Point and point sequence types with validation guarantees.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// A point in the shared planar coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Return true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Owned, ordered list of points. Guaranteed to contain only finite coordinates.
///
/// Order encodes path order along a stroke or reference line. Unlike the
/// shape operations themselves, the sequence may be empty: a drawing with no
/// points is valid input that simply cannot be matched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointSequence(Vec<Point>);

impl PointSequence {
    /// Create a new sequence, validating that every coordinate is finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ShapeError::NonFiniteCoordinate`] | Any coordinate is NaN or infinite |
    pub fn new(points: Vec<Point>) -> Result<Self, ShapeError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ShapeError::NonFiniteCoordinate { index });
        }
        Ok(Self(points))
    }

    /// Create a sequence from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`PointSequence::new`].
    pub fn from_xy<I>(pairs: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(Point::from).collect())
    }

    /// Wrap points produced by a transformation of already validated input.
    pub(crate) fn new_unchecked(points: Vec<Point>) -> Self {
        debug_assert!(points.iter().all(|p| p.is_finite()), "non-finite point produced");
        Self(points)
    }

    /// Return the points as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the sequence has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<Point> {
        self.0.first().copied()
    }

    /// Return the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.0.last().copied()
    }

    /// Iterate over the points in path order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Point> {
        self.0
    }
}

impl Index<usize> for PointSequence {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[Point]> for PointSequence {
    fn as_ref(&self) -> &[Point] {
        &self.0
    }
}

impl TryFrom<Vec<Point>> for PointSequence {
    type Error = ShapeError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PointSequence> for Vec<Point> {
    fn from(seq: PointSequence) -> Self {
        seq.0
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
