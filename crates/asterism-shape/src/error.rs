//! Error types for point sequence validation, resampling and alignment.

/// Errors from shape primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// Returned when a coordinate is NaN, infinity, or negative infinity.
    #[error("point sequence contains non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// Position of the first point with a non-finite coordinate.
        index: usize,
    },

    /// Returned when an operation needs at least one point and got none.
    #[error("point sequence must be non-empty")]
    EmptySequence,

    /// Returned when resampling is asked for zero output points.
    #[error("sample count must be at least 1")]
    ZeroSampleCount,

    /// Returned when a sequence is too short to describe a path.
    #[error("point sequence has {len} points, need at least {min}")]
    TooFewPoints {
        /// Number of points provided.
        len: usize,
        /// Minimum number of points required.
        min: usize,
    },

    /// Returned when the aligner is given sequences of different lengths.
    #[error("cannot align {moving} points onto {target} points")]
    LengthMismatch {
        /// Length of the moving sequence.
        moving: usize,
        /// Length of the target sequence.
        target: usize,
    },
}
