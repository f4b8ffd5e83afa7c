//! Planar shape primitives for constellation matching.
//!
//! Pure math library with zero I/O. Provides validated point sequences,
//! bounding-box normalization, arc-length resampling, mirror variants,
//! rotation-only Procrustes alignment, and the mean point distance used to
//! score an alignment.

mod align;
mod distance;
mod error;
mod normalize;
mod point;
mod reflect;
mod resample;

pub use align::{align, centroid, Alignment};
pub use distance::{mean_distance, ShapeDistance};
pub use error::ShapeError;
pub use normalize::normalize;
pub use point::{Point, PointSequence};
pub use reflect::reflect;
pub use resample::{path_length, resample};
