//! Arc-length resampling of polylines.

use tracing::instrument;

use crate::error::ShapeError;
use crate::point::{Point, PointSequence};

/// Total length of the polyline through `points`, in path order.
#[must_use]
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Resample `seq` to exactly `count` points evenly spaced by arc length.
///
/// The first output point is always the first input point. With `count == 1`
/// or a zero-length path, the output is `count` copies of the first point.
///
/// The walk keeps two independent pieces of state over the immutable source:
/// the distance consumed inside the current segment, and the distance carried
/// since the last emitted sample. Emitted points never feed back into the
/// source. When floating-point accumulation stops short of `count` samples,
/// the remainder is padded with the last source point.
///
/// The output is a pure function of the input: identical input and `count`
/// produce bit-identical output.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ShapeError::EmptySequence`] | `seq` has no points |
/// | [`ShapeError::ZeroSampleCount`] | `count` is zero |
#[instrument(level = "trace", skip(seq), fields(n = seq.len()))]
pub fn resample(seq: &PointSequence, count: usize) -> Result<PointSequence, ShapeError> {
    let points = seq.as_slice();
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Err(ShapeError::EmptySequence);
    };
    if count == 0 {
        return Err(ShapeError::ZeroSampleCount);
    }

    let total = path_length(points);
    if count == 1 || total == 0.0 {
        return Ok(PointSequence::new_unchecked(vec![first; count]));
    }

    let step = total / (count - 1) as f64;
    let mut samples = Vec::with_capacity(count);
    samples.push(first);

    // Distance walked since the last emitted sample; always < step between segments.
    let mut carried = 0.0;

    for segment in points.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let seg_len = start.distance(end);
        let mut consumed = 0.0;

        // carried < step here, so the loop body only runs when seg_len - consumed > 0.
        while samples.len() < count && carried + (seg_len - consumed) >= step {
            consumed += step - carried;
            samples.push(start.lerp(end, consumed / seg_len));
            carried = 0.0;
        }

        carried += seg_len - consumed;
    }

    samples.resize(count, last);
    Ok(PointSequence::new_unchecked(samples))
}
