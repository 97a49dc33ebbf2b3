use super::measured::{Degeneracy, Measured};
use super::MetricParams;
use crate::kernel::{overlay_areas, simplify_ring};
use crate::math::Point2;

/// Motor tremor estimate in `[0, 1]`, 0 meaning a clean trace.
///
/// The traced ring is simplified with Douglas-Peucker at
/// `tremor_tolerance`; the symmetric-difference area between the trace and
/// its simplification, times `tremor_scale`, is capped at 1. Degenerate
/// with sentinel `0.0` for fewer than 3 points.
#[must_use]
pub fn tremor_score(trace: &[Point2], params: &MetricParams) -> Measured<f64> {
    if trace.len() < 3 {
        return Measured::degenerate(Degeneracy::TooFewPoints, 0.0);
    }
    let simplified = simplify_ring(trace, params.tremor_tolerance);
    let wobble = overlay_areas(trace, &simplified).symmetric_difference();
    Measured::ok((wobble * params.tremor_scale).min(1.0))
}
