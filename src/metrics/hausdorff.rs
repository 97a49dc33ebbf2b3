use super::measured::{Degeneracy, Measured};
use crate::kernel::PointIndex;
use crate::math::Point2;

/// Largest distance from a point of `from` to its nearest point in `to`.
///
/// `f64::INFINITY` when either set is empty.
#[must_use]
pub fn directed_hausdorff(from: &[Point2], to: &[Point2]) -> f64 {
    if from.is_empty() || to.is_empty() {
        return f64::INFINITY;
    }
    let index = PointIndex::new(to);
    from.iter()
        .filter_map(|p| index.nearest(p).map(|(_, d)| d))
        .fold(0.0, f64::max)
}

/// Symmetric Hausdorff distance between two point sets.
///
/// Degenerate with sentinel `+∞` when either set is empty.
#[must_use]
pub fn hausdorff_distance(a: &[Point2], b: &[Point2]) -> Measured<f64> {
    if a.is_empty() || b.is_empty() {
        return Measured::degenerate(Degeneracy::EmptyInput, f64::INFINITY);
    }
    Measured::ok(directed_hausdorff(a, b).max(directed_hausdorff(b, a)))
}
