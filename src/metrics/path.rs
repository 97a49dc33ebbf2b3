use std::f64::consts::{PI, TAU};

use super::measured::{Degeneracy, Measured};
use crate::math::distance_2d::polyline_length;
use crate::math::Point2;

/// Path length over the straight-line distance between its ends.
///
/// Degenerate with sentinel `1.0` for fewer than 2 points or when the
/// ends are closer than `1e-9`.
#[must_use]
pub fn tortuosity(path: &[Point2]) -> Measured<f64> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Measured::degenerate(Degeneracy::EmptyInput, 1.0);
    };
    if path.len() < 2 {
        return Measured::degenerate(Degeneracy::TooFewPoints, 1.0);
    }
    let straight = (*last - *first).norm();
    if straight < 1e-9 {
        return Measured::degenerate(Degeneracy::ZeroLength, 1.0);
    }
    Measured::ok(polyline_length(path) / straight)
}

/// Mean absolute direction difference, in degrees, between index-aligned
/// edges of the submitted and true visiting orders over `points`.
///
/// Each difference is folded into `[0, π]`. Edges referencing an index
/// outside `points` are skipped. Degenerate with sentinel `0.0` when
/// either order has fewer than 2 entries or no edge pair is usable.
#[must_use]
pub fn angular_deviation(
    submitted: &[usize],
    true_order: &[usize],
    points: &[Point2],
) -> Measured<f64> {
    if submitted.len() < 2 || true_order.len() < 2 {
        return Measured::degenerate(Degeneracy::TooFewPoints, 0.0);
    }
    let direction = |w: &[usize]| -> Option<f64> {
        let (a, b) = (points.get(w[0])?, points.get(w[1])?);
        Some((b.y - a.y).atan2(b.x - a.x))
    };
    let deviations: Vec<f64> = submitted
        .windows(2)
        .zip(true_order.windows(2))
        .filter_map(|(u, t)| {
            let mut diff = (direction(u)? - direction(t)?).abs();
            if diff > PI {
                diff = TAU - diff;
            }
            Some(diff.to_degrees())
        })
        .collect();
    if deviations.is_empty() {
        return Measured::degenerate(Degeneracy::EmptyInput, 0.0);
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = deviations.iter().sum::<f64>() / deviations.len() as f64;
    Measured::ok(mean)
}

/// Jerk proxy: mean absolute change between consecutive speeds.
///
/// Speeds are computed per step from `points` and millisecond
/// `timestamps`; steps with a non-positive time delta are skipped.
/// Degenerate with sentinel `0.0` for fewer than 3 points, mismatched
/// lengths, or fewer than 2 usable steps.
#[must_use]
pub fn smoothness_jerk(points: &[Point2], timestamps_ms: &[i64]) -> Measured<f64> {
    if points.len() < 3 {
        return Measured::degenerate(Degeneracy::TooFewPoints, 0.0);
    }
    if timestamps_ms.len() != points.len() {
        return Measured::degenerate(Degeneracy::EmptyInput, 0.0);
    }
    let speeds: Vec<f64> = points
        .windows(2)
        .zip(timestamps_ms.windows(2))
        .filter_map(|(p, t)| {
            #[allow(clippy::cast_precision_loss)]
            let dt = t[1].saturating_sub(t[0]) as f64 / 1000.0;
            (dt > 0.0).then(|| (p[1] - p[0]).norm() / dt)
        })
        .collect();
    if speeds.len() < 2 {
        return Measured::degenerate(Degeneracy::ZeroLength, 0.0);
    }
    let changes: Vec<f64> = speeds.windows(2).map(|v| (v[1] - v[0]).abs()).collect();
    #[allow(clippy::cast_precision_loss)]
    let mean = changes.iter().sum::<f64>() / changes.len() as f64;
    Measured::ok(mean)
}
