use std::f64::consts::{PI, TAU};

use super::hausdorff::hausdorff_distance;
use super::measured::{Degeneracy, Measured};
use super::MetricParams;
use crate::kernel::overlay_areas;
use crate::math::polygon_2d::{centroid_2d, normalize_to_box, rotate_about, translate};
use crate::math::{Aabb2, Point2};

fn hausdorff_to_similarity(distance: f64, params: &MetricParams) -> f64 {
    (1.0 - distance / params.hausdorff_scale).max(0.0)
}

/// Blend of Hausdorff closeness and area overlap after both shapes are
/// mapped onto the unit box.
///
/// `hausdorff_weight * max(0, 1 - h / hausdorff_scale) + overlap_weight *
/// IoU`, clamped to `[0, 1]`. Degenerate with sentinel `0.0` when either
/// ring has fewer than 3 points.
#[must_use]
pub fn shape_similarity(
    user: &[Point2],
    reference: &[Point2],
    params: &MetricParams,
) -> Measured<f64> {
    if user.len() < 3 || reference.len() < 3 {
        return Measured::degenerate(Degeneracy::TooFewPoints, 0.0);
    }
    let unit = Aabb2::unit();
    let u = normalize_to_box(user, &unit);
    let r = normalize_to_box(reference, &unit);
    let closeness = hausdorff_to_similarity(hausdorff_distance(&u, &r).value(), params);
    let iou = overlay_areas(&u, &r).iou();
    let blended = params.hausdorff_weight * closeness + params.overlap_weight * iou;
    Measured::ok(blended.clamp(0.0, 1.0))
}

/// Rotation-invariant similarity by exhaustive rotation search.
///
/// Both rings are mapped onto the unit box and centred on their centroids;
/// the target is rotated through a full turn in `rotation_step_deg`
/// increments and the smallest Hausdorff distance to the user ring is
/// mapped to a score as in [`shape_similarity`]. Degenerate with sentinel
/// `0.0` when either ring has fewer than 3 points.
#[must_use]
pub fn arkin_similarity(
    user: &[Point2],
    target: &[Point2],
    params: &MetricParams,
) -> Measured<f64> {
    if user.len() < 3 || target.len() < 3 {
        return Measured::degenerate(Degeneracy::TooFewPoints, 0.0);
    }
    let unit = Aabb2::unit();
    let centred = |ring: &[Point2]| -> Vec<Point2> {
        let normalized = normalize_to_box(ring, &unit);
        match centroid_2d(&normalized) {
            Some(c) => translate(&normalized, -c.coords),
            None => normalized,
        }
    };
    let u = centred(user);
    let t = centred(target);

    let origin = Point2::origin();
    let step = params.rotation_step_deg;
    let rotations = if step.is_finite() && step > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (360.0 / step).ceil() as usize;
        count.clamp(1, 3600)
    } else {
        1
    };
    let best = (0..rotations)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let angle = (k as f64 * step).to_radians();
            let rotated = rotate_about(&t, &origin, angle);
            hausdorff_distance(&u, &rotated).value()
        })
        .fold(f64::INFINITY, f64::min);
    Measured::ok(hausdorff_to_similarity(best, params))
}

/// Signed turn at every vertex of a closed ring, in `(-π, π]`.
#[must_use]
pub fn turning_angles(ring: &[Point2]) -> Vec<f64> {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let a = (cur.y - prev.y).atan2(cur.x - prev.x);
            let b = (next.y - cur.y).atan2(next.x - cur.x);
            let mut turn = b - a;
            while turn <= -PI {
                turn += TAU;
            }
            while turn > PI {
                turn -= TAU;
            }
            turn
        })
        .collect()
}

/// Root-sum-square difference of the two rings' turning angles over the
/// longer ring's length, capped at 1. The shorter sequence is padded with
/// zero turns and no cyclic shift is searched.
///
/// Degenerate with sentinel `1.0` when either ring has fewer than 3
/// points.
#[must_use]
pub fn turning_dissimilarity(a: &[Point2], b: &[Point2]) -> Measured<f64> {
    if a.len() < 3 || b.len() < 3 {
        return Measured::degenerate(Degeneracy::TooFewPoints, 1.0);
    }
    let (ta, tb) = (turning_angles(a), turning_angles(b));
    let longest = ta.len().max(tb.len());
    let sum_sq: f64 = (0..longest)
        .map(|i| {
            let d = ta.get(i).copied().unwrap_or(0.0) - tb.get(i).copied().unwrap_or(0.0);
            d * d
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let score = (sum_sq.sqrt() / longest as f64).min(1.0);
    Measured::ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]
    }

    fn arrow() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(4.0, 1.0), p(0.0, 2.0), p(1.0, 1.0)]
    }

    // ── shape_similarity ───────────────────────────────────────

    #[test]
    fn scaled_copy_is_identical() {
        let big: Vec<Point2> = arrow().iter().map(|q| p(q.x * 50.0 + 7.0, q.y * 50.0)).collect();
        let s = shape_similarity(&arrow(), &big, &MetricParams::default()).value();
        assert_relative_eq!(s, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn different_shapes_score_lower() {
        let s = shape_similarity(&arrow(), &square(), &MetricParams::default()).value();
        assert!(s < 0.9);
        assert!(s > 0.0);
    }

    #[test]
    fn shape_needs_three_points() {
        let s = shape_similarity(&[p(0.0, 0.0), p(1.0, 1.0)], &square(), &MetricParams::default());
        assert_eq!(s.reason(), Some(Degeneracy::TooFewPoints));
    }

    // ── arkin_similarity ───────────────────────────────────────

    #[test]
    fn rotation_is_ignored() {
        let rotated = rotate_about(&arrow(), &p(2.0, 1.0), PI / 2.0);
        let params = MetricParams::default();
        let plain = shape_similarity(&arrow(), &rotated, &params).value();
        let arkin = arkin_similarity(&arrow(), &rotated, &params).value();
        assert!(plain < 0.99);
        assert_relative_eq!(arkin, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn self_arkin_is_one() {
        let a = arkin_similarity(&square(), &square(), &MetricParams::default());
        assert_relative_eq!(a.value(), 1.0, epsilon = 1e-12);
    }

    // ── turning angles ─────────────────────────────────────────

    #[test]
    fn square_turns_quarter_each_corner() {
        for t in turning_angles(&square()) {
            assert_relative_eq!(t, PI / 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn turning_dissimilarity_bounds() {
        assert_relative_eq!(turning_dissimilarity(&square(), &square()).value(), 0.0);
        let d = turning_dissimilarity(&square(), &arrow()).value();
        assert!(d > 0.0 && d <= 1.0);
        assert!(turning_dissimilarity(&square(), &[p(0.0, 0.0)]).is_degenerate());
    }
}
