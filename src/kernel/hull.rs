use geo::{ConvexHull, MultiPoint};

use crate::math::intersect_2d::orient_2d;
use crate::math::{Point2, TOLERANCE};

/// Convex hull as indices into `points`.
///
/// The hull comes from geo's `ConvexHull`; its ring is mapped back to input
/// indices in counter-clockwise order, starting at the lowest-leftmost point.
/// Collinear boundary points are dropped, so the hull is strictly convex.
/// Duplicate positions keep their first index. With fewer than 3 distinct
/// positions every distinct index is returned; a collinear cloud yields its
/// two extreme points.
#[must_use]
pub fn convex_hull_indices(points: &[Point2]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .x
            .total_cmp(&points[b].x)
            .then(points[a].y.total_cmp(&points[b].y))
            .then(a.cmp(&b))
    });
    order.dedup_by(|a, b| (points[*a] - points[*b]).norm() < 1e-12);
    if order.len() < 3 {
        return order;
    }

    let cloud: MultiPoint<f64> = order.iter().map(|&i| (points[i].x, points[i].y)).collect();
    let ring = cloud.convex_hull();

    // geo copies input coordinates onto the ring, so each maps back exactly.
    let mut hull: Vec<usize> = ring
        .exterior()
        .coords()
        .filter_map(|c| {
            order
                .iter()
                .copied()
                .find(|&i| (points[i] - Point2::new(c.x, c.y)).norm() < 1e-12)
        })
        .collect();
    hull.dedup();
    while hull.len() > 1 && hull.first() == hull.last() {
        hull.pop();
    }

    strip_collinear(points, &mut hull);
    if hull.len() < 3 {
        return vec![order[0], order[order.len() - 1]];
    }
    if ring_orientation(points, &hull) < 0.0 {
        hull.reverse();
    }
    if let Some(start) = hull.iter().position(|&i| i == order[0]) {
        hull.rotate_left(start);
    }
    hull
}

/// Removes vertices that do not make a strict turn.
fn strip_collinear(points: &[Point2], hull: &mut Vec<usize>) {
    let mut i = 0;
    while hull.len() >= 3 && i < hull.len() {
        let n = hull.len();
        let prev = points[hull[(i + n - 1) % n]];
        let next = points[hull[(i + 1) % n]];
        if orient_2d(&prev, &points[hull[i]], &next).abs() <= TOLERANCE {
            hull.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
}

fn ring_orientation(points: &[Point2], hull: &[usize]) -> f64 {
    let n = hull.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[hull[i]], points[hull[(i + 1) % n]]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Convex hull vertices in counter-clockwise order.
#[must_use]
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    convex_hull_indices(points)
        .into_iter()
        .map(|i| points[i])
        .collect()
}
