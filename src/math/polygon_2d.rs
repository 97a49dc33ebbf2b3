use serde::{Deserialize, Serialize};

use super::intersect_2d::{orient_2d, segments_intersect};
use super::{Aabb2, Point2, Vector2, TOLERANCE};

/// A simple closed polygon; the last vertex connects back to the first.
///
/// Generators only hand out polygons that are simple by construction, so
/// this type does not re-validate crossing edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Wraps a vertex ring, dropping repeated consecutive points.
    ///
    /// Returns `None` when fewer than 3 distinct vertices remain.
    #[must_use]
    pub fn new(mut vertices: Vec<Point2>) -> Option<Self> {
        vertices.dedup_by(|a, b| (*a - *b).norm() < TOLERANCE);
        while vertices.len() > 1 {
            let (first, last) = (vertices[0], vertices[vertices.len() - 1]);
            if (first - last).norm() < TOLERANCE {
                vertices.pop();
            } else {
                break;
            }
        }
        (vertices.len() >= 3).then_some(Self { vertices })
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unsigned enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.vertices).abs()
    }

    /// Whether no two non-adjacent edges touch.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        is_simple(&self.vertices)
    }
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Area centroid of a polygon, falling back to the vertex mean when the
/// enclosed area vanishes. `None` for an empty slice.
#[must_use]
pub fn centroid_2d(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let n = points.len();
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    a *= 0.5;
    if a.abs() < TOLERANCE {
        #[allow(clippy::cast_precision_loss)]
        let inv = 1.0 / n as f64;
        let sum = points
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        return Some(Point2::from(sum * inv));
    }
    Some(Point2::new(cx / (6.0 * a), cy / (6.0 * a)))
}

/// Returns the ring reordered counter-clockwise.
#[must_use]
pub fn oriented_ccw(mut points: Vec<Point2>) -> Vec<Point2> {
    if signed_area_2d(&points) < 0.0 {
        points.reverse();
    }
    points
}

/// Maps the bounding box of `points` onto `target`.
///
/// Points are returned unchanged when either extent is below `1e-9`.
#[must_use]
pub fn normalize_to_box(points: &[Point2], target: &Aabb2) -> Vec<Point2> {
    let Some(bb) = Aabb2::from_points(points) else {
        return Vec::new();
    };
    let (w, h) = (bb.width(), bb.height());
    if w < 1e-9 || h < 1e-9 {
        return points.to_vec();
    }
    points
        .iter()
        .map(|p| {
            Point2::new(
                (p.x - bb.min.x) / w * target.width() + target.min.x,
                (p.y - bb.min.y) / h * target.height() + target.min.y,
            )
        })
        .collect()
}

/// Translates every point by `offset`.
#[must_use]
pub fn translate(points: &[Point2], offset: Vector2) -> Vec<Point2> {
    points.iter().map(|p| *p + offset).collect()
}

/// Rotates every point counter-clockwise by `angle` radians about `center`.
#[must_use]
pub fn rotate_about(points: &[Point2], center: &Point2, angle: f64) -> Vec<Point2> {
    let (s, c) = angle.sin_cos();
    points
        .iter()
        .map(|p| {
            let d = *p - *center;
            Point2::new(center.x + c * d.x - s * d.y, center.y + s * d.x + c * d.y)
        })
        .collect()
}

/// Length of the closed ring, including the closing edge.
#[must_use]
pub fn perimeter_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| (points[(i + 1) % n] - points[i]).norm()).sum()
}

/// Whether every turn of the ring has the same strict orientation.
#[must_use]
pub fn is_strictly_convex(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut left = None;
    for i in 0..n {
        let turn = orient_2d(&points[i], &points[(i + 1) % n], &points[(i + 2) % n]);
        if turn.abs() < TOLERANCE {
            return false;
        }
        if *left.get_or_insert(turn > 0.0) != (turn > 0.0) {
            return false;
        }
    }
    true
}

/// Checks that a closed ring has no touching non-adjacent edges.
#[must_use]
pub fn is_simple(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 1)..n {
            // Skip the edge itself and its two neighbours.
            if j == i || (j + 1) % n == i || (i + 1) % n == j {
                continue;
            }
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segments_intersect(a0, a1, b0, b1) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&unit_square());
        assert!((area - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!((signed_area_2d(&[p(0.0, 0.0)])).abs() < TOLERANCE);
        assert!((signed_area_2d(&[])).abs() < TOLERANCE);
    }

    #[test]
    fn polygon_new_drops_repeats() {
        let poly = Polygon::new(vec![
            p(0.0, 0.0),
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(poly.len(), 3);
        assert!(Polygon::new(vec![p(0.0, 0.0), p(1.0, 1.0)]).is_none());
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid_2d(&unit_square()).unwrap();
        assert!((c.x - 0.5).abs() < TOLERANCE);
        assert!((c.y - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_of_collinear_falls_back_to_mean() {
        let c = centroid_2d(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]).unwrap();
        assert!((c.x - 1.0).abs() < TOLERANCE);
        assert!(centroid_2d(&[]).is_none());
    }

    #[test]
    fn normalize_maps_onto_target() {
        let pts = vec![p(10.0, 10.0), p(30.0, 10.0), p(30.0, 50.0)];
        let out = normalize_to_box(&pts, &Aabb2::unit());
        assert_eq!(out[0], p(0.0, 0.0));
        assert_eq!(out[2], p(1.0, 1.0));
    }

    #[test]
    fn normalize_leaves_flat_input() {
        let pts = vec![p(0.0, 2.0), p(5.0, 2.0)];
        assert_eq!(normalize_to_box(&pts, &Aabb2::unit()), pts);
    }

    #[test]
    fn rotate_quarter_turn() {
        let out = rotate_about(&[p(1.0, 0.0)], &p(0.0, 0.0), FRAC_PI_2);
        assert!(out[0].x.abs() < 1e-12);
        assert!((out[0].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bowtie_is_not_simple() {
        let bowtie = vec![p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0), p(0.0, 1.0)];
        assert!(!is_simple(&bowtie));
        assert!(is_simple(&unit_square()));
    }

    #[test]
    fn square_is_strictly_convex() {
        assert!(is_strictly_convex(&unit_square()));
        let dented = vec![p(0.0, 0.0), p(1.0, 0.0), p(0.5, 0.2), p(1.0, 1.0), p(0.0, 1.0)];
        assert!(!is_strictly_convex(&dented));
        let flat = vec![p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0), p(1.0, 1.0)];
        assert!(!is_strictly_convex(&flat));
    }

    #[test]
    fn perimeter_of_square() {
        assert!((perimeter_2d(&unit_square()) - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn oriented_ccw_reverses_clockwise() {
        let mut cw = unit_square();
        cw.reverse();
        assert!(signed_area_2d(&oriented_ccw(cw)) > 0.0);
    }
}
