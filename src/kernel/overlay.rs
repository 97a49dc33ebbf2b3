use geo::{Area, BooleanOps, LineString, MultiPolygon, Polygon as GeoPolygon};

use crate::math::Point2;

/// Areas of two polygons and of their overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayAreas {
    pub area_a: f64,
    pub area_b: f64,
    pub intersection: f64,
    pub union: f64,
    pub xor: f64,
}

impl OverlayAreas {
    #[must_use]
    pub fn symmetric_difference(&self) -> f64 {
        self.xor.max(0.0)
    }

    /// Intersection over union, 0 when the union is empty.
    #[must_use]
    pub fn iou(&self) -> f64 {
        if self.union > 0.0 {
            (self.intersection / self.union).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Wraps a closed ring as a geo shape. Rings with fewer than 3 vertices
/// become the empty shape.
fn to_geo(ring: &[Point2]) -> MultiPolygon<f64> {
    if ring.len() < 3 {
        return MultiPolygon::new(Vec::new());
    }
    let exterior: LineString<f64> = ring.iter().map(|p| (p.x, p.y)).collect();
    MultiPolygon::new(vec![GeoPolygon::new(exterior, Vec::new())])
}

/// Computes overlay areas of two closed rings with geo's boolean operations.
///
/// Rings with fewer than 3 vertices contribute zero area.
#[must_use]
pub fn overlay_areas(a: &[Point2], b: &[Point2]) -> OverlayAreas {
    let ga = to_geo(a);
    let gb = to_geo(b);
    OverlayAreas {
        area_a: ga.unsigned_area(),
        area_b: gb.unsigned_area(),
        intersection: ga.intersection(&gb).unsigned_area(),
        union: ga.union(&gb).unsigned_area(),
        xor: ga.xor(&gb).unsigned_area(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-6;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(x0: f64, y0: f64, s: f64) -> Vec<Point2> {
        vec![p(x0, y0), p(x0 + s, y0), p(x0 + s, y0 + s), p(x0, y0 + s)]
    }

    #[test]
    fn identical_squares() {
        let sq = square(0.0, 0.0, 1.0);
        let o = overlay_areas(&sq, &sq);
        assert_abs_diff_eq!(o.area_a, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(o.intersection, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(o.union, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(o.symmetric_difference(), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(o.iou(), 1.0, epsilon = EPS);
    }

    #[test]
    fn half_shifted_squares() {
        let o = overlay_areas(&square(0.0, 0.0, 1.0), &square(0.5, 0.0, 1.0));
        assert_abs_diff_eq!(o.intersection, 0.5, epsilon = EPS);
        assert_abs_diff_eq!(o.union, 1.5, epsilon = EPS);
        assert_abs_diff_eq!(o.symmetric_difference(), 1.0, epsilon = EPS);
    }

    #[test]
    fn disjoint_squares() {
        let o = overlay_areas(&square(0.0, 0.0, 1.0), &square(3.0, 3.0, 1.0));
        assert_abs_diff_eq!(o.intersection, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(o.union, 2.0, epsilon = EPS);
        assert_abs_diff_eq!(o.symmetric_difference(), 2.0, epsilon = EPS);
        assert_abs_diff_eq!(o.iou(), 0.0, epsilon = EPS);
    }

    #[test]
    fn rotated_square_against_square() {
        // Diamond inscribed in the 2x2 square centred at the origin.
        let sq = square(-1.0, -1.0, 2.0);
        let diamond = vec![p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0), p(0.0, -1.0)];
        let o = overlay_areas(&sq, &diamond);
        assert_abs_diff_eq!(o.area_b, 2.0, epsilon = EPS);
        assert_abs_diff_eq!(o.intersection, 2.0, epsilon = EPS);
        assert_abs_diff_eq!(o.union, 4.0, epsilon = EPS);
    }

    #[test]
    fn concave_l_shape_against_square() {
        let l_shape = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        let o = overlay_areas(&l_shape, &square(1.0, 1.0, 1.0));
        assert_abs_diff_eq!(o.area_a, 3.0, epsilon = EPS);
        assert_abs_diff_eq!(o.intersection, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(o.union, 4.0, epsilon = EPS);
    }

    #[test]
    fn clockwise_ring_has_positive_area() {
        let mut sq = square(0.0, 0.0, 2.0);
        sq.reverse();
        let o = overlay_areas(&sq, &square(1.0, 1.0, 2.0));
        assert_abs_diff_eq!(o.area_a, 4.0, epsilon = EPS);
        assert_abs_diff_eq!(o.intersection, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(o.union, 7.0, epsilon = EPS);
    }

    #[test]
    fn degenerate_ring_has_no_area() {
        let o = overlay_areas(&[p(0.0, 0.0), p(1.0, 1.0)], &square(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(o.area_a, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(o.intersection, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(o.union, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(o.symmetric_difference(), 1.0, epsilon = EPS);
    }
}
