use geo::{LineString, Polygon as GeoPolygon, Simplify};

use crate::math::Point2;

fn to_line_string(points: &[Point2]) -> LineString<f64> {
    points.iter().map(|p| (p.x, p.y)).collect()
}

fn from_line_string(line: &LineString<f64>) -> Vec<Point2> {
    line.coords().map(|c| Point2::new(c.x, c.y)).collect()
}

/// Douglas-Peucker simplification of an open polyline.
///
/// Keeps both endpoints and every vertex farther than `tolerance` from the
/// chord of its enclosing kept span.
#[must_use]
pub fn simplify_polyline(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    from_line_string(&to_line_string(points).simplify(&tolerance))
}

/// Douglas-Peucker simplification of a closed ring.
///
/// A result with fewer than 3 vertices is discarded and the ring is
/// returned unchanged.
#[must_use]
pub fn simplify_ring(ring: &[Point2], tolerance: f64) -> Vec<Point2> {
    if ring.len() < 4 {
        return ring.to_vec();
    }
    let simplified = GeoPolygon::new(to_line_string(ring), Vec::new()).simplify(&tolerance);
    let mut out = from_line_string(simplified.exterior());
    // geo closes the ring by repeating the first vertex.
    out.pop();
    if out.len() < 3 {
        return ring.to_vec();
    }
    out
}
