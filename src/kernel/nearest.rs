use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use super::delaunay::{load, IndexedVertex};
use crate::math::Point2;

/// Nearest-neighbour index over a fixed point set.
///
/// Backed by a Delaunay triangulation walk; falls back to a linear scan
/// when the set is too small or collinear to triangulate.
pub struct PointIndex<'a> {
    points: &'a [Point2],
    dt: Option<DelaunayTriangulation<IndexedVertex>>,
}

impl<'a> PointIndex<'a> {
    /// Builds the index. Never fails.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        let dt = if points.len() >= 3 {
            load(points).ok().filter(|dt| !dt.all_vertices_on_line())
        } else {
            None
        };
        Self { points, dt }
    }

    /// Returns `(index, distance)` of the point closest to `query`.
    ///
    /// `None` only for an empty point set.
    #[must_use]
    pub fn nearest(&self, query: &Point2) -> Option<(usize, f64)> {
        if let Some(dt) = &self.dt {
            if let Some(v) = dt.nearest_neighbor(SpadePoint2::new(query.x, query.y)) {
                let index = v.data().index;
                return Some((index, (self.points[index] - *query).norm()));
            }
        }
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (*p - *query).norm()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn nearest_in_triangulated_set() {
        let pts = vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(5.0, 5.0)];
        let index = PointIndex::new(&pts);
        let (i, d) = index.nearest(&p(6.0, 6.0)).unwrap();
        assert_eq!(i, 4);
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn nearest_falls_back_for_collinear() {
        let pts = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)];
        let index = PointIndex::new(&pts);
        let (i, d) = index.nearest(&p(2.1, 1.0)).unwrap();
        assert_eq!(i, 2);
        assert!((d - (0.01_f64 + 1.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn nearest_of_empty_is_none() {
        let index = PointIndex::new(&[]);
        assert!(index.is_empty());
        assert!(index.nearest(&p(0.0, 0.0)).is_none());
    }
}
