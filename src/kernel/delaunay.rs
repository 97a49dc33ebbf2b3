use std::collections::BTreeSet;

use spade::{DelaunayTriangulation, HasPosition, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{KernelError, Result};
use crate::math::Point2;

/// A triangulation vertex that remembers its index in the caller's slice.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndexedVertex {
    position: SpadePoint2<f64>,
    pub(crate) index: usize,
}

impl HasPosition for IndexedVertex {
    type Scalar = f64;

    fn position(&self) -> SpadePoint2<f64> {
        self.position
    }
}

/// Bulk-loads `points` into a Delaunay triangulation.
pub(crate) fn load(points: &[Point2]) -> Result<DelaunayTriangulation<IndexedVertex>> {
    let vertices = points
        .iter()
        .enumerate()
        .map(|(index, p)| IndexedVertex {
            position: SpadePoint2::new(p.x, p.y),
            index,
        })
        .collect();
    DelaunayTriangulation::<IndexedVertex>::bulk_load(vertices)
        .map_err(|e: InsertionError| KernelError::Insertion(format!("{e}")).into())
}

/// Delaunay triangulation of a point set as index triples into `points`.
///
/// # Errors
///
/// - `KernelError::TooFewPoints` for fewer than 3 points
/// - `KernelError::Insertion` for coordinates the triangulator rejects (NaN, overflow)
/// - `KernelError::Degenerate` when every point lies on one line
pub fn triangulate(points: &[Point2]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 3 {
        return Err(KernelError::TooFewPoints {
            needed: 3,
            got: points.len(),
        }
        .into());
    }
    let dt = load(points)?;
    if dt.all_vertices_on_line() || dt.num_inner_faces() == 0 {
        return Err(KernelError::Degenerate("all points are collinear".to_owned()).into());
    }

    Ok(dt
        .inner_faces()
        .map(|face| {
            let [a, b, c] = face.vertices();
            [a.data().index, b.data().index, c.data().index]
        })
        .collect())
}

/// Unique undirected Delaunay edges as `(low, high)` index pairs, sorted.
///
/// # Errors
///
/// Same conditions as [`triangulate`].
pub fn delaunay_edges(points: &[Point2]) -> Result<Vec<(usize, usize)>> {
    let triangles = triangulate(points)?;
    let mut edges = BTreeSet::new();
    for tri in &triangles {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            edges.insert((a.min(b), a.max(b)));
        }
    }
    Ok(edges.into_iter().collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn single_triangle() {
        let tris = triangulate(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]).unwrap();
        assert_eq!(tris.len(), 1);
        let mut idx = tris[0].to_vec();
        idx.sort_unstable();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn interior_point_gives_three_triangles() {
        let pts = [p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0), p(2.0, 1.0)];
        let tris = triangulate(&pts).unwrap();
        assert_eq!(tris.len(), 3);
        let edges = delaunay_edges(&pts).unwrap();
        // Planar K4: every pair is an edge.
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn flat_diamond_uses_short_diagonal() {
        let pts = [p(0.0, 0.0), p(1.0, 0.1), p(2.0, 0.0), p(1.0, -0.1)];
        let edges = delaunay_edges(&pts).unwrap();
        assert!(edges.contains(&(1, 3)));
        assert!(!edges.contains(&(0, 2)));
    }

    #[test]
    fn collinear_is_degenerate() {
        let pts = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)];
        assert!(triangulate(&pts).is_err());
    }

    #[test]
    fn too_few_points() {
        assert!(triangulate(&[p(0.0, 0.0), p(1.0, 0.0)]).is_err());
    }

    #[test]
    fn nan_is_rejected() {
        let pts = [p(0.0, 0.0), p(1.0, 0.0), p(f64::NAN, 1.0)];
        assert!(triangulate(&pts).is_err());
    }
}
