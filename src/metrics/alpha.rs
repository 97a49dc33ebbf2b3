use serde::{Deserialize, Serialize};

use super::measured::{Degeneracy, Measured};
use super::MetricParams;
use crate::kernel::{delaunay_edges, triangulate};
use crate::math::Point2;

/// Alpha-shape organisation metrics of a point set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlphaMetrics {
    /// Smallest alpha radius joining every point into one component: half
    /// the longest edge of the Euclidean minimum spanning tree.
    pub critical_alpha: f64,
    /// Total area of Delaunay triangles whose circumradius is below the
    /// threshold.
    pub alpha_area: f64,
}

/// Disjoint-set forest with path halving.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Merges the sets of `a` and `b`; false when already merged.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent[ra] = rb;
        true
    }
}

/// Circumradius from side lengths, `abc / 4A` with Heron's area.
/// Infinite for slivers with area below `1e-9`.
fn circumradius(a: &Point2, b: &Point2, c: &Point2) -> (f64, f64) {
    let (la, lb, lc) = ((*a - *b).norm(), (*b - *c).norm(), (*c - *a).norm());
    let s = 0.5 * (la + lb + lc);
    let area = (s * (s - la) * (s - lb) * (s - lc)).max(0.0).sqrt();
    if area > 1e-9 {
        (la * lb * lc / (4.0 * area), area)
    } else {
        (f64::INFINITY, area)
    }
}

/// Critical alpha (Kruskal over the Delaunay graph) and alpha area at
/// `params.alpha_threshold`.
///
/// Degenerate with sentinel zeros for fewer than 3 points or a set that
/// cannot be triangulated.
#[must_use]
pub fn alpha_metrics(points: &[Point2], params: &MetricParams) -> Measured<AlphaMetrics> {
    if points.len() < 3 {
        return Measured::degenerate(Degeneracy::TooFewPoints, AlphaMetrics::default());
    }
    let (Ok(triangles), Ok(edges)) = (triangulate(points), delaunay_edges(points)) else {
        return Measured::degenerate(Degeneracy::Untriangulable, AlphaMetrics::default());
    };

    let mut weighted: Vec<(f64, usize, usize)> = edges
        .into_iter()
        .map(|(u, v)| ((points[u] - points[v]).norm(), u, v))
        .collect();
    weighted.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)).then(x.2.cmp(&y.2)));

    let mut forest = UnionFind::new(points.len());
    let mut longest = 0.0_f64;
    for (w, u, v) in weighted {
        if forest.union(u, v) {
            longest = longest.max(w);
        }
    }

    let alpha_area = triangles
        .iter()
        .map(|t| circumradius(&points[t[0]], &points[t[1]], &points[t[2]]))
        .filter(|(r, _)| *r < params.alpha_threshold)
        .map(|(_, area)| area)
        .sum();

    Measured::ok(AlphaMetrics {
        critical_alpha: longest / 2.0,
        alpha_area,
    })
}
