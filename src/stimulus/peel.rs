use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::convex::regular_polygon;
use super::mesh::Mesh;
use super::sampling::sample_spaced_points;
use super::seed::SeedToken;
use super::{check_vertex_count, GeneratedPolygon, GenerationMethod};
use crate::error::{GenerationError, Result};
use crate::kernel::{convex_hull, triangulate};
use crate::math::polygon_2d::oriented_ccw;
use crate::math::{Aabb2, Point2, Polygon};

/// Knobs for [`PeelPolygon`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeelParams {
    /// Points sampled beyond the target vertex count.
    pub extra_points: usize,
    /// Minimum spacing is `min_distance_factor / sqrt(point_count)`.
    pub min_distance_factor: f64,
    /// Rejection-sampling draws per point before spacing is relaxed.
    pub sample_attempts_per_point: usize,
    /// Reseeded attempts before the hull fallback.
    pub max_attempts: usize,
}

impl Default for PeelParams {
    fn default() -> Self {
        Self {
            extra_points: 6,
            min_distance_factor: 0.4,
            sample_attempts_per_point: 30,
            max_attempts: 6,
        }
    }
}

/// Builds a simple, generally concave polygon by peeling boundary
/// triangles off a Delaunay mesh until the boundary has about
/// `vertex_count` vertices.
///
/// The result has `vertex_count ± 1` vertices in counter-clockwise order
/// whenever some attempt succeeds. The hull fallback is convex and is
/// truncated to `vertex_count` vertices when the hull is larger; a hull
/// more than one vertex short is replaced by a regular polygon.
#[derive(Debug, Clone)]
pub struct PeelPolygon {
    vertex_count: usize,
    seed: u64,
    bounds: Aabb2,
    params: PeelParams,
}

impl PeelPolygon {
    /// Creates a new `PeelPolygon` operation in the unit box.
    #[must_use]
    pub fn new(vertex_count: usize, seed: u64) -> Self {
        Self {
            vertex_count,
            seed,
            bounds: Aabb2::unit(),
            params: PeelParams::default(),
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Aabb2) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: PeelParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ParameterOutOfRange` for fewer than 3
    /// vertices or a negative spacing factor, and
    /// `GenerationError::InvalidBounds` for an empty or non-finite box.
    pub fn execute(&self) -> Result<GeneratedPolygon> {
        check_vertex_count(self.vertex_count)?;
        self.bounds.validate()?;
        let factor = self.params.min_distance_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(GenerationError::ParameterOutOfRange {
                parameter: "min_distance_factor",
                value: factor,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }

        let n = self.vertex_count + self.params.extra_points.max(1);
        #[allow(clippy::cast_precision_loss)]
        let min_distance = factor / (n as f64).sqrt();

        let mut first_sample: Option<Vec<Point2>> = None;
        for attempt in 0..self.params.max_attempts.max(1) {
            let mut rng = SeedToken::new(self.seed, attempt as u64).rng();
            let points = sample_spaced_points(
                &mut rng,
                n,
                min_distance,
                self.params.sample_attempts_per_point,
            );
            match peel_boundary(&points, self.vertex_count, &mut rng) {
                Ok(boundary) => {
                    let ring: Vec<Point2> = boundary
                        .iter()
                        .map(|&i| self.bounds.from_unit(&points[i]))
                        .collect();
                    if let Some(polygon) = Polygon::new(oriented_ccw(ring)) {
                        return Ok(GeneratedPolygon::new(
                            polygon,
                            GenerationMethod::Peeled { attempt },
                        ));
                    }
                    debug!(attempt, "peeled ring collapsed");
                }
                Err(e) => debug!(attempt, error = %e, "peel attempt failed"),
            }
            if first_sample.is_none() {
                first_sample = Some(points);
            }
        }

        warn!(
            vertex_count = self.vertex_count,
            seed = self.seed,
            "peeling exhausted, falling back to convex hull"
        );
        self.fallback(&first_sample.unwrap_or_default())
    }

    /// Convex hull of `sample` truncated to the target, or a regular polygon
    /// when the hull lands more than one vertex short.
    fn fallback(&self, sample: &[Point2]) -> Result<GeneratedPolygon> {
        let mut hull = convex_hull(sample);
        hull.truncate(self.vertex_count);
        let ring: Vec<Point2> = hull.iter().map(|p| self.bounds.from_unit(p)).collect();
        if let Some(polygon) =
            Polygon::new(ring).filter(|poly| poly.len() + 1 >= self.vertex_count)
        {
            return Ok(GeneratedPolygon::new(polygon, GenerationMethod::HullFallback));
        }
        debug!(hull_len = hull.len(), "hull too small, using regular polygon");
        let mut rng = SeedToken::new(self.seed, 0).rng();
        let polygon = regular_polygon(self.vertex_count, &self.bounds, &mut rng)
            .ok_or_else(|| GenerationError::InvalidBounds("regular fallback collapsed".to_owned()))?;
        Ok(GeneratedPolygon::new(polygon, GenerationMethod::RegularFallback))
    }
}

/// Peels one mesh down to a boundary of `target ± 1` vertices.
///
/// Each step removes a random triangle with exactly one boundary edge and
/// an interior apex, so the boundary grows by one vertex and stays a single
/// simple cycle. Total steps are bounded by twice the triangle count.
fn peel_boundary<R: Rng>(points: &[Point2], target: usize, rng: &mut R) -> Result<Vec<usize>> {
    let mut mesh = Mesh::new(points.len(), triangulate(points)?);
    let budget = 2 * mesh.triangle_count();
    let mut boundary_len = 0;
    for _ in 0..=budget {
        let boundary = mesh.boundary()?;
        boundary_len = boundary.len();
        if boundary_len.abs_diff(target) <= 1 {
            return Ok(boundary);
        }
        if boundary_len > target + 1 {
            return Err(GenerationError::BoundaryOvershoot {
                boundary_len,
                target,
            }
            .into());
        }
        let candidates = mesh.peelable();
        if candidates.is_empty() {
            break;
        }
        let pick = candidates[rng.gen_range(0..candidates.len())];
        mesh.deactivate(pick);
    }
    Err(GenerationError::PeelStuck { boundary_len }.into())
}
