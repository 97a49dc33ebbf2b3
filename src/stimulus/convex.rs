use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::seed::SeedToken;
use super::{check_vertex_count, GeneratedPolygon, GenerationMethod};
use crate::error::{GenerationError, Result};
use crate::kernel::convex_hull;
use crate::math::{Aabb2, Point2, Polygon};

/// Knobs for [`ConvexPolygon`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvexParams {
    /// Points sampled per requested vertex.
    pub oversample_factor: usize,
    /// Oversampling rounds before the regular-polygon fallback.
    pub max_attempts: usize,
}

impl Default for ConvexParams {
    fn default() -> Self {
        Self {
            oversample_factor: 3,
            max_attempts: 100,
        }
    }
}

/// Builds a strictly convex polygon with exactly `vertex_count` vertices.
///
/// Points are oversampled in the bounds and the first `vertex_count`
/// vertices of their hull are kept; a subset of a convex ring in cyclic
/// order is still convex.
#[derive(Debug, Clone)]
pub struct ConvexPolygon {
    vertex_count: usize,
    seed: u64,
    bounds: Aabb2,
    params: ConvexParams,
}

impl ConvexPolygon {
    /// Creates a new `ConvexPolygon` operation in the unit box.
    #[must_use]
    pub fn new(vertex_count: usize, seed: u64) -> Self {
        Self {
            vertex_count,
            seed,
            bounds: Aabb2::unit(),
            params: ConvexParams::default(),
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Aabb2) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: ConvexParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ParameterOutOfRange` for fewer than 3
    /// vertices and `GenerationError::InvalidBounds` for an empty or
    /// non-finite box.
    pub fn execute(&self) -> Result<GeneratedPolygon> {
        check_vertex_count(self.vertex_count)?;
        self.bounds.validate()?;

        let n = self.vertex_count * self.params.oversample_factor.max(1);
        let mut rng = SeedToken::new(self.seed, 0).rng();
        for attempt in 0..self.params.max_attempts {
            let points: Vec<Point2> = (0..n)
                .map(|_| {
                    self.bounds
                        .from_unit(&Point2::new(rng.gen::<f64>(), rng.gen::<f64>()))
                })
                .collect();
            let mut hull = convex_hull(&points);
            if hull.len() < self.vertex_count {
                trace!(attempt, hull = hull.len(), "hull too small");
                continue;
            }
            hull.truncate(self.vertex_count);
            if let Some(polygon) = Polygon::new(hull) {
                return Ok(GeneratedPolygon::new(
                    polygon,
                    GenerationMethod::Oversampled { attempt },
                ));
            }
        }

        warn!(
            vertex_count = self.vertex_count,
            seed = self.seed,
            "oversampling exhausted, falling back to regular polygon"
        );
        let polygon = regular_polygon(self.vertex_count, &self.bounds, &mut rng)
            .ok_or_else(|| GenerationError::InvalidBounds("regular fallback collapsed".to_owned()))?;
        Ok(GeneratedPolygon::new(polygon, GenerationMethod::RegularFallback))
    }
}

/// A regular `vertex_count`-gon centred in `bounds` with per-vertex radius
/// jitter small enough to keep it strictly convex.
///
/// Radius is `0.4 * min(width, height)`; each vertex radius is drawn from
/// `[(1 - j) r, r]` with `j = min(0.2, (1 - cos(2π / n)) / 2)`.
///
/// `None` only for a box with no extent.
pub(crate) fn regular_polygon<R: Rng>(
    vertex_count: usize,
    bounds: &Aabb2,
    rng: &mut R,
) -> Option<Polygon> {
    let n = vertex_count.max(3);
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / n as f64;
    let centre = bounds.center();
    let radius = 0.4 * bounds.width().min(bounds.height());
    let jitter = (0.5 * (1.0 - step.cos())).min(0.2);

    let ring: Vec<Point2> = (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f64;
            let r = radius * (1.0 - jitter * rng.gen::<f64>());
            Point2::new(centre.x + r * angle.cos(), centre.y + r * angle.sin())
        })
        .collect();
    Polygon::new(ring)
}
