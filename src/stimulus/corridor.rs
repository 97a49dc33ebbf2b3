use std::f64::consts::FRAC_PI_2;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::seed::SeedToken;
use crate::error::{GenerationError, Result};
use crate::math::{Aabb2, Point2, Vector2};

/// Knobs for [`MazeCorridor`], in unit-box coordinates with y growing
/// downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorParams {
    pub start: Point2,
    /// Initial heading in radians; `-π/2` points up the screen.
    pub heading: f64,
    pub step: f64,
    /// Largest heading change per step, either way.
    pub max_turn: f64,
    /// The heading stays within `[-π + margin, -margin]`.
    pub cone_margin: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for CorridorParams {
    fn default() -> Self {
        Self {
            start: Point2::new(0.5, 0.9),
            heading: -FRAC_PI_2,
            step: 0.08,
            max_turn: 0.5,
            cone_margin: 0.2,
            x_range: (0.2, 0.8),
            y_range: (0.1, 0.9),
        }
    }
}

/// A centreline with two walls of equal length, index-aligned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub centerline: Vec<Point2>,
    pub left_wall: Vec<Point2>,
    pub right_wall: Vec<Point2>,
}

impl Corridor {
    /// Midpoints of the wall pairs, used as the reference route through
    /// the corridor.
    #[must_use]
    pub fn reference_path(&self) -> Vec<Point2> {
        self.left_wall
            .iter()
            .zip(&self.right_wall)
            .map(|(l, r)| Point2::from((l.coords + r.coords) * 0.5))
            .collect()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.centerline.len().saturating_sub(1)
    }
}

/// Builds a winding corridor from a forward-biased random walk.
#[derive(Debug, Clone)]
pub struct MazeCorridor {
    segments: usize,
    half_width: f64,
    seed: u64,
    bounds: Aabb2,
    params: CorridorParams,
}

impl MazeCorridor {
    /// Creates a new `MazeCorridor` operation in the unit box.
    ///
    /// `half_width` is the wall offset from the centreline in unit-box
    /// units.
    #[must_use]
    pub fn new(segments: usize, half_width: f64, seed: u64) -> Self {
        Self {
            segments,
            half_width,
            seed,
            bounds: Aabb2::unit(),
            params: CorridorParams::default(),
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Aabb2) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: CorridorParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ParameterOutOfRange` for a negative or
    /// non-finite width, step or turn, and `GenerationError::InvalidBounds` for
    /// an empty or non-finite box.
    pub fn execute(&self) -> Result<Corridor> {
        self.bounds.validate()?;
        let checked = [
            ("half_width", self.half_width),
            ("step", self.params.step),
            ("max_turn", self.params.max_turn),
        ];
        for (parameter, value) in checked {
            if !value.is_finite() || value < 0.0 {
                return Err(GenerationError::ParameterOutOfRange {
                    parameter,
                    value,
                    min: 0.0,
                    max: f64::INFINITY,
                }
                .into());
            }
        }

        let centerline = self.walk();
        let mut left_wall = Vec::with_capacity(centerline.len());
        let mut right_wall = Vec::with_capacity(centerline.len());
        for i in 0..centerline.len() {
            let n = normal_at(&centerline, i) * self.half_width;
            left_wall.push(centerline[i] + n);
            right_wall.push(centerline[i] - n);
        }

        let map = |pts: Vec<Point2>| -> Vec<Point2> {
            pts.iter().map(|p| self.bounds.from_unit(p)).collect()
        };
        Ok(Corridor {
            centerline: map(centerline),
            left_wall: map(left_wall),
            right_wall: map(right_wall),
        })
    }

    fn walk(&self) -> Vec<Point2> {
        let p = &self.params;
        let mut rng = SeedToken::new(self.seed, 0).rng();
        let (lo, hi) = (-std::f64::consts::PI + p.cone_margin, -p.cone_margin);
        let mut heading = p.heading;
        let mut cur = p.start;
        let mut path = Vec::with_capacity(self.segments + 1);
        path.push(cur);
        for _ in 0..self.segments {
            heading += rng.gen_range(-p.max_turn..=p.max_turn);
            // `clamp` would panic on an inverted cone.
            heading = heading.min(hi).max(lo);
            cur = Point2::new(
                (cur.x + heading.cos() * p.step).min(p.x_range.1).max(p.x_range.0),
                (cur.y + heading.sin() * p.step).min(p.y_range.1).max(p.y_range.0),
            );
            path.push(cur);
        }
        path
    }
}

/// Left-hand unit normal of the path at vertex `i`.
///
/// Uses the forward difference, the backward difference at the last
/// vertex, and `(1, 0)` when the tangent has no length.
fn normal_at(path: &[Point2], i: usize) -> Vector2 {
    let tangent = if i + 1 < path.len() {
        path[i + 1] - path[i]
    } else if i > 0 {
        path[i] - path[i - 1]
    } else {
        Vector2::new(0.0, -1.0)
    };
    let len = tangent.norm();
    if len > 0.0 {
        Vector2::new(-tangent.y / len, tangent.x / len)
    } else {
        Vector2::new(1.0, 0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn walls_are_index_aligned_and_offset() {
        let c = MazeCorridor::new(10, 0.15, 4).execute().unwrap();
        assert_eq!(c.centerline.len(), 11);
        assert_eq!(c.left_wall.len(), 11);
        assert_eq!(c.right_wall.len(), 11);
        for i in 0..11 {
            assert_relative_eq!((c.left_wall[i] - c.centerline[i]).norm(), 0.15, epsilon = 1e-12);
            assert_relative_eq!((c.right_wall[i] - c.centerline[i]).norm(), 0.15, epsilon = 1e-12);
        }
    }

    #[test]
    fn centerline_stays_in_margins() {
        for seed in 0..10 {
            let c = MazeCorridor::new(30, 0.1, seed).execute().unwrap();
            assert_eq!(c.centerline[0], p(0.5, 0.9));
            for v in &c.centerline[1..] {
                assert!((0.2..=0.8).contains(&v.x));
                assert!((0.1..=0.9).contains(&v.y));
            }
        }
    }

    #[test]
    fn walk_heads_upwards() {
        let c = MazeCorridor::new(5, 0.1, 2).execute().unwrap();
        for w in c.centerline.windows(2) {
            assert!(w[1].y <= w[0].y);
        }
    }

    #[test]
    fn zero_segments_uses_default_normal() {
        let c = MazeCorridor::new(0, 0.2, 0).execute().unwrap();
        assert_eq!(c.centerline, vec![p(0.5, 0.9)]);
        // Default tangent points up; its left normal is +x.
        assert_relative_eq!(c.left_wall[0].x, 0.7, epsilon = 1e-12);
        assert_relative_eq!(c.right_wall[0].x, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn stalled_step_gets_fallback_normal() {
        let path = vec![p(0.5, 0.5), p(0.5, 0.5)];
        assert_eq!(normal_at(&path, 0), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn reference_path_is_the_centreline() {
        let c = MazeCorridor::new(8, 0.12, 11).execute().unwrap();
        for (m, q) in c.reference_path().iter().zip(&c.centerline) {
            assert_relative_eq!(m.x, q.x, epsilon = 1e-12);
            assert_relative_eq!(m.y, q.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn bounds_scale_the_corridor() {
        let bounds = Aabb2::new(p(0.0, 0.0), p(800.0, 600.0));
        let c = MazeCorridor::new(6, 0.1, 5).with_bounds(bounds).execute().unwrap();
        assert_relative_eq!(c.centerline[0].x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(c.centerline[0].y, 540.0, epsilon = 1e-9);
        assert_eq!(c.segment_count(), 6);
    }

    #[test]
    fn same_seed_same_corridor() {
        let a = MazeCorridor::new(12, 0.1, 77).execute().unwrap();
        let b = MazeCorridor::new(12, 0.1, 77).execute().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_negative_width() {
        assert!(MazeCorridor::new(4, -0.1, 0).execute().is_err());
        assert!(MazeCorridor::new(4, f64::NAN, 0).execute().is_err());
    }
}
