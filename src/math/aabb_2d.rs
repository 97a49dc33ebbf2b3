use serde::{Deserialize, Serialize};

use super::Point2;
use crate::error::{GenerationError, Result};

/// An axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::unit()
    }
}

impl Aabb2 {
    /// Creates a bounding box from its two corners.
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// The unit square `[0, 1] x [0, 1]`.
    #[must_use]
    pub fn unit() -> Self {
        Self {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(1.0, 1.0),
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Maps a point of the unit square into this box.
    #[must_use]
    pub fn from_unit(&self, p: &Point2) -> Point2 {
        Point2::new(
            self.min.x + p.x * self.width(),
            self.min.y + p.y * self.height(),
        )
    }

    /// Checks that the box has finite corners and positive extent.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidBounds` otherwise.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.min.x, self.min.y, self.max.x, self.max.y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(GenerationError::InvalidBounds("non-finite corner".to_owned()).into());
        }
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return Err(GenerationError::InvalidBounds(format!(
                "empty extent {} x {}",
                self.width(),
                self.height()
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_input() {
        let pts = vec![
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ];
        let bb = Aabb2::from_points(&pts).unwrap();
        assert_eq!(bb.min, Point2::new(-2.0, -1.0));
        assert_eq!(bb.max, Point2::new(4.0, 5.0));
    }

    #[test]
    fn from_points_empty() {
        assert!(Aabb2::from_points(&[]).is_none());
    }

    #[test]
    fn from_unit_maps_corners() {
        let bb = Aabb2::new(Point2::new(10.0, 20.0), Point2::new(30.0, 60.0));
        assert_eq!(bb.from_unit(&Point2::new(0.0, 0.0)), bb.min);
        assert_eq!(bb.from_unit(&Point2::new(1.0, 1.0)), bb.max);
        assert_eq!(bb.from_unit(&Point2::new(0.5, 0.5)), bb.center());
    }

    #[test]
    fn validate_rejects_empty_and_nan() {
        let flat = Aabb2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        assert!(flat.validate().is_err());
        let nan = Aabb2::new(Point2::new(f64::NAN, 0.0), Point2::new(1.0, 1.0));
        assert!(nan.validate().is_err());
        assert!(Aabb2::unit().validate().is_ok());
    }
}
