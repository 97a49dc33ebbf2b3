use serde::{Deserialize, Serialize};

use crate::kernel::overlay_areas;
use crate::math::Point2;

/// Areas of two polygons and of their intersection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntersectionReport {
    pub intersection_area: f64,
    pub polygon_a_area: f64,
    pub polygon_b_area: f64,
    /// Intersection as a percentage of the smaller polygon; 0 when the
    /// smaller polygon has no area.
    pub intersection_percentage: f64,
    pub iou: f64,
}

impl IntersectionReport {
    /// Builds the report for two closed rings. Rings with fewer than 3
    /// vertices have zero area.
    #[must_use]
    pub fn compute(a: &[Point2], b: &[Point2]) -> Self {
        let areas = overlay_areas(a, b);
        let smaller = areas.area_a.min(areas.area_b);
        let intersection_percentage = if smaller > 0.0 {
            (areas.intersection / smaller * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            intersection_area: areas.intersection,
            polygon_a_area: areas.area_a,
            polygon_b_area: areas.area_b,
            intersection_percentage,
            iou: areas.iou(),
        }
    }

    #[must_use]
    pub fn overlaps(&self) -> bool {
        self.intersection_area > 0.0
    }
}
