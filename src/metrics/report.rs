use serde::{Deserialize, Serialize};

use super::hausdorff::hausdorff_distance;
use super::measured::Measured;
use super::overlap::IntersectionReport;
use super::shape::{arkin_similarity, shape_similarity, turning_dissimilarity};
use super::tremor::tremor_score;
use super::MetricParams;
use crate::math::Point2;

/// Every shape comparison between a traced polygon and its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub hausdorff_distance: Measured<f64>,
    pub shape_similarity: Measured<f64>,
    pub arkin_similarity: Measured<f64>,
    pub turning_dissimilarity: Measured<f64>,
    pub intersection: IntersectionReport,
    /// Tremor of the traced polygon alone.
    pub tremor: Measured<f64>,
}

impl SimilarityReport {
    #[must_use]
    pub fn compare(user: &[Point2], target: &[Point2], params: &MetricParams) -> Self {
        Self {
            hausdorff_distance: hausdorff_distance(user, target),
            shape_similarity: shape_similarity(user, target, params),
            arkin_similarity: arkin_similarity(user, target, params),
            turning_dissimilarity: turning_dissimilarity(user, target),
            intersection: IntersectionReport::compute(user, target),
            tremor: tremor_score(user, params),
        }
    }
}
