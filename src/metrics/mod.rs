mod alpha;
mod hausdorff;
mod measured;
mod order;
mod overlap;
mod path;
mod report;
mod shape;
mod tremor;

pub use alpha::{alpha_metrics, AlphaMetrics};
pub use hausdorff::{directed_hausdorff, hausdorff_distance};
pub use measured::{Degeneracy, Measured};
pub use order::{lcs_length, positional_accuracy, prefix_accuracy, vertex_order_similarity};
pub use overlap::IntersectionReport;
pub use path::{angular_deviation, smoothness_jerk, tortuosity};
pub use report::SimilarityReport;
pub use shape::{arkin_similarity, shape_similarity, turning_angles, turning_dissimilarity};
pub use tremor::tremor_score;

use serde::{Deserialize, Serialize};

/// Tunable constants shared by the shape metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricParams {
    /// Hausdorff distance (unit-box units) that maps to zero similarity.
    pub hausdorff_scale: f64,
    pub hausdorff_weight: f64,
    pub overlap_weight: f64,
    /// Angular grid of the rotation search, in degrees.
    pub rotation_step_deg: f64,
    /// Douglas-Peucker tolerance of the tremor metric.
    pub tremor_tolerance: f64,
    pub tremor_scale: f64,
    /// Circumradius below which a triangle belongs to the alpha shape.
    pub alpha_threshold: f64,
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            hausdorff_scale: 1.5,
            hausdorff_weight: 0.6,
            overlap_weight: 0.4,
            rotation_step_deg: 10.0,
            tremor_tolerance: 0.02,
            tremor_scale: 10.0,
            alpha_threshold: 0.15,
        }
    }
}
