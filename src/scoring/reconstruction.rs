use serde::{Deserialize, Serialize};

use super::composite::TaskResult;
use super::config::ReconstructionConfig;
use crate::math::Point2;
use crate::metrics::{smoothness_jerk, Measured, MetricParams, SimilarityReport};

/// A polygon redrawn from memory.
#[derive(Debug, Clone, Copy)]
pub struct ReconstructionInput<'a> {
    pub target: &'a [Point2],
    pub traced: &'a [Point2],
    /// One timestamp per traced point when the drawing was timed.
    pub timestamps_ms: Option<&'a [i64]>,
    /// Similarity in `[0, 1]` from an external matcher, if any.
    pub supplied_similarity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionScore {
    pub report: SimilarityReport,
    /// Present when the timestamps lined up with the traced points.
    pub jerk: Option<Measured<f64>>,
    pub shape_fidelity: f64,
    pub motor_smoothness: f64,
    pub vertex_score: f64,
    pub reconstruction_score: f64,
}

impl ReconstructionScore {
    #[must_use]
    pub fn task_result(&self) -> TaskResult {
        TaskResult::new(7, self.reconstruction_score)
    }
}

/// Scores shape fidelity, stroke smoothness and vertex count of a
/// reconstruction.
///
/// Smoothness comes from the jerk proxy when every traced point has a
/// timestamp and the jerk could be computed, and from the tremor metric
/// otherwise.
#[must_use]
pub fn score_reconstruction(
    input: &ReconstructionInput<'_>,
    config: &ReconstructionConfig,
    metrics: &MetricParams,
) -> ReconstructionScore {
    let report = SimilarityReport::compare(input.traced, input.target, metrics);

    let mut shape_fidelity = 100.0 * report.arkin_similarity.value();
    if let Some(supplied) = input.supplied_similarity.filter(|s| s.is_finite()) {
        shape_fidelity = shape_fidelity.max(100.0 * supplied.clamp(0.0, 1.0));
    }

    let jerk = input
        .timestamps_ms
        .filter(|ts| ts.len() == input.traced.len())
        .map(|ts| smoothness_jerk(input.traced, ts));
    let motor_smoothness = match jerk {
        Some(j) if !j.is_degenerate() => (100.0 - j.value() / config.jerk_divisor).max(0.0),
        _ => 100.0 * (1.0 - report.tremor.value()),
    };

    #[allow(clippy::cast_precision_loss)]
    let vertex_error = input.traced.len().abs_diff(input.target.len()) as f64;
    let vertex_score = (100.0 - config.vertex_penalty * vertex_error).max(0.0);

    let score = config.shape_weight * shape_fidelity
        + config.smoothness_weight * motor_smoothness
        + config.vertex_weight * vertex_score;
    ReconstructionScore {
        report,
        jerk,
        shape_fidelity,
        motor_smoothness,
        vertex_score,
        reconstruction_score: score.clamp(0.0, 100.0),
    }
}
