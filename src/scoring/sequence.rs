use serde::{Deserialize, Serialize};

use super::composite::TaskResult;
use super::config::{MemoryConfig, TrailConfig};
use super::lure::{lure_analysis, LureAnalysis};
use crate::math::distance_2d::polyline_length;
use crate::math::{Point2, Vector2};
use crate::metrics::{angular_deviation, hausdorff_distance, positional_accuracy, tortuosity, Measured};

/// Raw signals of a click-the-vertices-in-order task.
#[derive(Debug, Clone, Copy)]
pub struct SequenceInput<'a> {
    pub points: &'a [Point2],
    pub true_order: &'a [usize],
    /// Vertex indices in the order they were clicked.
    pub clicks: &'a [usize],
    pub duration_ms: i64,
}

impl SequenceInput<'_> {
    /// Positions of the clicked vertices, skipping unknown indices.
    fn clicked_path(&self) -> Vec<Point2> {
        self.clicks
            .iter()
            .filter_map(|&i| self.points.get(i).copied())
            .collect()
    }

    fn true_path(&self) -> Vec<Point2> {
        self.true_order
            .iter()
            .filter_map(|&i| self.points.get(i).copied())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailMakingScore {
    /// Optimal path length over travelled length, ×100, capped at 100.
    pub path_efficiency: f64,
    pub tortuosity: Measured<f64>,
    pub angular_deviation: Measured<f64>,
    pub lures: Measured<LureAnalysis>,
    pub accuracy: f64,
    pub time_score: f64,
    pub score: f64,
}

impl TrailMakingScore {
    #[must_use]
    pub fn task_result(&self) -> TaskResult {
        TaskResult::new(1, self.score)
    }
}

/// Scores a trail-making run.
#[must_use]
pub fn score_trail_making(input: &SequenceInput<'_>, config: &TrailConfig) -> TrailMakingScore {
    let travelled = polyline_length(&input.clicked_path());
    let optimal = polyline_length(&input.true_path());
    let path_efficiency = if travelled > 0.0 {
        (optimal / travelled * 100.0).min(100.0)
    } else {
        0.0
    };

    let lures = lure_analysis(input.points, input.true_order, input.clicks);
    let accuracy = positional_accuracy(input.true_order, input.clicks);

    #[allow(clippy::cast_precision_loss)]
    let expected = config.expected_ms_per_target * input.true_order.len().max(1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let ratio = (input.duration_ms.max(0) as f64 / expected).min(config.max_time_ratio);
    let time_score = (1.0 - (ratio - 1.0) * config.time_slope).clamp(0.0, 1.0);

    let score = accuracy * config.accuracy_points
        + path_efficiency * config.pei_factor
        + (1.0 - lures.value().lure_susceptibility) * config.lure_points
        + time_score * config.time_points;

    TrailMakingScore {
        path_efficiency,
        tortuosity: tortuosity(&input.clicked_path()),
        angular_deviation: angular_deviation(input.clicks, input.true_order, input.points),
        lures,
        accuracy,
        time_score,
        score: score.clamp(0.0, 100.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialMemoryScore {
    pub accuracy: f64,
    /// Between the target and the clicked coordinates.
    pub hausdorff_distance: Measured<f64>,
    pub spatial_score: f64,
    /// Clicked minus target position, per order position.
    pub drift_vectors: Vec<Vector2>,
    pub score: f64,
}

impl SpatialMemoryScore {
    #[must_use]
    pub fn task_result(&self) -> TaskResult {
        TaskResult::new(2, self.score)
    }
}

/// Scores recall of a polygon's vertex order and positions.
///
/// Duration does not enter this score.
#[must_use]
pub fn score_spatial_memory(input: &SequenceInput<'_>, config: &MemoryConfig) -> SpatialMemoryScore {
    let accuracy = positional_accuracy(input.true_order, input.clicks);
    let hausdorff = hausdorff_distance(&input.true_path(), &input.clicked_path());
    // An infinite sentinel drives this to 0.
    let spatial_score = (100.0 - hausdorff.value() / config.hausdorff_divisor).max(0.0);

    let drift_vectors = input
        .true_order
        .iter()
        .zip(input.clicks)
        .filter_map(|(&t, &c)| Some(input.points.get(c)? - input.points.get(t)?))
        .collect();

    let score = accuracy * config.accuracy_points + spatial_score * config.spatial_factor;
    SpatialMemoryScore {
        accuracy,
        hausdorff_distance: hausdorff,
        spatial_score,
        drift_vectors,
        score: score.clamp(0.0, 100.0),
    }
}
