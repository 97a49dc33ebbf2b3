use serde::{Deserialize, Serialize};

use super::config::GradeConfig;
use crate::metrics::prefix_accuracy;

/// Raw signals of one sequence task.
#[derive(Debug, Clone, Copy)]
pub struct GradeInput<'a> {
    pub true_order: &'a [usize],
    pub submitted: &'a [usize],
    pub duration_ms: i64,
    pub mistakes: usize,
    pub misclicks: usize,
    /// Defaults to the submission length.
    pub total_clicks: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    pub accuracy: f64,
    pub time_score: f64,
    pub attention_score: f64,
    /// Weighted geometric mean of the three components, in `[0, 100]`.
    pub composite_score: f64,
}

/// Grades a sequence task on accuracy, speed and attention.
#[must_use]
pub fn grade(input: &GradeInput<'_>, config: &GradeConfig) -> GradeReport {
    let accuracy = prefix_accuracy(input.true_order, input.submitted);

    #[allow(clippy::cast_precision_loss)]
    let expected = config.expected_ms_per_target * input.true_order.len().max(1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let ratio = input.duration_ms.max(0) as f64 / expected;
    let time_score = 1.0 / ratio.clamp(config.min_time_ratio, config.max_time_ratio);

    let clicks = input.total_clicks.unwrap_or(input.submitted.len());
    let attention_score = if clicks == 0 {
        1.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let penalty = (config.mistake_weight * input.mistakes as f64
            + config.misclick_weight * input.misclicks as f64)
            / clicks as f64;
        (1.0 - penalty).max(0.0)
    };

    let weights = [
        (accuracy, config.accuracy_weight),
        (time_score, config.time_weight),
        (attention_score, config.attention_weight),
    ];
    let total_weight: f64 = weights.iter().map(|(_, w)| w).sum();
    let composite = if total_weight > 0.0 {
        let log_sum: f64 = weights
            .iter()
            .map(|(v, w)| w * v.max(config.component_floor).ln())
            .sum();
        (log_sum / total_weight).exp()
    } else {
        0.0
    };
    // Fast runs can push the time component above 1.
    let composite_score = (composite * 100.0).clamp(0.0, 100.0);

    GradeReport {
        accuracy,
        time_score,
        attention_score,
        composite_score,
    }
}
