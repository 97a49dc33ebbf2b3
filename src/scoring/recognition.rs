use serde::{Deserialize, Serialize};

use super::composite::TaskResult;
use super::config::{IntersectionConfig, RecognitionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecognitionScore {
    pub correct: bool,
    pub time_score: f64,
    /// Rewards confidence on correct answers and punishes it on wrong ones.
    pub confidence_score: f64,
    pub recognition_score: f64,
}

impl RecognitionScore {
    #[must_use]
    pub fn task_result(&self) -> TaskResult {
        TaskResult::new(5, self.recognition_score).with_recognition_score(self.recognition_score)
    }
}

/// Scores one recognition response. `confidence` is a rating on
/// `[0, max_confidence]`; out-of-range ratings are clamped.
#[must_use]
pub fn score_recognition(
    correct: bool,
    reaction_time_ms: f64,
    confidence: f64,
    config: &RecognitionConfig,
) -> RecognitionScore {
    let ratio = (reaction_time_ms.max(0.0) / config.expected_ms).min(config.max_time_ratio);
    // Peaks above 1 for fast answers before the clamp.
    let time_score = (-0.5 * (ratio - 1.0)).exp().clamp(0.0, 1.0);

    let normalized = if config.max_confidence > 0.0 {
        (confidence / config.max_confidence).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let confidence_score = if correct {
        0.5 + 0.5 * normalized
    } else {
        0.5 - 0.5 * normalized
    };

    let recognition_score = if correct {
        100.0
            * (config.correctness_weight
                + config.time_weight * time_score
                + config.confidence_weight * confidence_score)
    } else {
        0.0
    };
    RecognitionScore {
        correct,
        time_score,
        confidence_score,
        recognition_score: recognition_score.clamp(0.0, 100.0),
    }
}

/// Estimated and true overlap area of the two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaEstimate {
    pub estimated: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionDetectionScore {
    pub timing_accuracy: f64,
    pub area_accuracy: Option<f64>,
    pub detection_score: f64,
}

impl IntersectionDetectionScore {
    #[must_use]
    pub fn task_result(&self) -> TaskResult {
        TaskResult::new(6, self.detection_score)
    }
}

/// Piecewise-linear credit for reacting `delta_ms` away from the moment
/// the shapes first touched.
fn timing_accuracy(delta_ms: f64) -> f64 {
    match delta_ms {
        d if d <= 200.0 => 1.0,
        d if d <= 1000.0 => 0.9 - 0.4 * (d - 200.0) / 800.0,
        d if d <= 2000.0 => 0.5 - 0.3 * (d - 1000.0) / 1000.0,
        d => (0.2 - 0.2 * (d - 2000.0) / 3000.0).max(0.0),
    }
}

/// Scores how close the subject's "now they touch" press was to the real
/// first contact, plus an optional overlap-area estimate.
///
/// An area estimate against a zero actual area earns no area credit.
#[must_use]
pub fn score_intersection_detection(
    detection_ms: f64,
    actual_ms: f64,
    area: Option<AreaEstimate>,
    config: &IntersectionConfig,
) -> IntersectionDetectionScore {
    let timing = timing_accuracy((detection_ms - actual_ms).abs());
    let area_accuracy = area.map(|a| {
        if a.actual > 0.0 {
            (1.0 - (a.estimated - a.actual).abs() / a.actual).max(0.0)
        } else {
            0.0
        }
    });
    let detection_score = match area_accuracy {
        Some(acc) => config.timing_points * timing + config.area_points * acc,
        None => (config.timing_points + config.area_points) * timing,
    };
    IntersectionDetectionScore {
        timing_accuracy: timing,
        area_accuracy,
        detection_score: detection_score.clamp(0.0, 100.0),
    }
}
