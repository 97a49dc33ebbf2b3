use serde::{Deserialize, Serialize};

use super::composite::TaskResult;
use super::config::{AttentionConfig, CombinedConfig};
use super::kinetic::{kinetic_hull_analysis, Click, HullSample, KineticAnalysis};
use crate::metrics::{positional_accuracy, Measured};

#[derive(Debug, Clone, Copy)]
pub struct DividedAttentionInput<'a> {
    pub hull_samples: &'a [HullSample],
    pub clicks: &'a [Click],
    /// Session epoch that hull sample times are relative to.
    pub start_ms: i64,
    pub mistakes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividedAttentionScore {
    pub kinetic: Measured<KineticAnalysis>,
    /// Slow responses tracked hull expansion.
    pub tunnel_vision: bool,
    pub score: f64,
}

impl DividedAttentionScore {
    #[must_use]
    pub fn task_result(&self) -> TaskResult {
        TaskResult::new(3, self.score)
    }
}

#[must_use]
pub fn score_divided_attention(
    input: &DividedAttentionInput<'_>,
    config: &AttentionConfig,
) -> DividedAttentionScore {
    let kinetic = kinetic_hull_analysis(input.hull_samples, input.clicks, input.start_ms);
    #[allow(clippy::cast_precision_loss)]
    let mut score = (100.0 - config.mistake_penalty * input.mistakes as f64).max(0.0);
    let tunnel_vision = kinetic.value().hull_rt_correlation > config.tunnel_threshold;
    if tunnel_vision {
        score -= config.tunnel_penalty;
    }
    DividedAttentionScore {
        kinetic,
        tunnel_vision,
        score: score.clamp(0.0, 100.0),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CombinedInput<'a> {
    pub true_order: &'a [usize],
    pub clicks: &'a [usize],
    pub duration_ms: i64,
    pub hull_samples: &'a [HullSample],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedScore {
    pub accuracy: f64,
    pub time_score: f64,
    /// Relative change of hull area over the run.
    pub hull_growth: f64,
    pub distracted: bool,
    pub score: f64,
}

impl CombinedScore {
    #[must_use]
    pub fn task_result(&self) -> TaskResult {
        TaskResult::new(4, self.score)
    }
}

#[must_use]
pub fn score_combined(input: &CombinedInput<'_>, config: &CombinedConfig) -> CombinedScore {
    let accuracy = positional_accuracy(input.true_order, input.clicks);

    #[allow(clippy::cast_precision_loss)]
    let expected = config.expected_ms_per_target * input.true_order.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let time_score = (expected / input.duration_ms.max(1) as f64).min(1.0);

    let hull_growth = match (input.hull_samples.first(), input.hull_samples.last()) {
        (Some(first), Some(last)) => {
            (last.area - first.area) / first.area.max(config.min_base_area)
        }
        _ => 0.0,
    };
    let distracted = hull_growth > config.growth_threshold;

    let mut score = accuracy * config.accuracy_points + time_score * config.time_points;
    if distracted {
        score -= config.growth_penalty;
    }
    CombinedScore {
        accuracy,
        time_score,
        hull_growth,
        distracted,
        score: score.clamp(0.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn click(index: usize, timestamp_ms: i64) -> Click {
        Click {
            index,
            timestamp_ms,
        }
    }

    /// Hull grows faster the longer the subject waits.
    fn tunnel_run() -> (Vec<HullSample>, Vec<Click>) {
        let clicks = vec![click(0, 0), click(1, 1000), click(2, 3000), click(3, 6000)];
        let mut samples = Vec::new();
        let mut area = 1.0;
        for w in clicks.windows(2) {
            #[allow(clippy::cast_precision_loss)]
            let (a, b) = (w[0].timestamp_ms as f64 / 1000.0, w[1].timestamp_ms as f64 / 1000.0);
            let rate = b - a;
            samples.push(HullSample { t: a, area });
            area += rate * (b - a);
            samples.push(HullSample { t: b, area });
        }
        (samples, clicks)
    }

    // ── divided attention ──────────────────────────────────────

    #[test]
    fn mistakes_cost_ten_points_each() {
        let input = DividedAttentionInput {
            hull_samples: &[],
            clicks: &[],
            start_ms: 0,
            mistakes: 3,
        };
        let s = score_divided_attention(&input, &AttentionConfig::default());
        assert!(s.kinetic.is_degenerate());
        assert!(!s.tunnel_vision);
        assert_relative_eq!(s.score, 70.0);
    }

    #[test]
    fn correlated_hull_growth_is_penalised() {
        let (samples, clicks) = tunnel_run();
        let input = DividedAttentionInput {
            hull_samples: &samples,
            clicks: &clicks,
            start_ms: 0,
            mistakes: 0,
        };
        let s = score_divided_attention(&input, &AttentionConfig::default());
        assert!(s.kinetic.value().hull_rt_correlation > 0.9);
        assert!(s.tunnel_vision);
        assert_relative_eq!(s.score, 80.0);
    }

    #[test]
    fn score_never_goes_negative() {
        let (samples, clicks) = tunnel_run();
        let input = DividedAttentionInput {
            hull_samples: &samples,
            clicks: &clicks,
            start_ms: 0,
            mistakes: 12,
        };
        assert_eq!(score_divided_attention(&input, &AttentionConfig::default()).score, 0.0);
    }

    // ── combined ───────────────────────────────────────────────

    #[test]
    fn steady_hull_fast_run() {
        let samples = [HullSample { t: 0.0, area: 2.0 }, HullSample { t: 5.0, area: 2.2 }];
        let input = CombinedInput {
            true_order: &[0, 1, 2, 3],
            clicks: &[0, 1, 2, 3],
            duration_ms: 4000,
            hull_samples: &samples,
        };
        let s = score_combined(&input, &CombinedConfig::default());
        assert_relative_eq!(s.time_score, 1.0);
        assert_relative_eq!(s.hull_growth, 0.1, epsilon = 1e-12);
        assert!(!s.distracted);
        assert_relative_eq!(s.score, 90.0);
    }

    #[test]
    fn hull_blowup_costs_ten() {
        let samples = [HullSample { t: 0.0, area: 1.0 }, HullSample { t: 5.0, area: 3.0 }];
        let input = CombinedInput {
            true_order: &[0, 1, 2, 3],
            clicks: &[0, 1, 2, 3],
            duration_ms: 16_000,
            hull_samples: &samples,
        };
        let s = score_combined(&input, &CombinedConfig::default());
        assert_relative_eq!(s.time_score, 0.5);
        assert!(s.distracted);
        assert_relative_eq!(s.score, 60.0 + 15.0 - 10.0);
    }

    #[test]
    fn tiny_initial_hull_uses_floor() {
        let samples = [HullSample { t: 0.0, area: 0.0 }, HullSample { t: 1.0, area: 0.01 }];
        let input = CombinedInput {
            true_order: &[0],
            clicks: &[0],
            duration_ms: 1000,
            hull_samples: &samples,
        };
        let s = score_combined(&input, &CombinedConfig::default());
        assert_relative_eq!(s.hull_growth, 0.1, epsilon = 1e-12);
    }
}
