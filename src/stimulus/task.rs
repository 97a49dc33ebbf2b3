use rand::seq::index::sample;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::peel::PeelPolygon;
use super::seed::SeedToken;
use super::GenerationMethod;
use crate::error::{GenerationError, Result};
use crate::math::{Aabb2, Point2};

// Attempt numbers reserved for streams that must not collide with peel
// retries of the same seed.
const LABEL_STREAM: u64 = 1 << 32;
const HIGHLIGHT_STREAM: u64 = 2 << 32;

/// Target polygon size for a task level and sublevel; 10 off the table.
#[must_use]
pub fn desired_vertex_count(level: u8, sublevel: u8) -> usize {
    match (level, sublevel) {
        (1, 1) => 6,
        (1, 2) | (2, 1) => 8,
        (1, 3) | (2, 2) | (3, 1) | (4, 1) => 10,
        (2, 3) | (3, 2) | (4, 2) | (5, 1) => 12,
        (3, 3) | (4, 3) | (5, 2) | (6, 1) => 14,
        (5, 3) | (6, 2) | (7, 1) => 16,
        (6, 3) | (7, 2) => 18,
        (7, 3) => 20,
        _ => 10,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelScheme {
    /// `1, 2, 3, ...`
    Numeric,
    /// `A, B, ..., Z, AA, AB, ...`
    Alpha,
    /// `1, A, 2, B, ...`
    Alternating,
}

impl LabelScheme {
    #[must_use]
    pub fn for_sublevel(sublevel: u8) -> Self {
        match sublevel {
            1 => Self::Numeric,
            2 => Self::Alpha,
            _ => Self::Alternating,
        }
    }
}

fn alpha_label(mut i: usize) -> String {
    let mut out = Vec::new();
    loop {
        #[allow(clippy::cast_possible_truncation)]
        out.push(b'A' + (i % 26) as u8);
        if i < 26 {
            break;
        }
        i = i / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Labels for `n` vertices in visiting order.
#[must_use]
pub fn make_labels(n: usize, scheme: LabelScheme) -> Vec<String> {
    (0..n)
        .map(|i| match scheme {
            LabelScheme::Numeric => (i + 1).to_string(),
            LabelScheme::Alpha => alpha_label(i),
            LabelScheme::Alternating if i % 2 == 0 => (i / 2 + 1).to_string(),
            LabelScheme::Alternating => alpha_label(i / 2),
        })
        .collect()
}

/// A polygon vertex as shown to the subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub position: Point2,
    /// `None` when the label is hidden.
    pub label: Option<String>,
    pub index: usize,
}

/// A labelled polygon and the order its vertices must be visited in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStimulus {
    pub points: Vec<LabeledPoint>,
    pub true_order: Vec<usize>,
    pub method: GenerationMethod,
}

impl TaskStimulus {
    /// Peels a polygon sized for `(level, sublevel)` and labels its
    /// vertices with the sublevel's scheme.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidBounds` for an empty or non-finite
    /// box.
    pub fn generate(level: u8, sublevel: u8, seed: u64, bounds: Aabb2) -> Result<Self> {
        let generated = PeelPolygon::new(desired_vertex_count(level, sublevel), seed)
            .with_bounds(bounds)
            .execute()?;
        let vertices = generated.polygon.vertices();
        let labels = make_labels(vertices.len(), LabelScheme::for_sublevel(sublevel));
        let points = vertices
            .iter()
            .zip(labels)
            .enumerate()
            .map(|(index, (position, label))| LabeledPoint {
                position: *position,
                label: Some(label),
                index,
            })
            .collect();
        Ok(Self {
            points,
            true_order: (0..vertices.len()).collect(),
            method: generated.method,
        })
    }

    /// Keeps `floor(n * coverage)` labels, chosen by `seed`, and hides the
    /// rest.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ParameterOutOfRange` unless `coverage` is
    /// in `[0, 1]`.
    pub fn mask_labels(&mut self, coverage: f64, seed: u64) -> Result<()> {
        if !(0.0..=1.0).contains(&coverage) {
            return Err(GenerationError::ParameterOutOfRange {
                parameter: "label_coverage",
                value: coverage,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        let n = self.points.len();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let shown = ((n as f64 * coverage).floor() as usize).min(n);
        let mut rng = SeedToken::new(seed, LABEL_STREAM).rng();
        let mut keep = vec![false; n];
        for i in sample(&mut rng, n, shown) {
            keep[i] = true;
        }
        for (point, keep) in self.points.iter_mut().zip(keep) {
            if !keep {
                point.label = None;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn visible_label_count(&self) -> usize {
        self.points.iter().filter(|p| p.label.is_some()).count()
    }
}

/// Fraction of labels shown by default in the partial-label variant.
pub const DEFAULT_LABEL_COVERAGE: f64 = 0.75;

/// Default per-vertex highlight probability in the attention variant.
pub const DEFAULT_HIGHLIGHT_PROBABILITY: f64 = 0.1;

/// Positional drift applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftParams {
    pub amplitude: f64,
    /// Cycles per second.
    pub frequency: f64,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            amplitude: 0.01,
            frequency: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    PulseIn,
    PulseOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightEvent {
    pub index: usize,
    pub start_ms: u32,
    pub duration_ms: u32,
    pub kind: HighlightKind,
}

/// Drift and distractor highlights for the divided-attention variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionSchedule {
    pub drift: DriftParams,
    pub highlights: Vec<HighlightEvent>,
}

impl AttentionSchedule {
    /// Each of `vertex_count` vertices gets a highlight with probability
    /// `probability`, starting 200-2000 ms in and lasting 200-800 ms.
    pub fn generate<R: Rng>(
        vertex_count: usize,
        drift: DriftParams,
        probability: f64,
        rng: &mut R,
    ) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        let mut highlights = Vec::new();
        for index in 0..vertex_count {
            if rng.gen::<f64>() < probability {
                let start_ms = rng.gen_range(200..=2000);
                let duration_ms = rng.gen_range(200..=800);
                let kind = if rng.gen::<bool>() {
                    HighlightKind::PulseIn
                } else {
                    HighlightKind::PulseOut
                };
                highlights.push(HighlightEvent {
                    index,
                    start_ms,
                    duration_ms,
                    kind,
                });
            }
        }
        Self { drift, highlights }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionStimulus {
    pub stimulus: TaskStimulus,
    pub schedule: AttentionSchedule,
}

impl AttentionStimulus {
    /// # Errors
    ///
    /// Same as [`TaskStimulus::generate`].
    pub fn generate(
        level: u8,
        sublevel: u8,
        seed: u64,
        bounds: Aabb2,
        drift: DriftParams,
        highlight_probability: f64,
    ) -> Result<Self> {
        let stimulus = TaskStimulus::generate(level, sublevel, seed, bounds)?;
        let mut rng = SeedToken::new(seed, HIGHLIGHT_STREAM).rng();
        let schedule =
            AttentionSchedule::generate(stimulus.points.len(), drift, highlight_probability, &mut rng);
        Ok(Self { stimulus, schedule })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn vertex_table() {
        assert_eq!(desired_vertex_count(1, 1), 6);
        assert_eq!(desired_vertex_count(4, 2), 12);
        assert_eq!(desired_vertex_count(7, 3), 20);
        assert_eq!(desired_vertex_count(9, 1), 10);
    }

    #[test]
    fn label_schemes() {
        assert_eq!(make_labels(3, LabelScheme::Numeric), ["1", "2", "3"]);
        assert_eq!(make_labels(3, LabelScheme::Alpha), ["A", "B", "C"]);
        assert_eq!(
            make_labels(5, LabelScheme::Alternating),
            ["1", "A", "2", "B", "3"]
        );
        assert_eq!(LabelScheme::for_sublevel(3), LabelScheme::Alternating);
    }

    #[test]
    fn alpha_labels_roll_over() {
        let labels = make_labels(28, LabelScheme::Alpha);
        assert_eq!(labels[25], "Z");
        assert_eq!(labels[26], "AA");
        assert_eq!(labels[27], "AB");
    }

    #[test]
    fn stimulus_is_labelled_in_order() {
        let s = TaskStimulus::generate(1, 2, 17, Aabb2::unit()).unwrap();
        let n = s.points.len();
        assert!((7..=9).contains(&n));
        assert_eq!(s.true_order, (0..n).collect::<Vec<_>>());
        assert_eq!(s.points[0].label.as_deref(), Some("A"));
    }

    #[test]
    fn partial_labels_floor_coverage() {
        let mut s = TaskStimulus::generate(2, 2, 3, Aabb2::unit()).unwrap();
        let n = s.points.len();
        s.mask_labels(0.5, 3).unwrap();
        assert_eq!(s.visible_label_count(), n / 2);
        assert!(s.mask_labels(1.5, 3).is_err());
    }

    #[test]
    fn masking_is_seeded() {
        let mut a = TaskStimulus::generate(3, 1, 8, Aabb2::unit()).unwrap();
        let mut b = a.clone();
        a.mask_labels(0.3, 99).unwrap();
        b.mask_labels(0.3, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn highlight_windows_in_range() {
        let mut rng = SeedToken::new(1, 0).rng();
        let schedule = AttentionSchedule::generate(200, DriftParams::default(), 0.5, &mut rng);
        assert!(!schedule.highlights.is_empty());
        for h in &schedule.highlights {
            assert!((200..=2000).contains(&h.start_ms));
            assert!((200..=800).contains(&h.duration_ms));
            assert!(h.index < 200);
        }
    }

    #[test]
    fn zero_probability_has_no_highlights() {
        let s = AttentionStimulus::generate(3, 3, 5, Aabb2::unit(), DriftParams::default(), 0.0)
            .unwrap();
        assert!(s.schedule.highlights.is_empty());
    }
}
