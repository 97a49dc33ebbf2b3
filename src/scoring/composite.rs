use serde::{Deserialize, Serialize};

use super::config::DomainWeights;

/// A cognitive domain fed by one or more task levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Memory,
    Attention,
    Visuospatial,
    Recognition,
}

impl Domain {
    pub const ALL: [Self; 4] = [
        Self::Memory,
        Self::Attention,
        Self::Visuospatial,
        Self::Recognition,
    ];

    /// Domains a task level contributes to; empty for unknown levels.
    #[must_use]
    pub fn for_level(level: u8) -> &'static [Self] {
        match level {
            1 | 6 => &[Self::Visuospatial],
            2 => &[Self::Memory],
            3 | 4 => &[Self::Attention],
            5 => &[Self::Recognition],
            7 => &[Self::Memory, Self::Visuospatial],
            _ => &[],
        }
    }
}

/// One scored task, tagged by level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub level: u8,
    pub composite_score: f64,
    /// Preferred over `composite_score` in the recognition domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognition_score: Option<f64>,
}

impl TaskResult {
    #[must_use]
    pub fn new(level: u8, composite_score: f64) -> Self {
        Self {
            level,
            composite_score,
            recognition_score: None,
        }
    }

    #[must_use]
    pub fn with_recognition_score(mut self, score: f64) -> Self {
        self.recognition_score = Some(score);
        self
    }

    fn score_for(&self, domain: Domain) -> f64 {
        match domain {
            Domain::Recognition => self.recognition_score.unwrap_or(self.composite_score),
            _ => self.composite_score,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    /// Mean of the contributing task scores; 0 without any.
    pub score: f64,
    pub n_tests: usize,
}

/// Per-domain breakdown and the overall composite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeProfile {
    pub memory: DomainScore,
    pub attention: DomainScore,
    pub visuospatial: DomainScore,
    pub recognition: DomainScore,
    pub composite_score: f64,
}

impl CompositeProfile {
    /// Groups `results` into domains and combines the domain means.
    ///
    /// With every domain populated the composite is the weighted geometric
    /// mean of the four domain scores. Otherwise it is the plain mean of
    /// the populated domains, and 0 when there are none.
    #[must_use]
    pub fn aggregate(results: &[TaskResult], weights: &DomainWeights) -> Self {
        let mut profile = Self::default();
        for domain in Domain::ALL {
            let scores: Vec<f64> = results
                .iter()
                .filter(|r| Domain::for_level(r.level).contains(&domain))
                .map(|r| r.score_for(domain))
                .collect();
            if !scores.is_empty() {
                #[allow(clippy::cast_precision_loss)]
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                *profile.domain_mut(domain) = DomainScore {
                    score: mean,
                    n_tests: scores.len(),
                };
            }
        }
        profile.composite_score = profile.combine(weights).clamp(0.0, 100.0);
        profile
    }

    #[must_use]
    pub fn domain(&self, domain: Domain) -> DomainScore {
        match domain {
            Domain::Memory => self.memory,
            Domain::Attention => self.attention,
            Domain::Visuospatial => self.visuospatial,
            Domain::Recognition => self.recognition,
        }
    }

    fn domain_mut(&mut self, domain: Domain) -> &mut DomainScore {
        match domain {
            Domain::Memory => &mut self.memory,
            Domain::Attention => &mut self.attention,
            Domain::Visuospatial => &mut self.visuospatial,
            Domain::Recognition => &mut self.recognition,
        }
    }

    fn combine(&self, weights: &DomainWeights) -> f64 {
        let present: Vec<(f64, f64)> = Domain::ALL
            .iter()
            .map(|&d| (self.domain(d), weight_of(weights, d)))
            .filter(|(s, _)| s.n_tests > 0)
            .map(|(s, w)| (s.score.max(0.0), w))
            .collect();
        if present.is_empty() {
            return 0.0;
        }
        let total_weight: f64 = present.iter().map(|(_, w)| w).sum();
        if present.len() == Domain::ALL.len() && total_weight > 0.0 {
            if present.iter().any(|(s, _)| *s <= 0.0) {
                return 0.0;
            }
            let log_sum: f64 = present.iter().map(|(s, w)| w * s.ln()).sum();
            return (log_sum / total_weight).exp();
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = present.iter().map(|(s, _)| s).sum::<f64>() / present.len() as f64;
        mean
    }
}

fn weight_of(weights: &DomainWeights, domain: Domain) -> f64 {
    match domain {
        Domain::Memory => weights.memory,
        Domain::Attention => weights.attention,
        Domain::Visuospatial => weights.visuospatial,
        Domain::Recognition => weights.recognition,
    }
}
