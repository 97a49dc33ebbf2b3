use serde::{Deserialize, Serialize};

use crate::metrics::MetricParams;

/// Weights of the four cognitive domains in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainWeights {
    pub memory: f64,
    pub attention: f64,
    pub visuospatial: f64,
    pub recognition: f64,
}

impl Default for DomainWeights {
    fn default() -> Self {
        Self {
            memory: 0.25,
            attention: 0.25,
            visuospatial: 0.30,
            recognition: 0.20,
        }
    }
}

/// Generic sequence grade: accuracy, speed and attention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeConfig {
    pub expected_ms_per_target: f64,
    /// Duration ratios are clamped to `[min_time_ratio, max_time_ratio]`.
    pub min_time_ratio: f64,
    pub max_time_ratio: f64,
    pub mistake_weight: f64,
    pub misclick_weight: f64,
    pub accuracy_weight: f64,
    pub time_weight: f64,
    pub attention_weight: f64,
    /// Lower bound on each component before the geometric mean.
    pub component_floor: f64,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            expected_ms_per_target: 1500.0,
            min_time_ratio: 0.25,
            max_time_ratio: 4.0,
            mistake_weight: 2.0,
            misclick_weight: 1.0,
            accuracy_weight: 0.5,
            time_weight: 0.3,
            attention_weight: 0.2,
            component_floor: 1e-6,
        }
    }
}

/// Level 1, trail making.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub expected_ms_per_target: f64,
    pub max_time_ratio: f64,
    /// Time score lost per unit of time ratio above 1.
    pub time_slope: f64,
    pub accuracy_points: f64,
    pub pei_factor: f64,
    pub lure_points: f64,
    pub time_points: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            expected_ms_per_target: 1500.0,
            max_time_ratio: 3.0,
            time_slope: 0.5,
            accuracy_points: 50.0,
            pei_factor: 0.3,
            lure_points: 20.0,
            time_points: 10.0,
        }
    }
}

/// Level 2, spatial memory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub accuracy_points: f64,
    pub spatial_factor: f64,
    /// Hausdorff distance (display units) per lost spatial point.
    pub hausdorff_divisor: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            accuracy_points: 60.0,
            spatial_factor: 0.4,
            hausdorff_divisor: 3.0,
        }
    }
}

/// Level 3, divided attention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    pub mistake_penalty: f64,
    /// Hull/RT correlation above which tunnel vision is penalised.
    pub tunnel_threshold: f64,
    pub tunnel_penalty: f64,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            mistake_penalty: 10.0,
            tunnel_threshold: 0.5,
            tunnel_penalty: 20.0,
        }
    }
}

/// Level 4, combined attention and memory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedConfig {
    pub expected_ms_per_target: f64,
    pub accuracy_points: f64,
    pub time_points: f64,
    /// Relative hull growth above which the distraction penalty applies.
    pub growth_threshold: f64,
    pub growth_penalty: f64,
    /// Floor on the initial hull area when computing growth.
    pub min_base_area: f64,
}

impl Default for CombinedConfig {
    fn default() -> Self {
        Self {
            expected_ms_per_target: 2000.0,
            accuracy_points: 60.0,
            time_points: 30.0,
            growth_threshold: 0.5,
            growth_penalty: 10.0,
            min_base_area: 0.1,
        }
    }
}

/// Level 5, shape recognition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    pub expected_ms: f64,
    pub max_time_ratio: f64,
    pub max_confidence: f64,
    pub correctness_weight: f64,
    pub time_weight: f64,
    pub confidence_weight: f64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            expected_ms: 15_000.0,
            max_time_ratio: 3.0,
            max_confidence: 5.0,
            correctness_weight: 0.6,
            time_weight: 0.25,
            confidence_weight: 0.15,
        }
    }
}

/// Level 6, intersection detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionConfig {
    pub timing_points: f64,
    pub area_points: f64,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            timing_points: 70.0,
            area_points: 30.0,
        }
    }
}

/// Level 7, polygon reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Jerk units per lost smoothness point.
    pub jerk_divisor: f64,
    /// Points lost per vertex of count error.
    pub vertex_penalty: f64,
    pub shape_weight: f64,
    pub smoothness_weight: f64,
    pub vertex_weight: f64,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            jerk_divisor: 2.0,
            vertex_penalty: 20.0,
            shape_weight: 0.5,
            smoothness_weight: 0.3,
            vertex_weight: 0.2,
        }
    }
}

/// Every scoring constant. The defaults are empirical; any subset can be
/// overridden from a partial document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub grade: GradeConfig,
    pub trail: TrailConfig,
    pub memory: MemoryConfig,
    pub attention: AttentionConfig,
    pub combined: CombinedConfig,
    pub recognition: RecognitionConfig,
    pub intersection: IntersectionConfig,
    pub reconstruction: ReconstructionConfig,
    pub domains: DomainWeights,
    pub metrics: MetricParams,
}
