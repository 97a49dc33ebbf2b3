mod convex;
mod corridor;
mod mesh;
mod peel;
mod sampling;
mod seed;
mod task;

pub use convex::{ConvexParams, ConvexPolygon};
pub use corridor::{Corridor, CorridorParams, MazeCorridor};
pub use mesh::Mesh;
pub use peel::{PeelParams, PeelPolygon};
pub use sampling::sample_spaced_points;
pub use seed::SeedToken;
pub use task::{
    desired_vertex_count, make_labels, AttentionSchedule, AttentionStimulus, DriftParams,
    HighlightEvent, HighlightKind, LabelScheme, LabeledPoint, TaskStimulus,
    DEFAULT_HIGHLIGHT_PROBABILITY, DEFAULT_LABEL_COVERAGE,
};

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::math::Polygon;

/// How a generator arrived at its polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMethod {
    /// Triangulation peeling succeeded on the given attempt.
    Peeled { attempt: usize },
    /// Every peel attempt failed; convex hull of the first sample.
    HullFallback,
    /// Hull oversampling succeeded on the given attempt.
    Oversampled { attempt: usize },
    /// Every attempt failed and no usable hull remained; jittered regular
    /// polygon.
    RegularFallback,
}

impl GenerationMethod {
    #[must_use]
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::HullFallback | Self::RegularFallback)
    }
}

/// A generated polygon together with how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPolygon {
    pub polygon: Polygon,
    pub realized_vertex_count: usize,
    pub method: GenerationMethod,
}

impl GeneratedPolygon {
    pub(crate) fn new(polygon: Polygon, method: GenerationMethod) -> Self {
        Self {
            realized_vertex_count: polygon.len(),
            polygon,
            method,
        }
    }
}

fn check_vertex_count(vertex_count: usize) -> Result<()> {
    if vertex_count < 3 {
        #[allow(clippy::cast_precision_loss)]
        let value = vertex_count as f64;
        return Err(GenerationError::ParameterOutOfRange {
            parameter: "vertex_count",
            value,
            min: 3.0,
            max: f64::INFINITY,
        }
        .into());
    }
    Ok(())
}
