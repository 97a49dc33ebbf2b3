mod attention;
mod composite;
mod config;
mod grade;
mod kinetic;
mod lure;
mod recognition;
mod reconstruction;
mod sequence;

pub use attention::{
    score_combined, score_divided_attention, CombinedInput, CombinedScore, DividedAttentionInput,
    DividedAttentionScore,
};
pub use composite::{CompositeProfile, Domain, DomainScore, TaskResult};
pub use config::{
    AttentionConfig, CombinedConfig, DomainWeights, GradeConfig, IntersectionConfig,
    MemoryConfig, ReconstructionConfig, RecognitionConfig, ScoringConfig, TrailConfig,
};
pub use grade::{grade, GradeInput, GradeReport};
pub use kinetic::{kinetic_hull_analysis, Click, HullSample, KineticAnalysis};
pub use lure::{lure_analysis, LureAnalysis};
pub use recognition::{
    score_intersection_detection, score_recognition, AreaEstimate, IntersectionDetectionScore,
    RecognitionScore,
};
pub use reconstruction::{score_reconstruction, ReconstructionInput, ReconstructionScore};
pub use sequence::{
    score_spatial_memory, score_trail_making, SequenceInput, SpatialMemoryScore, TrailMakingScore,
};
