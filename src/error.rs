use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum CognishapeError {
    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors raised by the geometry kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("need at least {needed} points, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    #[error("degenerate point set: {0}")]
    Degenerate(String),

    #[error("triangulation insert failed: {0}")]
    Insertion(String),
}

/// Errors raised by the stimulus generators.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid bounding box: {0}")]
    InvalidBounds(String),

    #[error("malformed boundary: {0}")]
    MalformedBoundary(String),

    #[error("no peelable triangle left with boundary length {boundary_len}")]
    PeelStuck { boundary_len: usize },

    #[error("boundary length {boundary_len} already exceeds target {target}")]
    BoundaryOvershoot { boundary_len: usize, target: usize },
}

/// Convenience type alias for results using [`CognishapeError`].
pub type Result<T> = std::result::Result<T, CognishapeError>;
