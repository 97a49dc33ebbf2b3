pub mod error;
pub mod kernel;
pub mod math;
pub mod metrics;
pub mod scoring;
pub mod stimulus;

pub use error::{CognishapeError, Result};
