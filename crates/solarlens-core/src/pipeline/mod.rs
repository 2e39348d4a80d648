pub mod config;
mod detector;
mod types;

pub use detector::{detect_exoplanet, ExoplanetDetector};
pub use types::{Observation, PipelineStage, ProgressReporter};
