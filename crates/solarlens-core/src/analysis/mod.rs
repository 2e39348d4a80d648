pub mod atmosphere;
pub mod parameters;

pub use atmosphere::{AtmosphereAnalyzer, ABSORPTION_LINES};
pub use parameters::ParameterEstimator;
