pub mod config;
pub mod point_source;

pub use config::DetectionConfig;
pub use point_source::{Detection, PointSourceDetector};
