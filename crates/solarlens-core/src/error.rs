use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolarLensError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sensor dimensions: {width}x{height} (expected {expected}x{expected})")]
    InvalidDimensions {
        expected: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid pipeline config: {0}")]
    InvalidConfig(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SolarLensError>;
