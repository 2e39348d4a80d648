use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CORONA_REFERENCE_WAVELENGTH_NM, DEFAULT_DARK_CURRENT, DEFAULT_IMAGE_SIZE,
    DEFAULT_PIXELS_PER_SOLAR_RADIUS, DEFAULT_RL_ITERATIONS, DEFAULT_STELLAR_LUMINOSITY,
    DEFAULT_UNIFORM_KERNEL_HALF_WIDTH, FOCAL_OPTIMAL_AU,
};
use crate::detection::DetectionConfig;
use crate::error::{Result, SolarLensError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Edge length of the square sensor grid.
    #[serde(default = "default_image_size")]
    pub image_size: usize,
    #[serde(default)]
    pub accumulation: AccumulationConfig,
    #[serde(default)]
    pub corona: CoronaConfig,
    #[serde(default)]
    pub restoration: RestorationConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub estimation: EstimationConfig,
}

fn default_image_size() -> usize {
    DEFAULT_IMAGE_SIZE
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            accumulation: AccumulationConfig::default(),
            corona: CoronaConfig::default(),
            restoration: RestorationConfig::default(),
            detection: DetectionConfig::default(),
            estimation: EstimationConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.image_size == 0 {
            return Err(SolarLensError::InvalidConfig(
                "image_size must be positive".into(),
            ));
        }
        if !(self.corona.pixels_per_solar_radius > 0.0) {
            return Err(SolarLensError::InvalidConfig(format!(
                "corona.pixels_per_solar_radius must be positive, got {}",
                self.corona.pixels_per_solar_radius
            )));
        }
        if !(self.restoration.observer_distance_au > 0.0) {
            return Err(SolarLensError::InvalidConfig(format!(
                "restoration.observer_distance_au must be positive, got {}",
                self.restoration.observer_distance_au
            )));
        }
        if self.accumulation.dark_current < 0.0 {
            return Err(SolarLensError::InvalidConfig(format!(
                "accumulation.dark_current must be non-negative, got {}",
                self.accumulation.dark_current
            )));
        }
        if !(self.estimation.stellar_luminosity_solar > 0.0) {
            return Err(SolarLensError::InvalidConfig(format!(
                "estimation.stellar_luminosity_solar must be positive, got {}",
                self.estimation.stellar_luminosity_solar
            )));
        }
        self.detection.validate(self.image_size)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulationConfig {
    /// Dark current in e-/pixel/s.
    pub dark_current: f64,
}

impl Default for AccumulationConfig {
    fn default() -> Self {
        Self {
            dark_current: DEFAULT_DARK_CURRENT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoronaConfig {
    /// Plate scale of the corona model.
    pub pixels_per_solar_radius: f64,
    /// Wavelength at which the corona model is evaluated.
    pub reference_wavelength_nm: f64,
}

impl Default for CoronaConfig {
    fn default() -> Self {
        Self {
            pixels_per_solar_radius: DEFAULT_PIXELS_PER_SOLAR_RADIUS,
            reference_wavelength_nm: CORONA_REFERENCE_WAVELENGTH_NM,
        }
    }
}

/// Blur kernel used by Richardson-Lucy restoration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RestorationKernel {
    /// Uniform box of edge `2 * half_width + 1`.
    Uniform { half_width: usize },
    /// The lens PSF at the observation wavelength and observer distance.
    LensPsf,
}

impl Default for RestorationKernel {
    fn default() -> Self {
        Self::Uniform {
            half_width: DEFAULT_UNIFORM_KERNEL_HALF_WIDTH,
        }
    }
}

impl fmt::Display for RestorationKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform { half_width } => {
                let edge = 2 * half_width + 1;
                write!(f, "Uniform {edge}x{edge}")
            }
            Self::LensPsf => write!(f, "Lens PSF"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestorationConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub kernel: RestorationKernel,
    /// Observer distance used when the kernel is the lens PSF.
    #[serde(default = "default_observer_distance")]
    pub observer_distance_au: f64,
}

fn default_iterations() -> usize {
    DEFAULT_RL_ITERATIONS
}
fn default_observer_distance() -> f64 {
    FOCAL_OPTIMAL_AU
}

impl Default for RestorationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_RL_ITERATIONS,
            kernel: RestorationKernel::default(),
            observer_distance_au: FOCAL_OPTIMAL_AU,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// Host-star luminosity in solar units.
    pub stellar_luminosity_solar: f64,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            stellar_luminosity_solar: DEFAULT_STELLAR_LUMINOSITY,
        }
    }
}
