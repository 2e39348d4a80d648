use crate::grid::{RawFrame, Spectrum};

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Accumulation,
    CoronaSubtraction,
    Restoration,
    Detection,
    Estimation,
    AtmosphereAnalysis,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accumulation => write!(f, "Accumulating photons"),
            Self::CoronaSubtraction => write!(f, "Subtracting corona"),
            Self::Restoration => write!(f, "Deconvolving"),
            Self::Detection => write!(f, "Detecting point source"),
            Self::Estimation => write!(f, "Estimating parameters"),
            Self::AtmosphereAnalysis => write!(f, "Analyzing atmosphere"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., restoration iterations), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `detect_observation` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// One exposure: the imaging frame plus the spectrograph channel recorded with it.
#[derive(Clone, Debug)]
pub struct Observation {
    pub counts: RawFrame,
    pub integration_time_s: u32,
    pub target_distance_ly: f64,
    pub wavelength_nm: f64,
    /// Source spectrum; an all-zero spectrum when absent.
    pub spectrum: Option<Spectrum>,
    /// Radial-velocity shift as a fraction of c.
    pub doppler_shift: f64,
}

impl Observation {
    pub fn new(
        counts: RawFrame,
        integration_time_s: u32,
        target_distance_ly: f64,
        wavelength_nm: f64,
    ) -> Self {
        Self {
            counts,
            integration_time_s,
            target_distance_ly,
            wavelength_nm,
            spectrum: None,
            doppler_shift: 0.0,
        }
    }

    pub fn with_spectrum(mut self, spectrum: Spectrum) -> Self {
        self.spectrum = Some(spectrum);
        self
    }

    pub fn with_doppler_shift(mut self, doppler_shift: f64) -> Self {
        self.doppler_shift = doppler_shift;
        self
    }
}
