use std::sync::Arc;

use ndarray::Array2;
use tracing::{debug, info};

use crate::analysis::{AtmosphereAnalyzer, ParameterEstimator};
use crate::consts::FULL_CONFIDENCE_SNR;
use crate::detection::{Detection, PointSourceDetector};
use crate::error::{Result, SolarLensError};
use crate::grid::{ImageGrid, RawFrame, Spectrum};
use crate::imaging::{CoronaSubtractor, Deconvolver, ImageAccumulator};
use crate::lens::psf::uniform_kernel;
use crate::lens::LensPhysics;
use crate::planet::PlanetData;

use super::config::{PipelineConfig, RestorationKernel};
use super::types::{NoOpReporter, Observation, PipelineStage, ProgressReporter};

/// One pipeline run context: the shared lens model plus the two image
/// buffers owned by this detector.
///
/// Buffers are reset at the start of every call, so one detector can be
/// reused across observations but never shared between concurrent runs.
pub struct ExoplanetDetector {
    physics: Arc<LensPhysics>,
    config: PipelineConfig,
    raw: ImageGrid,
    processed: ImageGrid,
}

impl ExoplanetDetector {
    pub fn new(physics: Arc<LensPhysics>, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let size = config.image_size;
        Ok(Self {
            physics,
            config,
            raw: ImageGrid::zeros(size),
            processed: ImageGrid::zeros(size),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn physics(&self) -> &Arc<LensPhysics> {
        &self.physics
    }

    /// Accumulated image of the last run.
    pub fn raw_image(&self) -> &ImageGrid {
        &self.raw
    }

    /// Corona-subtracted, restored image of the last run.
    pub fn processed_image(&self) -> &ImageGrid {
        &self.processed
    }

    /// Run the pipeline on a bare sensor frame, with no spectrograph data.
    pub fn detect_exoplanet(
        &mut self,
        counts: &RawFrame,
        integration_time_s: u32,
        target_distance_ly: f64,
        wavelength_nm: f64,
    ) -> Result<PlanetData> {
        self.run(
            counts,
            integration_time_s,
            target_distance_ly,
            wavelength_nm,
            None,
            0.0,
            &NoOpReporter,
        )
    }

    pub fn detect_observation(&mut self, observation: &Observation) -> Result<PlanetData> {
        self.detect_observation_reported(observation, &NoOpReporter)
    }

    /// Run the pipeline with a progress reporter.
    pub fn detect_observation_reported(
        &mut self,
        observation: &Observation,
        reporter: &dyn ProgressReporter,
    ) -> Result<PlanetData> {
        self.run(
            &observation.counts,
            observation.integration_time_s,
            observation.target_distance_ly,
            observation.wavelength_nm,
            observation.spectrum.as_ref(),
            observation.doppler_shift,
            reporter,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn run(
        &mut self,
        counts: &RawFrame,
        integration_time_s: u32,
        target_distance_ly: f64,
        wavelength_nm: f64,
        spectrum: Option<&Spectrum>,
        doppler_shift: f64,
        reporter: &dyn ProgressReporter,
    ) -> Result<PlanetData> {
        let size = self.config.image_size;
        let (height, width) = counts.dim();
        if height != size || width != size {
            return Err(SolarLensError::InvalidDimensions {
                expected: size,
                width,
                height,
            });
        }

        self.raw.reset(size);
        self.processed.reset(size);

        // Accumulation
        reporter.begin_stage(PipelineStage::Accumulation, None);
        ImageAccumulator::new(self.config.accumulation.dark_current).accumulate_into(
            counts,
            integration_time_s,
            &mut self.raw,
        );
        info!(size, integration_time_s, "Photons accumulated");
        reporter.finish_stage();

        // Corona subtraction
        reporter.begin_stage(PipelineStage::CoronaSubtraction, None);
        CoronaSubtractor::new(&self.physics)
            .with_scale(self.config.corona.pixels_per_solar_radius)
            .with_wavelength(self.config.corona.reference_wavelength_nm)
            .subtract_into(&self.raw, target_distance_ly, &mut self.processed);
        let (lo, hi) = self.processed.min_max();
        debug!(
            pixels_per_solar_radius = self.config.corona.pixels_per_solar_radius,
            residual_min = lo,
            residual_max = hi,
            "Corona subtracted"
        );
        reporter.finish_stage();

        // Restoration
        let iterations = self.config.restoration.iterations;
        reporter.begin_stage(PipelineStage::Restoration, Some(iterations));
        let kernel = self.restoration_kernel(wavelength_nm);
        info!(
            kernel = %self.config.restoration.kernel,
            iterations,
            "Restoring image"
        );
        self.processed = Deconvolver::new(kernel, iterations)
            .restore_with_progress(&self.processed, |done| reporter.advance(done));
        reporter.finish_stage();

        // Detection
        reporter.begin_stage(PipelineStage::Detection, None);
        let mut detection = PointSourceDetector::new(self.config.detection.clone())
            .detect(&self.processed);
        reporter.finish_stage();
        info!(
            found = detection.found,
            snr = detection.snr,
            row = detection.peak.0,
            col = detection.peak.1,
            "Point source search complete"
        );

        if !detection.found {
            return Ok(PlanetData::default());
        }

        if let Some(s) = spectrum {
            detection.spectrum = s.clone();
        }
        detection.doppler_shift = doppler_shift;

        Ok(self.characterize(&detection, reporter))
    }

    fn restoration_kernel(&self, wavelength_nm: f64) -> Array2<f32> {
        match self.config.restoration.kernel {
            RestorationKernel::Uniform { half_width } => uniform_kernel(half_width),
            RestorationKernel::LensPsf => {
                let psf = self
                    .physics
                    .psf(wavelength_nm, self.config.restoration.observer_distance_au);
                debug!(fwhm_mas = psf.fwhm_mas, size = psf.size(), "Lens PSF kernel");
                psf.kernel
            }
        }
    }

    fn characterize(&self, detection: &Detection, reporter: &dyn ProgressReporter) -> PlanetData {
        reporter.begin_stage(PipelineStage::Estimation, None);
        let estimator = ParameterEstimator::new(self.config.estimation.stellar_luminosity_solar);

        let radius_earth = estimator.radius_from_flux(detection.flux);
        let temperature_kelvin = estimator.temperature(&detection.spectrum);
        let albedo = estimator
            .albedo(detection.flux, temperature_kelvin)
            .clamp(0.0, 1.0);
        let orbital_radius_au = estimator.orbit_from_doppler(detection.doppler_shift);
        let in_habitable_zone = estimator.in_habitable_zone(orbital_radius_au);
        let confidence = (detection.snr / FULL_CONFIDENCE_SNR).clamp(0.0, 1.0);
        info!(
            radius_earth,
            temperature_kelvin, orbital_radius_au, in_habitable_zone, "Parameters estimated"
        );
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::AtmosphereAnalysis, None);
        let atmosphere = AtmosphereAnalyzer.analyze(&detection.spectrum);
        reporter.finish_stage();

        PlanetData {
            detected: true,
            radius_earth,
            orbital_radius_au,
            temperature_kelvin,
            albedo,
            in_habitable_zone,
            confidence,
            atmosphere,
        }
    }
}

/// Run one observation through a fresh detector.
pub fn detect_exoplanet(
    physics: Arc<LensPhysics>,
    config: &PipelineConfig,
    observation: &Observation,
) -> Result<PlanetData> {
    let mut detector = ExoplanetDetector::new(physics, config.clone())?;
    detector.detect_observation(observation)
}
