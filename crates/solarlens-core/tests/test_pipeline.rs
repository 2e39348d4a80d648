#[allow(dead_code)]
mod common;

use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use ndarray::Array2;

use solarlens_core::consts::WIEN_DISPLACEMENT;
use solarlens_core::error::SolarLensError;
use solarlens_core::grid::{RawFrame, Spectrum};
use solarlens_core::lens::LensPhysics;
use solarlens_core::pipeline::config::RestorationKernel;
use solarlens_core::pipeline::{
    detect_exoplanet, ExoplanetDetector, Observation, PipelineStage, ProgressReporter,
};
use solarlens_core::planet::{Biosignature, Gas, PlanetData};
use solarlens_core::synth::synthesize_spectrum;

fn detector() -> ExoplanetDetector {
    ExoplanetDetector::new(Arc::new(LensPhysics::new()), common::small_config()).unwrap()
}

fn earth_like_observation() -> Observation {
    let counts = common::planet_frame(128, 96.0, 96.0, 20_000.0);
    let spectrum = synthesize_spectrum(5000.0, &[(Gas::Oxygen, 2.0), (Gas::Methane, 0.5)], 2048);
    Observation::new(counts, 10, 4.37, 550.0)
        .with_spectrum(spectrum)
        .with_doppler_shift(common::doppler_for_orbit(1.0))
}

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<(PipelineStage, Option<usize>)>>,
    advances: Mutex<Vec<usize>>,
    finished: Mutex<usize>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.stages.lock().unwrap().push((stage, total_items));
    }

    fn advance(&self, items_done: usize) {
        self.advances.lock().unwrap().push(items_done);
    }

    fn finish_stage(&self) {
        *self.finished.lock().unwrap() += 1;
    }
}

#[test]
fn test_detects_planet_beside_the_sun() {
    let mut detector = detector();
    let planet = detector.detect_observation(&earth_like_observation()).unwrap();

    assert!(planet.detected);
    assert_eq!(planet.confidence, 1.0);
    assert!(planet.radius_earth > 0.0);
    assert_relative_eq!(planet.orbital_radius_au, 1.0, max_relative = 1e-6);
    assert!(planet.in_habitable_zone);
    assert!((planet.temperature_kelvin - 5000.0).abs() < 100.0);
    // A 5000 K body radiates far more than it receives at 1 AU.
    assert_eq!(planet.albedo, 0.0);
    assert_eq!(planet.atmosphere.biosignature, Biosignature::Strong);
    assert!(planet.atmosphere.oxygen > 1.0);
}

#[test]
fn test_restored_image_is_non_negative() {
    let mut detector = detector();
    detector.detect_observation(&earth_like_observation()).unwrap();

    let processed = detector.processed_image();
    assert_eq!(processed.size(), 128);
    assert!(processed.data.iter().all(|&v| v >= 0.0));
    // The corona swamps everything away from the planet.
    assert_eq!(processed.data[[64, 64]], 0.0);
    assert!(processed.data[[96, 96]] > 0.0);
}

#[test]
fn test_empty_frame_yields_default_result() {
    let mut detector = detector();
    let counts: RawFrame = Array2::zeros((128, 128));
    let planet = detector.detect_exoplanet(&counts, 10, 4.37, 550.0).unwrap();
    assert_eq!(planet, PlanetData::default());
    assert!(!planet.detected);
    assert_eq!(planet.confidence, 0.0);
}

#[test]
fn test_bare_frame_uses_empty_spectrograph_channel() {
    let mut detector = detector();
    let counts = common::planet_frame(128, 96.0, 96.0, 20_000.0);
    let planet = detector.detect_exoplanet(&counts, 10, 4.37, 550.0).unwrap();

    assert!(planet.detected);
    // Zero spectrum peaks at bin 0 (400 nm).
    assert_relative_eq!(planet.temperature_kelvin, WIEN_DISPLACEMENT / 400e-9, max_relative = 1e-9);
    assert!(planet.orbital_radius_au.is_finite());
    assert!(!planet.in_habitable_zone);
    assert_eq!(planet.atmosphere.biosignature, Biosignature::None);
}

#[test]
fn test_runs_are_deterministic() {
    let observation = earth_like_observation();
    let first = detector().detect_observation(&observation).unwrap();
    let second = detector().detect_observation(&observation).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_detector_is_reusable() {
    let mut detector = detector();
    let observation = earth_like_observation();

    let first = detector.detect_observation(&observation).unwrap();
    let empty = Observation::new(Array2::zeros((128, 128)), 10, 4.37, 550.0);
    let nothing = detector.detect_observation(&empty).unwrap();
    let again = detector.detect_observation(&observation).unwrap();

    assert!(first.detected);
    assert!(!nothing.detected);
    assert_eq!(first, again);
}

#[test]
fn test_wrong_frame_size_is_rejected() {
    let mut detector = detector();
    let counts: RawFrame = Array2::zeros((64, 64));
    let err = detector.detect_exoplanet(&counts, 10, 4.37, 550.0).unwrap_err();
    assert!(matches!(
        err,
        SolarLensError::InvalidDimensions {
            expected: 128,
            width: 64,
            height: 64
        }
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = common::small_config();
    config.image_size = 16;
    let result = ExoplanetDetector::new(Arc::new(LensPhysics::new()), config);
    assert!(matches!(result, Err(SolarLensError::InvalidConfig(_))));
}

#[test]
fn test_reporter_sees_every_stage() {
    let mut detector = detector();
    let reporter = RecordingReporter::default();
    let planet = detector
        .detect_observation_reported(&earth_like_observation(), &reporter)
        .unwrap();
    assert!(planet.detected);

    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            (PipelineStage::Accumulation, None),
            (PipelineStage::CoronaSubtraction, None),
            (PipelineStage::Restoration, Some(10)),
            (PipelineStage::Detection, None),
            (PipelineStage::Estimation, None),
            (PipelineStage::AtmosphereAnalysis, None),
        ]
    );
    assert_eq!(*reporter.advances.lock().unwrap(), (1..=10).collect::<Vec<_>>());
    assert_eq!(*reporter.finished.lock().unwrap(), 6);
}

#[test]
fn test_reporter_stops_after_detection_when_nothing_found() {
    let mut detector = detector();
    let reporter = RecordingReporter::default();
    let empty = Observation::new(Array2::zeros((128, 128)), 10, 4.37, 550.0);
    detector.detect_observation_reported(&empty, &reporter).unwrap();

    let stages = reporter.stages.lock().unwrap();
    assert_eq!(stages.len(), 4);
    assert_eq!(stages[3].0, PipelineStage::Detection);
}

#[test]
fn test_lens_psf_kernel_runs() {
    let mut config = common::small_config();
    config.restoration.kernel = RestorationKernel::LensPsf;
    config.restoration.iterations = 3;
    let mut detector = ExoplanetDetector::new(Arc::new(LensPhysics::new()), config).unwrap();

    let result = detector.detect_observation(&earth_like_observation());
    assert!(result.is_ok());
    assert!(detector
        .processed_image()
        .data
        .iter()
        .all(|&v| v.is_finite() && v >= 0.0));
}

#[test]
fn test_free_function_matches_detector() {
    let physics = Arc::new(LensPhysics::new());
    let config = common::small_config();
    let observation = earth_like_observation();

    let via_fn = detect_exoplanet(Arc::clone(&physics), &config, &observation).unwrap();
    let mut detector = ExoplanetDetector::new(physics, config).unwrap();
    assert_eq!(via_fn, detector.detect_observation(&observation).unwrap());
}

#[test]
fn test_shared_physics_across_threads() {
    let physics = Arc::new(LensPhysics::new());
    let observation = Arc::new(earth_like_observation());

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let physics = Arc::clone(&physics);
            let observation = Arc::clone(&observation);
            std::thread::spawn(move || {
                detect_exoplanet(physics, &common::small_config(), &observation).unwrap()
            })
        })
        .collect();

    let results: Vec<PlanetData> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(|p| p.detected));
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_observation_defaults_to_empty_spectrograph() {
    let observation = Observation::new(Array2::zeros((4, 4)), 1, 4.37, 550.0);
    assert!(observation.spectrum.is_none());
    assert_eq!(observation.doppler_shift, 0.0);

    let with = observation.with_spectrum(Spectrum::default());
    assert_eq!(with.spectrum, Some(Spectrum::default()));
}
