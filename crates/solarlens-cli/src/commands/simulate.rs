use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use solarlens_core::consts::SPECTRUM_BINS;
use solarlens_core::io::image_io::save_grid;
use solarlens_core::lens::LensPhysics;
use solarlens_core::pipeline::config::{PipelineConfig, RestorationKernel};
use solarlens_core::pipeline::{ExoplanetDetector, Observation};
use solarlens_core::planet::{Gas, PlanetData};
use solarlens_core::synth::{synthesize_frame, synthesize_spectrum, PointSource, SceneConfig};

use crate::progress::BarReporter;
use crate::summary::{print_planet_summary, print_run_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum KernelArg {
    Uniform,
    LensPsf,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Noise seed
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Sensor edge length in pixels (overrides config)
    #[arg(long)]
    pub size: Option<usize>,

    /// Richardson-Lucy iterations (overrides config)
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Restoration kernel (overrides config)
    #[arg(long, value_enum)]
    pub kernel: Option<KernelArg>,

    /// Planet peak counts per second; 0 renders an empty field
    #[arg(long, default_value = "100")]
    pub planet_counts: f64,

    /// Planet image width (Gaussian sigma, pixels)
    #[arg(long, default_value = "2.0")]
    pub planet_sigma: f64,

    /// Sky background counts per second
    #[arg(long, default_value = "0.5")]
    pub background: f64,

    /// Integration time in seconds
    #[arg(long, default_value = "3600")]
    pub integration: u32,

    /// Target distance in light years
    #[arg(long, default_value = "4.37")]
    pub distance: f64,

    /// Observation wavelength in nm
    #[arg(long, default_value = "550")]
    pub wavelength: f64,

    /// Planet blackbody temperature for the synthetic spectrum (K)
    #[arg(long, default_value = "5000")]
    pub temperature: f64,

    /// O2 absorption depth (percent)
    #[arg(long, default_value = "2.0")]
    pub oxygen: f32,

    /// CH4 absorption depth (percent)
    #[arg(long, default_value = "0.0")]
    pub methane: f32,

    /// H2O absorption depth (percent)
    #[arg(long, default_value = "0.5")]
    pub water: f32,

    /// Radial-velocity shift as a fraction of c
    #[arg(long, default_value = "9.94e-5")]
    pub doppler: f64,

    /// Save the restored image (TIFF or PNG)
    #[arg(long)]
    pub save_image: Option<PathBuf>,

    /// Write a TOML report of the run
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    config: &'a PipelineConfig,
    planet: &'a PlanetData,
}

pub fn run(args: &SimulateArgs) -> Result<()> {
    let config = load_config(args)?;
    print_run_summary(&config, args.seed);

    let size = config.image_size;
    let center = size as f64 / 2.0;
    let offset = size as f64 / 4.0;
    let planets = if args.planet_counts > 0.0 {
        vec![PointSource {
            row: center + offset,
            col: center + offset,
            peak_counts: args.planet_counts,
            sigma_px: args.planet_sigma,
        }]
    } else {
        Vec::new()
    };
    let scene = SceneConfig {
        image_size: size,
        background_counts: args.background,
        planets,
        photon_noise: true,
        seed: args.seed,
    };

    let counts = synthesize_frame(&scene);
    let spectrum = synthesize_spectrum(
        args.temperature,
        &[
            (Gas::Oxygen, args.oxygen),
            (Gas::Methane, args.methane),
            (Gas::Water, args.water),
        ],
        SPECTRUM_BINS,
    );
    let observation = Observation::new(counts, args.integration, args.distance, args.wavelength)
        .with_spectrum(spectrum)
        .with_doppler_shift(args.doppler);

    let physics = Arc::new(LensPhysics::new());
    let mut detector = ExoplanetDetector::new(physics, config.clone())?;
    let reporter = BarReporter::new();
    let planet = detector.detect_observation_reported(&observation, &reporter)?;

    print_planet_summary(&planet);

    if let Some(ref path) = args.save_image {
        save_grid(detector.processed_image(), path)
            .with_context(|| format!("Failed to save image to {}", path.display()))?;
        println!("Restored image saved to {}", path.display());
    }

    if let Some(ref path) = args.report {
        let report = Report {
            seed: args.seed,
            config: &config,
            planet: &planet,
        };
        let toml_str = toml::to_string_pretty(&report)?;
        std::fs::write(path, toml_str)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn load_config(args: &SimulateArgs) -> Result<PipelineConfig> {
    let mut config: PipelineConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        PipelineConfig::default()
    };

    if let Some(size) = args.size {
        config.image_size = size;
    }
    if let Some(iterations) = args.iterations {
        config.restoration.iterations = iterations;
    }
    match args.kernel {
        Some(KernelArg::Uniform) => config.restoration.kernel = RestorationKernel::default(),
        Some(KernelArg::LensPsf) => config.restoration.kernel = RestorationKernel::LensPsf,
        None => {}
    }

    config.validate().context("Invalid pipeline config")?;
    Ok(config)
}
