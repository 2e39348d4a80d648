//! Seeded synthetic sensor frames and spectra for demonstrations and tests.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

use crate::analysis::ABSORPTION_LINES;
use crate::consts::{BOLTZMANN, C, DEFAULT_IMAGE_SIZE, PLANCK};
use crate::grid::{RawFrame, Spectrum};
use crate::planet::Gas;

/// Gaussian point source in count units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointSource {
    pub row: f64,
    pub col: f64,
    /// Mean counts per second at the center.
    pub peak_counts: f64,
    pub sigma_px: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub image_size: usize,
    /// Mean counts per second in every pixel.
    pub background_counts: f64,
    pub planets: Vec<PointSource>,
    /// Draw Poisson photon noise around the mean counts.
    pub photon_noise: bool,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            background_counts: 0.0,
            planets: Vec::new(),
            photon_noise: true,
            seed: 0,
        }
    }
}

/// Mean count rate of the scene at every pixel.
pub fn expected_counts(config: &SceneConfig) -> Array2<f64> {
    let n = config.image_size;
    Array2::from_shape_fn((n, n), |(row, col)| {
        let mut value = config.background_counts;
        for p in &config.planets {
            let dy = row as f64 - p.row;
            let dx = col as f64 - p.col;
            let s2 = 2.0 * p.sigma_px * p.sigma_px;
            value += p.peak_counts * (-(dx * dx + dy * dy) / s2.max(f64::MIN_POSITIVE)).exp();
        }
        value
    })
}

/// Render one raw frame. Identical configs (including the seed) give
/// identical frames.
pub fn synthesize_frame(config: &SceneConfig) -> RawFrame {
    let mean = expected_counts(config);
    let mut rng = StdRng::seed_from_u64(config.seed);

    // Raster order keeps the draw sequence independent of threading.
    mean.map(|&lambda| {
        let count = if config.photon_noise && lambda > 0.0 {
            match Poisson::new(lambda) {
                Ok(dist) => dist.sample(&mut rng),
                Err(_) => lambda,
            }
        } else {
            lambda.round()
        };
        count.clamp(0.0, u16::MAX as f64) as u16
    })
}

/// Planck spectral radiance at `wavelength_m` for temperature `t` (arbitrary scale).
fn planck(wavelength_m: f64, t: f64) -> f64 {
    let x = PLANCK * C / (wavelength_m * BOLTZMANN * t);
    let denom = x.exp() - 1.0;
    if !denom.is_finite() || denom <= 0.0 {
        return 0.0;
    }
    2.0 * PLANCK * C * C / wavelength_m.powi(5) / denom
}

/// Blackbody continuum at `temperature_k`, normalized to a peak of 1.0,
/// with an absorption dip of `depth_percent` at each requested gas line.
pub fn synthesize_spectrum(temperature_k: f64, lines: &[(Gas, f32)], bins: usize) -> Spectrum {
    let mut spectrum = Spectrum::zeros(bins);
    let centers: Vec<f64> = (0..bins)
        .map(|b| spectrum.bin_to_wavelength_nm(b) + spectrum.bin_width_nm() / 2.0)
        .collect();

    let values: Vec<f64> = centers
        .iter()
        .map(|&nm| planck(nm * 1e-9, temperature_k))
        .collect();
    let max = values.iter().cloned().fold(0.0f64, f64::max);
    let scale = if max > 0.0 { 1.0 / max } else { 0.0 };

    let out = spectrum.as_mut_slice();
    for (dst, v) in out.iter_mut().zip(values) {
        *dst = (v * scale) as f32;
    }

    for &(gas, depth) in lines {
        apply_absorption(&mut spectrum, gas, depth);
    }
    spectrum
}

/// Flat continuum of `level` with absorption dips.
pub fn flat_spectrum(level: f32, lines: &[(Gas, f32)], bins: usize) -> Spectrum {
    let mut spectrum = Spectrum::from_vec(vec![level; bins]);
    for &(gas, depth) in lines {
        apply_absorption(&mut spectrum, gas, depth);
    }
    spectrum
}

/// Scale the bin of `gas`'s line by `1 - depth_percent / 100`.
pub fn apply_absorption(spectrum: &mut Spectrum, gas: Gas, depth_percent: f32) {
    let Some(&(wavelength_nm, _)) = ABSORPTION_LINES.iter().find(|(_, g)| *g == gas) else {
        return;
    };
    if let Some(bin) = spectrum.wavelength_to_bin(wavelength_nm) {
        spectrum.as_mut_slice()[bin] *= 1.0 - depth_percent / 100.0;
    }
}
