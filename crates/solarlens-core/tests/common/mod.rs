use ndarray::Array2;

use solarlens_core::consts::{AU, C, G, M_SUN};
use solarlens_core::grid::{ImageGrid, RawFrame};
use solarlens_core::pipeline::config::PipelineConfig;
use solarlens_core::synth::{synthesize_frame, PointSource, SceneConfig};

/// Small, fast pipeline config: 128 px sensor, 10 px per solar radius, 10 RL rounds.
pub fn small_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.image_size = 128;
    config.corona.pixels_per_solar_radius = 10.0;
    config.restoration.iterations = 10;
    config
}

/// Noise-free frame with one Gaussian source.
pub fn planet_frame(size: usize, row: f64, col: f64, peak_counts: f64) -> RawFrame {
    synthesize_frame(&SceneConfig {
        image_size: size,
        background_counts: 0.0,
        planets: vec![PointSource {
            row,
            col,
            peak_counts,
            sigma_px: 1.5,
        }],
        photon_noise: false,
        seed: 0,
    })
}

/// Flat grid with a Gaussian bump.
pub fn gaussian_image(size: usize, row: f64, col: f64, peak: f32, sigma: f64, floor: f32) -> ImageGrid {
    let data = Array2::from_shape_fn((size, size), |(r, c)| {
        let dy = r as f64 - row;
        let dx = c as f64 - col;
        floor + peak * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp() as f32
    });
    ImageGrid::new(data)
}

/// Deterministic pseudo-random pattern in [-0.5, 1.0).
pub fn pattern_image(size: usize) -> ImageGrid {
    let data = Array2::from_shape_fn((size, size), |(r, c)| {
        let v = ((r * 7919 + c * 104_729) % 1000) as f32 / 1000.0;
        v * 1.5 - 0.5
    });
    ImageGrid::new(data)
}

/// Doppler shift (fraction of c) of a circular orbit at `radius_au`.
pub fn doppler_for_orbit(radius_au: f64) -> f64 {
    (G * M_SUN / (radius_au * AU)).sqrt() / C
}
