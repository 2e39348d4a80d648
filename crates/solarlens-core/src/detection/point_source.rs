use ndarray::{Array2, Axis};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{DETECTION_SNR_THRESHOLD, EPSILON_F64, PARALLEL_PIXEL_THRESHOLD};
use crate::grid::{ImageGrid, Spectrum};

use super::config::DetectionConfig;

/// Outcome of the point-source search on one restored image.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// `snr > 5`.
    pub found: bool,
    /// Aperture-summed signal.
    pub flux: f64,
    pub snr: f64,
    /// Annulus RMS used as the noise estimate.
    pub noise_rms: f64,
    /// Peak position `(row, col)`.
    pub peak: (usize, usize),
    /// Radial-velocity shift as a fraction of c. Filled from the spectrograph.
    pub doppler_shift: f64,
    /// Spectrum of the source. Filled from the spectrograph.
    pub spectrum: Spectrum,
}

/// Brightest-pixel search followed by aperture photometry.
#[derive(Clone, Debug, Default)]
pub struct PointSourceDetector {
    pub config: DetectionConfig,
}

impl PointSourceDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Detect the brightest point source in the interior of `image`.
    ///
    /// The image must be larger than twice the edge margin, and the margin
    /// must cover the annulus (see [`DetectionConfig::validate`]).
    pub fn detect(&self, image: &ImageGrid) -> Detection {
        let cfg = &self.config;
        let (row, col, peak_value) = find_peak(&image.data, cfg.edge_margin);

        let signal = aperture_sum(&image.data, row, col, cfg.aperture_half_width);
        let noise = annulus_rms(&image.data, row, col, cfg.annulus_inner, cfg.annulus_outer);
        let snr = signal / (noise + EPSILON_F64);
        let found = snr > DETECTION_SNR_THRESHOLD;

        debug!(row, col, peak_value, signal, noise, snr, found, "Point source search");

        Detection {
            found,
            flux: signal,
            snr,
            noise_rms: noise,
            peak: (row, col),
            doppler_shift: 0.0,
            spectrum: Spectrum::default(),
        }
    }
}

/// Brightest pixel at least `margin` pixels from every edge.
///
/// Ties keep the first pixel in raster order.
pub fn find_peak(data: &Array2<f32>, margin: usize) -> (usize, usize, f32) {
    let (h, w) = data.dim();
    let rows = margin..h.saturating_sub(margin);
    let cols = margin..w.saturating_sub(margin);
    if rows.is_empty() || cols.is_empty() {
        return (h / 2, w / 2, data.get((h / 2, w / 2)).copied().unwrap_or(0.0));
    }

    let row_peak = |row: usize| -> (usize, usize, f32) {
        let lane = data.row(row);
        let mut best = (row, cols.start, lane[cols.start]);
        for col in cols.clone().skip(1) {
            if lane[col] > best.2 {
                best = (row, col, lane[col]);
            }
        }
        best
    };

    let per_row: Vec<(usize, usize, f32)> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        rows.clone().into_par_iter().map(row_peak).collect()
    } else {
        rows.clone().map(row_peak).collect()
    };

    let mut best = per_row[0];
    for &candidate in &per_row[1..] {
        if candidate.2 > best.2 {
            best = candidate;
        }
    }
    best
}

/// Sum over the `(2 * half_width + 1)^2` box centered on `(row, col)`.
pub fn aperture_sum(data: &Array2<f32>, row: usize, col: usize, half_width: usize) -> f64 {
    let (h, w) = data.dim();
    let r0 = row.saturating_sub(half_width);
    let r1 = (row + half_width).min(h - 1);
    let c0 = col.saturating_sub(half_width);
    let c1 = (col + half_width).min(w - 1);

    data.slice(ndarray::s![r0..=r1, c0..=c1])
        .iter()
        .map(|&v| v as f64)
        .sum()
}

/// RMS of the pixels with Chebyshev distance in `(inner, outer]` from `(row, col)`.
pub fn annulus_rms(data: &Array2<f32>, row: usize, col: usize, inner: usize, outer: usize) -> f64 {
    let (h, w) = data.dim();
    let mut sum_sq = 0.0f64;
    let mut count = 0usize;

    let r0 = row.saturating_sub(outer);
    let r1 = (row + outer).min(h - 1);
    for (r, lane) in data
        .slice(ndarray::s![r0..=r1, ..])
        .axis_iter(Axis(0))
        .enumerate()
    {
        let dy = (r0 + r).abs_diff(row);
        let c0 = col.saturating_sub(outer);
        let c1 = (col + outer).min(w - 1);
        for c in c0..=c1 {
            let dx = c.abs_diff(col);
            if dy > inner || dx > inner {
                let v = lane[c] as f64;
                sum_sq += v * v;
                count += 1;
            }
        }
    }

    if count == 0 {
        return 0.0;
    }
    (sum_sq / count as f64).sqrt()
}
