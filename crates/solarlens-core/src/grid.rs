use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{SPECTRUM_BINS, SPECTRUM_MAX_NM, SPECTRUM_MIN_NM};

/// One frame of raw photon counts, row-major, shape = (N, N).
pub type RawFrame = Array2<u16>;

/// A square grid of single-precision intensity samples.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageGrid {
    /// Pixel data, row-major, shape = (size, size)
    pub data: Array2<f32>,
}

impl ImageGrid {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn zeros(size: usize) -> Self {
        Self {
            data: Array2::zeros((size, size)),
        }
    }

    /// Edge length of the grid.
    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Zero every sample, resizing if the edge length changed.
    pub fn reset(&mut self, size: usize) {
        if self.data.dim() == (size, size) {
            self.data.fill(0.0);
        } else {
            self.data = Array2::zeros((size, size));
        }
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Intensity samples mapped linearly onto 400-2400 nm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    bins: Vec<f32>,
}

impl Default for Spectrum {
    fn default() -> Self {
        Self::zeros(SPECTRUM_BINS)
    }
}

impl Spectrum {
    pub fn zeros(bins: usize) -> Self {
        Self {
            bins: vec![0.0; bins],
        }
    }

    pub fn from_vec(bins: Vec<f32>) -> Self {
        Self { bins }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.bins
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.bins
    }

    pub fn get(&self, bin: usize) -> Option<f32> {
        self.bins.get(bin).copied()
    }

    /// Width of one bin in nanometers.
    pub fn bin_width_nm(&self) -> f64 {
        (SPECTRUM_MAX_NM - SPECTRUM_MIN_NM) / self.bins.len().max(1) as f64
    }

    /// Wavelength at the lower edge of `bin`.
    pub fn bin_to_wavelength_nm(&self, bin: usize) -> f64 {
        SPECTRUM_MIN_NM + bin as f64 * self.bin_width_nm()
    }

    /// Bin containing `wavelength_nm`, or `None` outside the covered range.
    pub fn wavelength_to_bin(&self, wavelength_nm: f64) -> Option<usize> {
        if !(SPECTRUM_MIN_NM..SPECTRUM_MAX_NM).contains(&wavelength_nm) {
            return None;
        }
        let bin = ((wavelength_nm - SPECTRUM_MIN_NM) / self.bin_width_nm()).floor() as usize;
        (bin < self.bins.len()).then_some(bin)
    }

    /// Index of the brightest bin. Ties keep the lowest index; a spectrum with
    /// no positive sample peaks at bin 0.
    pub fn peak_bin(&self) -> usize {
        let mut peak = 0;
        let mut max = 0.0f32;
        for (i, &v) in self.bins.iter().enumerate() {
            if v > max {
                max = v;
                peak = i;
            }
        }
        peak
    }
}
