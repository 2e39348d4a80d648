//! Zero-padded 2D convolution.
//!
//! Both paths compute `out[r, c] = sum_{i,j} k[i, j] * data[r - (i - ar), c - (j - ac)]`
//! with `(ar, ac) = (kh / 2, kw / 2)` and samples outside the image taken as
//! zero. Small kernels are applied directly; large ones through a padded FFT
//! whose size rules out wrap-around.

use std::sync::Arc;

use ndarray::{Array2, Axis};
use num_complex::Complex;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

use crate::consts::{DIRECT_CONVOLUTION_MAX_KERNEL, PARALLEL_PIXEL_THRESHOLD};

/// Convolution prepared for one kernel and one image shape.
pub enum Convolver {
    Direct(Array2<f32>),
    Fft(FftConvolver),
}

impl Convolver {
    /// Pick the direct path for kernels up to `DIRECT_CONVOLUTION_MAX_KERNEL`
    /// on a side, FFT otherwise.
    pub fn new(kernel: &Array2<f32>, image_dim: (usize, usize)) -> Self {
        let (kh, kw) = kernel.dim();
        if kh.max(kw) <= DIRECT_CONVOLUTION_MAX_KERNEL {
            Self::Direct(kernel.clone())
        } else {
            Self::Fft(FftConvolver::new(kernel, image_dim))
        }
    }

    pub fn apply(&self, data: &Array2<f32>) -> Array2<f32> {
        match self {
            Self::Direct(kernel) => convolve_direct(data, kernel),
            Self::Fft(fft) => fft.apply(data),
        }
    }
}

/// Direct spatial convolution with implicit zero padding.
pub fn convolve_direct(data: &Array2<f32>, kernel: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut result = Array2::<f32>::zeros((h, w));

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut lane)| {
                for (col, out) in lane.iter_mut().enumerate() {
                    *out = convolve_at(data, kernel, row, col);
                }
            });
    } else {
        for row in 0..h {
            for col in 0..w {
                result[[row, col]] = convolve_at(data, kernel, row, col);
            }
        }
    }

    result
}

#[inline]
fn convolve_at(data: &Array2<f32>, kernel: &Array2<f32>, row: usize, col: usize) -> f32 {
    let (h, w) = data.dim();
    let (kh, kw) = kernel.dim();
    let (ar, ac) = ((kh / 2) as isize, (kw / 2) as isize);
    let mut sum = 0.0f32;

    for ki in 0..kh {
        let src_row = row as isize - (ki as isize - ar);
        if src_row < 0 || src_row >= h as isize {
            continue;
        }
        for kj in 0..kw {
            let src_col = col as isize - (kj as isize - ac);
            if src_col < 0 || src_col >= w as isize {
                continue;
            }
            sum += data[[src_row as usize, src_col as usize]] * kernel[[ki, kj]];
        }
    }

    sum
}

/// FFT convolution with the kernel spectrum computed once.
pub struct FftConvolver {
    image_dim: (usize, usize),
    padded_dim: (usize, usize),
    kernel_fft: Array2<Complex<f64>>,
    fft_row: Arc<dyn Fft<f64>>,
    fft_col: Arc<dyn Fft<f64>>,
    ifft_row: Arc<dyn Fft<f64>>,
    ifft_col: Arc<dyn Fft<f64>>,
}

impl FftConvolver {
    pub fn new(kernel: &Array2<f32>, image_dim: (usize, usize)) -> Self {
        let (h, w) = image_dim;
        let (kh, kw) = kernel.dim();
        let (ph, pw) = (h + kh, w + kw);

        let mut planner = FftPlanner::new();
        let fft_row = planner.plan_fft_forward(pw);
        let fft_col = planner.plan_fft_forward(ph);
        let ifft_row = planner.plan_fft_inverse(pw);
        let ifft_col = planner.plan_fft_inverse(ph);

        // Kernel tap (i, j) sits at offset (i - ar, j - ac), wrapped into the padded grid.
        let (ar, ac) = (kh / 2, kw / 2);
        let mut wrapped = Array2::<Complex<f64>>::zeros((ph, pw));
        for ki in 0..kh {
            let row = (ki + ph - ar) % ph;
            for kj in 0..kw {
                let col = (kj + pw - ac) % pw;
                wrapped[[row, col]] = Complex::new(kernel[[ki, kj]] as f64, 0.0);
            }
        }

        let mut convolver = Self {
            image_dim,
            padded_dim: (ph, pw),
            kernel_fft: Array2::zeros((0, 0)),
            fft_row,
            fft_col,
            ifft_row,
            ifft_col,
        };
        convolver.transform(&mut wrapped, false);
        convolver.kernel_fft = wrapped;
        convolver
    }

    pub fn apply(&self, data: &Array2<f32>) -> Array2<f32> {
        let (h, w) = self.image_dim;
        debug_assert_eq!(data.dim(), (h, w));

        let mut work = Array2::<Complex<f64>>::zeros(self.padded_dim);
        for ((row, col), &v) in data.indexed_iter() {
            work[[row, col]] = Complex::new(v as f64, 0.0);
        }

        self.transform(&mut work, false);
        work.zip_mut_with(&self.kernel_fft, |a, &b| *a *= b);
        self.transform(&mut work, true);

        let (ph, pw) = self.padded_dim;
        let scale = 1.0 / (ph * pw) as f64;
        Array2::from_shape_fn((h, w), |(row, col)| (work[[row, col]].re * scale) as f32)
    }

    /// In-place 2D transform: rows then columns. Unnormalized in both directions.
    fn transform(&self, work: &mut Array2<Complex<f64>>, inverse: bool) {
        let (row_fft, col_fft) = if inverse {
            (&self.ifft_row, &self.ifft_col)
        } else {
            (&self.fft_row, &self.fft_col)
        };

        work.axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut lane| {
                let mut buf: Vec<Complex<f64>> = lane.to_vec();
                row_fft.process(&mut buf);
                for (dst, src) in lane.iter_mut().zip(buf) {
                    *dst = src;
                }
            });

        work.axis_iter_mut(Axis(1))
            .into_par_iter()
            .for_each(|mut lane| {
                let mut buf: Vec<Complex<f64>> = lane.to_vec();
                col_fft.process(&mut buf);
                for (dst, src) in lane.iter_mut().zip(buf) {
                    *dst = src;
                }
            });
    }
}
