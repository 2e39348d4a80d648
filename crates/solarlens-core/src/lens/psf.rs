use ndarray::Array2;

/// Point spread function of the lens: normalized weights on a square grid,
/// centered at `(size / 2, size / 2)`, plus the angular FWHM.
#[derive(Clone, Debug)]
pub struct PsfKernel {
    pub kernel: Array2<f32>,
    /// Full width at half maximum in milliarcseconds.
    pub fwhm_mas: f64,
}

impl PsfKernel {
    pub fn size(&self) -> usize {
        self.kernel.nrows()
    }
}

/// Centered 2D Gaussian of standard deviation `sigma` pixels, normalized to sum=1.
pub fn gaussian_kernel(size: usize, sigma: f64) -> Array2<f32> {
    let mut kernel = Array2::<f32>::zeros((size, size));
    let center = size as f64 / 2.0;
    let sigma2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f64;

    for row in 0..size {
        let y = row as f64 - center;
        for col in 0..size {
            let x = col as f64 - center;
            let val = (-(x * x + y * y) / sigma2).exp();
            kernel[[row, col]] = val as f32;
            sum += val;
        }
    }

    if sum > 0.0 {
        let inv = 1.0 / sum as f32;
        kernel.mapv_inplace(|v| v * inv);
    }

    kernel
}

/// Uniform box kernel of edge `2 * half_width + 1`, normalized to sum=1.
pub fn uniform_kernel(half_width: usize) -> Array2<f32> {
    let size = 2 * half_width + 1;
    let weight = 1.0 / (size * size) as f32;
    Array2::from_elem((size, size), weight)
}

/// Kernel mirrored through its anchor `(h / 2, w / 2)`, so that
/// `k'[a + d] = k[a - d]`. Taps that fall off the grid become zero.
pub fn flip_kernel(kernel: &Array2<f32>) -> Array2<f32> {
    let (h, w) = kernel.dim();
    let (ar, ac) = (h / 2, w / 2);
    Array2::from_shape_fn((h, w), |(row, col)| {
        match ((2 * ar).checked_sub(row), (2 * ac).checked_sub(col)) {
            (Some(r), Some(c)) if r < h && c < w => kernel[[r, c]],
            _ => 0.0,
        }
    })
}
