use ndarray::{Array2, Zip};
use tracing::debug;

use crate::consts::{EPSILON, PARALLEL_PIXEL_THRESHOLD};
use crate::grid::ImageGrid;
use crate::lens::psf::flip_kernel;

use super::convolve::Convolver;

/// Richardson-Lucy restoration against a fixed blur kernel.
#[derive(Clone, Debug)]
pub struct Deconvolver {
    pub kernel: Array2<f32>,
    pub iterations: usize,
}

impl Deconvolver {
    pub fn new(kernel: Array2<f32>, iterations: usize) -> Self {
        Self { kernel, iterations }
    }

    pub fn restore(&self, image: &ImageGrid) -> ImageGrid {
        richardson_lucy(image, &self.kernel, self.iterations)
    }

    pub fn restore_with_progress<F>(&self, image: &ImageGrid, on_iteration: F) -> ImageGrid
    where
        F: FnMut(usize),
    {
        richardson_lucy_with_progress(image, &self.kernel, self.iterations, on_iteration)
    }
}

pub fn richardson_lucy(image: &ImageGrid, kernel: &Array2<f32>, iterations: usize) -> ImageGrid {
    richardson_lucy_with_progress(image, kernel, iterations, |_| {})
}

/// Richardson-Lucy deconvolution, calling `on_iteration(done)` after each round.
///
/// Zero iterations returns the input unchanged. Otherwise negative samples in
/// the observation are treated as zero flux, and the estimate stays
/// non-negative throughout.
pub fn richardson_lucy_with_progress<F>(
    image: &ImageGrid,
    kernel: &Array2<f32>,
    iterations: usize,
    mut on_iteration: F,
) -> ImageGrid
where
    F: FnMut(usize),
{
    if iterations == 0 {
        return image.clone();
    }

    let dim = image.data.dim();
    let forward = Convolver::new(kernel, dim);
    let backward = Convolver::new(&flip_kernel(kernel), dim);
    debug!(
        kernel = ?kernel.dim(),
        fft = matches!(forward, Convolver::Fft(_)),
        iterations,
        "Richardson-Lucy"
    );

    let observed = image.data.mapv(|v| v.max(0.0));
    let mut estimate = observed.clone();
    let parallel = observed.len() >= PARALLEL_PIXEL_THRESHOLD;

    for iter in 0..iterations {
        // Forward model: predicted = estimate * K
        let predicted = forward.apply(&estimate);

        // ratio = observed / (predicted + epsilon)
        let ratio_zip = Zip::from(&observed).and(&predicted);
        let ratio_fn = |&o: &f32, &p: &f32| o / (p.max(0.0) + EPSILON);
        let ratio = if parallel {
            ratio_zip.par_map_collect(ratio_fn)
        } else {
            ratio_zip.map_collect(ratio_fn)
        };

        // correction = ratio * K_flipped
        let correction = backward.apply(&ratio);

        // Multiplicative update
        let update = Zip::from(&mut estimate).and(&correction);
        let update_fn = |e: &mut f32, &c: &f32| *e = (*e * c).max(0.0);
        if parallel {
            update.par_for_each(update_fn);
        } else {
            update.for_each(update_fn);
        }

        on_iteration(iter + 1);
    }

    ImageGrid::new(estimate)
}
