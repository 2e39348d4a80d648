pub mod accumulate;
pub mod convolve;
pub mod corona;
pub mod deconvolution;

use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

pub use accumulate::ImageAccumulator;
pub use corona::CoronaSubtractor;
pub use deconvolution::{richardson_lucy, richardson_lucy_with_progress, Deconvolver};

/// Run `f(row_index, row)` over every row, row-parallel above
/// `PARALLEL_PIXEL_THRESHOLD` pixels.
pub(crate) fn for_each_row<F>(data: &mut Array2<f32>, f: F)
where
    F: Fn(usize, ArrayViewMut1<f32>) + Send + Sync,
{
    if data.len() >= PARALLEL_PIXEL_THRESHOLD {
        data.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, lane)| f(row, lane));
    } else {
        for (row, lane) in data.axis_iter_mut(Axis(0)).enumerate() {
            f(row, lane);
        }
    }
}
