use ndarray::Zip;

use crate::consts::DEFAULT_DARK_CURRENT;
use crate::grid::{ImageGrid, RawFrame};

use super::for_each_row;

/// Turns raw photon counts into a flux estimate with a shot-noise term.
#[derive(Clone, Copy, Debug)]
pub struct ImageAccumulator {
    /// Dark current in e-/pixel/s.
    pub dark_current: f64,
}

impl Default for ImageAccumulator {
    fn default() -> Self {
        Self {
            dark_current: DEFAULT_DARK_CURRENT,
        }
    }
}

impl ImageAccumulator {
    pub fn new(dark_current: f64) -> Self {
        Self { dark_current }
    }

    /// Accumulate one frame into a freshly allocated grid.
    pub fn accumulate(&self, raw: &RawFrame, integration_time_s: u32) -> ImageGrid {
        let mut out = ImageGrid::zeros(raw.nrows());
        self.accumulate_into(raw, integration_time_s, &mut out);
        out
    }

    /// Accumulate one frame into `out`, which must match `raw` in shape.
    ///
    /// `signal = count * t`, `noise = sqrt(signal + dark * t)`, `out = signal + noise`.
    pub fn accumulate_into(&self, raw: &RawFrame, integration_time_s: u32, out: &mut ImageGrid) {
        debug_assert_eq!(raw.dim(), out.data.dim());
        let t = integration_time_s as f64;
        let dark = self.dark_current * t;

        for_each_row(&mut out.data, |row, lane| {
            Zip::from(lane)
                .and(raw.row(row))
                .for_each(|o, &count| {
                    let signal = count as f64 * t;
                    let noise = (signal + dark).sqrt();
                    *o = (signal + noise) as f32;
                });
        });
    }
}
