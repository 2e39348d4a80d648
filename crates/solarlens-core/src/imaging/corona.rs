use crate::consts::{CORONA_REFERENCE_WAVELENGTH_NM, DEFAULT_PIXELS_PER_SOLAR_RADIUS};
use crate::grid::ImageGrid;
use crate::lens::LensPhysics;

use super::for_each_row;

/// Removes the modeled solar corona from an accumulated image.
///
/// The Sun sits at the image center; pixel distance is converted to solar
/// radii with a fixed plate scale.
#[derive(Clone, Copy, Debug)]
pub struct CoronaSubtractor<'a> {
    physics: &'a LensPhysics,
    pub pixels_per_solar_radius: f64,
    pub wavelength_nm: f64,
}

impl<'a> CoronaSubtractor<'a> {
    pub fn new(physics: &'a LensPhysics) -> Self {
        Self {
            physics,
            pixels_per_solar_radius: DEFAULT_PIXELS_PER_SOLAR_RADIUS,
            wavelength_nm: CORONA_REFERENCE_WAVELENGTH_NM,
        }
    }

    pub fn with_scale(mut self, pixels_per_solar_radius: f64) -> Self {
        self.pixels_per_solar_radius = pixels_per_solar_radius;
        self
    }

    pub fn with_wavelength(mut self, wavelength_nm: f64) -> Self {
        self.wavelength_nm = wavelength_nm;
        self
    }

    /// Subtract the corona model from `raw` into a new grid.
    pub fn subtract(&self, raw: &ImageGrid, target_distance_ly: f64) -> ImageGrid {
        let mut out = ImageGrid::zeros(raw.size());
        self.subtract_into(raw, target_distance_ly, &mut out);
        out
    }

    /// Subtract the corona model from `raw` into `out`.
    ///
    /// `target_distance_ly` is reserved for a distance-dependent corona model
    /// and does not affect the result.
    pub fn subtract_into(&self, raw: &ImageGrid, _target_distance_ly: f64, out: &mut ImageGrid) {
        debug_assert_eq!(raw.data.dim(), out.data.dim());
        let (h, w) = raw.data.dim();
        let cy = h as f64 / 2.0;
        let cx = w as f64 / 2.0;
        let scale = self.pixels_per_solar_radius;

        for_each_row(&mut out.data, |row, mut lane| {
            let dy = row as f64 - cy;
            for (col, o) in lane.iter_mut().enumerate() {
                let dx = col as f64 - cx;
                let r_solar = (dx * dx + dy * dy).sqrt() / scale;
                let corona = self.physics.corona_brightness(r_solar, self.wavelength_nm);
                *o = (raw.data[[row, col]] as f64 - corona) as f32;
            }
        });
    }
}
