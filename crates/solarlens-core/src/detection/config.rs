use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANNULUS_INNER, DEFAULT_ANNULUS_OUTER, DEFAULT_APERTURE_HALF_WIDTH,
    DEFAULT_EDGE_MARGIN,
};
use crate::error::{Result, SolarLensError};

/// Geometry of the point-source search and photometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Pixels excluded from each edge during the peak scan.
    #[serde(default = "default_edge_margin")]
    pub edge_margin: usize,
    /// Half-width of the square signal aperture.
    #[serde(default = "default_aperture_half_width")]
    pub aperture_half_width: usize,
    /// Inner half-width of the noise annulus (exclusive).
    #[serde(default = "default_annulus_inner")]
    pub annulus_inner: usize,
    /// Outer half-width of the noise annulus (inclusive).
    #[serde(default = "default_annulus_outer")]
    pub annulus_outer: usize,
}

fn default_edge_margin() -> usize {
    DEFAULT_EDGE_MARGIN
}
fn default_aperture_half_width() -> usize {
    DEFAULT_APERTURE_HALF_WIDTH
}
fn default_annulus_inner() -> usize {
    DEFAULT_ANNULUS_INNER
}
fn default_annulus_outer() -> usize {
    DEFAULT_ANNULUS_OUTER
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            edge_margin: DEFAULT_EDGE_MARGIN,
            aperture_half_width: DEFAULT_APERTURE_HALF_WIDTH,
            annulus_inner: DEFAULT_ANNULUS_INNER,
            annulus_outer: DEFAULT_ANNULUS_OUTER,
        }
    }
}

impl DetectionConfig {
    /// Number of pixels in the noise annulus.
    pub fn annulus_pixel_count(&self) -> usize {
        let outer = 2 * self.annulus_outer + 1;
        let inner = 2 * self.annulus_inner + 1;
        outer * outer - inner * inner
    }

    /// Check the geometry against an image of edge `image_size`.
    pub fn validate(&self, image_size: usize) -> Result<()> {
        if self.annulus_inner < self.aperture_half_width {
            return Err(SolarLensError::InvalidConfig(format!(
                "annulus_inner ({}) must be at least aperture_half_width ({})",
                self.annulus_inner, self.aperture_half_width
            )));
        }
        if self.annulus_outer <= self.annulus_inner {
            return Err(SolarLensError::InvalidConfig(format!(
                "annulus_outer ({}) must exceed annulus_inner ({})",
                self.annulus_outer, self.annulus_inner
            )));
        }
        if self.edge_margin < self.annulus_outer {
            return Err(SolarLensError::InvalidConfig(format!(
                "edge_margin ({}) must be at least annulus_outer ({})",
                self.edge_margin, self.annulus_outer
            )));
        }
        if image_size <= 2 * self.edge_margin {
            return Err(SolarLensError::InvalidConfig(format!(
                "image_size ({image_size}) leaves no interior inside edge_margin ({})",
                self.edge_margin
            )));
        }
        Ok(())
    }
}
