use tracing::debug;

use crate::consts::{
    CONTINUUM_OFFSET_BINS, EPSILON, METHANE_PRESENT_PERCENT, OXYGEN_PRESENT_PERCENT,
    WATER_PRESENT_PERCENT,
};
use crate::grid::Spectrum;
use crate::planet::{Atmosphere, Biosignature, Gas};

/// Absorption lines probed, as (wavelength nm, gas).
pub const ABSORPTION_LINES: [(f64, Gas); 5] = [
    (760.0, Gas::Oxygen),        // O2 A-band
    (1640.0, Gas::Methane),
    (940.0, Gas::Water),
    (2013.0, Gas::CarbonDioxide),
    (2300.0, Gas::Nitrogen),
];

/// Line-depth spectroscopy over a fixed table of molecular bands.
#[derive(Clone, Copy, Debug, Default)]
pub struct AtmosphereAnalyzer;

impl AtmosphereAnalyzer {
    pub fn analyze(&self, spectrum: &Spectrum) -> Atmosphere {
        let mut atm = Atmosphere::default();

        for &(wavelength_nm, gas) in &ABSORPTION_LINES {
            if let Some(depth) = line_depth_percent(spectrum, wavelength_nm) {
                *atm.fraction_mut(gas) = depth;
            }
        }

        atm.biosignature = classify_biosignature(&atm);
        debug!(
            o2 = atm.oxygen,
            ch4 = atm.methane,
            h2o = atm.water,
            co2 = atm.co2,
            n2 = atm.nitrogen,
            biosignature = %atm.biosignature,
            "Atmosphere analyzed"
        );
        atm
    }
}

/// Absorption depth (percent) at `wavelength_nm` relative to the continuum
/// averaged `CONTINUUM_OFFSET_BINS` bins either side.
///
/// `None` when the line or its continuum bins fall outside the spectrum.
pub fn line_depth_percent(spectrum: &Spectrum, wavelength_nm: f64) -> Option<f32> {
    let bin = spectrum.wavelength_to_bin(wavelength_nm)?;
    let lo = bin.checked_sub(CONTINUUM_OFFSET_BINS)?;
    let hi = spectrum.get(bin + CONTINUUM_OFFSET_BINS)?;

    let bins = spectrum.as_slice();
    let continuum = (bins[lo] + hi) / 2.0;
    let depth = (continuum - bins[bin]) / (continuum + EPSILON);
    Some(depth * 100.0)
}

/// Decision table, first match wins:
/// O2 + CH4 -> strong, O2 + H2O -> moderate, H2O -> weak, else none.
pub fn classify_biosignature(atm: &Atmosphere) -> Biosignature {
    let oxygen = atm.oxygen > OXYGEN_PRESENT_PERCENT;
    let methane = atm.methane > METHANE_PRESENT_PERCENT;
    let water = atm.water > WATER_PRESENT_PERCENT;

    if oxygen && methane {
        Biosignature::Strong
    } else if oxygen && water {
        Biosignature::Moderate
    } else if water {
        Biosignature::Weak
    } else {
        Biosignature::None
    }
}
