//! Physical parameters of a detected planet from its photometry and spectrum.

use std::f64::consts::PI;

use crate::consts::{
    ASSUMED_ALBEDO, ASSUMED_DISTANCE_LY, AU, C, DEFAULT_STELLAR_LUMINOSITY, EPSILON_F64, G,
    HZ_INNER_COEFF, HZ_OUTER_COEFF, LY, L_SUN, M_SUN, R_EARTH, STEFAN_BOLTZMANN,
    WIEN_DISPLACEMENT,
};
use crate::grid::Spectrum;

#[derive(Clone, Copy, Debug)]
pub struct ParameterEstimator {
    /// Host-star luminosity in solar units.
    pub stellar_luminosity: f64,
}

impl Default for ParameterEstimator {
    fn default() -> Self {
        Self {
            stellar_luminosity: DEFAULT_STELLAR_LUMINOSITY,
        }
    }
}

impl ParameterEstimator {
    pub fn new(stellar_luminosity: f64) -> Self {
        Self { stellar_luminosity }
    }

    /// Planet radius (Earth radii) from received flux.
    ///
    /// Inverts `flux = (R_p / d)^2 * albedo * L_star / (4 pi a^2)` for a
    /// Sun-like star, albedo 0.3 and a target 10 ly away.
    pub fn radius_from_flux(&self, flux: f64) -> f64 {
        let distance = ASSUMED_DISTANCE_LY * LY;
        let radius_m =
            (flux.max(0.0) * 4.0 * PI * distance * distance / (ASSUMED_ALBEDO * L_SUN)).sqrt();
        radius_m / R_EARTH
    }

    /// Blackbody temperature (K) from the spectrum peak via Wien's law.
    pub fn temperature(&self, spectrum: &Spectrum) -> f64 {
        let wavelength_m = spectrum.bin_to_wavelength_nm(spectrum.peak_bin()) * 1e-9;
        WIEN_DISPLACEMENT / wavelength_m
    }

    /// Bond albedo from the ratio of emitted to incident power at 1 AU.
    ///
    /// `_flux` is not used by this model.
    pub fn albedo(&self, _flux: f64, temperature: f64) -> f64 {
        let emitted = STEFAN_BOLTZMANN * temperature.powi(4);
        let incident = L_SUN / (4.0 * PI * AU * AU);
        1.0 - emitted / incident
    }

    /// Orbital radius (AU) of a circular, edge-on orbit from a Doppler shift
    /// given as a fraction of c. `v = sqrt(GM / r)`.
    pub fn orbit_from_doppler(&self, doppler_shift: f64) -> f64 {
        let velocity = doppler_shift * C;
        let radius_m = G * M_SUN / (velocity * velocity + EPSILON_F64);
        radius_m / AU
    }

    /// Habitable zone edges (AU) for the configured luminosity.
    pub fn habitable_zone(&self) -> (f64, f64) {
        let scale = self.stellar_luminosity.sqrt();
        (HZ_INNER_COEFF * scale, HZ_OUTER_COEFF * scale)
    }

    /// Strictly inside the habitable zone.
    pub fn in_habitable_zone(&self, orbital_radius_au: f64) -> bool {
        let (inner, outer) = self.habitable_zone();
        orbital_radius_au > inner && orbital_radius_au < outer
    }
}
