//! Solar gravitational lens model.
//!
//! Every method is a pure function of its arguments; the struct only caches
//! the two radii derived from the solar mass.

use crate::consts::{
    ALIGNMENT_EPSILON, AU, C, CORONA_ATTENUATION_EXPONENT, CORONA_DISK_BRIGHTNESS,
    CORONA_ELECTRON_DENSITY, CORONA_REFERENCE_WAVELENGTH_NM, CORONA_WAVELENGTH_EXPONENT,
    F_CORONA_AMPLITUDE, F_CORONA_EXPONENT, G, K_CORONA_AMPLITUDE, K_CORONA_EXPONENT, LY,
    MAX_MAGNIFICATION, M_SUN, PLASMA_FREQUENCY_COEFF, PSF_KERNEL_SIZE, RAD_TO_MAS,
    RAYLEIGH_COEFF, R_SUN,
};

use super::psf::{gaussian_kernel, PsfKernel};

#[derive(Clone, Debug)]
pub struct LensPhysics {
    schwarzschild_radius: f64,
    einstein_radius_1au: f64,
}

impl Default for LensPhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl LensPhysics {
    pub fn new() -> Self {
        let rs_factor = 2.0 * G * M_SUN / (C * C);
        Self {
            schwarzschild_radius: rs_factor,
            einstein_radius_1au: (2.0 * rs_factor * AU).sqrt(),
        }
    }

    /// Schwarzschild radius of the Sun (m).
    pub fn schwarzschild_radius_m(&self) -> f64 {
        self.schwarzschild_radius
    }

    /// Einstein radius for an observer 1 AU behind the lens (m).
    pub fn einstein_radius_at_1au_m(&self) -> f64 {
        self.einstein_radius_1au
    }

    /// Focal distance (AU) at `wavelength_nm`.
    ///
    /// The achromatic focal length `R_sun^2 / (4 r_s)` is scaled by
    /// `sqrt(1 - (f_p / f)^2)`, the plasma dispersion of the corona.
    pub fn focal_distance_au(&self, wavelength_nm: f64) -> f64 {
        let wavelength_m = wavelength_nm * 1e-9;
        let f_base = R_SUN * R_SUN / (4.0 * self.schwarzschild_radius);

        let plasma_freq = PLASMA_FREQUENCY_COEFF * CORONA_ELECTRON_DENSITY.sqrt();
        let light_freq = C / wavelength_m;
        let dispersion = (1.0 - (plasma_freq * plasma_freq) / (light_freq * light_freq)).max(0.0);

        f_base * dispersion.sqrt() / AU
    }

    /// Point-lens magnification for a source `source_distance_ly` away seen
    /// from `observer_distance_au` behind the Sun at `impact_parameter_km`
    /// off axis.
    pub fn magnification(
        &self,
        source_distance_ly: f64,
        observer_distance_au: f64,
        impact_parameter_km: f64,
    ) -> f64 {
        let d_s = source_distance_ly * LY;
        let d_l = observer_distance_au * AU;

        // Source in front of the lens: nothing to focus.
        if d_s <= d_l || d_l <= 0.0 {
            return 1.0;
        }

        let theta_e = (2.0 * self.schwarzschild_radius * (d_s - d_l) / (d_l * d_s)).sqrt();
        let r_e = theta_e * d_l;
        let u = impact_parameter_km.abs() * 1000.0 / r_e;

        if u < ALIGNMENT_EPSILON {
            return MAX_MAGNIFICATION;
        }

        let mu = (u * u + 2.0) / (u * (u * u + 4.0).sqrt());
        mu * CORONA_ATTENUATION_EXPONENT.exp()
    }

    /// Diffraction-limited PSF at `wavelength_nm` for an observer
    /// `observer_distance_au` from the Sun.
    pub fn psf(&self, wavelength_nm: f64, observer_distance_au: f64) -> PsfKernel {
        let lambda = wavelength_nm * 1e-9;
        let baseline = observer_distance_au * AU;
        let theta = RAYLEIGH_COEFF * lambda / baseline;

        let sigma = PSF_KERNEL_SIZE as f64 / 6.0;
        PsfKernel {
            kernel: gaussian_kernel(PSF_KERNEL_SIZE, sigma),
            fwhm_mas: theta * RAD_TO_MAS,
        }
    }

    /// Corona surface brightness at `angular_distance_solar_radii` from disk
    /// center. K-corona plus F-corona power laws, scaled by wavelength.
    pub fn corona_brightness(&self, angular_distance_solar_radii: f64, wavelength_nm: f64) -> f64 {
        let r = angular_distance_solar_radii;
        if r < 1.0 {
            return CORONA_DISK_BRIGHTNESS;
        }

        let k_corona = K_CORONA_AMPLITUDE * r.powf(K_CORONA_EXPONENT);
        let f_corona = F_CORONA_AMPLITUDE * r.powf(F_CORONA_EXPONENT);
        let lambda_factor =
            (wavelength_nm / CORONA_REFERENCE_WAVELENGTH_NM).powf(CORONA_WAVELENGTH_EXPONENT);

        (k_corona + f_corona) * lambda_factor
    }
}
