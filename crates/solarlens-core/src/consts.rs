// ---------------------------------------------------------------------------
// Physical constants (SI)
// ---------------------------------------------------------------------------

/// Gravitational constant (m^3 kg^-1 s^-2).
pub const G: f64 = 6.67430e-11;

/// Speed of light (m/s).
pub const C: f64 = 299_792_458.0;

/// Solar mass (kg).
pub const M_SUN: f64 = 1.98847e30;

/// Solar radius (m).
pub const R_SUN: f64 = 6.95700e8;

/// Solar luminosity (W).
pub const L_SUN: f64 = 3.828e26;

/// Astronomical unit (m).
pub const AU: f64 = 1.495978707e11;

/// Light year (m).
pub const LY: f64 = 9.4607304725808e15;

/// Earth radius (m).
pub const R_EARTH: f64 = 6.371e6;

/// Stefan-Boltzmann constant (W m^-2 K^-4).
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Wien displacement constant (m K).
pub const WIEN_DISPLACEMENT: f64 = 2.897e-3;

/// Planck constant (J s).
pub const PLANCK: f64 = 6.62607015e-34;

/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Radians to milliarcseconds.
pub const RAD_TO_MAS: f64 = 206_265_000.0;

// ---------------------------------------------------------------------------
// Mission geometry
// ---------------------------------------------------------------------------

/// Minimum useful focal distance of the solar gravitational lens (AU).
pub const FOCAL_MIN_AU: f64 = 547.8;

/// Optimal observer distance for visible light (AU).
pub const FOCAL_OPTIMAL_AU: f64 = 650.0;

/// Maximum useful focal distance (AU).
pub const FOCAL_MAX_AU: f64 = 900.0;

// ---------------------------------------------------------------------------
// Lens model
// ---------------------------------------------------------------------------

/// Coronal electron density assumed for plasma dispersion (cm^-3).
pub const CORONA_ELECTRON_DENSITY: f64 = 1e8;

/// Plasma frequency coefficient: f_p = 8.98e3 * sqrt(n_e) Hz.
pub const PLASMA_FREQUENCY_COEFF: f64 = 8.98e3;

/// Normalized impact parameter below which the point-lens formula is singular.
pub const ALIGNMENT_EPSILON: f64 = 1e-6;

/// Magnification returned for near-perfect alignment.
pub const MAX_MAGNIFICATION: f64 = 1e12;

/// Corona scattering loss applied to every lensed magnification.
pub const CORONA_ATTENUATION_EXPONENT: f64 = -0.1 / 500.0;

/// Brightness returned inside the solar disk (saturated).
pub const CORONA_DISK_BRIGHTNESS: f64 = 1e10;

/// K-corona (Thomson scattering) amplitude and radial power-law exponent.
pub const K_CORONA_AMPLITUDE: f64 = 1e6;
pub const K_CORONA_EXPONENT: f64 = -2.5;

/// F-corona (zodiacal dust) amplitude and radial power-law exponent.
pub const F_CORONA_AMPLITUDE: f64 = 1e5;
pub const F_CORONA_EXPONENT: f64 = -2.2;

/// Wavelength power law of the corona, normalized at 550 nm.
pub const CORONA_WAVELENGTH_EXPONENT: f64 = -1.2;
pub const CORONA_REFERENCE_WAVELENGTH_NM: f64 = 550.0;

/// Edge length of the lens PSF kernel grid.
pub const PSF_KERNEL_SIZE: usize = 256;

/// Rayleigh criterion coefficient.
pub const RAYLEIGH_COEFF: f64 = 1.22;

// ---------------------------------------------------------------------------
// Pipeline defaults
// ---------------------------------------------------------------------------

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Edge length N of the sensor grid.
pub const DEFAULT_IMAGE_SIZE: usize = 1024;

/// Number of spectrum bins M.
pub const SPECTRUM_BINS: usize = 2048;

/// Spectrum wavelength coverage (nm).
pub const SPECTRUM_MIN_NM: f64 = 400.0;
pub const SPECTRUM_MAX_NM: f64 = 2400.0;

/// Detector dark current (e-/pixel/s).
pub const DEFAULT_DARK_CURRENT: f64 = 0.01;

/// Corona model pixel scale (pixels per solar radius).
pub const DEFAULT_PIXELS_PER_SOLAR_RADIUS: f64 = 100.0;

/// Richardson-Lucy iteration count.
pub const DEFAULT_RL_ITERATIONS: usize = 50;

/// Half-width of the fixed uniform restoration kernel (5x5).
pub const DEFAULT_UNIFORM_KERNEL_HALF_WIDTH: usize = 2;

/// Kernels with an edge up to this size are convolved directly; larger ones via FFT.
pub const DIRECT_CONVOLUTION_MAX_KERNEL: usize = 15;

/// Small epsilon to avoid division by zero in f32 image arithmetic.
pub const EPSILON: f32 = 1e-10;

/// Small epsilon to avoid division by zero in f64 estimation arithmetic.
pub const EPSILON_F64: f64 = 1e-10;

/// Pixels excluded from each edge during the peak scan.
pub const DEFAULT_EDGE_MARGIN: usize = 10;

/// Signal aperture half-width (5x5 box).
pub const DEFAULT_APERTURE_HALF_WIDTH: usize = 2;

/// Noise annulus inner and outer half-widths.
pub const DEFAULT_ANNULUS_INNER: usize = 5;
pub const DEFAULT_ANNULUS_OUTER: usize = 10;

/// Detection significance threshold (5 sigma).
pub const DETECTION_SNR_THRESHOLD: f64 = 5.0;

/// SNR at which confidence reaches 1.0.
pub const FULL_CONFIDENCE_SNR: f64 = 10.0;

// ---------------------------------------------------------------------------
// Estimation assumptions
// ---------------------------------------------------------------------------

/// Bond albedo assumed when inverting flux to radius.
pub const ASSUMED_ALBEDO: f64 = 0.3;

/// Distance assumed when inverting flux to radius (light years).
pub const ASSUMED_DISTANCE_LY: f64 = 10.0;

/// Habitable zone inner and outer edges per sqrt(L / L_sun) (AU).
pub const HZ_INNER_COEFF: f64 = 0.95;
pub const HZ_OUTER_COEFF: f64 = 1.37;

/// Default host-star luminosity (solar units).
pub const DEFAULT_STELLAR_LUMINOSITY: f64 = 1.0;

// ---------------------------------------------------------------------------
// Atmosphere
// ---------------------------------------------------------------------------

/// Bins either side of a line used for the continuum estimate.
pub const CONTINUUM_OFFSET_BINS: usize = 10;

/// Presence thresholds (absorption depth, percent).
pub const OXYGEN_PRESENT_PERCENT: f32 = 1.0;
pub const METHANE_PRESENT_PERCENT: f32 = 0.01;
pub const WATER_PRESENT_PERCENT: f32 = 0.1;
