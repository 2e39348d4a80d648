use anyhow::Result;
use clap::Args;
use solarlens_core::consts::FOCAL_OPTIMAL_AU;
use solarlens_core::lens::LensPhysics;

#[derive(Args)]
pub struct LensArgs {
    /// Observation wavelength in nm
    #[arg(long, default_value = "550")]
    pub wavelength: f64,

    /// Source distance in light years
    #[arg(long, default_value = "4.37")]
    pub distance: f64,

    /// Observer distance from the Sun in AU
    #[arg(long, default_value_t = FOCAL_OPTIMAL_AU)]
    pub observer: f64,

    /// Impact parameter in km
    #[arg(long, default_value = "5000")]
    pub impact: f64,

    /// Angular distance from the solar center, in solar radii, for the corona model
    #[arg(long, default_value = "2")]
    pub corona_radius: f64,
}

pub fn run(args: &LensArgs) -> Result<()> {
    let physics = LensPhysics::new();
    let psf = physics.psf(args.wavelength, args.observer);

    println!("Solar Gravitational Lens");
    println!(
        "  Schwarzschild radius:  {:.1} m",
        physics.schwarzschild_radius_m()
    );
    println!(
        "  Focal distance:        {:.1} AU at {} nm",
        physics.focal_distance_au(args.wavelength),
        args.wavelength
    );
    println!(
        "  Magnification:         {:.2e} ({} ly source, {} AU, {} km off axis)",
        physics.magnification(args.distance, args.observer, args.impact),
        args.distance,
        args.observer,
        args.impact
    );
    println!("  PSF FWHM:              {:.3e} mas", psf.fwhm_mas);
    println!(
        "  Corona brightness:     {:.3e} at {} R_sun",
        physics.corona_brightness(args.corona_radius, args.wavelength),
        args.corona_radius
    );

    Ok(())
}
