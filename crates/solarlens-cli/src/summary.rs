use console::Style;
use solarlens_core::pipeline::config::PipelineConfig;
use solarlens_core::planet::{Gas, PlanetData};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    alert: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            alert: Style::new().magenta().bold(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

pub fn print_run_summary(config: &PipelineConfig, seed: u64) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("SolarLens Pipeline"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(18)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Sensor"),
        s.value
            .apply_to(format!("{0}x{0}", config.image_size))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Seed"),
        s.value.apply_to(seed)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dark current"),
        s.value
            .apply_to(format!("{} e-/px/s", config.accumulation.dark_current))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Corona scale"),
        s.value.apply_to(format!(
            "{} px/R_sun",
            config.corona.pixels_per_solar_radius
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Restoration"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Kernel"),
        s.method.apply_to(&config.restoration.kernel)
    );
    if config.restoration.iterations == 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Iterations"),
            s.disabled.apply_to("disabled")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Iterations"),
            s.value.apply_to(config.restoration.iterations)
        );
    }
    println!();
}

pub fn print_planet_summary(planet: &PlanetData) {
    let s = Styles::new();

    println!();
    if !planet.detected {
        println!(
            "  {}",
            s.disabled.apply_to("No point source above 5 sigma")
        );
        println!();
        return;
    }

    println!("  {}", s.alert.apply_to("*** EXOPLANET DETECTED ***"));
    println!();
    println!(
        "    {:<16}{}",
        s.label.apply_to("Radius"),
        s.value.apply_to(format!("{:.2} R_earth", planet.radius_earth))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Temperature"),
        s.value.apply_to(format!("{:.0} K", planet.temperature_kelvin))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Orbital radius"),
        s.value.apply_to(format!("{:.2} AU", planet.orbital_radius_au))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Habitable zone"),
        if planet.in_habitable_zone {
            s.method.apply_to("YES")
        } else {
            s.disabled.apply_to("NO")
        }
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Albedo"),
        s.value.apply_to(format!("{:.2}", planet.albedo))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Confidence"),
        s.value.apply_to(format!("{:.0}%", planet.confidence * 100.0))
    );
    println!();

    println!("  {}", s.header.apply_to("Atmosphere"));
    let atm = &planet.atmosphere;
    for gas in [
        Gas::Oxygen,
        Gas::Methane,
        Gas::Water,
        Gas::CarbonDioxide,
        Gas::Nitrogen,
    ] {
        println!(
            "    {:<16}{}",
            s.label.apply_to(gas.formula()),
            s.value.apply_to(format!("{:.3}%", atm.fraction(gas)))
        );
    }
    println!(
        "    {:<16}{}",
        s.label.apply_to("Biosignature"),
        s.alert.apply_to(format!(
            "{:.1} ({})",
            atm.biosignature_score(),
            atm.biosignature
        ))
    );
    println!();
}
