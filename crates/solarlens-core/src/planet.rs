use std::fmt;

use serde::{Deserialize, Serialize};

/// Molecule probed by one absorption line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gas {
    Oxygen,
    Methane,
    Water,
    CarbonDioxide,
    Nitrogen,
}

impl Gas {
    pub fn formula(self) -> &'static str {
        match self {
            Self::Oxygen => "O2",
            Self::Methane => "CH4",
            Self::Water => "H2O",
            Self::CarbonDioxide => "CO2",
            Self::Nitrogen => "N2",
        }
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}

/// Categorical biosignature level from co-occurring gases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biosignature {
    #[default]
    None,
    /// Water only.
    Weak,
    /// Oxygen with water.
    Moderate,
    /// Oxygen with methane (chemical disequilibrium).
    Strong,
}

impl Biosignature {
    pub fn score(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Weak => 0.3,
            Self::Moderate => 0.6,
            Self::Strong => 0.9,
        }
    }
}

impl fmt::Display for Biosignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Weak => write!(f, "weak"),
            Self::Moderate => write!(f, "moderate"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Absorption depths (percent) per gas plus the derived biosignature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub oxygen: f32,
    pub methane: f32,
    pub water: f32,
    pub co2: f32,
    pub nitrogen: f32,
    pub biosignature: Biosignature,
}

impl Atmosphere {
    pub fn fraction(&self, gas: Gas) -> f32 {
        match gas {
            Gas::Oxygen => self.oxygen,
            Gas::Methane => self.methane,
            Gas::Water => self.water,
            Gas::CarbonDioxide => self.co2,
            Gas::Nitrogen => self.nitrogen,
        }
    }

    pub fn fraction_mut(&mut self, gas: Gas) -> &mut f32 {
        match gas {
            Gas::Oxygen => &mut self.oxygen,
            Gas::Methane => &mut self.methane,
            Gas::Water => &mut self.water,
            Gas::CarbonDioxide => &mut self.co2,
            Gas::Nitrogen => &mut self.nitrogen,
        }
    }

    /// One of 0.0, 0.3, 0.6, 0.9.
    pub fn biosignature_score(&self) -> f32 {
        self.biosignature.score()
    }
}

/// Terminal output of one pipeline run.
///
/// When `detected` is false every other field keeps its default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetData {
    pub detected: bool,
    pub radius_earth: f64,
    pub orbital_radius_au: f64,
    pub temperature_kelvin: f64,
    /// Bond albedo in [0, 1].
    pub albedo: f64,
    pub in_habitable_zone: bool,
    /// Detection confidence in [0, 1].
    pub confidence: f64,
    pub atmosphere: Atmosphere,
}

impl fmt::Display for PlanetData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.detected {
            return writeln!(f, "No exoplanet detected");
        }
        writeln!(f, "*** EXOPLANET DETECTED ***")?;
        writeln!(f, "Radius: {:.2} Earth radii", self.radius_earth)?;
        writeln!(f, "Temperature: {:.0} K", self.temperature_kelvin)?;
        writeln!(f, "Orbital Radius: {:.2} AU", self.orbital_radius_au)?;
        writeln!(
            f,
            "Habitable Zone: {}",
            if self.in_habitable_zone { "YES" } else { "NO" }
        )?;
        writeln!(f, "Albedo: {:.2}", self.albedo)?;
        writeln!(f, "Confidence: {:.0}%", self.confidence * 100.0)?;
        writeln!(f, "Atmosphere:")?;
        let atm = &self.atmosphere;
        for gas in [
            Gas::Oxygen,
            Gas::Methane,
            Gas::Water,
            Gas::CarbonDioxide,
            Gas::Nitrogen,
        ] {
            writeln!(f, "  {:<4} {:.3}%", gas.formula(), atm.fraction(gas))?;
        }
        writeln!(
            f,
            "Biosignature score: {:.1} ({})",
            atm.biosignature_score(),
            atm.biosignature
        )
    }
}
