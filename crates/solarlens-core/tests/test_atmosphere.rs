use approx::assert_relative_eq;

use solarlens_core::analysis::atmosphere::{classify_biosignature, line_depth_percent};
use solarlens_core::analysis::AtmosphereAnalyzer;
use solarlens_core::grid::Spectrum;
use solarlens_core::planet::{Atmosphere, Biosignature, Gas};
use solarlens_core::synth::{flat_spectrum, synthesize_spectrum};

fn analyze(lines: &[(Gas, f32)]) -> Atmosphere {
    AtmosphereAnalyzer.analyze(&flat_spectrum(1.0, lines, 2048))
}

#[test]
fn test_oxygen_and_methane_is_strong() {
    let atm = analyze(&[(Gas::Oxygen, 2.0), (Gas::Methane, 0.5)]);
    assert_eq!(atm.biosignature, Biosignature::Strong);
    assert_relative_eq!(atm.biosignature_score(), 0.9);
}

#[test]
fn test_oxygen_and_water_is_moderate() {
    let atm = analyze(&[(Gas::Oxygen, 2.0), (Gas::Water, 0.5)]);
    assert_eq!(atm.biosignature, Biosignature::Moderate);
    assert_relative_eq!(atm.biosignature_score(), 0.6);
}

#[test]
fn test_water_alone_is_weak() {
    let atm = analyze(&[(Gas::Water, 0.5)]);
    assert_eq!(atm.biosignature, Biosignature::Weak);
    assert_relative_eq!(atm.biosignature_score(), 0.3);
}

#[test]
fn test_oxygen_alone_is_none() {
    let atm = analyze(&[(Gas::Oxygen, 5.0)]);
    assert_eq!(atm.biosignature, Biosignature::None);
    assert_eq!(atm.biosignature_score(), 0.0);
}

#[test]
fn test_all_three_gases_rank_strong_first() {
    let atm = analyze(&[(Gas::Oxygen, 2.0), (Gas::Methane, 0.5), (Gas::Water, 0.5)]);
    assert_eq!(atm.biosignature, Biosignature::Strong);
}

#[test]
fn test_line_depths_are_percentages() {
    let atm = analyze(&[
        (Gas::Oxygen, 2.0),
        (Gas::Methane, 0.5),
        (Gas::Water, 3.0),
        (Gas::CarbonDioxide, 10.0),
        (Gas::Nitrogen, 25.0),
    ]);
    assert_relative_eq!(atm.oxygen, 2.0, max_relative = 1e-4);
    assert_relative_eq!(atm.methane, 0.5, max_relative = 1e-3);
    assert_relative_eq!(atm.water, 3.0, max_relative = 1e-4);
    assert_relative_eq!(atm.co2, 10.0, max_relative = 1e-4);
    assert_relative_eq!(atm.nitrogen, 25.0, max_relative = 1e-4);
    assert_relative_eq!(atm.fraction(Gas::Nitrogen), atm.nitrogen);
}

#[test]
fn test_absorption_lands_on_expected_bins() {
    let spectrum = Spectrum::default();
    assert_eq!(spectrum.wavelength_to_bin(760.0), Some(368));
    assert_eq!(spectrum.wavelength_to_bin(2400.0), None);
    assert_eq!(spectrum.wavelength_to_bin(399.0), None);

    let dipped = flat_spectrum(2.0, &[(Gas::Oxygen, 50.0)], 2048);
    assert_eq!(dipped.get(368), Some(1.0));
    assert_eq!(dipped.get(367), Some(2.0));
}

#[test]
fn test_short_spectrum_skips_lines_without_continuum() {
    // 50 bins of 40 nm: the O2 line sits in bin 9 with no continuum 10 bins below.
    let spectrum = flat_spectrum(1.0, &[(Gas::Oxygen, 50.0), (Gas::Water, 5.0)], 50);
    assert_eq!(line_depth_percent(&spectrum, 760.0), None);
    assert_eq!(line_depth_percent(&spectrum, 2300.0), None);

    let atm = AtmosphereAnalyzer.analyze(&spectrum);
    assert_eq!(atm.oxygen, 0.0);
    assert_relative_eq!(atm.water, 5.0, max_relative = 1e-4);
    assert_eq!(atm.biosignature, Biosignature::Weak);
}

#[test]
fn test_zero_spectrum_gives_finite_zero_depths() {
    let atm = AtmosphereAnalyzer.analyze(&Spectrum::default());
    for gas in [
        Gas::Oxygen,
        Gas::Methane,
        Gas::Water,
        Gas::CarbonDioxide,
        Gas::Nitrogen,
    ] {
        assert!(atm.fraction(gas).is_finite());
        assert_eq!(atm.fraction(gas), 0.0);
    }
    assert_eq!(atm.biosignature, Biosignature::None);
}

#[test]
fn test_empty_spectrum_is_handled() {
    let atm = AtmosphereAnalyzer.analyze(&Spectrum::from_vec(Vec::new()));
    assert_eq!(atm, Atmosphere::default());
}

#[test]
fn test_blackbody_continuum_with_dips() {
    let spectrum = synthesize_spectrum(
        5000.0,
        &[(Gas::Oxygen, 2.0), (Gas::Methane, 0.5)],
        2048,
    );
    let atm = AtmosphereAnalyzer.analyze(&spectrum);
    assert!((atm.oxygen - 2.0).abs() < 0.2, "O2 = {}", atm.oxygen);
    assert!(atm.methane > 0.01);
    assert_eq!(atm.biosignature, Biosignature::Strong);
}

#[test]
fn test_presence_thresholds_are_strict() {
    let at_threshold = Atmosphere {
        oxygen: 1.0,
        methane: 0.01,
        water: 0.1,
        ..Default::default()
    };
    assert_eq!(classify_biosignature(&at_threshold), Biosignature::None);

    let above = Atmosphere {
        oxygen: 1.001,
        methane: 0.0101,
        ..Default::default()
    };
    assert_eq!(classify_biosignature(&above), Biosignature::Strong);

    let water_only = Atmosphere {
        water: 0.11,
        ..Default::default()
    };
    assert_eq!(classify_biosignature(&water_only), Biosignature::Weak);
}
