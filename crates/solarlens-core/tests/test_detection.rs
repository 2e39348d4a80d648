#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use ndarray::Array2;

use solarlens_core::detection::point_source::{annulus_rms, aperture_sum, find_peak};
use solarlens_core::detection::{DetectionConfig, PointSourceDetector};
use solarlens_core::grid::{ImageGrid, Spectrum};

/// Flat 0.5 background, 1.0 peak at (32, 32), the rest of the 5x5 aperture at `shoulder`.
fn threshold_image(shoulder: f32) -> ImageGrid {
    let mut data = Array2::from_elem((64, 64), 0.5f32);
    for r in 30..=34 {
        for c in 30..=34 {
            data[[r, c]] = shoulder;
        }
    }
    data[[32, 32]] = 1.0;
    ImageGrid::new(data)
}

#[test]
fn test_detection_just_above_threshold() {
    let detection = PointSourceDetector::default().detect(&threshold_image(0.063));
    assert_eq!(detection.peak, (32, 32));
    assert_relative_eq!(detection.noise_rms, 0.5, max_relative = 1e-9);
    assert_relative_eq!(detection.snr, 5.024, max_relative = 1e-5);
    assert!(detection.found);
}

#[test]
fn test_detection_just_below_threshold() {
    let detection = PointSourceDetector::default().detect(&threshold_image(0.062));
    assert_relative_eq!(detection.snr, 4.976, max_relative = 1e-5);
    assert!(!detection.found);
}

#[test]
fn test_zero_image_is_not_a_detection() {
    let detection = PointSourceDetector::default().detect(&ImageGrid::zeros(64));
    assert!(!detection.found);
    assert_eq!(detection.snr, 0.0);
    assert_eq!(detection.flux, 0.0);
    assert_eq!(detection.peak, (10, 10));
}

#[test]
fn test_detection_leaves_spectrograph_fields_empty() {
    let image = common::gaussian_image(64, 30.0, 30.0, 100.0, 1.0, 0.0);
    let detection = PointSourceDetector::default().detect(&image);
    assert!(detection.found);
    assert_eq!(detection.doppler_shift, 0.0);
    assert_eq!(detection.spectrum, Spectrum::default());
}

#[test]
fn test_isolated_source_on_dark_background() {
    // Nothing in the annulus: noise is zero and SNR is limited only by epsilon.
    let mut data = Array2::zeros((64, 64));
    data[[40, 25]] = 3.0;
    let detection = PointSourceDetector::default().detect(&ImageGrid::new(data));
    assert!(detection.found);
    assert_eq!(detection.peak, (40, 25));
    assert_eq!(detection.noise_rms, 0.0);
    assert!(detection.snr.is_finite());
    assert_relative_eq!(detection.flux, 3.0);
}

#[test]
fn test_peak_scan_skips_edge_margin() {
    let mut data = Array2::zeros((64, 64));
    data[[3, 3]] = 100.0;
    data[[60, 32]] = 100.0;
    data[[20, 20]] = 5.0;
    let (row, col, value) = find_peak(&data, 10);
    assert_eq!((row, col), (20, 20));
    assert_eq!(value, 5.0);
}

#[test]
fn test_peak_ties_keep_raster_order() {
    let mut data = Array2::zeros((32, 32));
    data[[20, 12]] = 7.0;
    data[[15, 25]] = 7.0;
    data[[15, 18]] = 7.0;
    assert_eq!(find_peak(&data, 10), (15, 18, 7.0));
}

#[test]
fn test_peak_ties_keep_raster_order_on_large_image() {
    let mut data = Array2::zeros((300, 300));
    data[[200, 40]] = 7.0;
    data[[150, 120]] = 7.0;
    data[[150, 60]] = 7.0;
    assert_eq!(find_peak(&data, 10), (150, 60, 7.0));
}

#[test]
fn test_peak_scan_without_interior_falls_back_to_center() {
    let data = Array2::from_elem((10, 10), 2.0f32);
    assert_eq!(find_peak(&data, 10), (5, 5, 2.0));
}

#[test]
fn test_aperture_sum_covers_box() {
    let data = Array2::from_elem((20, 20), 1.0f32);
    assert_eq!(aperture_sum(&data, 10, 10, 2), 25.0);
    assert_eq!(aperture_sum(&data, 10, 10, 0), 1.0);
    // Clipped at the corner.
    assert_eq!(aperture_sum(&data, 0, 0, 2), 9.0);
}

#[test]
fn test_annulus_uses_every_ring_pixel() {
    let config = DetectionConfig::default();
    assert_eq!(config.annulus_pixel_count(), 320);

    // Ring pixels at 2.0, everything inside the inner box at 1000.
    let data = Array2::from_shape_fn((41, 41), |(r, c)| {
        let d = r.abs_diff(20).max(c.abs_diff(20));
        if d <= 5 {
            1000.0f32
        } else {
            2.0
        }
    });
    assert_relative_eq!(annulus_rms(&data, 20, 20, 5, 10), 2.0, max_relative = 1e-12);
}

#[test]
fn test_annulus_rms_of_mixed_ring() {
    // Half the ring rows at 3, the rest at 0: rms depends on the real pixel count.
    let data = Array2::from_shape_fn((41, 41), |(r, _)| if r < 20 { 3.0f32 } else { 0.0 });
    let rms = annulus_rms(&data, 20, 20, 5, 10);

    // Ring rows 10..=14 are full (21 px each); rows 15..=19 contribute 10 px each.
    let bright = 5 * 21 + 5 * 10;
    let expected = (9.0 * bright as f64 / 320.0).sqrt();
    assert_relative_eq!(rms, expected, max_relative = 1e-12);
}
