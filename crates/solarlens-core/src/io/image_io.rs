use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::Result;
use crate::grid::ImageGrid;

/// Map the grid onto [0.0, 1.0] by its own min and max. A flat grid maps to zero.
pub fn normalize(grid: &ImageGrid) -> Array2<f32> {
    let (lo, hi) = grid.min_max();
    let range = hi - lo;
    if !range.is_finite() || range <= 0.0 {
        return Array2::zeros(grid.data.dim());
    }
    grid.data.mapv(|v| (v - lo) / range)
}

/// Save a grid as 16-bit grayscale TIFF, min-max normalized.
pub fn save_tiff(grid: &ImageGrid, path: &Path) -> Result<()> {
    let h = grid.height();
    let w = grid.width();
    let norm = normalize(grid);

    let pixels: Vec<u16> = norm
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 65535.0) as u16)
        .collect();

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a grid as 8-bit grayscale PNG, min-max normalized.
pub fn save_png(grid: &ImageGrid, path: &Path) -> Result<()> {
    let h = grid.height();
    let w = grid.width();
    let norm = normalize(grid);

    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &v) in norm.indexed_iter() {
        let val = (v.clamp(0.0, 1.0) * 255.0) as u8;
        img.put_pixel(col as u32, row as u32, Luma([val]));
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save grid, choosing format from file extension.
pub fn save_grid(grid: &ImageGrid, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => save_png(grid, path),
        _ => save_tiff(grid, path),
    }
}
