//! Write generated noise textures to PNG for inspection.

use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;

use crate::error::{Error, Result};
use crate::generator::Bounds;
use crate::lattice::Lattice;
use crate::upload::CHANNELS;

/// Map a value within `bounds` to a byte (empty ranges map to 0).
pub fn quantize(value: f32, bounds: Bounds) -> u8 {
    let range = bounds.upper() - bounds.lower();
    if range <= 0.0 {
        return 0;
    }
    let t = ((value - bounds.lower()) / range).clamp(0.0, 1.0);
    (t * 255.0).round() as u8
}

/// Lay out RGB texels as an image.
///
/// 1D textures become a single row, 2D textures a square, and 3D textures
/// a strip of `resolution` square slices ordered by z.
pub fn to_image(
    texels: &[f32],
    dimension: usize,
    resolution: usize,
    bounds: Bounds,
) -> Result<RgbImage> {
    let expected = resolution.pow(dimension as u32) * CHANNELS;
    if texels.len() != expected {
        return Err(Error::invalid(
            "texels",
            format!("expected {} values, got {}", expected, texels.len()),
        ));
    }

    let res = resolution as u32;
    let (width, height) = match dimension {
        1 => (res, 1),
        2 => (res, res),
        3 => (res * res, res),
        other => {
            return Err(Error::invalid(
                "dimension",
                format!("expected 1, 2 or 3, got {}", other),
            ))
        }
    };

    let mut img = RgbImage::new(width, height);
    let pixel = |index: usize| {
        let base = index * CHANNELS;
        Rgb([
            quantize(texels[base], bounds),
            quantize(texels[base + 1], bounds),
            quantize(texels[base + 2], bounds),
        ])
    };

    match dimension {
        1 => {
            for (index, [x]) in Lattice::<1>::new(resolution).points().enumerate() {
                img.put_pixel(x as u32, 0, pixel(index));
            }
        }
        2 => {
            for (index, [x, y]) in Lattice::<2>::new(resolution).points().enumerate() {
                img.put_pixel(x as u32, y as u32, pixel(index));
            }
        }
        _ => {
            for (index, [x, y, z]) in Lattice::<3>::new(resolution).points().enumerate() {
                img.put_pixel((z * resolution + x) as u32, y as u32, pixel(index));
            }
        }
    }

    Ok(img)
}

pub fn write_png(
    path: &Path,
    texels: &[f32],
    dimension: usize,
    resolution: usize,
    bounds: Bounds,
) -> Result<()> {
    let img = to_image(texels, dimension, resolution, bounds)?;
    img.save(path)?;
    info!(
        "wrote {}x{} image to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}
