use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::generator::{GeneratedIsland, MapCell};
use crate::tilemap::Tilemap;

/// Export an elevation map in `[0, 1]`, coloured blue below the water
/// level and green to brown above it.
pub fn export_elevation(
    elevation: &Tilemap<f64>,
    water_level: f64,
    scale: u32,
    path: &Path,
) -> Result<(), image::ImageError> {
    let img = render_scaled(elevation.width, elevation.height, scale, |x, y| {
        elevation_color(*elevation.get(x, y), water_level)
    });
    img.save(path)
}

/// Export the cell classification, one flat colour per class.
pub fn export_cells(island: &GeneratedIsland, scale: u32, path: &Path) -> Result<(), image::ImageError> {
    let img = render_scaled(island.width(), island.height(), scale, |x, y| {
        cell_color(*island.mask.get(x, y))
    });
    img.save(path)
}

fn render_scaled(
    width: usize,
    height: usize,
    scale: u32,
    color_at: impl Fn(usize, usize) -> [u8; 3],
) -> RgbImage {
    let scale = scale.max(1);
    let mut img: RgbImage = ImageBuffer::new(width as u32 * scale, height as u32 * scale);

    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let x = (px / scale) as usize;
        let y = (py / scale) as usize;
        *pixel = Rgb(color_at(x, y));
    }

    img
}

pub fn cell_color(cell: MapCell) -> [u8; 3] {
    match cell {
        MapCell::Terrain => [86, 140, 60],
        MapCell::Embankment => [150, 120, 80],
        MapCell::Coast => [230, 210, 150],
        MapCell::ShallowWater => [90, 180, 210],
        MapCell::MediumWater => [50, 120, 190],
        MapCell::Water => [20, 50, 120],
        MapCell::Invalid => [255, 0, 255],
    }
}

fn elevation_color(e: f64, water_level: f64) -> [u8; 3] {
    let lerp = |a: [f64; 3], b: [f64; 3], t: f64| {
        [
            (a[0] + (b[0] - a[0]) * t) as u8,
            (a[1] + (b[1] - a[1]) * t) as u8,
            (a[2] + (b[2] - a[2]) * t) as u8,
        ]
    };

    if e <= water_level {
        let t = if water_level > 0.0 { (e / water_level).clamp(0.0, 1.0) } else { 1.0 };
        lerp([10.0, 30.0, 90.0], [80.0, 170.0, 220.0], t)
    } else {
        let t = ((e - water_level) / (1.0 - water_level).max(f64::EPSILON)).clamp(0.0, 1.0);
        lerp([90.0, 150.0, 60.0], [140.0, 100.0, 60.0], t)
    }
}
