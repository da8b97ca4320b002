//! Elevation field: noise biased by a radial falloff so land gathers in the
//! middle of the grid and the border sinks below the water level.

use noise::{NoiseFn, Perlin, Seedable};
use rayon::prelude::*;

use super::rings::MapCell;
use crate::tilemap::Tilemap;

/// Deterministic 2D noise in `[-1, 1]`.
pub trait NoiseSource: Sync {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Perlin noise sampled at `frequency` times the cell coordinates.
pub struct PerlinNoise {
    perlin: Perlin,
    frequency: f64,
}

impl PerlinNoise {
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            perlin: Perlin::new(1).set_seed(seed),
            frequency,
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin
            .get([x * self.frequency, y * self.frequency])
            .clamp(-1.0, 1.0)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Square-bump distance from the centre: 0 in the middle, 1 on the
/// left and top edge.
pub fn falloff(x: usize, y: usize, width: usize, height: usize) -> f64 {
    let nx = 2.0 * x as f64 / width as f64 - 1.0;
    let ny = 2.0 * y as f64 / height as f64 - 1.0;

    (1.0 - (1.0 - nx * nx) * (1.0 - ny * ny)).clamp(0.0, 1.0)
}

/// Elevation of every cell in `[0, 1]`.
pub fn elevation_map(
    width: usize,
    height: usize,
    water_level: f64,
    noise: &impl NoiseSource,
) -> Tilemap<f64> {
    let data: Vec<f64> = (0..width * height)
        .into_par_iter()
        .map(|i| {
            let (x, y) = (i % width, i / width);
            let d = falloff(x, y, width, height);
            let e = noise.sample(x as f64, y as f64) / 2.0 + 0.5;

            lerp(e, 1.0 - d, water_level)
        })
        .collect();

    Tilemap::from_vec(width, height, data)
}

/// Land where the elevation rises above the water level.
pub fn land_mask(elevation: &Tilemap<f64>, water_level: f64) -> Tilemap<MapCell> {
    elevation.map(|&e| if e > water_level { MapCell::Terrain } else { MapCell::Water })
}
