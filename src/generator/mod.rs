//! Procedural island generation.
//!
//! Pipeline:
//! 1. Elevation from Perlin noise and a radial falloff
//! 2. Land mask at the water level
//! 3. Rings carved around the land (embankment, coast, shallow, medium)
//! 4. Ring bitmasks resolved to edge shapes
//! 5. Shapes turned into terrain and coast tiles
//!
//! Steps 1 to 4 depend only on the parameters. Decoration in step 5 draws
//! from a caller-owned RNG.

pub mod edges;
pub mod elevation;
pub mod rings;
pub mod tiles;

use std::fs;
use std::path::Path;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use edges::EdgeType;
pub use elevation::{NoiseSource, PerlinNoise};
pub use rings::{MapCell, Ring, TERRAIN_FLAG, WATER_FLAG};
pub use tiles::TileKind;

use crate::error::TerrainError;
use crate::island::Island;
use crate::layer::{cell_count, Layer, LayerType};
use crate::record::{ClimateZone, IslandRecord, LayerRecord, TileRecord};
use crate::tile::Tile;
use crate::tilemap::Tilemap;

/// Parameters for generating an island
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParams {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    /// Noise frequency; lower values give larger landmasses
    pub frequency: f64,
    /// Elevation in `[0, 1]` below which a cell is water
    pub water_level: f64,
    pub climate: ClimateZone,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            width: 33,
            height: 33,
            seed: 100,
            frequency: 0.05,
            water_level: 0.5,
            climate: ClimateZone::North,
        }
    }
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<(), TerrainError> {
        cell_count(self.width, self.height)?;
        if !(0.0..=1.0).contains(&self.water_level) {
            return Err(TerrainError::InvalidParameter(format!(
                "water level {} outside [0, 1]",
                self.water_level
            )));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(TerrainError::InvalidParameter(format!(
                "frequency {} must be positive",
                self.frequency
            )));
        }
        Ok(())
    }
}

/// Output of the classification steps for one island.
#[derive(Clone, Debug)]
pub struct GeneratedIsland {
    pub params: GeneratorParams,
    pub elevation: Tilemap<f64>,
    pub mask: Tilemap<MapCell>,
    pub bitmask: Tilemap<i32>,
    /// Cells taken by each ring, in carving order
    pub ring_stats: Vec<(Ring, usize)>,
}

/// Generate an island with Perlin noise seeded from the parameters.
pub fn generate_island(params: &GeneratorParams) -> Result<GeneratedIsland, TerrainError> {
    let noise = PerlinNoise::new(params.seed, params.frequency);
    generate_island_with_noise(params, &noise)
}

/// Generate an island from any noise source.
pub fn generate_island_with_noise(
    params: &GeneratorParams,
    noise: &impl NoiseSource,
) -> Result<GeneratedIsland, TerrainError> {
    params.validate()?;

    let elevation = elevation::elevation_map(params.width, params.height, params.water_level, noise);
    let mut mask = elevation::land_mask(&elevation, params.water_level);
    let land = mask.as_slice().iter().filter(|c| **c == MapCell::Terrain).count();
    debug!("Land mask: {} of {} cells", land, mask.len());

    let (bitmask, ring_stats) = rings::carve_rings(&mut mask);
    for (ring, carved) in &ring_stats {
        debug!("Ring {:?}: {} cells", ring, carved);
    }

    info!(
        "Generated {}x{} island (seed {}, frequency {}, water level {})",
        params.width, params.height, params.seed, params.frequency, params.water_level
    );

    Ok(GeneratedIsland {
        params: params.clone(),
        elevation,
        mask,
        bitmask,
        ring_stats,
    })
}

impl GeneratedIsland {
    pub fn width(&self) -> usize {
        self.params.width
    }

    pub fn height(&self) -> usize {
        self.params.height
    }

    pub fn count(&self, cell: MapCell) -> usize {
        self.mask.as_slice().iter().filter(|c| **c == cell).count()
    }

    pub fn tile_kind(&self, x: usize, y: usize) -> TileKind {
        tiles::resolve(*self.mask.get(x, y), *self.bitmask.get(x, y))
    }

    /// Force one cell to a classification. Neighbours are left alone.
    ///
    /// Ring cells take the bitmask of `edge` in that ring, or the plain ring
    /// base without one. Water and terrain take no edge.
    pub fn override_cell(
        &mut self,
        x: usize,
        y: usize,
        cell: MapCell,
        edge: Option<EdgeType>,
    ) -> Result<(), TerrainError> {
        let bitmask = match (cell, edge) {
            (MapCell::Water, None) => WATER_FLAG,
            (MapCell::Terrain, None) => TERRAIN_FLAG,
            (MapCell::Water | MapCell::Terrain, Some(edge)) => {
                return Err(TerrainError::InvalidOverride {
                    cell,
                    reason: format!("{} only applies to ring cells", edge.name()),
                })
            }
            (_, edge) => {
                let ring = Ring::from_cell(cell).ok_or_else(|| TerrainError::InvalidOverride {
                    cell,
                    reason: "not a classification".to_string(),
                })?;
                match edge {
                    None => ring.base(),
                    Some(edge) => edges::bitmask_for(ring, edge).ok_or_else(|| {
                        TerrainError::InvalidOverride {
                            cell,
                            reason: format!("no {} shape in this ring", edge.name()),
                        }
                    })?,
                }
            }
        };

        self.mask.set(x, y, cell);
        self.bitmask.set(x, y, bitmask);
        debug!("Override ({}, {}) to {} with bitmask {}", x, y, cell.name(), bitmask);
        Ok(())
    }

    /// Terrain layer tiles: grass, trees and embankments.
    pub fn terrain_tiles(&self, rng: &mut impl Rng) -> Vec<Tile> {
        let climate = self.params.climate;
        self.mask
            .iter()
            .map(|(x, y, _)| match tiles::terrain_building(self.tile_kind(x, y), climate, rng) {
                Some((id, rotation)) => Tile::with_building(id, rotation, x, y),
                None => Tile::empty_at(x, y),
            })
            .collect()
    }

    /// Coast layer tiles: beaches and water.
    pub fn coast_tiles(&self) -> Vec<Tile> {
        self.mask
            .iter()
            .map(|(x, y, _)| {
                let (id, rotation) = tiles::coast_building(self.tile_kind(x, y));
                Tile::with_building(id, rotation, x, y)
            })
            .collect()
    }

    pub fn terrain_layer(&self, rng: &mut impl Rng) -> Result<Layer, TerrainError> {
        Layer::from_tiles(LayerType::Terrain, self.width(), self.height(), self.terrain_tiles(rng))
    }

    pub fn coast_layer(&self) -> Result<Layer, TerrainError> {
        Layer::from_tiles(LayerType::Coast, self.width(), self.height(), self.coast_tiles())
    }

    /// Record of a fresh, unplaced island.
    pub fn to_record(&self, rng: &mut impl Rng) -> IslandRecord {
        let records = |tiles: Vec<Tile>| tiles.iter().map(TileRecord::from).collect::<Vec<_>>();

        IslandRecord {
            width: self.width() as i64,
            height: self.height() as i64,
            x: -1,
            y: -1,
            climate: self.params.climate,
            layers: vec![
                LayerRecord::Coast(records(self.coast_tiles())),
                LayerRecord::Terrain(records(self.terrain_tiles(rng))),
            ],
            generator: Some(self.params.clone()),
        }
    }

    pub fn to_island(&self, rng: &mut impl Rng) -> Result<Island, TerrainError> {
        let mut island = Island::new(self.width(), self.height(), self.params.climate)?;
        island.set_layer(self.coast_layer()?)?;
        island.set_layer(self.terrain_layer(rng)?)?;
        Ok(island)
    }

    pub fn save_json(&self, path: &Path, rng: &mut impl Rng) -> Result<(), TerrainError> {
        let json = self.to_record(rng).to_json_string()?;
        fs::write(path, json)?;
        info!("Saved island to {}", path.display());
        Ok(())
    }
}
