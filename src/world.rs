//! A world: its size, the islands placed in it and the deep water that
//! fills every cell no island covers.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::buildings::DEEP_WATER;
use crate::error::TerrainError;
use crate::island::Island;
use crate::layer::{Layer, LayerType};
use crate::record::{WorldRecord, WorldSize};
use crate::rotation::Rotation;
use crate::tile::Tile;
use crate::viewport::ViewportQuery;

#[derive(Clone, Debug)]
pub struct World {
    pub width: usize,
    pub height: usize,
    pub islands: Vec<Island>,
    /// World-sized; empty under islands
    deep_water: Layer,
}

impl World {
    /// Build a world from its record. Fails as a whole if the world or any
    /// island is invalid.
    pub fn from_record(record: &WorldRecord) -> Result<Self, TerrainError> {
        let WorldSize { width, height } = record.world;
        let invalid = || TerrainError::InvalidDimensions { width, height };
        let width = usize::try_from(width).map_err(|_| invalid())?;
        let height = usize::try_from(height).map_err(|_| invalid())?;

        let mut world = World {
            width,
            height,
            islands: Vec::with_capacity(record.islands.len()),
            deep_water: Layer::new(LayerType::DeepWater, width, height)?,
        };

        for island_record in &record.islands {
            let island = Island::from_record(island_record)?;
            if !world.fits(&island) {
                return Err(TerrainError::IslandOutOfWorld {
                    x: island.x,
                    y: island.y,
                });
            }
            world.islands.push(island);
        }
        world.rebuild_deep_water();

        info!(
            "World {}x{} with {} islands",
            world.width,
            world.height,
            world.islands.len()
        );

        Ok(world)
    }

    pub fn to_record(&self) -> WorldRecord {
        WorldRecord {
            world: WorldSize {
                width: self.width as i64,
                height: self.height as i64,
            },
            islands: self.islands.iter().map(Island::to_record).collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, TerrainError> {
        let record: WorldRecord = serde_json::from_str(json)?;
        Self::from_record(&record)
    }

    pub fn load(path: &Path) -> Result<Self, TerrainError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), TerrainError> {
        let json = serde_json::to_string_pretty(&self.to_record())?;
        fs::write(path, json)?;
        info!("Saved world to {}", path.display());
        Ok(())
    }

    fn fits(&self, island: &Island) -> bool {
        island.x >= 0
            && island.y >= 0
            && island.x as usize + island.width <= self.width
            && island.y as usize + island.height <= self.height
    }

    pub fn is_world_position_in_world(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// The island covering a world cell, if any.
    pub fn island_at(&self, x: i32, y: i32) -> Option<&Island> {
        self.islands.iter().find(|island| island.contains_world_position(x, y))
    }

    pub fn island_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Island> {
        self.islands.iter_mut().find(|island| island.contains_world_position(x, y))
    }

    pub fn deep_water(&self) -> &Layer {
        &self.deep_water
    }

    /// Fill every cell outside the islands with deep water. Call after
    /// moving, adding or removing islands.
    pub fn rebuild_deep_water(&mut self) {
        let mut covered = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.island_at(x as i32, y as i32).is_some() {
                    self.deep_water.reset_tile(x, y);
                    covered += 1;
                } else {
                    self.deep_water
                        .set_tile(x, y, Tile::with_building(DEEP_WATER, Rotation::Deg0, x, y));
                }
            }
        }
        debug!(
            "Deep water covers {} of {} world cells",
            self.width * self.height - covered,
            self.width * self.height
        );
    }

    /// Refresh the visible deep water tiles. Returns true if any are on
    /// screen.
    pub fn update_deep_water(&mut self, rotation: Rotation, viewport: &impl ViewportQuery) -> bool {
        self.deep_water.update_current_tiles(0, 0, rotation, viewport)
    }

    /// Refresh the visible tiles of every island; returns the indices of the
    /// islands that have something on screen.
    pub fn update_visible_islands(&mut self, rotation: Rotation, viewport: &impl ViewportQuery) -> Vec<usize> {
        self.islands
            .iter_mut()
            .enumerate()
            .filter_map(|(i, island)| island.update_current_tiles(rotation, viewport).then_some(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::GRASS;
    use crate::layer::LayerType;
    use crate::record::{ClimateZone, IslandRecord, LayerRecord, TileRecord};
    use crate::viewport::{Camera, IsoProjection, ScreenBounds, Zoom};
    use tempfile::tempdir;

    fn island_record(x: i32, y: i32) -> IslandRecord {
        let grass = TileRecord {
            id: GRASS.0,
            ..TileRecord::default()
        };
        IslandRecord {
            width: 3,
            height: 2,
            x,
            y,
            climate: ClimateZone::South,
            layers: vec![LayerRecord::Terrain(vec![grass; 6])],
            generator: None,
        }
    }

    fn world_record(islands: Vec<IslandRecord>) -> WorldRecord {
        WorldRecord {
            world: WorldSize {
                width: 20,
                height: 10,
            },
            islands,
        }
    }

    #[test]
    fn test_load_world() {
        let world = World::from_record(&world_record(vec![island_record(4, 5)])).unwrap();
        assert_eq!(world.islands.len(), 1);
        assert!(world.island_at(6, 6).is_some());
        assert!(world.island_at(7, 6).is_none());
        assert_eq!(world.islands[0].climate, ClimateZone::South);
    }

    #[test]
    fn test_invalid_world_size() {
        let mut record = world_record(Vec::new());
        record.world.width = -3;
        assert!(matches!(
            World::from_record(&record),
            Err(TerrainError::InvalidDimensions { width: -3, .. })
        ));
    }

    #[test]
    fn test_island_outside_world_fails_whole_load() {
        let record = world_record(vec![island_record(0, 0), island_record(18, 0)]);
        assert!(matches!(
            World::from_record(&record),
            Err(TerrainError::IslandOutOfWorld { x: 18, y: 0 })
        ));

        let record = world_record(vec![island_record(-1, -1)]);
        assert!(World::from_record(&record).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let world = World::from_record(&world_record(vec![island_record(2, 3)])).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("world.json");
        world.save(&path).unwrap();

        let loaded = World::load(&path).unwrap();

        assert_eq!((loaded.width, loaded.height), (20, 10));
        assert_eq!(
            loaded.islands[0].layer(LayerType::Terrain).tiles(),
            world.islands[0].layer(LayerType::Terrain).tiles()
        );
    }

    #[test]
    fn test_visible_islands() {
        let mut world = World::from_record(&world_record(vec![island_record(0, 0)])).unwrap();
        let projection = IsoProjection::new(world.width, world.height, Zoom::Gfx);
        let camera = Camera::new(projection, ScreenBounds::new(-200, 0, 400, 300));

        assert_eq!(world.update_visible_islands(Rotation::Deg0, &camera), vec![0]);
        assert_eq!(world.islands[0].layer(LayerType::Mixed).current_tiles().len(), 6);
    }

    #[test]
    fn test_deep_water_fills_around_islands() {
        let world = World::from_record(&world_record(vec![island_record(4, 5), island_record(10, 0)])).unwrap();
        let sea = world.deep_water();

        assert_eq!((sea.width(), sea.height()), (20, 10));
        assert_eq!(sea.tiles().iter().filter(|t| t.has_building()).count(), 200 - 12);
        assert!(sea.tiles().iter().filter(|t| t.has_building()).all(|t| t.building_id == DEEP_WATER));

        for y in 0..10 {
            for x in 0..20 {
                let under_island = world.island_at(x as i32, y as i32).is_some();
                assert_eq!(sea.get_tile(x, y).has_building(), !under_island, "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_deep_water_follows_moved_island() {
        let mut world = World::from_record(&world_record(vec![island_record(0, 0)])).unwrap();
        assert!(!world.deep_water().get_tile(0, 0).has_building());

        world.islands[0].x = 15;
        world.rebuild_deep_water();
        assert!(world.deep_water().get_tile(0, 0).has_building());
        assert!(!world.deep_water().get_tile(15, 0).has_building());
    }

    #[test]
    fn test_visible_deep_water_in_scan_order() {
        let mut world = World::from_record(&world_record(vec![island_record(0, 0)])).unwrap();
        let projection = IsoProjection::new(world.width, world.height, Zoom::Sgfx);
        let camera = Camera::new(projection, ScreenBounds::new(-1000, -1000, 2000, 2000));

        assert!(world.update_deep_water(Rotation::Deg180, &camera));
        let expected: Vec<Tile> = world
            .deep_water()
            .sorted_tiles(Rotation::Deg180)
            .filter(|t| t.has_building())
            .copied()
            .collect();
        assert_eq!(world.deep_water().current_tiles(), expected.as_slice());
        assert_eq!(expected.len(), 200 - 6);
        // Last cell of the world comes first at 180 degrees
        assert_eq!((expected[0].pos_x, expected[0].pos_y), (19, 9));

        let far_away = Camera::new(projection, ScreenBounds::new(5000, 5000, 10, 10));
        assert!(!world.update_deep_water(Rotation::Deg0, &far_away));
    }
}
