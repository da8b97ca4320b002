//! Islands: the layers of one island, building placement and the MIXED
//! render layer derived from them.

use log::{debug, info};

use crate::buildings::BuildingCatalog;
use crate::error::TerrainError;
use crate::layer::{cell_count, Layer, LayerType};
use crate::record::{ClimateZone, IslandRecord, LayerRecord, TileRecord};
use crate::rotation::{rotate_position, Rotation};
use crate::tile::{BuildingId, Tile};
use crate::viewport::ViewportQuery;

/// A validated building footprint, ready to be written with
/// [`Island::place_building`].
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub building_id: BuildingId,
    pub rotation: Rotation,
    /// Unrotated footprint size
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Placement {
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// One island and all of its layers.
#[derive(Clone, Debug)]
pub struct Island {
    pub width: usize,
    pub height: usize,
    /// World offset of the top-left cell; -1 while not placed in a world
    pub x: i32,
    pub y: i32,
    pub climate: ClimateZone,
    coast: Layer,
    terrain: Layer,
    buildings: Layer,
    mixed: Layer,
    figures: Layer,
}

impl Island {
    /// An island with empty layers.
    pub fn new(width: usize, height: usize, climate: ClimateZone) -> Result<Self, TerrainError> {
        Ok(Self {
            width,
            height,
            x: -1,
            y: -1,
            climate,
            coast: Layer::new(LayerType::Coast, width, height)?,
            terrain: Layer::new(LayerType::Terrain, width, height)?,
            buildings: Layer::new(LayerType::Buildings, width, height)?,
            mixed: Layer::new(LayerType::Mixed, width, height)?,
            figures: Layer::new(LayerType::Figures, width, height)?,
        })
    }

    /// Build an island from its record. The terrain layer is required; the
    /// other persisted layers start empty when absent. MIXED is derived.
    ///
    /// Sizes, tile counts and rotations are checked before any layer is
    /// allocated.
    pub fn from_record(record: &IslandRecord) -> Result<Self, TerrainError> {
        let invalid = || TerrainError::InvalidDimensions {
            width: record.width,
            height: record.height,
        };
        let width = usize::try_from(record.width).map_err(|_| invalid())?;
        let height = usize::try_from(record.height).map_err(|_| invalid())?;
        let cells = cell_count(width, height)?;

        if !record.layers.iter().any(|l| matches!(l, LayerRecord::Terrain(_))) {
            return Err(TerrainError::MissingLayer(LayerType::Terrain));
        }
        for layer_record in &record.layers {
            let layer_type = record_layer_type(layer_record);
            let tiles = layer_record.tiles();
            if tiles.len() != cells {
                return Err(TerrainError::TileCountMismatch {
                    layer: layer_type,
                    expected: cells,
                    actual: tiles.len(),
                });
            }
            if let Some(bad) = tiles.iter().find(|t| !(0..4).contains(&t.rotation)) {
                return Err(TerrainError::InvalidRotation {
                    layer: layer_type,
                    rotation: bad.rotation,
                });
            }
        }

        let mut island = Island::new(width, height, record.climate)?;
        island.x = record.x;
        island.y = record.y;

        for layer_record in &record.layers {
            let layer_type = record_layer_type(layer_record);
            let tiles = layer_record.tiles().iter().map(Tile::from).collect();
            *island.layer_mut(layer_type) = Layer::from_tiles(layer_type, width, height, tiles)?;
        }

        island.derive_mixed();

        info!(
            "Loaded {} island {}x{} at ({}, {})",
            island.climate.name(),
            width,
            height,
            island.x,
            island.y
        );

        Ok(island)
    }

    /// Record with the persisted layers. MIXED is never written.
    pub fn to_record(&self) -> IslandRecord {
        let tiles = |layer: &Layer| layer.tiles().iter().map(TileRecord::from).collect::<Vec<_>>();

        IslandRecord {
            width: self.width as i64,
            height: self.height as i64,
            x: self.x,
            y: self.y,
            climate: self.climate,
            layers: vec![
                LayerRecord::Coast(tiles(&self.coast)),
                LayerRecord::Terrain(tiles(&self.terrain)),
                LayerRecord::Buildings(tiles(&self.buildings)),
                LayerRecord::Figures(tiles(&self.figures)),
            ],
            generator: None,
        }
    }

    /// Panics for [`LayerType::DeepWater`], which belongs to the world.
    pub fn layer(&self, layer_type: LayerType) -> &Layer {
        match layer_type {
            LayerType::Coast => &self.coast,
            LayerType::Terrain => &self.terrain,
            LayerType::Buildings => &self.buildings,
            LayerType::Mixed => &self.mixed,
            LayerType::Figures => &self.figures,
            LayerType::DeepWater => panic!("islands have no DEEP_WATER layer"),
        }
    }

    fn layer_mut(&mut self, layer_type: LayerType) -> &mut Layer {
        match layer_type {
            LayerType::Coast => &mut self.coast,
            LayerType::Terrain => &mut self.terrain,
            LayerType::Buildings => &mut self.buildings,
            LayerType::Mixed => &mut self.mixed,
            LayerType::Figures => &mut self.figures,
            LayerType::DeepWater => panic!("islands have no DEEP_WATER layer"),
        }
    }

    /// Replace a persisted layer in bulk and refresh MIXED.
    pub fn set_layer(&mut self, layer: Layer) -> Result<(), TerrainError> {
        match layer.layer_type {
            LayerType::Mixed => {
                return Err(TerrainError::InvalidParameter(
                    "the MIXED layer is derived and cannot be set".to_string(),
                ))
            }
            LayerType::DeepWater => {
                return Err(TerrainError::InvalidParameter(
                    "DEEP_WATER is a world layer".to_string(),
                ))
            }
            _ => {}
        }
        if (layer.width(), layer.height()) != (self.width, self.height) {
            return Err(TerrainError::TileCountMismatch {
                layer: layer.layer_type,
                expected: self.width * self.height,
                actual: layer.tiles().len(),
            });
        }

        let layer_type = layer.layer_type;
        *self.layer_mut(layer_type) = layer;
        self.derive_mixed();
        Ok(())
    }

    pub fn contains_world_position(&self, world_x: i32, world_y: i32) -> bool {
        world_x >= self.x
            && world_y >= self.y
            && world_x < self.x + self.width as i32
            && world_y < self.y + self.height as i32
    }

    // =========================================================================
    // MIXED LAYER
    // =========================================================================

    /// Rebuild the whole MIXED layer.
    pub fn derive_mixed(&mut self) {
        for index in 0..self.width * self.height {
            self.derive_mixed_cell(index);
        }
        debug!("Derived MIXED layer for island at ({}, {})", self.x, self.y);
    }

    /// Start from BUILDINGS; where that cell is empty, COAST and then TERRAIN
    /// fill it in, so TERRAIN wins over COAST.
    fn derive_mixed_cell(&mut self, index: usize) {
        let building = *self.buildings.tile_at(index);
        let mut tile = building;

        if !building.has_building() {
            let coast = self.coast.tile_at(index);
            if coast.has_building() {
                tile = *coast;
            }
            let terrain = self.terrain.tile_at(index);
            if terrain.has_building() {
                tile = *terrain;
            }
        }

        self.mixed.set_tile_at(index, tile);
    }

    // =========================================================================
    // BUILDING PLACEMENT
    // =========================================================================

    /// Check whether `building_id` fits with its rotated footprint anchored
    /// at a world cell. Every cell must lie on the island, stand on
    /// buildable terrain and be free of other buildings, otherwise nothing
    /// is returned.
    pub fn validate_footprint(
        &self,
        catalog: &impl BuildingCatalog,
        building_id: BuildingId,
        rotation: Rotation,
        anchor_x: i32,
        anchor_y: i32,
    ) -> Option<Placement> {
        let info = catalog.info(building_id);
        let rotation = if info.rotatable { rotation } else { Rotation::Deg0 };
        let (width, height) = (info.width, info.height);

        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let (ox, oy) = rotate_position(x, y, width, height, rotation);
                let world_x = anchor_x + ox as i32;
                let world_y = anchor_y + oy as i32;

                let (pos_x, pos_y) = self.accept_cell(catalog, world_x, world_y, rotation)?;
                tiles.push(Tile {
                    building_id,
                    rotation,
                    x,
                    y,
                    pos_x,
                    pos_y,
                    frame: 0,
                });
            }
        }

        Some(Placement {
            building_id,
            rotation,
            width,
            height,
            tiles,
        })
    }

    /// Island-local position of a world cell a building may occupy.
    fn accept_cell(
        &self,
        catalog: &impl BuildingCatalog,
        world_x: i32,
        world_y: i32,
        rotation: Rotation,
    ) -> Option<(usize, usize)> {
        if !self.contains_world_position(world_x, world_y) {
            return None;
        }

        let local_x = (world_x - self.x) as usize;
        let local_y = (world_y - self.y) as usize;

        let ground = self.terrain.get_sorted_tile(local_x, local_y, rotation);
        let buildable = ground.has_building()
            && catalog
                .lookup(ground.building_id)
                .is_some_and(|info| info.is_buildable_ground());
        if !buildable {
            return None;
        }

        if self.buildings.get_tile(local_x, local_y).has_building() {
            return None;
        }

        Some((local_x, local_y))
    }

    /// Write a validated placement into BUILDINGS and refresh MIXED for the
    /// cells it covers. Panics if the batch does not cover the footprint.
    pub fn place_building(&mut self, placement: Placement) {
        assert_eq!(
            placement.tiles.len(),
            placement.cell_count(),
            "placement of building {} has {} tiles for a {}x{} footprint",
            placement.building_id,
            placement.tiles.len(),
            placement.width,
            placement.height
        );

        for tile in &placement.tiles {
            self.buildings.set_tile(tile.pos_x, tile.pos_y, *tile);
        }
        for tile in &placement.tiles {
            let index = self.buildings.index(tile.pos_x, tile.pos_y);
            self.derive_mixed_cell(index);
        }

        debug!(
            "Placed building {} ({} cells) on island at ({}, {})",
            placement.building_id,
            placement.tiles.len(),
            self.x,
            self.y
        );
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    /// Refresh the visible tiles of the layers the renderer draws. Returns
    /// true if the island has anything on screen.
    pub fn update_current_tiles(&mut self, rotation: Rotation, viewport: &impl ViewportQuery) -> bool {
        let (x, y) = (self.x, self.y);
        let mixed_visible = self.mixed.update_current_tiles(x, y, rotation, viewport);
        let figures_visible = self.figures.update_current_tiles(x, y, rotation, viewport);

        mixed_visible || figures_visible
    }
}

fn record_layer_type(record: &LayerRecord) -> LayerType {
    match record {
        LayerRecord::Coast(_) => LayerType::Coast,
        LayerRecord::Terrain(_) => LayerType::Terrain,
        LayerRecord::Buildings(_) => LayerType::Buildings,
        LayerRecord::Figures(_) => LayerType::Figures,
    }
}
