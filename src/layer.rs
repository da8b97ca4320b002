//! Tile layer storage.
//!
//! A layer owns one row-major `Vec<Tile>` of `width * height` cells. The
//! rotation-sorted views the renderer walks are computed from
//! [`crate::rotation::sorted_index`] instead of being stored per rotation.

use log::debug;

use crate::error::TerrainError;
use crate::rotation::{cell_at_sorted_index, sorted_index, Rotation};
use crate::tile::Tile;
use crate::viewport::ViewportQuery;

/// Kind of content a layer holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerType {
    Coast,
    Terrain,
    Buildings,
    /// Render-only merge of coast, terrain and buildings
    Mixed,
    Figures,
    /// World-level sea between the islands
    DeepWater,
}

impl LayerType {
    pub const ALL: [LayerType; 6] = [
        LayerType::Coast,
        LayerType::Terrain,
        LayerType::Buildings,
        LayerType::Mixed,
        LayerType::Figures,
        LayerType::DeepWater,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LayerType::Coast => "COAST",
            LayerType::Terrain => "TERRAIN",
            LayerType::Buildings => "BUILDINGS",
            LayerType::Mixed => "MIXED",
            LayerType::Figures => "FIGURES",
            LayerType::DeepWater => "DEEP_WATER",
        }
    }
}

/// A grid of tiles for one island.
#[derive(Clone, Debug)]
pub struct Layer {
    pub layer_type: LayerType,
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    /// Visible tiles in paint order, rebuilt each frame
    current_tiles: Vec<Tile>,
}

impl Layer {
    /// A layer of empty tiles.
    pub fn new(layer_type: LayerType, width: usize, height: usize) -> Result<Self, TerrainError> {
        let cells = cell_count(width, height)?;

        let tiles = (0..cells)
            .map(|i| Tile::empty_at(i % width, i / width))
            .collect();

        Ok(Self {
            layer_type,
            width,
            height,
            tiles,
            current_tiles: Vec::new(),
        })
    }

    /// Bulk-load a layer from row-major tiles. Tile positions are taken
    /// from their index in `tiles`.
    pub fn from_tiles(
        layer_type: LayerType,
        width: usize,
        height: usize,
        mut tiles: Vec<Tile>,
    ) -> Result<Self, TerrainError> {
        let cells = cell_count(width, height)?;

        if tiles.len() != cells {
            return Err(TerrainError::TileCountMismatch {
                layer: layer_type,
                expected: cells,
                actual: tiles.len(),
            });
        }

        for (i, tile) in tiles.iter_mut().enumerate() {
            tile.pos_x = i % width;
            tile.pos_y = i / width;
        }

        debug!(
            "Loaded {} layer {}x{} with {} buildings",
            layer_type.name(),
            width,
            height,
            tiles.iter().filter(|t| t.has_building()).count()
        );

        Ok(Self {
            layer_type,
            width,
            height,
            tiles,
            current_tiles: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn current_tiles(&self) -> &[Tile] {
        &self.current_tiles
    }

    /// Row-major index of `(x, y)`. Panics outside the layer.
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {} layer {}x{}",
            x,
            y,
            self.layer_type.name(),
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn get_tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn tile_at(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    /// Look up `(x, y)` through the scan order of `rotation`. Panics outside
    /// the layer.
    pub fn get_sorted_tile(&self, x: usize, y: usize, rotation: Rotation) -> &Tile {
        self.index(x, y);
        self.tile_at_sorted_index(sorted_index(x, y, self.width, self.height, rotation), rotation)
    }

    /// The tile drawn at position `index` of the scan order for `rotation`.
    pub fn tile_at_sorted_index(&self, index: usize, rotation: Rotation) -> &Tile {
        assert!(
            index < self.tiles.len(),
            "sorted index {} out of range for {} layer ({} tiles)",
            index,
            self.layer_type.name(),
            self.tiles.len()
        );
        let (x, y) = cell_at_sorted_index(index, self.width, self.height, rotation);
        &self.tiles[y * self.width + x]
    }

    /// All tiles in back-to-front paint order for `rotation`.
    pub fn sorted_tiles(&self, rotation: Rotation) -> impl Iterator<Item = &Tile> + '_ {
        (0..self.tiles.len()).map(move |i| self.tile_at_sorted_index(i, rotation))
    }

    /// Store `tile` at `(x, y)`; the tile's position is overwritten.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        let idx = self.index(x, y);
        self.tiles[idx] = Tile { pos_x: x, pos_y: y, ..tile };
    }

    pub fn set_tile_at(&mut self, index: usize, tile: Tile) {
        let (x, y) = (index % self.width, index / self.width);
        self.set_tile(x, y, tile);
    }

    pub fn reset_tile(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.tiles[idx].reset();
    }

    /// Advance the animation frame of every tile carrying a building.
    pub fn advance_frames(&mut self, frame_count: u32) {
        if frame_count == 0 {
            return;
        }
        for tile in self.tiles.iter_mut().filter(|t| t.has_building()) {
            tile.frame = (tile.frame + 1) % frame_count;
        }
    }

    /// Rebuild `current_tiles` with the tiles visible from `viewport`.
    ///
    /// `offset_x`/`offset_y` place the layer in the world. Tiles come out in
    /// the scan order of `rotation`, so no further sorting is needed to paint
    /// them. Returns true if anything is visible.
    pub fn update_current_tiles(
        &mut self,
        offset_x: i32,
        offset_y: i32,
        rotation: Rotation,
        viewport: &impl ViewportQuery,
    ) -> bool {
        let visible: Vec<Tile> = self
            .sorted_tiles(rotation)
            .filter(|tile| tile.is_renderable())
            .filter(|tile| {
                !viewport.is_outside_screen(
                    tile.pos_x as i32 + offset_x,
                    tile.pos_y as i32 + offset_y,
                    rotation,
                )
            })
            .copied()
            .collect();

        self.current_tiles = visible;

        debug!(
            "Render {} current tiles for layer {}",
            self.current_tiles.len(),
            self.layer_type.name()
        );

        !self.current_tiles.is_empty()
    }
}

/// Number of cells in a `width` x `height` grid. Zero area and sizes whose
/// cell count overflows are rejected.
pub fn cell_count(width: usize, height: usize) -> Result<usize, TerrainError> {
    match width.checked_mul(height) {
        Some(cells) if cells > 0 => Ok(cells),
        _ => Err(TerrainError::InvalidDimensions {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::BuildingId;
    use crate::viewport::{Camera, IsoProjection, ScreenBounds, Zoom};

    /// Shows only world cells with x below a limit.
    struct ColumnLimit(i32);

    impl ViewportQuery for ColumnLimit {
        fn is_outside_screen(&self, world_x: i32, _world_y: i32, _rotation: Rotation) -> bool {
            world_x >= self.0
        }
    }

    fn numbered_layer(width: usize, height: usize) -> Layer {
        let tiles = (0..width * height)
            .map(|i| Tile::with_building(BuildingId(i as i32), Rotation::Deg0, 0, 0))
            .collect();
        Layer::from_tiles(LayerType::Terrain, width, height, tiles).unwrap()
    }

    #[test]
    fn test_zero_area_rejected() {
        assert!(matches!(
            Layer::new(LayerType::Coast, 0, 4),
            Err(TerrainError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_tile_count_mismatch_rejected() {
        let result = Layer::from_tiles(LayerType::Buildings, 2, 2, vec![Tile::default(); 3]);
        assert!(matches!(
            result,
            Err(TerrainError::TileCountMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_positions_assigned_on_load() {
        let layer = numbered_layer(3, 2);
        let tile = layer.get_tile(2, 1);
        assert_eq!((tile.pos_x, tile.pos_y), (2, 1));
        assert_eq!(tile.building_id, BuildingId(5));
    }

    #[test]
    fn test_sorted_tile_is_the_same_cell_for_every_rotation() {
        let layer = numbered_layer(4, 3);
        for rotation in Rotation::ALL {
            for y in 0..3 {
                for x in 0..4 {
                    assert_eq!(layer.get_sorted_tile(x, y, rotation), layer.get_tile(x, y));
                }
            }
        }
    }

    #[test]
    fn test_sorted_order_at_deg180_is_reversed() {
        let layer = numbered_layer(3, 2);
        let ids: Vec<i32> = layer.sorted_tiles(Rotation::Deg180).map(|t| t.building_id.0).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_sorted_order_at_deg90() {
        // 3x2 grid, rotated grid is 2 wide and 3 high
        let layer = numbered_layer(3, 2);
        let ids: Vec<i32> = layer.sorted_tiles(Rotation::Deg90).map(|t| t.building_id.0).collect();
        assert_eq!(ids, vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn test_overflowing_size_rejected() {
        assert!(matches!(
            Layer::new(LayerType::Terrain, usize::MAX, 2),
            Err(TerrainError::InvalidDimensions { .. })
        ));
        assert!(cell_count(1 << 33, 1 << 33).is_err());
    }

    #[test]
    #[should_panic]
    fn test_sorted_tile_past_the_last_column_panics() {
        // (3, 0) would otherwise wrap onto (0, 1)
        let layer = numbered_layer(3, 2);
        layer.get_sorted_tile(3, 0, Rotation::Deg0);
    }

    #[test]
    #[should_panic]
    fn test_sorted_index_out_of_range_panics() {
        let layer = numbered_layer(2, 2);
        layer.tile_at_sorted_index(4, Rotation::Deg0);
    }

    #[test]
    fn test_update_current_tiles_filters_and_keeps_order() {
        let mut layer = numbered_layer(4, 2);
        layer.reset_tile(0, 1);

        let visible = layer.update_current_tiles(10, 0, Rotation::Deg0, &ColumnLimit(12));
        assert!(visible);
        let ids: Vec<i32> = layer.current_tiles().iter().map(|t| t.building_id.0).collect();
        // x = 0, 1 survive; (0, 1) is empty
        assert_eq!(ids, vec![0, 1, 5]);

        // Replaced, not appended
        let visible = layer.update_current_tiles(100, 0, Rotation::Deg0, &ColumnLimit(12));
        assert!(!visible);
        assert!(layer.current_tiles().is_empty());
    }

    #[test]
    fn test_camera_selection_in_rotated_order() {
        // 3x2 world, everything on screen
        let camera = |screen| Camera::new(IsoProjection::new(3, 2, Zoom::Gfx), screen);
        let mut layer = numbered_layer(3, 2);
        let all = camera(ScreenBounds::new(-500, -500, 1000, 1000));

        layer.update_current_tiles(0, 0, Rotation::Deg90, &all);
        let ids: Vec<i32> = layer.current_tiles().iter().map(|t| t.building_id.0).collect();
        assert_eq!(ids, vec![3, 0, 4, 1, 5, 2]);

        layer.update_current_tiles(0, 0, Rotation::Deg270, &all);
        let ids: Vec<i32> = layer.current_tiles().iter().map(|t| t.building_id.0).collect();
        assert_eq!(ids, vec![2, 5, 1, 4, 0, 3]);

        // At 90 degrees only cells with x + y <= 1 project to x >= 0
        let right_half = camera(ScreenBounds::new(40, -100, 200, 400));
        assert!(layer.update_current_tiles(0, 0, Rotation::Deg90, &right_half));
        let ids: Vec<i32> = layer.current_tiles().iter().map(|t| t.building_id.0).collect();
        assert_eq!(ids, vec![3, 0, 1]);
    }

    #[test]
    fn test_advance_frames_wraps() {
        let mut layer = numbered_layer(1, 1);
        layer.advance_frames(2);
        assert_eq!(layer.get_tile(0, 0).frame, 1);
        layer.advance_frames(2);
        assert_eq!(layer.get_tile(0, 0).frame, 0);
    }
}
