//! A single cell of a layer.

use serde::{Deserialize, Serialize};

use crate::rotation::Rotation;

/// Building id carried by a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub i32);

impl BuildingId {
    /// Marks a tile without a building.
    pub const NONE: BuildingId = BuildingId(-1);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for BuildingId {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Display for BuildingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tile state stored in a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub building_id: BuildingId,
    pub rotation: Rotation,
    /// Offset of this cell inside the building footprint
    pub x: usize,
    pub y: usize,
    /// Island-local position of the cell
    pub pos_x: usize,
    pub pos_y: usize,
    /// Animation frame; not persisted
    pub frame: u32,
}

impl Tile {
    /// An empty tile at an island-local position.
    pub fn empty_at(pos_x: usize, pos_y: usize) -> Self {
        Self {
            pos_x,
            pos_y,
            ..Self::default()
        }
    }

    /// A single-cell building at an island-local position.
    pub fn with_building(building_id: BuildingId, rotation: Rotation, pos_x: usize, pos_y: usize) -> Self {
        Self {
            building_id,
            rotation,
            pos_x,
            pos_y,
            ..Self::default()
        }
    }

    pub fn has_building(&self) -> bool {
        !self.building_id.is_none()
    }

    pub fn is_renderable(&self) -> bool {
        self.has_building()
    }

    /// Clear the building but keep the position.
    pub fn reset(&mut self) {
        *self = Tile::empty_at(self.pos_x, self.pos_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tile_is_empty() {
        let tile = Tile::default();
        assert!(!tile.has_building());
        assert!(!tile.is_renderable());
        assert_eq!(tile.rotation, Rotation::Deg0);
    }

    #[test]
    fn test_reset_keeps_position() {
        let mut tile = Tile::with_building(BuildingId(101), Rotation::Deg180, 4, 7);
        tile.frame = 3;
        tile.reset();

        assert!(!tile.has_building());
        assert_eq!((tile.pos_x, tile.pos_y), (4, 7));
        assert_eq!(tile.frame, 0);
    }

    #[test]
    fn test_building_id_serializes_as_integer() {
        let json = serde_json::to_string(&BuildingId(1205)).unwrap();
        assert_eq!(json, "1205");
        let id: BuildingId = serde_json::from_str("-1").unwrap();
        assert!(id.is_none());
    }
}
