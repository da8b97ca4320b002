//! Persisted record shapes for islands and worlds.
//!
//! These mirror the JSON files exactly; [`crate::island::Island`] and
//! [`crate::world::World`] validate them on the way in.

use serde::{Deserialize, Serialize};

use crate::generator::GeneratorParams;
use crate::rotation::Rotation;
use crate::tile::{BuildingId, Tile};

/// Climate zone of an island; picks the tree set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClimateZone {
    #[default]
    North,
    South,
}

impl ClimateZone {
    pub fn name(&self) -> &'static str {
        match self {
            ClimateZone::North => "NORTH",
            ClimateZone::South => "SOUTH",
        }
    }
}

/// One tile as stored on disk. Absent fields keep their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileRecord {
    pub id: i32,
    pub rotation: i32,
    pub x: usize,
    pub y: usize,
}

impl Default for TileRecord {
    fn default() -> Self {
        Self {
            id: BuildingId::NONE.0,
            rotation: 0,
            x: 0,
            y: 0,
        }
    }
}

impl From<&Tile> for TileRecord {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.building_id.0,
            rotation: tile.rotation.index(),
            x: tile.x,
            y: tile.y,
        }
    }
}

impl From<&TileRecord> for Tile {
    fn from(record: &TileRecord) -> Self {
        Tile {
            building_id: BuildingId(record.id),
            rotation: Rotation::from_index(record.rotation),
            x: record.x,
            y: record.y,
            ..Tile::default()
        }
    }
}

/// A named layer; serializes as `{"terrain": [...]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerRecord {
    Coast(Vec<TileRecord>),
    Terrain(Vec<TileRecord>),
    Buildings(Vec<TileRecord>),
    Figures(Vec<TileRecord>),
}

impl LayerRecord {
    pub fn tiles(&self) -> &[TileRecord] {
        match self {
            LayerRecord::Coast(t)
            | LayerRecord::Terrain(t)
            | LayerRecord::Buildings(t)
            | LayerRecord::Figures(t) => t,
        }
    }
}

fn unplaced() -> i32 {
    -1
}

/// An island as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IslandRecord {
    pub width: i64,
    pub height: i64,
    /// World offset; -1 until the island is placed in a world
    #[serde(default = "unplaced")]
    pub x: i32,
    #[serde(default = "unplaced")]
    pub y: i32,
    #[serde(default)]
    pub climate: ClimateZone,
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
    /// Parameters of the generator run that produced the island
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorParams>,
}

impl IslandRecord {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: i64,
    pub height: i64,
}

/// A world as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    pub world: WorldSize,
    #[serde(default)]
    pub islands: Vec<IslandRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_record_defaults() {
        let record: TileRecord = serde_json::from_str(r#"{"rotation": 2}"#).unwrap();
        assert_eq!(record.id, -1);
        assert_eq!(record.rotation, 2);
        assert_eq!((record.x, record.y), (0, 0));
    }

    #[test]
    fn test_layer_record_shape() {
        let layer = LayerRecord::Coast(vec![TileRecord { id: 1201, ..TileRecord::default() }]);
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["coast"][0]["id"], 1201);
    }

    #[test]
    fn test_island_record_parses() {
        let json = r#"{
            "width": 2, "height": 1, "climate": "SOUTH",
            "layers": [
                {"coast": [{"id": 1201}, {"id": 1201}]},
                {"terrain": [{"id": 101, "rotation": 3}, {}]}
            ]
        }"#;
        let record = IslandRecord::from_json_str(json).unwrap();
        assert_eq!((record.x, record.y), (-1, -1));
        assert_eq!(record.climate, ClimateZone::South);
        assert_eq!(record.layers.len(), 2);

        let tile = Tile::from(&record.layers[1].tiles()[0]);
        assert_eq!(tile.building_id, BuildingId(101));
        assert_eq!(tile.rotation, Rotation::Deg270);
        assert!(!Tile::from(&record.layers[1].tiles()[1]).has_building());
    }

    #[test]
    fn test_world_record_parses() {
        let json = r#"{"world": {"width": 500, "height": 350}, "islands": []}"#;
        let record: WorldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.world.width, 500);
        assert!(record.islands.is_empty());
    }
}
