//! Terrain core for an isometric island builder
//!
//! Re-exports modules for use by the CLI and host applications.

pub mod ascii;
pub mod buildings;
pub mod error;
pub mod export;
pub mod generator;
pub mod island;
pub mod layer;
pub mod record;
pub mod rotation;
pub mod tile;
pub mod tilemap;
pub mod viewport;
pub mod world;

pub use error::TerrainError;
pub use island::{Island, Placement};
pub use layer::{Layer, LayerType};
pub use rotation::Rotation;
pub use tile::{BuildingId, Tile};
pub use world::World;
