//! Errors raised while loading, generating or editing terrain data.
//!
//! Broken caller contracts (indices out of range, placement batches of the
//! wrong size) are not represented here; those panic.

use crate::generator::MapCell;
use crate::layer::LayerType;

/// Errors that abort a load, generation or edit
#[derive(Debug)]
pub enum TerrainError {
    /// Width or height is zero, negative or too large to index.
    InvalidDimensions { width: i64, height: i64 },
    /// A layer's tile list does not cover `width * height` cells.
    TileCountMismatch {
        layer: LayerType,
        expected: usize,
        actual: usize,
    },
    /// A stored tile rotation outside `0..=3`.
    InvalidRotation { layer: LayerType, rotation: i32 },
    /// A record is missing a layer that has to be present.
    MissingLayer(LayerType),
    /// An island does not fit at its offset inside the world.
    IslandOutOfWorld { x: i32, y: i32 },
    /// A generator parameter is outside its accepted range.
    InvalidParameter(String),
    /// A manual override that the ring tables cannot express.
    InvalidOverride { cell: MapCell, reason: String },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {}x{}", width, height)
            }
            TerrainError::TileCountMismatch { layer, expected, actual } => write!(
                f,
                "Layer {} has {} tiles, expected {}",
                layer.name(),
                actual,
                expected
            ),
            TerrainError::InvalidRotation { layer, rotation } => write!(
                f,
                "Layer {} has a tile with rotation {}, expected 0 to 3",
                layer.name(),
                rotation
            ),
            TerrainError::MissingLayer(layer) => write!(f, "Missing layer: {}", layer.name()),
            TerrainError::IslandOutOfWorld { x, y } => {
                write!(f, "Island at ({}, {}) lies outside the world", x, y)
            }
            TerrainError::InvalidParameter(e) => write!(f, "Invalid parameter: {}", e),
            TerrainError::InvalidOverride { cell, reason } => {
                write!(f, "Cannot override cell to {}: {}", cell.name(), reason)
            }
            TerrainError::Io(e) => write!(f, "IO error: {}", e),
            TerrainError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            TerrainError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Json(e)
    }
}
