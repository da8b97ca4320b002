//! ASCII rendering and export of generated islands
//!
//! Used by the CLI to inspect the classification passes without a renderer.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

use crate::generator::{EdgeType, GeneratedIsland, MapCell, TileKind};

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// Show cell classification
    Cells,
    /// Show resolved edge and corner shapes
    Edges,
    /// Show elevation gradient
    Elevation,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Cells => "Cells",
            AsciiMode::Edges => "Edges",
            AsciiMode::Elevation => "Elevation",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[AsciiMode::Cells, AsciiMode::Edges, AsciiMode::Elevation]
    }
}

pub fn cell_char(cell: MapCell) -> char {
    match cell {
        MapCell::Terrain => '#',
        MapCell::Embankment => 'E',
        MapCell::Coast => 'c',
        MapCell::ShallowWater => ':',
        MapCell::MediumWater => '.',
        MapCell::Water => '~',
        MapCell::Invalid => '?',
    }
}

/// Box drawing character for a resolved shape; plain cells use their
/// classification character.
pub fn edge_char(kind: TileKind) -> char {
    match kind {
        TileKind::Land => '#',
        TileKind::DeepWater => '~',
        TileKind::Plain(ring) => cell_char(ring.cell()),
        TileKind::Edge(_, edge) => match edge {
            EdgeType::CornerOutTl => '┌',
            EdgeType::CornerOutTr => '┐',
            EdgeType::CornerOutBl => '└',
            EdgeType::CornerOutBr => '┘',
            EdgeType::CornerInTl => '╯',
            EdgeType::CornerInTr => '╰',
            EdgeType::CornerInBl => '╮',
            EdgeType::CornerInBr => '╭',
            EdgeType::Top | EdgeType::Bottom => '─',
            EdgeType::Left | EdgeType::Right => '│',
        },
    }
}

pub fn elevation_char(elevation: f64) -> char {
    const GRADIENT: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
    let idx = (elevation.clamp(0.0, 1.0) * 9.0).round() as usize;
    GRADIENT[idx]
}

/// Render the island as one line per row.
pub fn render_ascii(island: &GeneratedIsland, mode: AsciiMode) -> String {
    let mut output = String::with_capacity((island.width() + 1) * island.height());

    for y in 0..island.height() {
        for x in 0..island.width() {
            let c = match mode {
                AsciiMode::Cells => cell_char(*island.mask.get(x, y)),
                AsciiMode::Edges => edge_char(island.tile_kind(x, y)),
                AsciiMode::Elevation => elevation_char(*island.elevation.get(x, y)),
            };
            output.push(c);
        }
        output.push('\n');
    }

    output
}

pub fn cell_legend() -> String {
    let mut legend = String::from("=== LEGEND ===\n");
    for cell in [
        MapCell::Terrain,
        MapCell::Embankment,
        MapCell::Coast,
        MapCell::ShallowWater,
        MapCell::MediumWater,
        MapCell::Water,
    ] {
        legend.push_str(&format!("{} {}\n", cell_char(cell), cell.name()));
    }
    legend
}

/// Write every view plus statistics to a text file.
pub fn export_ascii(island: &GeneratedIsland, path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    let params = &island.params;

    // Header
    writeln!(file, "=== ISLAND FILE ===")?;
    writeln!(file, "Seed: {}", params.seed)?;
    writeln!(file, "Size: {}x{}", params.width, params.height)?;
    writeln!(file, "Frequency: {}", params.frequency)?;
    writeln!(file, "Water level: {}", params.water_level)?;
    writeln!(file, "Climate: {}", params.climate.name())?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    for &mode in AsciiMode::all() {
        writeln!(file, "=== MAP ({} View) ===", mode.name())?;
        write!(file, "{}", render_ascii(island, mode))?;
        writeln!(file)?;
    }

    write!(file, "{}", cell_legend())?;
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    writeln!(file, "Land: {}", island.count(MapCell::Terrain))?;
    for (ring, carved) in &island.ring_stats {
        writeln!(file, "{}: {}", ring.cell().name(), carved)?;
    }
    writeln!(file, "Open water: {}", island.count(MapCell::Water))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_island, GeneratorParams, Ring};
    use tempfile::tempdir;

    #[test]
    fn test_render_dimensions() {
        let params = GeneratorParams {
            width: 12,
            height: 7,
            ..GeneratorParams::default()
        };
        let island = generate_island(&params).unwrap();

        for &mode in AsciiMode::all() {
            let map = render_ascii(&island, mode);
            let lines: Vec<&str> = map.lines().collect();
            assert_eq!(lines.len(), 7);
            assert!(lines.iter().all(|l| l.chars().count() == 12));
        }
    }

    #[test]
    fn test_edge_chars() {
        assert_eq!(edge_char(TileKind::Edge(Ring::Coast, EdgeType::Top)), '─');
        assert_eq!(edge_char(TileKind::Plain(Ring::ShallowWater)), ':');
        assert_eq!(elevation_char(0.0), ' ');
        assert_eq!(elevation_char(1.0), '@');
    }

    #[test]
    fn test_export_writes_statistics() {
        let island = generate_island(&GeneratorParams::default()).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("island.txt");
        export_ascii(&island, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("=== STATISTICS ==="));
        assert!(text.contains("Seed: 100"));
    }
}
