//! Ring carving: water cells next to land are peeled off into embankment,
//! coast, shallow and medium water, one ring at a time.
//!
//! Every cell carries a bitmask of `ring base + neighbour bits`. A bit is set
//! for each neighbour that is still plain water or lies off the grid, so a
//! water cell with at least one non-water neighbour lands in
//! `[base, base + 255)` and joins the ring.

use rayon::prelude::*;

use crate::tilemap::Tilemap;

/// Classification of a generator cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MapCell {
    Terrain,
    Embankment,
    Coast,
    ShallowWater,
    MediumWater,
    #[default]
    Water,
    Invalid,
}

impl MapCell {
    pub fn name(&self) -> &'static str {
        match self {
            MapCell::Terrain => "TERRAIN",
            MapCell::Embankment => "EMBANKMENT",
            MapCell::Coast => "COAST",
            MapCell::ShallowWater => "SHALLOW_WATER",
            MapCell::MediumWater => "MEDIUM_WATER",
            MapCell::Water => "WATER",
            MapCell::Invalid => "INVALID",
        }
    }

    /// Position in the carving order; rings only ever move cells forward.
    pub fn order(&self) -> u8 {
        match self {
            MapCell::Terrain | MapCell::Water => 0,
            MapCell::Embankment => 1,
            MapCell::Coast => 2,
            MapCell::ShallowWater => 3,
            MapCell::MediumWater => 4,
            MapCell::Invalid => u8::MAX,
        }
    }
}

/// Neighbour bits in [`crate::tilemap::NEIGHBOR_OFFSETS`] order.
pub const NW: i32 = 1;
pub const N: i32 = 2;
pub const NE: i32 = 4;
pub const W: i32 = 8;
pub const E: i32 = 16;
pub const SW: i32 = 32;
pub const S: i32 = 64;
pub const SE: i32 = 128;

const NEIGHBOR_FLAGS: [i32; 8] = [NW, N, NE, W, E, SW, S, SE];

/// All eight neighbour bits set
pub const ALL_NEIGHBORS: i32 = 255;

pub const TERRAIN_FLAG: i32 = 0;
/// Water left over after the last ring
pub const WATER_FLAG: i32 = Ring::MediumWater.base() + ALL_NEIGHBORS;

/// The rings in carving order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ring {
    Embankment,
    Coast,
    ShallowWater,
    MediumWater,
}

impl Ring {
    pub const ALL: [Ring; 4] = [Ring::Embankment, Ring::Coast, Ring::ShallowWater, Ring::MediumWater];

    pub const fn base(&self) -> i32 {
        match self {
            Ring::Embankment => 256,
            Ring::Coast => 512,
            Ring::ShallowWater => 768,
            Ring::MediumWater => 1024,
        }
    }

    /// Bitmask values that put a water cell into this ring.
    pub fn band(&self) -> std::ops::Range<i32> {
        self.base()..self.base() + ALL_NEIGHBORS
    }

    pub fn cell(&self) -> MapCell {
        match self {
            Ring::Embankment => MapCell::Embankment,
            Ring::Coast => MapCell::Coast,
            Ring::ShallowWater => MapCell::ShallowWater,
            Ring::MediumWater => MapCell::MediumWater,
        }
    }

    pub fn from_cell(cell: MapCell) -> Option<Ring> {
        match cell {
            MapCell::Embankment => Some(Ring::Embankment),
            MapCell::Coast => Some(Ring::Coast),
            MapCell::ShallowWater => Some(Ring::ShallowWater),
            MapCell::MediumWater => Some(Ring::MediumWater),
            _ => None,
        }
    }
}

/// Bits of the neighbours of `(x, y)` that are water or off the grid.
pub fn neighbor_bits(mask: &Tilemap<MapCell>, x: usize, y: usize) -> i32 {
    mask.neighbors_8(x, y)
        .iter()
        .zip(NEIGHBOR_FLAGS)
        .filter(|(neighbor, _)| neighbor.map_or(true, |cell| *cell == MapCell::Water))
        .map(|(_, flag)| flag)
        .sum()
}

/// Classification a bitmask value stands for.
pub fn classify_bitmask(bitmask: i32) -> MapCell {
    if (TERRAIN_FLAG..=ALL_NEIGHBORS).contains(&bitmask) {
        return MapCell::Terrain;
    }
    if bitmask == WATER_FLAG {
        return MapCell::Water;
    }
    Ring::ALL
        .iter()
        .find(|ring| ring.band().contains(&bitmask))
        .map_or(MapCell::Invalid, |ring| ring.cell())
}

/// Carve one ring. All bitmasks are computed against the mask as it was
/// before the ring, then committed. Returns the number of cells carved.
pub fn carve_ring(mask: &mut Tilemap<MapCell>, bitmask: &mut Tilemap<i32>, ring: Ring) -> usize {
    let width = mask.width;
    let before: &Tilemap<MapCell> = mask;

    let computed: Vec<Option<i32>> = (0..before.len())
        .into_par_iter()
        .map(|i| {
            let (x, y) = (i % width, i / width);
            match before.as_slice()[i] {
                MapCell::Water => Some(ring.base() + neighbor_bits(before, x, y)),
                // Land gets its bitmask once, with the first ring
                MapCell::Terrain if ring == Ring::Embankment => {
                    Some(TERRAIN_FLAG + neighbor_bits(before, x, y))
                }
                _ => None,
            }
        })
        .collect();

    let band = ring.band();
    let mut carved = 0;
    for (i, value) in computed.into_iter().enumerate() {
        let Some(value) = value else { continue };
        bitmask.as_mut_slice()[i] = value;

        let cell = &mut mask.as_mut_slice()[i];
        if *cell == MapCell::Water && band.contains(&value) {
            *cell = ring.cell();
            carved += 1;
        }
    }

    carved
}

/// Carve every ring in order. Returns the bitmask map and the number of
/// cells each ring took.
pub fn carve_rings(mask: &mut Tilemap<MapCell>) -> (Tilemap<i32>, Vec<(Ring, usize)>) {
    let mut bitmask = Tilemap::new_with(mask.width, mask.height, WATER_FLAG);
    let stats = Ring::ALL
        .iter()
        .map(|&ring| (ring, carve_ring(mask, &mut bitmask, ring)))
        .collect();

    (bitmask, stats)
}
