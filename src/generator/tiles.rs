//! Turning classified cells into building ids and rotations.

use rand::Rng;

use super::edges::{edge_type, EdgeType};
use super::rings::{MapCell, Ring};
use crate::buildings::{
    BEACH, BEACH_CORNER, BEACH_CORNER_INSIDE, DEEP_WATER, EMBANKMENT, EMBANKMENT_CORNER,
    EMBANKMENT_CORNER_INSIDE, GRASS, MEDIUM_TO_DEEP, MEDIUM_WATER, NORTH_TREES, SHALLOW_TO_MEDIUM,
    SHALLOW_WATER, SOUTH_TREES,
};
use crate::record::ClimateZone;
use crate::rotation::Rotation;
use crate::tile::BuildingId;

/// What a cell resolves to before a concrete building is picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Land,
    /// A ring cell whose neighbours form a known shape
    Edge(Ring, EdgeType),
    /// A ring cell with an unknown neighbour pattern
    Plain(Ring),
    DeepWater,
}

/// Resolve a cell from its classification and bitmask.
pub fn resolve(cell: MapCell, bitmask: i32) -> TileKind {
    match cell {
        MapCell::Terrain => TileKind::Land,
        MapCell::Water | MapCell::Invalid => TileKind::DeepWater,
        ring_cell => match Ring::from_cell(ring_cell) {
            Some(ring) => match edge_type(ring, bitmask) {
                Some(edge) => TileKind::Edge(ring, edge),
                None => TileKind::Plain(ring),
            },
            None => TileKind::DeepWater,
        },
    }
}

fn pick(rng: &mut impl Rng, ids: &[BuildingId]) -> BuildingId {
    ids[rng.gen_range(0..ids.len())]
}

fn trees(climate: ClimateZone) -> &'static [BuildingId] {
    match climate {
        ClimateZone::North => &NORTH_TREES,
        ClimateZone::South => &SOUTH_TREES,
    }
}

/// Building for the terrain layer; `None` leaves the cell empty.
pub fn terrain_building(
    kind: TileKind,
    climate: ClimateZone,
    rng: &mut impl Rng,
) -> Option<(BuildingId, Rotation)> {
    use EdgeType::*;
    use Rotation::*;

    match kind {
        TileKind::Land => {
            // Roughly a third of the land grows trees
            if rng.gen_range(0..=10) >= 7 {
                Some((pick(rng, trees(climate)), Deg0))
            } else {
                Some((GRASS, Deg0))
            }
        }
        TileKind::Edge(Ring::Embankment, edge) => Some(match edge {
            Top => (pick(rng, &EMBANKMENT), Deg180),
            Bottom => (pick(rng, &EMBANKMENT), Deg0),
            Left => (pick(rng, &EMBANKMENT), Deg90),
            Right => (pick(rng, &EMBANKMENT), Deg270),
            CornerOutTl => (pick(rng, &EMBANKMENT_CORNER), Deg90),
            CornerOutTr => (pick(rng, &EMBANKMENT_CORNER), Deg180),
            CornerOutBl => (pick(rng, &EMBANKMENT_CORNER), Deg0),
            CornerOutBr => (pick(rng, &EMBANKMENT_CORNER), Deg270),
            CornerInTl => (pick(rng, &EMBANKMENT_CORNER_INSIDE), Deg270),
            CornerInTr => (pick(rng, &EMBANKMENT_CORNER_INSIDE), Deg0),
            CornerInBl => (pick(rng, &EMBANKMENT_CORNER_INSIDE), Deg180),
            CornerInBr => (pick(rng, &EMBANKMENT_CORNER_INSIDE), Deg90),
        }),
        TileKind::Plain(Ring::Embankment) => Some((GRASS, Deg0)),
        _ => None,
    }
}

/// Building for the coast layer. Every cell gets one; land and
/// embankment cells sit on deep water below the terrain layer.
pub fn coast_building(kind: TileKind) -> (BuildingId, Rotation) {
    use EdgeType::*;
    use Rotation::*;

    match kind {
        TileKind::Edge(Ring::Coast, edge) => match edge {
            Top => (BEACH, Deg270),
            Bottom => (BEACH, Deg90),
            Left => (BEACH, Deg180),
            Right => (BEACH, Deg0),
            CornerOutTl => (BEACH_CORNER, Deg90),
            CornerOutTr => (BEACH_CORNER, Deg180),
            CornerOutBl => (BEACH_CORNER, Deg0),
            CornerOutBr => (BEACH_CORNER, Deg270),
            CornerInTl => (BEACH_CORNER_INSIDE, Deg90),
            CornerInTr => (BEACH_CORNER_INSIDE, Deg180),
            CornerInBl => (BEACH_CORNER_INSIDE, Deg0),
            CornerInBr => (BEACH_CORNER_INSIDE, Deg270),
        },
        TileKind::Plain(Ring::Coast) => (BEACH, Deg0),
        TileKind::Edge(Ring::ShallowWater, edge) => transition(edge, SHALLOW_TO_MEDIUM, SHALLOW_WATER),
        TileKind::Plain(Ring::ShallowWater) => (SHALLOW_WATER, Deg0),
        TileKind::Edge(Ring::MediumWater, edge) => transition(edge, MEDIUM_TO_DEEP, MEDIUM_WATER),
        TileKind::Plain(Ring::MediumWater) => (MEDIUM_WATER, Deg0),
        _ => (DEEP_WATER, Deg0),
    }
}

/// Open water only draws transitions at outer corners.
fn transition(edge: EdgeType, corner: BuildingId, plain: BuildingId) -> (BuildingId, Rotation) {
    match edge {
        EdgeType::CornerOutTl => (corner, Rotation::Deg270),
        EdgeType::CornerOutTr => (corner, Rotation::Deg0),
        EdgeType::CornerOutBl => (corner, Rotation::Deg180),
        EdgeType::CornerOutBr => (corner, Rotation::Deg90),
        _ => (plain, Rotation::Deg0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_resolve_falls_back_to_plain() {
        assert_eq!(resolve(MapCell::Coast, 512), TileKind::Plain(Ring::Coast));
        assert_eq!(
            resolve(MapCell::Coast, 512 + 31),
            TileKind::Edge(Ring::Coast, EdgeType::Top)
        );
        assert_eq!(resolve(MapCell::Water, 1279), TileKind::DeepWater);
        assert_eq!(resolve(MapCell::Terrain, 17), TileKind::Land);
    }

    #[test]
    fn test_embankment_shapes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let (id, rotation) =
            terrain_building(TileKind::Edge(Ring::Embankment, EdgeType::Top), ClimateZone::North, &mut rng)
                .unwrap();
        assert!(EMBANKMENT.contains(&id));
        assert_eq!(rotation, Rotation::Deg180);

        let (id, rotation) = terrain_building(
            TileKind::Edge(Ring::Embankment, EdgeType::CornerInBr),
            ClimateZone::North,
            &mut rng,
        )
        .unwrap();
        assert!(EMBANKMENT_CORNER_INSIDE.contains(&id));
        assert_eq!(rotation, Rotation::Deg90);

        assert_eq!(
            terrain_building(TileKind::Plain(Ring::Embankment), ClimateZone::North, &mut rng),
            Some((GRASS, Rotation::Deg0))
        );
        assert_eq!(
            terrain_building(TileKind::Plain(Ring::Coast), ClimateZone::North, &mut rng),
            None
        );
    }

    #[test]
    fn test_land_decoration_follows_climate() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut tree_count = 0;

        for _ in 0..200 {
            let (id, _) = terrain_building(TileKind::Land, ClimateZone::South, &mut rng).unwrap();
            assert!(id == GRASS || SOUTH_TREES.contains(&id));
            assert!(!NORTH_TREES.contains(&id));
            if id != GRASS {
                tree_count += 1;
            }
        }
        assert!(tree_count > 0 && tree_count < 200);
    }

    #[test]
    fn test_seeded_decoration_repeats() {
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50)
                .map(|_| terrain_building(TileKind::Land, ClimateZone::North, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn test_coast_layer_buildings() {
        assert_eq!(
            coast_building(TileKind::Edge(Ring::Coast, EdgeType::Left)),
            (BEACH, Rotation::Deg180)
        );
        assert_eq!(
            coast_building(TileKind::Edge(Ring::ShallowWater, EdgeType::CornerOutTr)),
            (SHALLOW_TO_MEDIUM, Rotation::Deg0)
        );
        assert_eq!(
            coast_building(TileKind::Edge(Ring::ShallowWater, EdgeType::Top)),
            (SHALLOW_WATER, Rotation::Deg0)
        );
        assert_eq!(
            coast_building(TileKind::Edge(Ring::MediumWater, EdgeType::CornerOutBl)),
            (MEDIUM_TO_DEEP, Rotation::Deg180)
        );
        assert_eq!(coast_building(TileKind::Land), (DEEP_WATER, Rotation::Deg0));
    }
}
