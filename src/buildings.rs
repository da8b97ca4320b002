//! Building ids and the catalog that describes them.
//!
//! The generator only emits the ids listed here. Every other id has to be
//! registered in a [`BuildingCatalog`] before it can be placed.

use std::collections::HashMap;

use crate::tile::BuildingId;

// =============================================================================
// GENERATOR IDS
// =============================================================================

pub const GRASS: BuildingId = BuildingId(101);

pub const EMBANKMENT: [BuildingId; 10] = [
    BuildingId(1011),
    BuildingId(1012),
    BuildingId(1013),
    BuildingId(1014),
    BuildingId(1015),
    BuildingId(1016),
    BuildingId(1017),
    BuildingId(1018),
    BuildingId(1019),
    BuildingId(1020),
];
pub const EMBANKMENT_CORNER: [BuildingId; 3] = [BuildingId(1051), BuildingId(1052), BuildingId(1053)];
pub const EMBANKMENT_CORNER_INSIDE: [BuildingId; 4] =
    [BuildingId(1031), BuildingId(1032), BuildingId(1033), BuildingId(1034)];

pub const DEEP_WATER: BuildingId = BuildingId(1201);
pub const SHALLOW_TO_MEDIUM: BuildingId = BuildingId(1202);
pub const SHALLOW_WATER: BuildingId = BuildingId(1203);
pub const MEDIUM_WATER: BuildingId = BuildingId(1204);
pub const BEACH: BuildingId = BuildingId(1205);
pub const BEACH_CORNER_INSIDE: BuildingId = BuildingId(1206);
pub const BEACH_CORNER: BuildingId = BuildingId(1207);
pub const BEACH_MOUTH: BuildingId = BuildingId(1208);
pub const MEDIUM_TO_DEEP: BuildingId = BuildingId(1209);

/// Trees for islands in the north, ids 1304..=1324 in steps of two
pub const NORTH_TREES: [BuildingId; 11] = [
    BuildingId(1304),
    BuildingId(1306),
    BuildingId(1308),
    BuildingId(1310),
    BuildingId(1312),
    BuildingId(1314),
    BuildingId(1316),
    BuildingId(1318),
    BuildingId(1320),
    BuildingId(1322),
    BuildingId(1324),
];

/// Trees for islands in the south, ids 1352..=1372 in steps of two
pub const SOUTH_TREES: [BuildingId; 11] = [
    BuildingId(1352),
    BuildingId(1354),
    BuildingId(1356),
    BuildingId(1358),
    BuildingId(1360),
    BuildingId(1362),
    BuildingId(1364),
    BuildingId(1366),
    BuildingId(1368),
    BuildingId(1370),
    BuildingId(1372),
];

/// Buildings drawn without rotation regardless of the tile's rotation
pub const NON_ROTATABLE: [BuildingId; 3] = [BuildingId(605), BuildingId(1073), BuildingId(1331)];

// =============================================================================
// CATALOG
// =============================================================================

/// What the core needs to know about a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingInfo {
    /// Footprint in cells
    pub width: usize,
    pub height: usize,
    /// Height of the ground the sprite stands on; 0 for water and coast
    pub elevation: i32,
    pub rotatable: bool,
}

impl BuildingInfo {
    pub fn single(elevation: i32) -> Self {
        Self {
            width: 1,
            height: 1,
            elevation,
            rotatable: true,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Raised above water and coast, so other buildings may stand on it.
    pub fn is_buildable_ground(&self) -> bool {
        self.elevation > 0
    }
}

/// Lookup of building data by id.
pub trait BuildingCatalog {
    fn lookup(&self, id: BuildingId) -> Option<&BuildingInfo>;

    /// Like [`BuildingCatalog::lookup`] but treats unknown ids as a broken caller.
    fn info(&self, id: BuildingId) -> &BuildingInfo {
        match self.lookup(id) {
            Some(info) => info,
            None => panic!("building {} is not registered in the catalog", id),
        }
    }
}

/// A catalog held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    entries: HashMap<BuildingId, BuildingInfo>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every id the island generator can emit.
    pub fn with_generator_defaults() -> Self {
        let mut catalog = Self::new();

        // Land: one elevation step above the sea
        catalog.insert(GRASS, BuildingInfo::single(1));
        for &id in EMBANKMENT.iter().chain(&EMBANKMENT_CORNER).chain(&EMBANKMENT_CORNER_INSIDE) {
            catalog.insert(id, BuildingInfo::single(1));
        }
        for &id in NORTH_TREES.iter().chain(&SOUTH_TREES) {
            catalog.insert(id, BuildingInfo::single(1));
        }

        // Coast and water sit at sea level
        for id in [
            DEEP_WATER,
            SHALLOW_TO_MEDIUM,
            SHALLOW_WATER,
            MEDIUM_WATER,
            BEACH,
            BEACH_CORNER_INSIDE,
            BEACH_CORNER,
            BEACH_MOUTH,
            MEDIUM_TO_DEEP,
        ] {
            catalog.insert(id, BuildingInfo::single(0));
        }

        catalog
    }

    pub fn insert(&mut self, id: BuildingId, mut info: BuildingInfo) {
        if NON_ROTATABLE.contains(&id) {
            info.rotatable = false;
        }
        self.entries.insert(id, info);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BuildingCatalog for StaticCatalog {
    fn lookup(&self, id: BuildingId) -> Option<&BuildingInfo> {
        self.entries.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_sets_step_by_two() {
        for trees in [NORTH_TREES, SOUTH_TREES] {
            for pair in trees.windows(2) {
                assert_eq!(pair[1].0 - pair[0].0, 2);
            }
        }
        assert_eq!(NORTH_TREES[10], BuildingId(1324));
        assert_eq!(SOUTH_TREES[10], BuildingId(1372));
    }

    #[test]
    fn test_generator_defaults_cover_land_and_water() {
        let catalog = StaticCatalog::with_generator_defaults();
        assert!(catalog.info(GRASS).is_buildable_ground());
        assert!(catalog.info(EMBANKMENT_CORNER[2]).is_buildable_ground());
        assert!(!catalog.info(BEACH).is_buildable_ground());
        assert!(!catalog.info(DEEP_WATER).is_buildable_ground());
        assert!(catalog.lookup(BuildingId(9999)).is_none());
    }

    #[test]
    fn test_non_rotatable_ids_are_forced() {
        let mut catalog = StaticCatalog::new();
        catalog.insert(BuildingId(605), BuildingInfo::single(1));
        assert!(!catalog.info(BuildingId(605)).rotatable);
    }

    #[test]
    #[should_panic]
    fn test_unknown_id_panics() {
        let catalog = StaticCatalog::new();
        catalog.info(BuildingId(42));
    }
}
