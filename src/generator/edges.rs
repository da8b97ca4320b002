//! Edge and corner shapes recognised from ring bitmasks.

use super::rings::Ring;

/// Shape of a ring cell relative to the land it borders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeType {
    CornerOutTl,
    CornerOutTr,
    CornerOutBl,
    CornerOutBr,
    CornerInTl,
    CornerInTr,
    CornerInBl,
    CornerInBr,
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgeType {
    pub const ALL: [EdgeType; 12] = [
        EdgeType::CornerOutTl,
        EdgeType::CornerOutTr,
        EdgeType::CornerOutBl,
        EdgeType::CornerOutBr,
        EdgeType::CornerInTl,
        EdgeType::CornerInTr,
        EdgeType::CornerInBl,
        EdgeType::CornerInBr,
        EdgeType::Top,
        EdgeType::Bottom,
        EdgeType::Left,
        EdgeType::Right,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EdgeType::CornerOutTl => "CORNER_OUT_TL",
            EdgeType::CornerOutTr => "CORNER_OUT_TR",
            EdgeType::CornerOutBl => "CORNER_OUT_BL",
            EdgeType::CornerOutBr => "CORNER_OUT_BR",
            EdgeType::CornerInTl => "CORNER_IN_TL",
            EdgeType::CornerInTr => "CORNER_IN_TR",
            EdgeType::CornerInBl => "CORNER_IN_BL",
            EdgeType::CornerInBr => "CORNER_IN_BR",
            EdgeType::Top => "TOP",
            EdgeType::Bottom => "BOTTOM",
            EdgeType::Left => "LEFT",
            EdgeType::Right => "RIGHT",
        }
    }
}

use EdgeType::*;

// Neighbour patterns (bitmask minus ring base) per shape. The embankment
// also accepts patterns where a diagonal neighbour of a straight edge is
// land.

const EMBANKMENT_PATTERNS: &[(i32, EdgeType)] = &[
    (127, CornerOutTl),
    (223, CornerOutTr),
    (251, CornerOutBl),
    (254, CornerOutBr),
    (11, CornerInTl),
    (15, CornerInTl),
    (43, CornerInTl),
    (47, CornerInTl),
    (175, CornerInTl),
    (22, CornerInTr),
    (23, CornerInTr),
    (150, CornerInTr),
    (151, CornerInTr),
    (183, CornerInTr),
    (104, CornerInBl),
    (105, CornerInBl),
    (109, CornerInBl),
    (232, CornerInBl),
    (233, CornerInBl),
    (208, CornerInBr),
    (212, CornerInBr),
    (240, CornerInBr),
    (244, CornerInBr),
    (245, CornerInBr),
    (31, Top),
    (63, Top),
    (159, Top),
    (191, Top),
    (248, Bottom),
    (249, Bottom),
    (252, Bottom),
    (253, Bottom),
    (107, Left),
    (111, Left),
    (235, Left),
    (239, Left),
    (214, Right),
    (215, Right),
    (246, Right),
    (247, Right),
];

const COAST_PATTERNS: &[(i32, EdgeType)] = &[
    (127, CornerOutTl),
    (223, CornerOutTr),
    (251, CornerOutBl),
    (254, CornerOutBr),
    (11, CornerInTl),
    (15, CornerInTl),
    (43, CornerInTl),
    (47, CornerInTl),
    (22, CornerInTr),
    (23, CornerInTr),
    (150, CornerInTr),
    (151, CornerInTr),
    (104, CornerInBl),
    (105, CornerInBl),
    (232, CornerInBl),
    (233, CornerInBl),
    (208, CornerInBr),
    (212, CornerInBr),
    (240, CornerInBr),
    (244, CornerInBr),
    (31, Top),
    (63, Top),
    (159, Top),
    (248, Bottom),
    (249, Bottom),
    (252, Bottom),
    (107, Left),
    (111, Left),
    (235, Left),
    (214, Right),
    (215, Right),
    (246, Right),
];

/// Shared by shallow and medium water
const OPEN_WATER_PATTERNS: &[(i32, EdgeType)] = COAST_PATTERNS;

fn patterns(ring: Ring) -> &'static [(i32, EdgeType)] {
    match ring {
        Ring::Embankment => EMBANKMENT_PATTERNS,
        Ring::Coast => COAST_PATTERNS,
        Ring::ShallowWater | Ring::MediumWater => OPEN_WATER_PATTERNS,
    }
}

/// Shape of a ring cell, or `None` if the bitmask matches no known shape.
pub fn edge_type(ring: Ring, bitmask: i32) -> Option<EdgeType> {
    let pattern = bitmask - ring.base();
    patterns(ring)
        .iter()
        .find(|(p, _)| *p == pattern)
        .map(|&(_, edge)| edge)
}

/// A bitmask that resolves to `edge` in `ring`.
pub fn bitmask_for(ring: Ring, edge: EdgeType) -> Option<i32> {
    patterns(ring)
        .iter()
        .find(|(_, e)| *e == edge)
        .map(|&(pattern, _)| ring.base() + pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_unique_per_ring() {
        for ring in Ring::ALL {
            let table = patterns(ring);
            for (i, (a, _)) in table.iter().enumerate() {
                assert!(table[i + 1..].iter().all(|(b, _)| a != b), "{:?} repeats {}", ring, a);
            }
        }
    }

    #[test]
    fn test_every_shape_has_a_bitmask() {
        for ring in Ring::ALL {
            for edge in EdgeType::ALL {
                let bitmask = bitmask_for(ring, edge).unwrap();
                assert_eq!(edge_type(ring, bitmask), Some(edge));
            }
        }
    }

    #[test]
    fn test_known_shapes() {
        assert_eq!(edge_type(Ring::Embankment, 256 + 191), Some(Top));
        assert_eq!(edge_type(Ring::Coast, 512 + 191), None);
        assert_eq!(edge_type(Ring::Coast, 512 + 15), Some(CornerInTl));
        assert_eq!(edge_type(Ring::MediumWater, 1024 + 254), Some(CornerOutBr));
        assert_eq!(edge_type(Ring::ShallowWater, 768), None);
    }
}
