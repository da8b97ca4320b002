//! Camera rotations and the rotation-aware tile index.
//!
//! A layer is stored once, row-major in its unrotated orientation. Every
//! other orientation is an index transform over that storage: iterating
//! `sorted_index` from 0 to N-1 for a rotation visits the cells back to
//! front, which is the order the isometric painter needs.

use std::ops::{Add, Sub};

/// One of the four discrete camera rotations, clockwise in 90 degree steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Build a rotation from any integer step count, wrapping modulo 4.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn rotate_cw(self) -> Self {
        self + Rotation::Deg90
    }

    pub fn rotate_ccw(self) -> Self {
        self - Rotation::Deg90
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        Rotation::from_index(-self.index())
    }

    /// True if this rotation exchanges the role of width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    pub fn name(self) -> &'static str {
        match self {
            Rotation::Deg0 => "DEG0",
            Rotation::Deg90 => "DEG90",
            Rotation::Deg180 => "DEG180",
            Rotation::Deg270 => "DEG270",
        }
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::from_index(self.index() + rhs.index())
    }
}

impl Sub for Rotation {
    type Output = Rotation;

    fn sub(self, rhs: Rotation) -> Rotation {
        Rotation::from_index(self.index() - rhs.index())
    }
}

// =============================================================================
// INDEX TRANSFORMS
// =============================================================================

/// Dimensions of a `width` x `height` grid after applying `rotation`.
pub fn rotated_size(width: usize, height: usize, rotation: Rotation) -> (usize, usize) {
    if rotation.swaps_axes() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate a cell of an unrotated `width` x `height` grid.
///
/// `width` and `height` are always the dimensions of the unrotated grid; the
/// axis swap for 90 and 270 degrees happens here, so callers never swap.
/// The result addresses a grid of size `rotated_size(width, height, rotation)`.
pub fn rotate_position(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    rotation: Rotation,
) -> (usize, usize) {
    assert!(x < width && y < height, "({}, {}) outside {}x{}", x, y, width, height);

    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (height - 1 - y, x),
        Rotation::Deg180 => (width - 1 - x, height - 1 - y),
        Rotation::Deg270 => (y, width - 1 - x),
    }
}

/// Signed variant of [`rotate_position`] for points that may lie outside the
/// grid, such as world positions shifted by a camera offset.
pub fn rotate_point(x: i32, y: i32, width: i32, height: i32, rotation: Rotation) -> (i32, i32) {
    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (height - 1 - y, x),
        Rotation::Deg180 => (width - 1 - x, height - 1 - y),
        Rotation::Deg270 => (y, width - 1 - x),
    }
}

/// Map a cell of the rotated grid back to the unrotated `width` x `height` grid.
pub fn unrotate_position(
    rx: usize,
    ry: usize,
    width: usize,
    height: usize,
    rotation: Rotation,
) -> (usize, usize) {
    let (rotated_width, rotated_height) = rotated_size(width, height, rotation);
    rotate_position(rx, ry, rotated_width, rotated_height, rotation.inverse())
}

/// Position of cell `(x, y)` in the scan order for `rotation`.
pub fn sorted_index(x: usize, y: usize, width: usize, height: usize, rotation: Rotation) -> usize {
    let (rx, ry) = rotate_position(x, y, width, height, rotation);
    let (rotated_width, _) = rotated_size(width, height, rotation);

    ry * rotated_width + rx
}

/// Inverse of [`sorted_index`]: the unrotated cell drawn at position `index`.
pub fn cell_at_sorted_index(
    index: usize,
    width: usize,
    height: usize,
    rotation: Rotation,
) -> (usize, usize) {
    let (rotated_width, _) = rotated_size(width, height, rotation);
    unrotate_position(index % rotated_width, index / rotated_width, width, height, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
        assert_eq!(Rotation::Deg0.rotate_ccw(), Rotation::Deg270);
        assert_eq!(Rotation::from_index(-1), Rotation::Deg270);
        assert_eq!(Rotation::from_index(6), Rotation::Deg180);
        assert_eq!(Rotation::Deg90 + Rotation::Deg270, Rotation::Deg0);
        assert_eq!(Rotation::Deg90 - Rotation::Deg180, Rotation::Deg270);

        for r in Rotation::ALL {
            assert_eq!(r + r.inverse(), Rotation::Deg0);
        }
    }

    #[test]
    fn test_identity_at_deg0() {
        for y in 0..4 {
            for x in 0..7 {
                assert_eq!(rotate_position(x, y, 7, 4, Rotation::Deg0), (x, y));
            }
        }
    }

    #[test]
    fn test_rotated_corners() {
        // 3 wide, 2 high
        assert_eq!(rotate_position(0, 0, 3, 2, Rotation::Deg90), (1, 0));
        assert_eq!(rotate_position(2, 1, 3, 2, Rotation::Deg90), (0, 2));
        assert_eq!(rotate_position(0, 0, 3, 2, Rotation::Deg180), (2, 1));
        assert_eq!(rotate_position(0, 0, 3, 2, Rotation::Deg270), (0, 2));
        assert_eq!(rotated_size(3, 2, Rotation::Deg90), (2, 3));
        assert_eq!(rotated_size(3, 2, Rotation::Deg180), (3, 2));
    }

    #[test]
    fn test_sorted_index_is_bijection() {
        for (w, h) in [(1, 1), (1, 5), (4, 4), (7, 3), (12, 9)] {
            for rotation in Rotation::ALL {
                let seen: HashSet<usize> = (0..h)
                    .flat_map(|y| (0..w).map(move |x| (x, y)))
                    .map(|(x, y)| sorted_index(x, y, w, h, rotation))
                    .collect();

                assert_eq!(seen.len(), w * h, "{}x{} {:?}", w, h, rotation);
                assert!(seen.iter().all(|&i| i < w * h));
            }
        }
    }

    #[test]
    fn test_cell_at_sorted_index_inverts() {
        let (w, h) = (6, 4);
        for rotation in Rotation::ALL {
            for y in 0..h {
                for x in 0..w {
                    let index = sorted_index(x, y, w, h, rotation);
                    assert_eq!(cell_at_sorted_index(index, w, h, rotation), (x, y));
                }
            }
        }
    }

    #[test]
    fn test_four_steps_return_home() {
        let (w, h) = (5, 3);
        for step in Rotation::ALL {
            for y in 0..h {
                for x in 0..w {
                    let (mut cx, mut cy) = (x, y);
                    let (mut cw, mut ch) = (w, h);
                    for _ in 0..4 {
                        let next = rotate_position(cx, cy, cw, ch, step);
                        let size = rotated_size(cw, ch, step);
                        cx = next.0;
                        cy = next.1;
                        cw = size.0;
                        ch = size.1;
                    }
                    assert_eq!((cx, cy), (x, y));
                    assert_eq!((cw, ch), (w, h));
                }
            }
        }
    }

    #[test]
    fn test_composed_rotations_match_sum() {
        let (w, h) = (5, 3);
        let (x, y) = (1, 2);
        let once = rotate_position(x, y, w, h, Rotation::Deg90);
        let (w1, h1) = rotated_size(w, h, Rotation::Deg90);
        let twice = rotate_position(once.0, once.1, w1, h1, Rotation::Deg90);

        assert_eq!(twice, rotate_position(x, y, w, h, Rotation::Deg180));
    }

    #[test]
    #[should_panic]
    fn test_column_past_width_panics() {
        sorted_index(3, 0, 3, 2, Rotation::Deg0);
    }
}
