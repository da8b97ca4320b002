/// A bounded 2D grid stored row-major. Islands do not wrap, so every
/// neighbour query reports cells past the edge as missing.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

/// Direction offsets in bit order: NW, N, NE, W, E, SW, S, SE
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Tilemap<T> {
    /// Wrap an existing row-major vector. Panics if the length is wrong.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), width * height, "tilemap data does not match {}x{}", width, height);
        Self { width, height, data }
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height, "({}, {}) outside {}x{}", x, y, self.width, self.height);
        y * self.width + x
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// The 8 neighbours in [`NEIGHBOR_OFFSETS`] order; `None` past the edge.
    pub fn neighbors_8(&self, x: usize, y: usize) -> [Option<&T>; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if self.in_bounds(nx, ny) {
                Some(self.get(nx as usize, ny as usize))
            } else {
                None
            }
        })
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Tilemap<U> {
        Tilemap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_at_corner() {
        let mut map: Tilemap<u8> = Tilemap::new(3, 3);
        map.set(1, 0, 5);
        map.set(1, 1, 9);

        let n = map.neighbors_8(0, 0);
        // NW, N, NE, W are past the edge
        assert!(n[0].is_none() && n[1].is_none() && n[2].is_none() && n[3].is_none());
        assert_eq!(n[4], Some(&5));
        assert!(n[5].is_none());
        assert_eq!(n[7], Some(&9));
    }

    #[test]
    fn test_iter_is_row_major() {
        let map = Tilemap::from_vec(2, 2, vec![1, 2, 3, 4]);
        let cells: Vec<_> = map.iter().map(|(x, y, v)| (x, y, *v)).collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let map: Tilemap<u8> = Tilemap::new(2, 2);
        map.get(2, 0);
    }
}
