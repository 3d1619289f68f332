use crate::geometry::GridPoint;

// What does the generator know about each cell?
///////////////////////////////////////////////

/// Classification of one grid cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellKind {
    Empty,
    Room,
    Hallway,
    Stairs,
}

/// The authoritative 3D occupancy map shared by all generation stages.
///
/// Every stage bounds-checks with `in_bounds` before reading or writing;
/// indexing out of bounds is a programmer error and panics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellGrid {
    cells: Vec<CellKind>,
    dims: GridPoint,
}

impl CellGrid {
    /// Returns a new grid of the given dimensions with all cells empty.
    pub fn new(dims: GridPoint) -> Self {
        assert!(
            dims.x > 0 && dims.y > 0 && dims.z > 0,
            "grid dimensions must be positive, got {:?}",
            dims
        );
        let cells = vec![CellKind::Empty; (dims.x * dims.y * dims.z) as usize];

        Self { cells, dims }
    }

    pub fn dims(&self) -> GridPoint {
        self.dims
    }

    pub fn in_bounds(&self, p: GridPoint) -> bool {
        p.x >= 0
            && p.x < self.dims.x
            && p.y >= 0
            && p.y < self.dims.y
            && p.z >= 0
            && p.z < self.dims.z
    }

    pub fn get(&self, p: GridPoint) -> CellKind {
        self.cells[self.index(p)]
    }

    pub fn set(&mut self, p: GridPoint, kind: CellKind) {
        let index = self.index(p);
        self.cells[index] = kind;
    }

    fn index(&self, p: GridPoint) -> usize {
        if !self.in_bounds(p) {
            panic!("grid access out of bounds: {:?} (dims {:?})", p, self.dims);
        }
        (p.x + self.dims.x * (p.z + self.dims.z * p.y)) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = CellGrid::new(GridPoint::new(4, 2, 3));
        for x in 0..4 {
            for y in 0..2 {
                for z in 0..3 {
                    assert_eq!(CellKind::Empty, grid.get(GridPoint::new(x, y, z)));
                }
            }
        }
    }

    #[test]
    fn set_then_get() {
        let mut grid = CellGrid::new(GridPoint::new(4, 2, 3));
        grid.set(GridPoint::new(3, 1, 2), CellKind::Stairs);
        assert_eq!(CellKind::Stairs, grid.get(GridPoint::new(3, 1, 2)));
        assert_eq!(CellKind::Empty, grid.get(GridPoint::new(2, 1, 2)));
    }

    #[test]
    fn bounds() {
        let grid = CellGrid::new(GridPoint::new(4, 2, 3));
        assert!(grid.in_bounds(GridPoint::new(0, 0, 0)));
        assert!(grid.in_bounds(GridPoint::new(3, 1, 2)));
        assert!(!grid.in_bounds(GridPoint::new(4, 1, 2)));
        assert!(!grid.in_bounds(GridPoint::new(3, 1, 3)));
        assert!(!grid.in_bounds(GridPoint::new(-1, 0, 0)));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_get_panics() {
        let grid = CellGrid::new(GridPoint::new(4, 2, 3));
        grid.get(GridPoint::new(0, 2, 0));
    }
}
