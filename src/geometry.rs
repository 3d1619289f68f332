use num_integer::Roots;
use std::ops::{Add, Neg, Sub};

// For distance calculations, how many units to divide one cell length into.
const SUB_UNITS: i64 = 100;

/// One cell location on the 3D layout grid. `y` is the vertical (layer) axis.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        GridPoint { x, y, z }
    }

    /// One step along the vertical axis, signed.
    pub const fn vertical(step: i32) -> Self {
        GridPoint::new(0, step, 0)
    }
}

impl Add for GridPoint {
    type Output = GridPoint;

    fn add(self, other: GridPoint) -> GridPoint {
        GridPoint::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for GridPoint {
    type Output = GridPoint;

    fn sub(self, other: GridPoint) -> GridPoint {
        GridPoint::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for GridPoint {
    type Output = GridPoint;

    fn neg(self) -> GridPoint {
        GridPoint::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for GridPoint {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        GridPoint::new(x, y, z)
    }
}

/// The three grid axes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// The four horizontal unit directions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosZ,
        Direction::NegZ,
    ];

    pub fn offset(self) -> GridPoint {
        match self {
            Direction::PosX => GridPoint::new(1, 0, 0),
            Direction::NegX => GridPoint::new(-1, 0, 0),
            Direction::PosZ => GridPoint::new(0, 0, 1),
            Direction::NegZ => GridPoint::new(0, 0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// Index into per-side arrays, in `Direction::ALL` order.
    pub fn index(self) -> usize {
        match self {
            Direction::PosX => 0,
            Direction::NegX => 1,
            Direction::PosZ => 2,
            Direction::NegZ => 3,
        }
    }

    /// The direction a horizontal unit offset points in, if it is one.
    pub fn from_offset(offset: GridPoint) -> Option<Direction> {
        match (offset.x, offset.y, offset.z) {
            (1, 0, 0) => Some(Direction::PosX),
            (-1, 0, 0) => Some(Direction::NegX),
            (0, 0, 1) => Some(Direction::PosZ),
            (0, 0, -1) => Some(Direction::NegZ),
            _ => None,
        }
    }

    /// This direction after rotating its owner about the vertical axis.
    pub fn rotated(self, rotation: Rotation) -> Direction {
        match rotation {
            Rotation::R0 => self,
            Rotation::R90 => match self {
                Direction::PosX => Direction::NegZ,
                Direction::NegX => Direction::PosZ,
                Direction::PosZ => Direction::PosX,
                Direction::NegZ => Direction::NegX,
            },
            Rotation::R180 => self.opposite(),
            Rotation::R270 => match self {
                Direction::PosX => Direction::PosZ,
                Direction::NegX => Direction::NegZ,
                Direction::PosZ => Direction::NegX,
                Direction::NegZ => Direction::PosX,
            },
        }
    }

    /// The renderer rotation for an object facing this direction.
    pub fn facing_rotation(self) -> Rotation {
        match self {
            Direction::PosZ => Rotation::R0,
            Direction::PosX => Rotation::R90,
            Direction::NegZ => Rotation::R180,
            Direction::NegX => Rotation::R270,
        }
    }
}

/// Quarter-turn rotations about the vertical axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Rotate a local offset about the vertical axis through the origin.
    /// Exact axis swaps; no trigonometry.
    pub fn apply(self, p: GridPoint) -> GridPoint {
        match self {
            Rotation::R0 => p,
            Rotation::R90 => GridPoint::new(p.z, p.y, -p.x),
            Rotation::R180 => GridPoint::new(-p.x, p.y, -p.z),
            Rotation::R270 => GridPoint::new(-p.z, p.y, p.x),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

/// Manhattan distance over the two horizontal axes only.
pub fn manhattan_xz(a: GridPoint, b: GridPoint) -> i32 {
    (a.x - b.x).abs() + (a.z - b.z).abs()
}

pub fn euclidean_distance(a: GridPoint, b: GridPoint) -> f32 {
    ((a.x as f32 - b.x as f32).powi(2)
        + (a.y as f32 - b.y as f32).powi(2)
        + (a.z as f32 - b.z as f32).powi(2))
    .sqrt()
}

/// Euclidean distance in integer sub-units of a cell length.
pub fn sub_unit_distance(a: GridPoint, b: GridPoint) -> u64 {
    (((a.x - b.x) as i64 * SUB_UNITS).pow(2)
        + ((a.y - b.y) as i64 * SUB_UNITS).pow(2)
        + ((a.z - b.z) as i64 * SUB_UNITS).pow(2))
    .sqrt() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_rotation_swaps_axes() {
        assert_eq!(
            GridPoint::new(2, 5, -1),
            Rotation::R90.apply(GridPoint::new(1, 5, 2)),
        );
    }

    #[test]
    fn half_rotation_negates_horizontal_axes() {
        assert_eq!(
            GridPoint::new(-1, 5, -2),
            Rotation::R180.apply(GridPoint::new(1, 5, 2)),
        );
    }

    #[test]
    fn three_quarter_rotation_is_quarter_applied_thrice() {
        let point = GridPoint::new(3, -1, 7);
        assert_eq!(
            Rotation::R270.apply(point),
            Rotation::R90.apply(Rotation::R90.apply(Rotation::R90.apply(point))),
        );
    }

    #[test]
    fn full_turn_returns_every_direction_home() {
        for direction in Direction::ALL.iter() {
            assert_eq!(
                *direction,
                direction
                    .rotated(Rotation::R90)
                    .rotated(Rotation::R90)
                    .rotated(Rotation::R90)
                    .rotated(Rotation::R90),
            );
        }
    }

    #[test]
    fn rotated_direction_matches_rotated_offset() {
        for direction in Direction::ALL.iter() {
            for rotation in Rotation::ALL.iter() {
                assert_eq!(
                    Some(direction.rotated(*rotation)),
                    Direction::from_offset(rotation.apply(direction.offset())),
                );
            }
        }
    }

    #[test]
    fn offset_round_trip() {
        for direction in Direction::ALL.iter() {
            assert_eq!(Some(*direction), Direction::from_offset(direction.offset()));
        }
    }

    #[test]
    fn manhattan_ignores_vertical_axis() {
        assert_eq!(
            7,
            manhattan_xz(GridPoint::new(0, 0, 0), GridPoint::new(3, 9, 4)),
        );
    }

    #[test]
    fn sub_unit_distance_of_unit_diagonal() {
        // sqrt(2) in hundredths of a cell
        assert_eq!(
            141,
            sub_unit_distance(GridPoint::new(0, 0, 0), GridPoint::new(1, 0, 1)),
        );
    }

    #[test]
    fn euclidean_distance_of_axis_step() {
        assert_eq!(
            1.0,
            euclidean_distance(GridPoint::new(4, 2, 4), GridPoint::new(4, 3, 4)),
        );
    }
}
