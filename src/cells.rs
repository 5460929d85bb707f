use std::fmt;

use rand::Rng;

use crate::units::{ColumnIndex, RowIndex};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        Cartesian2DCoordinate::new(col_index.0 as u32, row_index.0 as u32)
    }

    /// Manhattan (taxicab) distance between two coordinates.
    #[inline]
    pub fn manhattan_distance(&self, other: Cartesian2DCoordinate) -> u32 {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx + dy
    }

    /// Are the two coordinates one horizontal or vertical step apart?
    pub fn is_adjacent(&self, other: Cartesian2DCoordinate) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const COMPASS_PRIMARY_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                             CompassPrimary::South,
                                                             CompassPrimary::East,
                                                             CompassPrimary::West];

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable (it would be negative or overflow).
///
/// No grid bounds are checked here, that is the grid's job.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate { x, y }),
        CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
        CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
        CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate { x, y }),
    }
}

pub fn rand_direction<R: Rng + ?Sized>(rng: &mut R) -> CompassPrimary {
    let dir_index = rng.gen_range(0..COMPASS_PRIMARY_DIRECTIONS.len());
    COMPASS_PRIMARY_DIRECTIONS[dir_index]
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellState {
    Wall,
    Open,
}

impl CellState {
    #[inline]
    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    #[inline]
    pub fn is_open(self) -> bool {
        self == CellState::Open
    }
}
