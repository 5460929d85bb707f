use std::fmt::Debug;

use crate::cells::Cartesian2DCoordinate;
use crate::pathing::Distances;
use crate::utils;
use crate::utils::FnvHashSet;

pub trait GridDisplay: Debug {
    /// Render the contents of an open grid cell as a single glyph.
    /// None leaves the cell blank.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> Option<char> {
        None
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<char> {
        // Wraps around after 'z', the glyph is only a hint of how far away a cell is.
        self.distance_from_start_to(coord)
            .and_then(|d| std::char::from_digit(d % 36, 36))
    }
}

/// Marks the start, end and the cells in between of a path.
#[derive(Debug)]
pub struct PathDisplay {
    start: Option<Cartesian2DCoordinate>,
    end: Option<Cartesian2DCoordinate>,
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay {
            start: path.first().cloned(),
            end: path.last().cloned(),
            on_path_coordinates,
        }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<char> {
        if self.start == Some(coord) {
            Some('S')
        } else if self.end == Some(coord) {
            Some('E')
        } else if self.on_path_coordinates.contains(&coord) {
            Some('.')
        } else {
            None
        }
    }
}
