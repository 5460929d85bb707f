use std::fmt;

use bit_set::BitSet;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// Neighbour visiting order used by the path search. Changing it changes which of several equally
/// short paths is returned.
pub const SEARCH_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::West,
                                                    CompassPrimary::East,
                                                    CompassPrimary::North,
                                                    CompassPrimary::South];

/// A rectangular maze of wall and open cells.
///
/// Walls are stored as set bits in row major order. The outer border of the grid is always wall,
/// so a walk in a straight line from any interior cell always runs into a wall before it can leave
/// the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    walls: BitSet,
    width: Width,
    height: Height,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellEditError {
    InvalidGridCoordinate,
    BorderCell,
}

impl Grid {
    /// A grid with a wall all around the outer border and every interior cell open.
    pub fn bordered(width: Width, height: Height) -> Grid {
        let mut grid = Grid {
            walls: BitSet::with_capacity(width.0 * height.0),
            width,
            height,
        };

        for x in 0..width.0 {
            for y in 0..height.0 {
                if grid.is_border_index(x, y) {
                    grid.walls.insert(y * width.0 + x);
                }
            }
        }

        grid
    }

    /// Parse a grid from rows of text, `#` is a wall and any other character is open.
    ///
    /// Border cells are walls whatever the text says.
    /// Returns None for no rows, empty rows or rows of differing lengths.
    pub fn from_rows(rows: &[&str]) -> Option<Grid> {
        let width = rows.first().map(|row| row.chars().count())?;
        if width == 0 || rows.iter().any(|row| row.chars().count() != width) {
            return None;
        }

        let mut grid = Grid::bordered(Width(width), Height(rows.len()));
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                if glyph == '#' {
                    grid.walls.insert(y * width + x);
                }
            }
        }

        Some(grid)
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    pub fn walls_count(&self) -> usize {
        self.walls.len()
    }

    pub fn open_cells_count(&self) -> usize {
        self.size() - self.walls_count()
    }

    /// The state of a cell, None if the coordinate is outside the grid.
    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| {
            if self.walls.contains(index) {
                CellState::Wall
            } else {
                CellState::Open
            }
        })
    }

    /// Is the cell a wall? Anything outside the grid counts as wall.
    #[inline]
    pub fn is_wall(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(true, CellState::is_wall)
    }

    /// Is the cell inside the grid and walkable?
    #[inline]
    pub fn is_open(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, CellState::is_open)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    pub fn is_border(&self, coord: Cartesian2DCoordinate) -> bool {
        self.is_valid_coordinate(coord) && self.is_border_index(coord.x as usize, coord.y as usize)
    }

    /// Change the state of a single cell.
    ///
    /// Border cells are fixed as walls: walling one is accepted and does nothing, opening one is
    /// an error. Any path computed against the grid before the edit is stale afterwards.
    pub fn set_cell(&mut self,
                    coord: Cartesian2DCoordinate,
                    state: CellState)
                    -> Result<(), CellEditError> {
        let index = self.grid_coordinate_to_index(coord)
            .ok_or(CellEditError::InvalidGridCoordinate)?;

        match state {
            CellState::Wall => {
                let _ = self.walls.insert(index);
                Ok(())
            }
            CellState::Open if self.is_border(coord) => Err(CellEditError::BorderCell),
            CellState::Open => {
                let _ = self.walls.remove(index);
                Ok(())
            }
        }
    }

    /// Mark a cell as wall, returning true if it was open beforehand.
    /// The coordinate must be inside the grid.
    pub(crate) fn build_wall(&mut self, coord: Cartesian2DCoordinate) -> bool {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => self.walls.insert(index),
            None => false,
        }
    }

    /// The open cells to the West, East, North and South of a cell, in that order.
    pub fn open_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        SEARCH_DIRECTIONS.iter()
            .filter_map(|dir| offset_coordinate(coord, *dir))
            .filter(|neighbour| self.is_open(*neighbour))
            .collect()
    }

    /// Convert a grid coordinate to a one dimensional row major index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// All coordinates of the grid, row by row.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian2DCoordinate> {
        (0..self.height.0)
            .cartesian_product(0..self.width.0)
            .map(|(y, x)| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(x), RowIndex(y)))
    }

    pub fn iter_open(&self) -> impl Iterator<Item = Cartesian2DCoordinate> + '_ {
        self.iter().filter(move |coord| self.is_open(*coord))
    }

    /// The top left interior cell, where the player starts in a freshly generated maze.
    pub fn default_start(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(1, 1)
    }

    /// The bottom right interior cell, the conventional goal of a freshly generated maze.
    pub fn default_end(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.width.0.saturating_sub(2) as u32,
                                   self.height.0.saturating_sub(2) as u32)
    }

    /// Text rendering, one glyph per cell: `#` for walls and either a blank or the overlay's
    /// glyph for open cells.
    pub fn render(&self, overlay: Option<&dyn GridDisplay>) -> String {
        let mut output = String::with_capacity((self.width.0 + 1) * self.height.0);

        for y in 0..self.height.0 {
            for x in 0..self.width.0 {
                let coord = Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(x),
                                                                           RowIndex(y));
                let glyph = if self.is_wall(coord) {
                    '#'
                } else {
                    overlay.and_then(|display| display.render_cell_body(coord))
                        .unwrap_or(' ')
                };
                output.push(glyph);
            }
            output.push('\n');
        }

        output
    }

    #[inline]
    fn is_border_index(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width.0 || y + 1 == self.height.0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn bordered_grid_walls() {
        let g = Grid::bordered(Width(5), Height(4));
        assert_eq!(g.size(), 20);
        // 2 rows of 5 plus 2 columns of 2
        assert_eq!(g.walls_count(), 14);
        assert_eq!(g.open_cells_count(), 6);

        for coord in g.iter() {
            assert_eq!(g.is_border(coord), g.is_wall(coord));
        }
    }

    #[test]
    fn cells_outside_the_grid() {
        let g = Grid::bordered(Width(3), Height(3));
        assert_eq!(g.cell(gc(3, 0)), None);
        assert_eq!(g.cell(gc(0, 3)), None);
        assert!(g.is_wall(gc(10, 10)));
        assert!(!g.is_open(gc(10, 10)));
        assert!(!g.is_border(gc(10, 10)));
        assert_eq!(g.cell(gc(1, 1)), Some(CellState::Open));
    }

    #[test]
    fn row_major_indices() {
        let g = Grid::bordered(Width(4), Height(3));
        assert_eq!(g.grid_coordinate_to_index(gc(0, 0)), Some(0));
        assert_eq!(g.grid_coordinate_to_index(gc(3, 0)), Some(3));
        assert_eq!(g.grid_coordinate_to_index(gc(0, 1)), Some(4));
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), Some(11));
        assert_eq!(g.grid_coordinate_to_index(gc(4, 2)), None);
    }

    #[test]
    fn iterates_row_by_row() {
        let g = Grid::bordered(Width(2), Height(2));
        let coords = g.iter().collect_vec();
        assert_eq!(coords, vec![gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
    }

    #[test]
    fn from_rows() {
        let g = Grid::from_rows(&["#####",
                                  "#.#.#",
                                  "#...#",
                                  "#####"])
            .expect("valid rows");
        assert_eq!(g.width(), Width(5));
        assert_eq!(g.height(), Height(4));
        assert!(g.is_wall(gc(2, 1)));
        assert!(g.is_open(gc(1, 1)));
        assert!(g.is_open(gc(2, 2)));
        assert_eq!(g.open_cells_count(), 5);
    }

    #[test]
    fn from_rows_forces_the_border() {
        let g = Grid::from_rows(&["...", "...", "..."]).expect("valid rows");
        assert_eq!(g, Grid::bordered(Width(3), Height(3)));
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert_eq!(Grid::from_rows(&[]), None);
        assert_eq!(Grid::from_rows(&["", ""]), None);
        assert_eq!(Grid::from_rows(&["###", "##"]), None);
    }

    #[test]
    fn edit_cells() {
        let mut g = Grid::bordered(Width(5), Height(5));
        assert_eq!(g.set_cell(gc(2, 2), CellState::Wall), Ok(()));
        assert!(g.is_wall(gc(2, 2)));
        assert_eq!(g.set_cell(gc(2, 2), CellState::Open), Ok(()));
        assert!(g.is_open(gc(2, 2)));
    }

    #[test]
    fn edit_cells_keeps_the_border() {
        let mut g = Grid::bordered(Width(5), Height(5));
        assert_eq!(g.set_cell(gc(0, 2), CellState::Open),
                   Err(CellEditError::BorderCell));
        assert!(g.is_wall(gc(0, 2)));
        assert_eq!(g.set_cell(gc(4, 4), CellState::Wall), Ok(()));
        assert_eq!(g.set_cell(gc(5, 4), CellState::Wall),
                   Err(CellEditError::InvalidGridCoordinate));
    }

    #[test]
    fn open_neighbours_in_search_order() {
        let g = Grid::bordered(Width(5), Height(5));
        let centre = g.open_neighbours(gc(2, 2));
        assert_eq!(&*centre, &[gc(1, 2), gc(3, 2), gc(2, 1), gc(2, 3)]);

        let corner = g.open_neighbours(gc(1, 1));
        assert_eq!(&*corner, &[gc(2, 1), gc(1, 2)]);

        // the grid corner has nothing representable to the west or north
        assert!(g.open_neighbours(gc(0, 0)).is_empty());
    }

    #[test]
    fn default_end_points() {
        let g = Grid::bordered(Width(64), Height(32));
        assert_eq!(g.default_start(), gc(1, 1));
        assert_eq!(g.default_end(), gc(62, 30));
    }

    #[test]
    fn display_text() {
        let g = Grid::from_rows(&["####",
                                  "#..#",
                                  "#.##",
                                  "####"])
            .expect("valid rows");
        assert_eq!(format!("{}", g), "####\n#  #\n# ##\n####\n");
    }
}
