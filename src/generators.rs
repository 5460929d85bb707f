use error_chain::bail;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{offset_coordinate, rand_direction, Cartesian2DCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnIndex, ColumnSpacing, Height, RowIndex, RowSpacing, Width};

/// Everything that decides the shape of a generated maze.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MazeParams {
    pub width: Width,
    pub height: Height,
    pub row_spacing: RowSpacing,
    pub column_spacing: ColumnSpacing,
    /// Probability that a cell on the seed lattice is passed over rather than turned into a wall
    /// seed. 0.0 plants a seed at every lattice cell, 1.0 plants none and leaves the interior
    /// open.
    pub skip_chance: f64,
    pub seed: u64,
}

impl MazeParams {
    pub fn new(width: Width, height: Height) -> MazeParams {
        MazeParams { width, height, ..MazeParams::default() }
    }

    pub fn with_spacing(self, row_spacing: RowSpacing, column_spacing: ColumnSpacing) -> MazeParams {
        MazeParams { row_spacing, column_spacing, ..self }
    }

    pub fn with_skip_chance(self, skip_chance: f64) -> MazeParams {
        MazeParams { skip_chance, ..self }
    }

    pub fn with_seed(self, seed: u64) -> MazeParams {
        MazeParams { seed, ..self }
    }

    /// Expected fraction of seed lattice cells that become wall seeds.
    pub fn seed_density(&self) -> f64 {
        1.0 - self.skip_chance
    }

    /// Check the parameters describe a maze with an interior.
    ///
    /// `generate` accepts anything without panicking, but only parameters passing this check give a
    /// meaningful maze.
    pub fn validate(&self) -> Result<()> {
        if self.width.0 < 3 || self.height.0 < 3 {
            bail!(ErrorKind::InvalidDimensions(self.width.0, self.height.0));
        }
        if self.row_spacing.0 < 1 || self.column_spacing.0 < 1 {
            bail!(ErrorKind::InvalidSpacing(self.row_spacing.0, self.column_spacing.0));
        }
        if !(0.0..=1.0).contains(&self.skip_chance) {
            bail!(ErrorKind::InvalidSkipChance(self.skip_chance));
        }
        Ok(())
    }
}

impl Default for MazeParams {
    fn default() -> MazeParams {
        MazeParams {
            width: Width(64),
            height: Height(64),
            row_spacing: RowSpacing(3),
            column_spacing: ColumnSpacing(3),
            skip_chance: 0.75,
            seed: 67216,
        }
    }
}

/// The random stream used by `generate`, seeded from `MazeParams::seed`.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Generate a maze from the parameters, with the random stream seeded from `params.seed`.
/// The same parameters always give the same maze.
pub fn generate(params: &MazeParams) -> Grid {
    let mut rng = seeded_rng(params.seed);
    generate_with_rng(params, &mut rng)
}

/// Grow a maze of wall spurs.
///
/// Starting from an open grid with a walled border, cells on a lattice spaced
/// `row_spacing` x `column_spacing` apart each become a wall seed unless a random draw falls
/// below the skip chance. Then, visiting the seeds in a random order, a wall is extended from each
/// seed in a random compass direction until it runs into an existing wall. Earlier spurs become
/// the walls that later spurs stop against, which is what partitions the open space into
/// corridors.
///
/// The stream is consumed in a fixed order: one draw per lattice cell in row major order, the
/// shuffle of the seeds, then one direction per seed in shuffled order.
/// `seed` in `params` is ignored, the caller's stream is used as is.
pub fn generate_with_rng<R: Rng + ?Sized>(params: &MazeParams, rng: &mut R) -> Grid {
    let mut grid = Grid::bordered(params.width, params.height);
    let seed_points = plant_wall_seeds(&mut grid, params, rng);

    let mut seed_order = (0..seed_points.len()).collect::<Vec<usize>>();
    seed_order.shuffle(rng);

    let mut spur_cells_count = 0;
    for seed_index in seed_order {
        spur_cells_count += grow_wall_spur(&mut grid, seed_points[seed_index], rng);
    }

    debug!("Generated {}x{} maze: {} wall seeds, {} spur cells, {} open cells",
           params.width.0,
           params.height.0,
           seed_points.len(),
           spur_cells_count,
           grid.open_cells_count());
    grid
}

fn plant_wall_seeds<R: Rng + ?Sized>(grid: &mut Grid,
                                     params: &MazeParams,
                                     rng: &mut R)
                                     -> Vec<Cartesian2DCoordinate> {
    let (width, height) = (params.width.0, params.height.0);
    let (row_spacing, column_spacing) = (params.row_spacing.0, params.column_spacing.0);
    if row_spacing == 0 || column_spacing == 0 {
        return vec![];
    }

    let mut seed_points = vec![];
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if x % column_spacing == 0 && y % row_spacing == 0 {
                let chance: f64 = rng.gen();
                if chance >= params.skip_chance {
                    let seed = Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(x),
                                                                              RowIndex(y));
                    grid.build_wall(seed);
                    seed_points.push(seed);
                }
            }
        }
    }

    seed_points
}

/// Extend a wall from the seed in a random direction until it meets another wall.
/// Returns the number of cells walled.
fn grow_wall_spur<R: Rng + ?Sized>(grid: &mut Grid,
                                   seed: Cartesian2DCoordinate,
                                   rng: &mut R)
                                   -> usize {
    let direction = rand_direction(rng);
    let mut walled = 0;

    // The walled border stops every walk, leaving the grid only happens for degenerate sizes.
    let mut next = offset_coordinate(seed, direction);
    while let Some(coord) = next {
        if grid.is_wall(coord) {
            break;
        }
        grid.build_wall(coord);
        walled += 1;
        next = offset_coordinate(coord, direction);
    }

    trace!("Spur from {} heading {:?} walled {} cells", seed, direction, walled);
    walled
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CellState;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn params(width: usize, height: usize) -> MazeParams {
        MazeParams::new(Width(width), Height(height))
    }

    #[test]
    fn border_is_always_wall() {
        for seed in 0..20 {
            let p = params(23, 17).with_seed(seed).with_skip_chance(0.3);
            let g = generate(&p);
            assert_eq!(g.width(), Width(23));
            assert_eq!(g.height(), Height(17));
            assert_eq!(g.size(), 23 * 17);
            for coord in g.iter().filter(|c| g.is_border(*c)) {
                assert_eq!(g.cell(coord), Some(CellState::Wall));
            }
        }
    }

    #[test]
    fn same_params_same_maze() {
        let p = params(40, 30).with_seed(1234);
        assert_eq!(generate(&p), generate(&p));
    }

    #[test]
    fn seed_changes_the_maze() {
        let a = generate(&params(40, 30).with_seed(1));
        let b = generate(&params(40, 30).with_seed(2));
        assert_ne!(a, b);
    }

    #[test]
    fn injected_stream_matches_seeded_generate() {
        let p = params(32, 32).with_seed(99);
        let mut rng = seeded_rng(99);
        assert_eq!(generate_with_rng(&p, &mut rng), generate(&p));
    }

    #[test]
    fn skip_everything_leaves_the_interior_open() {
        let p = params(21, 21).with_skip_chance(1.0);
        let g = generate(&p);
        assert_eq!(g, Grid::bordered(Width(21), Height(21)));
    }

    #[test]
    fn skip_nothing_seeds_every_lattice_cell() {
        let p = params(20, 14).with_skip_chance(0.0).with_seed(5);
        let g = generate(&p);
        for coord in g.iter().filter(|c| !g.is_border(*c)) {
            if coord.x % 3 == 0 && coord.y % 3 == 0 {
                assert!(g.is_wall(coord), "lattice cell {} should be a wall", coord);
            }
        }
    }

    #[test]
    fn spurs_grow_to_the_nearest_wall() {
        // a single seed at (3, 3) in a 7x7 grid, its spur must reach the border
        let p = params(7, 7).with_skip_chance(0.0).with_spacing(RowSpacing(3), ColumnSpacing(3));
        let g = generate(&p);
        assert!(g.is_wall(gc(3, 3)));
        let row_walled = (1..6).all(|x| g.is_wall(gc(x, 3)));
        let column_walled = (1..6).all(|y| g.is_wall(gc(3, y)));
        let half_row = (1..4).all(|x| g.is_wall(gc(x, 3))) || (3..6).all(|x| g.is_wall(gc(x, 3)));
        let half_column = (1..4).all(|y| g.is_wall(gc(3, y))) || (3..6).all(|y| g.is_wall(gc(3, y)));
        assert!(!row_walled && !column_walled);
        assert!(half_row != half_column);
        assert_eq!(g.walls_count(), 24 + 3);
    }

    #[test]
    fn spacing_of_one_walls_the_interior() {
        // every interior cell is a seed, nothing left to grow into
        let p = params(6, 5).with_skip_chance(0.0).with_spacing(RowSpacing(1), ColumnSpacing(1));
        let g = generate(&p);
        assert_eq!(g.open_cells_count(), 0);
    }

    #[test]
    fn degenerate_params_do_not_panic() {
        let _ = generate(&params(0, 0));
        let _ = generate(&params(1, 7).with_skip_chance(0.0));
        let _ = generate(&params(2, 2).with_skip_chance(0.0));
        let _ = generate(&params(9, 9).with_spacing(RowSpacing(0), ColumnSpacing(0)));
        let _ = generate(&params(9, 9).with_skip_chance(-3.0));
    }

    #[test]
    fn density_view_of_skip_chance() {
        assert_eq!(params(5, 5).with_skip_chance(0.75).seed_density(), 0.25);
    }

    #[test]
    fn validation() {
        assert!(MazeParams::default().validate().is_ok());
        assert!(params(3, 3).validate().is_ok());

        let too_small = params(2, 9).validate().unwrap_err();
        match *too_small.kind() {
            ErrorKind::InvalidDimensions(2, 9) => {}
            ref other => panic!("unexpected {:?}", other),
        }
        let no_spacing = params(9, 9).with_spacing(RowSpacing(0), ColumnSpacing(2)).validate().unwrap_err();
        match *no_spacing.kind() {
            ErrorKind::InvalidSpacing(0, 2) => {}
            ref other => panic!("unexpected {:?}", other),
        }
        assert!(params(9, 9).with_skip_chance(1.5).validate().is_err());
        assert!(params(9, 9).with_skip_chance(-0.1).validate().is_err());
        assert!(params(9, 9).with_skip_chance(f64::NAN).validate().is_err());
        assert!(params(9, 9).with_skip_chance(1.0).validate().is_ok());
    }
}
