//! **wallmaze** grows wall-spur mazes on a rectangular grid and finds shortest routes through them.
//!
//! `generators::generate` turns a set of `MazeParams` into a `Grid`, deterministically for a given
//! seed. `pathing::find_path` runs A* between two open cells of a grid.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod units;
mod utils;
