use docopt::Docopt;
use log::{info, warn};
use serde_derive::Deserialize;
use wallmaze::{
    cells::Cartesian2DCoordinate,
    generators::{self, MazeParams},
    grid::Grid,
    grid_displays::PathDisplay,
    pathing::{self, Distances},
    units::{ColumnSpacing, Height, RowSpacing, Width},
};

const USAGE: &str = "Wall maze

Usage:
    wallmaze_driver -h | --help
    wallmaze_driver [options]

Options:
    -h --help                  Show this screen.
    --width=<w>                The maze width in cells, at least 3 [default: 64].
    --height=<h>               The maze height in cells, at least 3 [default: 64].
    --row-spacing=<r>          Rows between candidate wall seeds [default: 3].
    --column-spacing=<c>       Columns between candidate wall seeds [default: 3].
    --skip-chance=<p>          Probability in [0, 1] that a candidate wall seed is skipped [default: 0.75].
    --seed=<s>                 Random seed, the same seed and options always give the same maze [default: 67216].
    --start-x=<x>              x coordinate of the path start, defaults to the top left interior cell.
    --start-y=<y>              y coordinate of the path start.
    --end-x=<e1>               x coordinate of the path end, defaults to the bottom right interior cell.
    --end-y=<e2>               y coordinate of the path end.
    --furthest-end-point       End the path at the open cell furthest from the start.
    --show-distances           Show the distance from the start to every reachable cell instead of the path.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_row_spacing: usize,
    flag_column_spacing: usize,
    flag_skip_chance: f64,
    flag_seed: u64,
    flag_start_x: Option<u32>,
    flag_start_y: Option<u32>,
    flag_end_x: Option<u32>,
    flag_end_y: Option<u32>,
    flag_furthest_end_point: bool,
    flag_show_distances: bool,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types, linking in the library's errors so
    // rejected parameters and end points keep their own error kinds.
    use error_chain::*;
    error_chain! {

        links {
            Maze(::wallmaze::errors::Error, ::wallmaze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let params = MazeParams {
        width: Width(args.flag_width),
        height: Height(args.flag_height),
        row_spacing: RowSpacing(args.flag_row_spacing),
        column_spacing: ColumnSpacing(args.flag_column_spacing),
        skip_chance: args.flag_skip_chance,
        seed: args.flag_seed,
    };
    params.validate().chain_err(|| "Invalid maze options")?;

    let maze_grid = generators::generate(&params);
    info!("Generated {}x{} maze with seed {}, {} open cells",
          params.width.0,
          params.height.0,
          params.seed,
          maze_grid.open_cells_count());

    let start = point_from_args(args.flag_start_x, args.flag_start_y)
        .unwrap_or_else(|| maze_grid.default_start());
    pathing::validate_endpoint(&maze_grid, start).chain_err(|| "Invalid path start")?;

    if args.flag_show_distances {
        let distances = start_distances(&maze_grid, start)?;
        info!("{} cells reachable from {}, the furthest {} steps away",
              distances.reachable_count(),
              start,
              distances.max());
        println!("{}", maze_grid.render(Some(&distances)));
        return Ok(());
    }

    let end = if args.flag_furthest_end_point {
        let distances = start_distances(&maze_grid, start)?;
        distances.furthest_points_on_grid()
            .first()
            .cloned()
            .unwrap_or(start)
    } else {
        point_from_args(args.flag_end_x, args.flag_end_y)
            .unwrap_or_else(|| maze_grid.default_end())
    };
    pathing::validate_endpoint(&maze_grid, end).chain_err(|| "Invalid path end")?;

    let path = pathing::find_path(&maze_grid, start, end);
    let display = if path.is_empty() {
        warn!("No route from {} to {}", start, end);
        PathDisplay::new(&[start, end])
    } else {
        info!("Route from {} to {} is {} cells long", start, end, path.len());
        PathDisplay::new(&path)
    };
    println!("{}", maze_grid.render(Some(&display)));

    Ok(())
}

fn point_from_args(x: Option<u32>, y: Option<u32>) -> Option<Cartesian2DCoordinate> {
    match (x, y) {
        (Some(x), Some(y)) => Some(Cartesian2DCoordinate::new(x, y)),
        _ => None,
    }
}

fn start_distances(maze_grid: &Grid, start: Cartesian2DCoordinate) -> Result<Distances> {
    Ok(Distances::new(maze_grid, start)
        .ok_or("Provided invalid start coordinate from which to measure distances.")?)
}
