//! Errors for inputs rejected at the boundary of the generator and the path search.
//!
//! Neither `generators::generate` nor `pathing::find_path` report errors themselves, callers
//! validate first with `MazeParams::validate` and `pathing::validate_endpoint`.

// Creates the Error, ErrorKind, ResultExt, and Result types.
use error_chain::*;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("maze dimensions too small")
            display("maze dimensions {}x{} are too small, both must be at least 3", width, height)
        }
        InvalidSpacing(rows: usize, columns: usize) {
            description("maze seed spacing must be positive")
            display("maze seed spacing rows: {} columns: {}, both must be at least 1", rows, columns)
        }
        InvalidSkipChance(skip_chance: f64) {
            description("skip chance is not a probability")
            display("skip chance {} is outside the range [0, 1]", skip_chance)
        }
        InvalidEndpoint(x: u32, y: u32) {
            description("path end point is not an open cell")
            display("path end point ({}, {}) is outside the grid or a wall", x, y)
        }
    }
}
