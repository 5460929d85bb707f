use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use error_chain::bail;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;


/// Reject a path end point that is outside the grid or not walkable.
pub fn validate_endpoint(grid: &Grid, coord: Cartesian2DCoordinate) -> Result<()> {
    if !grid.is_open(coord) {
        bail!(ErrorKind::InvalidEndpoint(coord.x, coord.y));
    }
    Ok(())
}

/// Breadth first step counts from a start cell to every open cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill the open cells of the grid from `start_coordinate`.
    /// Returns None if the start is not an open cell.
    pub fn new(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {
        if !grid.is_open(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.open_cells_count());
        distances.insert(start_coordinate, 0);

        // Every step costs the same, so the first time a cell is reached is by a shortest route and
        // the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        let mut distance = 0;
        while !frontier.is_empty() {
            distance += 1;
            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                for neighbour in grid.open_neighbours(*cell_coord) {
                    if !distances.contains_key(&neighbour) {
                        distances.insert(neighbour, distance);
                        max = distance;
                        new_frontier.push(neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Steps from the start, None if the cell cannot be reached.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells furthest from the start, sorted.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        // hash map order is arbitrary
        furthest.sort();
        furthest
    }
}


#[derive(Debug, Copy, Clone)]
struct SearchNode {
    coord: Cartesian2DCoordinate,
    g: u32,
    h: u32,
    parent: Option<usize>,
}

impl SearchNode {
    #[inline]
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// A frontier entry points at a node in the arena. The `g` it was pushed with tells whether it has
/// since been superseded by a cheaper route to the same node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct FrontierEntry {
    f: u32,
    sequence: u64,
    g: u32,
    node: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &FrontierEntry) -> Ordering {
        // lowest f first, then first pushed
        self.f
            .cmp(&other.f)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &FrontierEntry) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct AStarSearch<'a> {
    grid: &'a Grid,
    end: Cartesian2DCoordinate,
    nodes: Vec<SearchNode>,
    node_indices: FnvHashMap<Cartesian2DCoordinate, usize>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    sequence: u64,
}

impl<'a> AStarSearch<'a> {
    fn new(grid: &'a Grid, start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) -> AStarSearch<'a> {
        let mut search = AStarSearch {
            grid,
            end,
            nodes: Vec::new(),
            node_indices: utils::fnv_hashmap(grid.open_cells_count()),
            frontier: BinaryHeap::new(),
            sequence: 0,
        };
        search.record(start, 0, None);
        search
    }

    /// Record a new best route to `coord` and put it on the frontier.
    fn record(&mut self, coord: Cartesian2DCoordinate, g: u32, parent: Option<usize>) {
        let known = self.node_indices.get(&coord).cloned();
        let node_index = match known {
            Some(existing) => {
                let node = &mut self.nodes[existing];
                node.g = g;
                node.parent = parent;
                existing
            }
            None => {
                let created = self.nodes.len();
                self.nodes.push(SearchNode {
                    coord,
                    g,
                    h: coord.manhattan_distance(self.end),
                    parent,
                });
                self.node_indices.insert(coord, created);
                created
            }
        };

        let node = self.nodes[node_index];
        self.frontier.push(Reverse(FrontierEntry {
            f: node.f(),
            sequence: self.sequence,
            g: node.g,
            node: node_index,
        }));
        self.sequence += 1;
    }

    /// Expand nodes until the end is taken off the frontier. Returns the end's arena index.
    fn run(&mut self) -> Option<usize> {
        let mut expanded = 0;

        while let Some(Reverse(entry)) = self.frontier.pop() {
            let current = self.nodes[entry.node];
            if entry.g != current.g {
                continue;
            }
            if current.coord == self.end {
                debug!("A* reached {} at cost {} after {} expansions",
                       self.end,
                       current.g,
                       expanded);
                return Some(entry.node);
            }
            expanded += 1;
            trace!("A* expanding {} g: {} h: {}", current.coord, current.g, current.h);

            let tentative_g = current.g + 1;
            for neighbour in self.grid.open_neighbours(current.coord) {
                let improves = match self.node_indices.get(&neighbour) {
                    Some(&known) => tentative_g < self.nodes[known].g,
                    None => true,
                };
                if improves {
                    self.record(neighbour, tentative_g, Some(entry.node));
                }
            }
        }

        debug!("A* found no route to {} after {} expansions", self.end, expanded);
        None
    }

    /// Follow parent indices back from the node, returning the route start first.
    fn reconstruct(&self, end_node: usize) -> Vec<Cartesian2DCoordinate> {
        let mut path = Vec::with_capacity(self.nodes[end_node].g as usize + 1);
        let mut next = Some(end_node);
        while let Some(index) = next {
            let node = &self.nodes[index];
            path.push(node.coord);
            next = node.parent;
        }
        path.reverse();
        path
    }
}

/// Find a shortest route between two open cells using A* with a Manhattan distance heuristic.
///
/// Steps are horizontal or vertical between open cells and all cost 1, so the route has
/// `shortest distance + 1` cells, starting at `start` and ending at `end`. When there is more than
/// one shortest route the one returned is the one found by always expanding the lowest
/// `g + h` node, preferring the earliest discovered on ties.
///
/// The route is empty if `end` cannot be reached, or if either end point is outside the grid or a
/// wall (see `validate_endpoint`).
pub fn find_path(grid: &Grid,
                 start: Cartesian2DCoordinate,
                 end: Cartesian2DCoordinate)
                 -> Vec<Cartesian2DCoordinate> {
    if !grid.is_open(start) || !grid.is_open(end) {
        debug!("A* end points {} -> {} are not both open cells", start, end);
        return vec![];
    }

    let mut search = AStarSearch::new(grid, start, end);
    match search.run() {
        Some(end_node) => search.reconstruct(end_node),
        None => vec![],
    }
}
