//! # astar_route
//!
//! [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) over two kinds
//! of graph that share a single engine:
//!
//! - [PathingGrid], a 4-connected board of obstacle cells with unit step cost
//!   searched with the Manhattan distance, and
//! - [RouteModel], a graph of map nodes joined by ways whose edges cost their
//!   straight-line length, searched with the Euclidean distance.
//!
//! Both implement [SearchGraph]. The engine keeps visited flags, costs and
//! parents in a [SearchContext] next to the graph, so graphs are never mutated
//! by a search and can be searched repeatedly.
//!
//! ```
//! use astar_route::PathingGrid;
//! use grid_util::point::Point;
//!
//! let grid: PathingGrid = "0,0,0,\n0,1,0,\n0,0,0,\n".parse().unwrap();
//! let path = grid.find_path(Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(path.distance, 4);
//! ```
pub mod astar;
pub mod config;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod pathing_grid;
pub mod route_model;

pub use crate::astar::{HeapSearchContext, NodeState, Path, SearchContext, SearchState};
pub use crate::config::{Heuristic, Relaxation, SearchConfig};
pub use crate::error::{SearchError, SearchResult};
pub use crate::frontier::{Frontier, HeapFrontier, SortedFrontier};
pub use crate::graph::{Cost, Position, SearchGraph};
pub use crate::pathing_grid::{CellState, PathingGrid};
pub use crate::route_model::{GeoNode, RouteModel, RoutePlanner};

/// Cost of one orthogonal move on a [PathingGrid].
pub const STEP_COST: i32 = 1;

/// Searches `graph` from `start` to `goal` with the default [SearchConfig].
pub fn search<G: SearchGraph>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
) -> SearchResult<Path<G::Node, G::Cost>> {
    search_with(graph, start, goal, &SearchConfig::default())
}

pub fn search_with<G: SearchGraph>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    config: &SearchConfig,
) -> SearchResult<Path<G::Node, G::Cost>> {
    let mut ct: SearchContext<G::Node, G::Cost> = SearchContext::new();
    ct.astar(graph, start, goal, config)
}
