use core::fmt::Debug;
use std::hash::Hash;

use num_traits::{NumCast, Zero};

use crate::config::Heuristic;

/// Numeric edge and path cost. Implemented for every primitive number type.
pub trait Cost: Zero + Copy + PartialOrd + NumCast + Debug {}

impl<T> Cost for T where T: Zero + Copy + PartialOrd + NumCast + Debug {}

/// Planar coordinates fed to the [Heuristic].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The capability the A* engine needs from a graph. The graph only describes
/// itself; all search bookkeeping (visited, `g`, `h`, parent) lives in the
/// [SearchContext](crate::SearchContext), so a graph can be searched any number of times.
pub trait SearchGraph {
    type Node: Eq + Hash + Clone + Debug;
    type Cost: Cost;
    type Successors: IntoIterator<Item = (Self::Node, Self::Cost)>;

    /// Whether `node` resolves to a traversable node of this graph.
    fn contains(&self, node: &Self::Node) -> bool;

    /// Traversable neighbours of `node` with the cost of the connecting edge,
    /// without duplicates and in a deterministic order.
    fn successors(&self, node: &Self::Node) -> Self::Successors;

    fn position(&self, node: &Self::Node) -> Position;

    /// Cost of the edge between two adjacent nodes.
    fn edge_cost(&self, from: &Self::Node, to: &Self::Node) -> Self::Cost;

    /// Metric used when the configuration does not override it.
    fn heuristic(&self) -> Heuristic {
        Heuristic::Euclidean
    }
}
