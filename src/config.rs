use num_traits::{NumCast, Zero};

use crate::graph::Position;

/// Distance estimate used to score nodes against the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// `|dx| + |dy|`, exact on a 4-connected unit grid without obstacles.
    Manhattan,
    /// Straight-line distance.
    Euclidean,
    /// Always 0, which turns the search into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    pub fn estimate(&self, a: Position, b: Position) -> f64 {
        match self {
            Heuristic::Manhattan => (a.x - b.x).abs() + (a.y - b.y).abs(),
            Heuristic::Euclidean => a.distance(&b),
            Heuristic::Zero => 0.0,
        }
    }
}

/// What happens when a node that is already on the frontier is reached again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Relaxation {
    /// `g` and parent are fixed at first discovery and never revised.
    #[default]
    FirstDiscovery,
    /// A strictly cheaper rediscovery lowers `g`, replaces the parent and
    /// re-prioritises the node. Expanded nodes are never revised.
    DecreaseKey,
}

/// Settings for a single A* run.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Overrides the metric native to the graph ([SearchGraph::heuristic](crate::SearchGraph::heuristic)).
    pub heuristic: Option<Heuristic>,
    /// Scales the heuristic. Values above 1 give weighted A*, which may return
    /// longer paths while expanding fewer nodes.
    pub heuristic_factor: f64,
    pub relaxation: Relaxation,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            heuristic: None,
            heuristic_factor: 1.0,
            relaxation: Relaxation::FirstDiscovery,
        }
    }
}

impl SearchConfig {
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_heuristic_factor(mut self, heuristic_factor: f64) -> Self {
        self.heuristic_factor = heuristic_factor;
        self
    }

    pub fn with_relaxation(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = relaxation;
        self
    }

    /// Weighted estimate converted into the cost type of the graph. Integer costs
    /// truncate toward zero; values that cannot be represented become zero.
    pub(crate) fn estimate<C>(&self, native: Heuristic, a: Position, b: Position) -> C
    where
        C: NumCast + Zero,
    {
        let heuristic = self.heuristic.unwrap_or(native);
        <C as NumCast>::from(heuristic.estimate(a, b) * self.heuristic_factor)
            .unwrap_or_else(C::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_and_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, -4.0);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
        assert_eq!(Heuristic::Zero.estimate(a, b), 0.0);
    }

    #[test]
    fn estimate_truncates_for_integer_costs() {
        let config = SearchConfig::default().with_heuristic_factor(1.3);
        let a = Position::new(0.0, 0.0);
        let b = Position::new(2.0, 3.0);
        let h: i32 = config.estimate(Heuristic::Manhattan, a, b);
        assert_eq!(h, 6);
        let h: f64 = config.estimate(Heuristic::Manhattan, a, b);
        assert!((h - 6.5).abs() < 1e-9);
    }

    #[test]
    fn override_replaces_native_metric() {
        let config = SearchConfig::default().with_heuristic(Heuristic::Zero);
        let h: f64 = config.estimate(
            Heuristic::Euclidean,
            Position::new(0.0, 0.0),
            Position::new(1.0, 1.0),
        );
        assert_eq!(h, 0.0);
    }
}
