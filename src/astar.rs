//! The A* engine shared by the grid and the route model. Search state is kept
//! in an arena next to the graph: an [IndexMap] keyed by node whose insertion
//! indices are stable for one run, so parents are plain indices.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, warn};

use crate::config::{Relaxation, SearchConfig};
use crate::error::{SearchError, SearchResult};
use crate::frontier::{Frontier, HeapFrontier, SortedFrontier};
use crate::graph::{Cost, SearchGraph};

use std::fmt::Debug;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Bookkeeping for a discovered node. Presence in the arena is the visited flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeState<C> {
    /// Cost from the start along the recorded parent chain.
    pub g: C,
    /// Heuristic estimate to the goal, fixed at discovery.
    pub h: C,
    /// Arena index of the node this one was discovered from, `None` for the start.
    pub parent: Option<usize>,
    /// Set once the node is taken off the frontier.
    pub expanded: bool,
}

impl<C: Cost> NodeState<C> {
    pub fn f(&self) -> C {
        self.g + self.h
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Running,
    Found,
    Exhausted,
}

/// Nodes from start to goal together with the traversed distance.
#[derive(Clone, Debug, PartialEq)]
pub struct Path<N, C> {
    pub nodes: Vec<N>,
    pub distance: C,
}

impl<N, C> Path<N, C> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn goal(&self) -> Option<&N> {
        self.nodes.last()
    }
}

impl<N> Path<N, f64> {
    /// Converts the distance into other units, e.g. map units into meters.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.distance *= factor;
        self
    }
}

/// Reusable search state. Every call to [astar](Self::astar) starts by clearing
/// the previous run, so one context can serve any number of searches.
pub struct SearchContext<N, C, F = SortedFrontier<C>> {
    nodes: FxIndexMap<N, NodeState<C>>,
    frontier: F,
    expanded: usize,
    state: SearchState,
}

pub type HeapSearchContext<N, C> = SearchContext<N, C, HeapFrontier<C>>;

impl<N, C, F: Default> Default for SearchContext<N, C, F> {
    fn default() -> Self {
        SearchContext {
            nodes: FxIndexMap::default(),
            frontier: F::default(),
            expanded: 0,
            state: SearchState::Idle,
        }
    }
}

impl<N, C, F> SearchContext<N, C, F>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
    F: Frontier<C> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.frontier.clear();
        self.expanded = 0;
        self.state = SearchState::Idle;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of nodes whose neighbours were expanded in the last run.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of nodes discovered in the last run.
    pub fn visited(&self) -> usize {
        self.nodes.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn node_state(&self, node: &N) -> Option<&NodeState<C>> {
        self.nodes.get(node)
    }

    /// Runs A* from `start` to `goal`. `start == goal` is found immediately with a
    /// single-node path, even on a graph without nodes. Otherwise endpoints the
    /// graph does not contain are rejected before anything is pushed.
    pub fn astar<G>(
        &mut self,
        graph: &G,
        start: &N,
        goal: &N,
        config: &SearchConfig,
    ) -> SearchResult<Path<N, C>>
    where
        G: SearchGraph<Node = N, Cost = C>,
    {
        self.clear();
        if start == goal {
            self.state = SearchState::Found;
            return Ok(Path {
                nodes: vec![start.clone()],
                distance: C::zero(),
            });
        }
        if !graph.contains(start) {
            return Err(SearchError::InvalidStart(format!("{:?}", start)));
        }
        if !graph.contains(goal) {
            return Err(SearchError::InvalidGoal(format!("{:?}", goal)));
        }
        let native = graph.heuristic();
        let goal_position = graph.position(goal);
        let estimate =
            |node: &N| -> C { config.estimate(native, graph.position(node), goal_position) };

        let h = estimate(start);
        let (start_index, _) = self.nodes.insert_full(
            start.clone(),
            NodeState {
                g: C::zero(),
                h,
                parent: None,
                expanded: false,
            },
        );
        self.frontier.push(start_index, h);
        self.state = SearchState::Running;

        while let Some(index) = self.frontier.pop() {
            let (current, current_g) = match self.nodes.get_index_mut(index) {
                Some((node, state)) => {
                    state.expanded = true;
                    (node.clone(), state.g)
                }
                None => continue,
            };
            if current == *goal {
                self.state = SearchState::Found;
                let path = self.reconstruct_path(graph, index);
                debug!(
                    "Reached {:?} from {:?} after {} expansions, {} nodes visited",
                    goal,
                    start,
                    self.expanded,
                    self.nodes.len()
                );
                return Ok(path);
            }
            self.expanded += 1;
            for (successor, move_cost) in graph.successors(&current) {
                let new_cost = current_g + move_cost;
                match self.nodes.entry(successor) {
                    Vacant(e) => {
                        let h = estimate(e.key());
                        let n = e.index();
                        e.insert(NodeState {
                            g: new_cost,
                            h,
                            parent: Some(index),
                            expanded: false,
                        });
                        self.frontier.push(n, new_cost + h);
                    }
                    Occupied(mut e) => {
                        if config.relaxation != Relaxation::DecreaseKey {
                            continue;
                        }
                        let n = e.index();
                        let state = e.get_mut();
                        if !state.expanded && new_cost < state.g {
                            state.g = new_cost;
                            state.parent = Some(index);
                            self.frontier.decrease(n, state.f());
                        }
                    }
                }
            }
        }
        self.state = SearchState::Exhausted;
        warn!(
            "Frontier exhausted after {} expansions, {:?} is not reachable from {:?}",
            self.expanded, goal, start
        );
        Err(SearchError::NotFound)
    }

    /// Path from the start of the last run to an already discovered node, or
    /// `None` if the node was not discovered.
    pub fn path_to<G>(&self, graph: &G, node: &N) -> Option<Path<N, C>>
    where
        G: SearchGraph<Node = N, Cost = C>,
    {
        self.nodes
            .get_index_of(node)
            .map(|index| self.reconstruct_path(graph, index))
    }

    /// Follows parent indices back to the start, summing the edge costs on the
    /// way, and returns the chain in start to goal order.
    fn reconstruct_path<G>(&self, graph: &G, index: usize) -> Path<N, C>
    where
        G: SearchGraph<Node = N, Cost = C>,
    {
        let mut nodes: Vec<N> = std::iter::successors(self.nodes.get_index(index), |(_, state)| {
            state.parent.and_then(|p| self.nodes.get_index(p))
        })
        .map(|(node, _)| node.clone())
        .collect();
        let distance = nodes
            .iter()
            .tuple_windows()
            .fold(C::zero(), |acc, (child, parent)| {
                acc + graph.edge_cost(child, parent)
            });
        nodes.reverse();
        Path { nodes, distance }
    }
}
