use itertools::Itertools;
use log::info;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::astar::{Path, SearchContext};
use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::frontier::Frontier;
use crate::graph::{Position, SearchGraph};

/// A map node in normalised map coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoNode {
    pub x: f64,
    pub y: f64,
}

impl GeoNode {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn distance(&self, other: &GeoNode) -> f64 {
        self.position().distance(&other.position())
    }
}

/// Undirected road graph. Nodes are joined by ways, and the cost of an edge is
/// the straight-line distance between its ends.
#[derive(Clone, Debug)]
pub struct RouteModel {
    graph: UnGraph<GeoNode, ()>,
    metric_scale: f64,
}

impl Default for RouteModel {
    fn default() -> RouteModel {
        RouteModel::new(1.0)
    }
}

impl RouteModel {
    /// `metric_scale` converts map units into meters.
    pub fn new(metric_scale: f64) -> RouteModel {
        RouteModel {
            graph: UnGraph::default(),
            metric_scale,
        }
    }

    pub fn metric_scale(&self) -> f64 {
        self.metric_scale
    }

    pub fn add_node(&mut self, x: f64, y: f64) -> NodeIndex {
        self.graph.add_node(GeoNode { x, y })
    }

    /// Connects consecutive nodes of a way. Repeated segments collapse into a
    /// single edge.
    pub fn add_way(&mut self, way: &[NodeIndex]) -> SearchResult<()> {
        if let Some(unknown) = way.iter().find(|n| self.graph.node_weight(**n).is_none()) {
            return Err(SearchError::UnknownNode(unknown.index()));
        }
        for (a, b) in way.iter().tuple_windows() {
            if a != b {
                self.graph.update_edge(*a, *b, ());
            }
        }
        Ok(())
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GeoNode> {
        self.graph.node_weight(index)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node nearest to the given coordinates, by linear scan.
    pub fn closest_node(&self, x: f64, y: f64) -> Option<NodeIndex> {
        let target = Position::new(x, y);
        self.graph.node_indices().min_by(|a, b| {
            let da = self.graph[*a].position().distance(&target);
            let db = self.graph[*b].position().distance(&target);
            da.total_cmp(&db)
        })
    }

    /// Copies of the nodes on a path, detached from the model.
    pub fn coordinates(&self, path: &Path<NodeIndex, f64>) -> Vec<GeoNode> {
        path.nodes
            .iter()
            .filter_map(|n| self.graph.node_weight(*n).copied())
            .collect()
    }
}

impl SearchGraph for RouteModel {
    type Node = NodeIndex;
    type Cost = f64;
    type Successors = Vec<(NodeIndex, f64)>;

    fn contains(&self, node: &NodeIndex) -> bool {
        self.graph.node_weight(*node).is_some()
    }

    fn successors(&self, node: &NodeIndex) -> Self::Successors {
        let Some(here) = self.graph.node_weight(*node) else {
            return Vec::new();
        };
        self.graph
            .neighbors(*node)
            .unique()
            .map(|n| (n, here.distance(&self.graph[n])))
            .collect()
    }

    fn position(&self, node: &NodeIndex) -> Position {
        self.graph
            .node_weight(*node)
            .map(GeoNode::position)
            .unwrap_or_default()
    }

    fn edge_cost(&self, from: &NodeIndex, to: &NodeIndex) -> f64 {
        self.position(from).distance(&self.position(to))
    }
}

/// A start and end on a [RouteModel] and the configuration to route between them.
#[derive(Clone, Debug)]
pub struct RoutePlanner<'a> {
    model: &'a RouteModel,
    start: NodeIndex,
    goal: NodeIndex,
    config: SearchConfig,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(model: &'a RouteModel, start: NodeIndex, goal: NodeIndex) -> RoutePlanner<'a> {
        RoutePlanner {
            model,
            start,
            goal,
            config: SearchConfig::default(),
        }
    }

    /// Endpoints are given in percent of the map extent (0 to 100) and snapped
    /// to the closest node.
    pub fn from_percent(
        model: &'a RouteModel,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> SearchResult<RoutePlanner<'a>> {
        let start = model
            .closest_node(start_x * 0.01, start_y * 0.01)
            .ok_or_else(|| SearchError::InvalidStart("route model has no nodes".to_owned()))?;
        let goal = model
            .closest_node(end_x * 0.01, end_y * 0.01)
            .ok_or_else(|| SearchError::InvalidGoal("route model has no nodes".to_owned()))?;
        Ok(RoutePlanner::new(model, start, goal))
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn goal(&self) -> NodeIndex {
        self.goal
    }

    /// Finds a route; the distance is in meters.
    pub fn search(&self) -> SearchResult<Path<NodeIndex, f64>> {
        let mut ct: SearchContext<NodeIndex, f64> = SearchContext::new();
        self.search_with(&mut ct)
    }

    pub fn search_with<F>(
        &self,
        ct: &mut SearchContext<NodeIndex, f64, F>,
    ) -> SearchResult<Path<NodeIndex, f64>>
    where
        F: Frontier<f64> + Default,
    {
        let path = ct
            .astar(self.model, &self.start, &self.goal, &self.config)?
            .scaled(self.model.metric_scale());
        info!(
            "Route of {} nodes, {:.2} m, {} nodes expanded",
            path.len(),
            path.distance,
            ct.expanded()
        );
        Ok(path)
    }
}
