use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::astar::{Path, SearchContext};
use crate::config::{Heuristic, SearchConfig};
use crate::error::{SearchError, SearchResult};
use crate::frontier::Frontier;
use crate::graph::{Position, SearchGraph};
use crate::STEP_COST;

/// What a board cell shows when rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Obstacle,
    Start,
    Finish,
    Path,
}

impl CellState {
    pub fn symbol(&self) -> &'static str {
        match self {
            CellState::Empty => "0   ",
            CellState::Obstacle => "X   ",
            CellState::Start => "S   ",
            CellState::Finish => "F   ",
            CellState::Path => "P   ",
        }
    }
}

/// A 4-connected board of obstacle cells with unit step cost. Cells are
/// addressed as [Point] with `x` the row and `y` the column.
///
/// The board itself never changes during a search; the search bookkeeping is
/// held by a [SearchContext]. Connected components are tracked with a
/// [UnionFind] so [reachable](Self::reachable) can answer without searching.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(0, 0, false)
    }
}

impl PathingGrid {
    pub fn new(rows: usize, cols: usize, blocked: bool) -> PathingGrid {
        let mut grid = PathingGrid {
            rows,
            cols,
            blocked: vec![blocked; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.rows && (p.y as usize) < self.cols
    }

    fn ix(&self, p: Point) -> usize {
        p.x as usize * self.cols + p.y as usize
    }

    /// Whether the cell is an obstacle. Cells outside the board count as blocked.
    pub fn get(&self, p: Point) -> bool {
        !self.in_bounds(p) || self.blocked[self.ix(p)]
    }

    /// Updates a cell. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    /// Points outside the board are ignored.
    pub fn set(&mut self, p: Point, blocked: bool) {
        if !self.in_bounds(p) {
            return;
        }
        let p_ix = self.ix(p);
        if blocked {
            if !self.blocked[p_ix] {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighborhood_points(&p) {
                if self.can_move_to(n) {
                    let n_ix = self.ix(n);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        self.blocked[p_ix] = blocked;
    }

    pub fn can_move_to(&self, p: Point) -> bool {
        !self.get(p)
    }

    /// The four orthogonal neighbours, up, right, down, left.
    pub fn neighborhood_points(&self, p: &Point) -> SmallVec<[Point; 4]> {
        SmallVec::from_buf([
            Point::new(p.x - 1, p.y),
            Point::new(p.x, p.y + 1),
            Point::new(p.x + 1, p.y),
            Point::new(p.x, p.y - 1),
        ])
    }

    pub fn neighborhood_points_and_cost(&self, p: &Point) -> SmallVec<[(Point, i32); 4]> {
        self.neighborhood_points(p)
            .into_iter()
            .filter(|n| self.can_move_to(*n))
            .map(|n| (n, STEP_COST))
            .collect()
    }

    /// Retrieves the component id a given [Point] belongs to, `None` off the board.
    pub fn get_component(&self, p: &Point) -> Option<usize> {
        self.in_bounds(*p).then(|| self.components.find(self.ix(*p)))
    }

    /// Checks if start and goal are free cells on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.can_move_to(*start)
            && self.can_move_to(*goal)
            && self.components.equiv(self.ix(*start), self.ix(*goal))
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for x in 0..self.rows as i32 {
            for y in 0..self.cols as i32 {
                let p = Point::new(x, y);
                if !self.can_move_to(p) {
                    continue;
                }
                let p_ix = self.ix(p);
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.can_move_to(n) {
                        let n_ix = self.ix(n);
                        self.components.union(p_ix, n_ix);
                    }
                }
            }
        }
    }

    /// Computes a path with the default configuration (Manhattan heuristic,
    /// first-discovery relaxation).
    pub fn find_path(&self, start: Point, goal: Point) -> SearchResult<Path<Point, i32>> {
        let mut ct: SearchContext<Point, i32> = SearchContext::new();
        self.find_path_with(&mut ct, start, goal, &SearchConfig::default())
    }

    pub fn find_path_with<F>(
        &self,
        ct: &mut SearchContext<Point, i32, F>,
        start: Point,
        goal: Point,
        config: &SearchConfig,
    ) -> SearchResult<Path<Point, i32>>
    where
        F: Frontier<i32> + Default,
    {
        // Staying put needs no cell, not even on an empty board.
        if start == goal {
            return ct.astar(self, &start, &goal, config);
        }
        if !self.can_move_to(start) {
            return Err(SearchError::InvalidStart(format!(
                "{} is off the board or blocked",
                start
            )));
        }
        if !self.can_move_to(goal) {
            return Err(SearchError::InvalidGoal(format!(
                "{} is off the board or blocked",
                goal
            )));
        }
        ct.astar(self, &start, &goal, config)
    }

    /// Renders the board one row per line, marking the path if given.
    pub fn render(&self, path: Option<&Path<Point, i32>>) -> String {
        let mut cells: Vec<CellState> = self
            .blocked
            .iter()
            .map(|&b| if b { CellState::Obstacle } else { CellState::Empty })
            .collect();
        if let Some(path) = path {
            let mut mark = |p: &Point, state: CellState| {
                if self.in_bounds(*p) {
                    cells[self.ix(*p)] = state;
                }
            };
            for p in &path.nodes {
                mark(p, CellState::Path);
            }
            if let Some(start) = path.start() {
                mark(start, CellState::Start);
            }
            if let Some(goal) = path.goal() {
                mark(goal, CellState::Finish);
            }
        }
        let mut out = String::with_capacity(cells.len() * 4 + self.rows);
        for row in cells.chunks(self.cols.max(1)) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }
}

impl SearchGraph for PathingGrid {
    type Node = Point;
    type Cost = i32;
    type Successors = SmallVec<[(Point, i32); 4]>;

    fn contains(&self, node: &Point) -> bool {
        self.can_move_to(*node)
    }

    fn successors(&self, node: &Point) -> Self::Successors {
        self.neighborhood_points_and_cost(node)
    }

    fn position(&self, node: &Point) -> Position {
        Position::new(node.x as f64, node.y as f64)
    }

    fn edge_cost(&self, from: &Point, to: &Point) -> i32 {
        ((from.x - to.x).abs() + (from.y - to.y).abs()) * STEP_COST
    }

    fn heuristic(&self) -> Heuristic {
        Heuristic::Manhattan
    }
}

/// Parses a board with one row per line and comma separated cells, `0` for an
/// empty cell and any other integer for an obstacle. Blank lines are skipped.
impl FromStr for PathingGrid {
    type Err = SearchError;

    fn from_str(s: &str) -> SearchResult<PathingGrid> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for (i, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token
                        .parse::<i32>()
                        .map(|v| v != 0)
                        .map_err(|e| SearchError::Parse {
                            line: i + 1,
                            message: format!("invalid cell {:?}: {}", token, e),
                        })
                })
                .collect::<SearchResult<Vec<bool>>>()?;
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(SearchError::Parse {
                        line: i + 1,
                        message: format!("expected {} cells, found {}", first.len(), row.len()),
                    });
                }
            }
            rows.push(row);
        }
        let cols = rows.first().map_or(0, Vec::len);
        let mut grid = PathingGrid {
            rows: rows.len(),
            cols,
            blocked: rows.into_iter().flatten().collect(),
            components: UnionFind::new(0),
            components_dirty: true,
        };
        grid.generate_components();
        info!("Parsed {}x{} board", grid.rows, grid.cols);
        Ok(grid)
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}
