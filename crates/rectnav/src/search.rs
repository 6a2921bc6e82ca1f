//! A* over the integer lattice embedded in continuous space.

use core::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::config::SearchConfig;
use crate::{Cell, Obstacle, PlanError, Route, ValidityOracle, Vec2};

/// Neighbor order: E, W, S, N, SE, NW, NE, SW (y grows downward).
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Lattice vertex discovered by a search episode.
///
/// `parent` indexes into the episode's node arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub cell: Cell,
    pub g: u32,
    pub h: f32,
    pub f: f32,
    pub parent: Option<usize>,
}

#[derive(Debug)]
struct OpenNode {
    f: f32,
    g: u32,
    node: usize,
    tie: u64,
}

impl OpenNode {
    // `f` is never negative, so its bit pattern orders like the value.
    fn key(&self) -> (u32, u32, u64) {
        (self.f.to_bits(), self.g, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Reusable buffers for [`PathSearch`].
///
/// Keeping one around avoids reallocating the arena and frontier on every replan.
#[derive(Debug, Default)]
pub struct SearchScratch {
    open: BinaryHeap<OpenNode>,
    nodes: Vec<SearchNode>,
    index: HashMap<Cell, usize>,
    rejected: HashSet<Cell>,
    expansions: usize,
}

impl SearchScratch {
    fn reset(&mut self) {
        self.open.clear();
        self.nodes.clear();
        self.index.clear();
        self.rejected.clear();
        self.expansions = 0;
    }

    /// Node arena of the most recent episode.
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Nodes expanded by the most recent episode.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
}

/// One planning query against a validity oracle for an agent of a given radius.
#[derive(Debug)]
pub struct PathSearch<'a, O> {
    oracle: &'a ValidityOracle<O>,
    agent_radius: f32,
    config: SearchConfig,
}

impl<'a, O: Obstacle> PathSearch<'a, O> {
    pub fn new(oracle: &'a ValidityOracle<O>, agent_radius: f32) -> Self {
        Self {
            oracle,
            agent_radius,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Like [`find_path`](Self::find_path) but collapses every failure into an empty route.
    pub fn find_route(&self, start: Vec2, goal: Vec2) -> Route {
        self.find_path(start, goal).unwrap_or_default()
    }

    pub fn find_path(&self, start: Vec2, goal: Vec2) -> Result<Route, PlanError> {
        let mut scratch = SearchScratch::default();
        self.find_path_with(start, goal, &mut scratch)
    }

    pub fn find_path_with(
        &self,
        start: Vec2,
        goal: Vec2,
        scratch: &mut SearchScratch,
    ) -> Result<Route, PlanError> {
        scratch.reset();

        let start_cell = Cell::from_vec2(start);
        let goal_cell = Cell::from_vec2(goal);

        if !self.oracle.is_cell_valid(start_cell, self.agent_radius) {
            tracing::debug!(x = start_cell.x, y = start_cell.y, "start is not valid");
            return Err(PlanError::InvalidStart {
                x: start_cell.x,
                y: start_cell.y,
            });
        }
        if !self.oracle.is_cell_valid(goal_cell, self.agent_radius) {
            tracing::debug!(x = goal_cell.x, y = goal_cell.y, "goal is not valid");
            return Err(PlanError::InvalidGoal {
                x: goal_cell.x,
                y: goal_cell.y,
            });
        }

        let h0 = self.heuristic(start_cell, goal_cell);
        scratch.nodes.push(SearchNode {
            cell: start_cell,
            g: 0,
            h: h0,
            f: h0,
            parent: None,
        });
        scratch.index.insert(start_cell, 0);
        scratch.open.push(OpenNode {
            f: h0,
            g: 0,
            node: 0,
            tie: 0,
        });
        let mut tie: u64 = 1;

        while let Some(entry) = scratch.open.pop() {
            let current = scratch.nodes[entry.node];
            if entry.g != current.g {
                // Stale heap entry.
                continue;
            }

            if self.is_goal(current.cell, goal_cell) {
                let route = reconstruct(&scratch.nodes, entry.node);
                tracing::debug!(
                    points = route.len(),
                    expansions = scratch.expansions,
                    "path found"
                );
                return Ok(route);
            }

            scratch.expansions += 1;
            if let Some(limit) = self.config.max_expansions {
                if scratch.expansions > limit {
                    tracing::debug!(limit, "search expansion limit reached");
                    return Err(PlanError::ExpansionLimit { limit });
                }
            }

            let tentative_g = current.g.saturating_add(1);
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let cell = current.cell.offset(dx, dy);

                if let Some(&idx) = scratch.index.get(&cell) {
                    let known = &mut scratch.nodes[idx];
                    if tentative_g >= known.g {
                        continue;
                    }
                    known.g = tentative_g;
                    known.f = tentative_g as f32 + known.h;
                    known.parent = Some(entry.node);
                    scratch.open.push(OpenNode {
                        f: known.f,
                        g: tentative_g,
                        node: idx,
                        tie,
                    });
                    tie += 1;
                    continue;
                }

                if scratch.rejected.contains(&cell) {
                    continue;
                }
                if !self.oracle.is_cell_valid(cell, self.agent_radius) {
                    scratch.rejected.insert(cell);
                    continue;
                }

                let h = self.heuristic(cell, goal_cell);
                let idx = scratch.nodes.len();
                scratch.nodes.push(SearchNode {
                    cell,
                    g: tentative_g,
                    h,
                    f: tentative_g as f32 + h,
                    parent: Some(entry.node),
                });
                scratch.index.insert(cell, idx);
                scratch.open.push(OpenNode {
                    f: tentative_g as f32 + h,
                    g: tentative_g,
                    node: idx,
                    tie,
                });
                tie += 1;
            }
        }

        tracing::debug!(expansions = scratch.expansions, "no path found");
        Err(PlanError::Unreachable)
    }

    fn heuristic(&self, a: Cell, b: Cell) -> f32 {
        let (dx, dy) = a.abs_diff(b);
        self.config
            .heuristic
            .estimate(dx, dy, self.config.goal_tolerance)
    }

    fn is_goal(&self, cell: Cell, goal: Cell) -> bool {
        let (dx, dy) = cell.abs_diff(goal);
        dx <= self.config.goal_tolerance && dy <= self.config.goal_tolerance
    }
}

fn reconstruct(nodes: &[SearchNode], mut current: usize) -> Route {
    let mut points = Vec::new();
    while let Some(parent) = nodes[current].parent {
        points.push(nodes[current].cell.center());
        current = parent;
    }
    points.reverse();
    Route::new(points)
}
