//! Tunable planner and controller constants.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Safety margin kept from world edges and obstacles, beyond the agent radius.
pub const DEFAULT_BUFFER_DISTANCE: f32 = 10.0;
/// Per-axis lattice distance at which a search node counts as the goal.
pub const DEFAULT_GOAL_TOLERANCE: u32 = 1;
/// Distance at which the controller considers a waypoint reached.
pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 10.0;

/// Distance estimate used to order the search frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// `dx + dy + (sqrt(2) - 2) * min(dx, dy)` toward the goal cell.
    ///
    /// Steps are priced at 1 regardless of direction, so this overestimates on diagonals
    /// and routes are not guaranteed to be hop-minimal.
    #[default]
    Octile,
    /// `max(dx, dy) - goal_tolerance`, floored at 0. Admissible and consistent for
    /// unit-cost 8-connected moves into the goal region.
    Chebyshev,
}

impl Heuristic {
    pub fn estimate(self, dx: u32, dy: u32, goal_tolerance: u32) -> f32 {
        match self {
            Heuristic::Octile => {
                let (dx, dy) = (dx as f32, dy as f32);
                dx + dy + (core::f32::consts::SQRT_2 - 2.0) * dx.min(dy)
            }
            Heuristic::Chebyshev => dx.max(dy).saturating_sub(goal_tolerance) as f32,
        }
    }
}

/// Parameters of a single search episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    pub goal_tolerance: u32,
    /// Upper bound on node expansions; `None` searches until the frontier is exhausted.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            goal_tolerance: DEFAULT_GOAL_TOLERANCE,
            max_expansions: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub buffer_distance: f32,
    pub goal_tolerance: u32,
    pub arrival_tolerance: f32,
    pub heuristic: Heuristic,
    /// Run the line-of-sight simplifier on every freshly planned route.
    pub simplify: bool,
    pub max_expansions: Option<usize>,
    /// Consecutive blocked ticks after which following is abandoned.
    ///
    /// `None` keeps retrying the same move forever.
    pub stall_limit: Option<u32>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            buffer_distance: DEFAULT_BUFFER_DISTANCE,
            goal_tolerance: DEFAULT_GOAL_TOLERANCE,
            arrival_tolerance: DEFAULT_ARRIVAL_TOLERANCE,
            heuristic: Heuristic::default(),
            simplify: true,
            max_expansions: None,
            stall_limit: None,
        }
    }
}

impl NavConfig {
    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            heuristic: self.heuristic,
            goal_tolerance: self.goal_tolerance,
            max_expansions: self.max_expansions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octile_matches_closed_form() {
        let h = Heuristic::Octile.estimate(3, 4, 1);
        let expected = 7.0 + (core::f32::consts::SQRT_2 - 2.0) * 3.0;
        assert!((h - expected).abs() < 1e-5);
    }

    #[test]
    fn chebyshev_is_zero_inside_goal_region() {
        assert_eq!(Heuristic::Chebyshev.estimate(1, 0, 1), 0.0);
        assert_eq!(Heuristic::Chebyshev.estimate(5, 2, 1), 4.0);
    }
}
