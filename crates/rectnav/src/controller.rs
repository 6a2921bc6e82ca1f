use std::sync::Arc;

use crate::config::NavConfig;
use crate::search::{PathSearch, SearchScratch};
use crate::simplify::simplify;
use crate::{
    Cell, NavAgent, Obstacle, PlanError, RectObstacle, Route, ValidityOracle, Vec2, WorldBounds,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// No route is being followed (never started, stopped, or planning failed).
    Idle,
    Following,
    /// The last route was exhausted.
    Completed,
}

/// Result of a single [`NavController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStatus {
    /// Not following a route; nothing happened.
    Idle,
    /// Moved toward the active waypoint without reaching it.
    Moving,
    /// The agent vetoed the move; position unchanged.
    Blocked,
    /// Reached a waypoint; the payload is the new active waypoint index.
    Advanced(usize),
    /// Route exhausted.
    Completed,
    /// Blocked for `stall_limit` consecutive ticks; following abandoned.
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Moved,
    Blocked,
    Stationary,
}

/// Waypoint-following state machine.
///
/// Owns the validity oracle and the current route; the agent is passed in on every call.
#[derive(Debug)]
pub struct NavController<O = RectObstacle> {
    oracle: ValidityOracle<O>,
    config: NavConfig,
    scratch: SearchScratch,
    goal: Option<Vec2>,
    route: Route,
    target_index: usize,
    state: NavState,
    blocked_ticks: u32,
    last_error: Option<PlanError>,
}

impl<O: Obstacle> NavController<O> {
    pub fn new(bounds: WorldBounds, obstacles: impl Into<Arc<[O]>>, config: NavConfig) -> Self {
        Self {
            oracle: ValidityOracle::with_buffer(bounds, obstacles, config.buffer_distance),
            config,
            scratch: SearchScratch::default(),
            goal: None,
            route: Route::default(),
            target_index: 0,
            state: NavState::Idle,
            blocked_ticks: 0,
            last_error: None,
        }
    }

    pub fn oracle(&self) -> &ValidityOracle<O> {
        &self.oracle
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == NavState::Following
    }

    pub fn goal(&self) -> Option<Vec2> {
        self.goal
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn current_target(&self) -> Option<Vec2> {
        if self.is_running() {
            self.route.get(self.target_index)
        } else {
            None
        }
    }

    pub fn blocked_ticks(&self) -> u32 {
        self.blocked_ticks
    }

    pub fn last_error(&self) -> Option<PlanError> {
        self.last_error
    }

    /// Swap in a new obstacle snapshot. The current route is kept as-is; call
    /// [`replan`](Self::replan) to plan against the new world.
    pub fn replace_obstacles(&mut self, obstacles: impl Into<Arc<[O]>>) {
        let bounds = self.oracle.bounds();
        self.oracle = ValidityOracle::with_buffer(bounds, obstacles, self.config.buffer_distance);
    }

    /// Plan from the agent's position to `goal`, discarding any previous route.
    pub fn set_goal<A: NavAgent>(&mut self, agent: &A, goal: Vec2) -> Result<(), PlanError> {
        self.goal = Some(goal);
        self.route = Route::default();
        self.target_index = 0;
        self.blocked_ticks = 0;
        self.last_error = None;

        let radius = agent.body_radius();
        let search = PathSearch::new(&self.oracle, radius).with_config(self.config.search());
        let raw = match search.find_path_with(agent.position(), goal, &mut self.scratch) {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!(error = %err, goal_x = goal.x, goal_y = goal.y, "goal rejected");
                self.state = NavState::Idle;
                self.last_error = Some(err);
                return Err(err);
            }
        };

        self.route = if self.config.simplify {
            simplify(&self.oracle, radius, &raw)
        } else {
            raw
        };

        if self.route.is_empty() {
            tracing::info!(goal_x = goal.x, goal_y = goal.y, "already at goal");
            self.state = NavState::Completed;
        } else {
            tracing::info!(
                goal_x = goal.x,
                goal_y = goal.y,
                waypoints = self.route.len(),
                "following route"
            );
            self.state = NavState::Following;
        }
        Ok(())
    }

    /// Snap a raw goal (e.g. a pointer position) to integer coordinates and plan to it.
    ///
    /// An invalid snapped goal stops the controller.
    pub fn request_goal<A: NavAgent>(&mut self, agent: &A, raw: Vec2) -> Result<(), PlanError> {
        let snapped = raw.round();
        if !self.oracle.is_valid(snapped, agent.body_radius()) {
            let cell = Cell::from_vec2(snapped);
            let err = PlanError::InvalidGoal {
                x: cell.x,
                y: cell.y,
            };
            tracing::warn!(x = raw.x, y = raw.y, "invalid goal position");
            self.stop();
            self.last_error = Some(err);
            return Err(err);
        }
        self.set_goal(agent, snapped)
    }

    /// Plan again toward the stored goal from wherever the agent is now.
    pub fn replan<A: NavAgent>(&mut self, agent: &A) -> Result<(), PlanError> {
        let goal = self.goal.ok_or(PlanError::NoGoal)?;
        self.set_goal(agent, goal)
    }

    pub fn stop(&mut self) {
        if self.state == NavState::Following {
            tracing::debug!(target_index = self.target_index, "navigation stopped");
            self.state = NavState::Idle;
        }
    }

    /// Continue a stopped route. Returns whether the controller is now following.
    pub fn resume(&mut self) -> bool {
        if self.state == NavState::Idle && self.target_index < self.route.len() {
            self.state = NavState::Following;
            self.blocked_ticks = 0;
        }
        self.is_running()
    }

    /// Advance the agent by at most one speed step toward the active waypoint.
    pub fn tick<A: NavAgent>(&mut self, agent: &mut A) -> NavStatus {
        if self.state != NavState::Following {
            return NavStatus::Idle;
        }

        let Some(target) = self.route.get(self.target_index) else {
            self.complete();
            return NavStatus::Completed;
        };

        let step = move_towards(agent, target);
        match step {
            Step::Moved => self.blocked_ticks = 0,
            Step::Blocked => self.blocked_ticks = self.blocked_ticks.saturating_add(1),
            Step::Stationary => {}
        }

        if agent.position().distance(target) <= self.config.arrival_tolerance {
            self.target_index += 1;
            self.blocked_ticks = 0;
            if self.target_index >= self.route.len() {
                self.complete();
                return NavStatus::Completed;
            }
            tracing::debug!(target_index = self.target_index, "waypoint reached");
            return NavStatus::Advanced(self.target_index);
        }

        if step != Step::Blocked {
            return NavStatus::Moving;
        }

        if let Some(limit) = self.config.stall_limit {
            if self.blocked_ticks >= limit {
                let err = PlanError::Stalled {
                    ticks: self.blocked_ticks,
                };
                tracing::warn!(ticks = self.blocked_ticks, "agent stalled");
                self.state = NavState::Idle;
                self.last_error = Some(err);
                return NavStatus::Stalled;
            }
        }
        NavStatus::Blocked
    }

    fn complete(&mut self) {
        tracing::info!(waypoints = self.route.len(), "route completed");
        self.state = NavState::Completed;
    }
}

fn move_towards<A: NavAgent>(agent: &mut A, target: Vec2) -> Step {
    let pos = agent.position();
    let to_target = target - pos;
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return Step::Stationary;
    }
    let speed = agent.linear_speed().min(distance);
    if speed <= 0.0 {
        // Zero speed never makes progress.
        return Step::Blocked;
    }

    let next = pos + to_target * (speed / distance);
    if agent.will_collide(next) {
        tracing::trace!(x = next.x, y = next.y, "movement blocked");
        return Step::Blocked;
    }

    agent.set_position(next);
    Step::Moved
}
