use std::sync::Arc;

use crate::config::DEFAULT_BUFFER_DISTANCE;
use crate::{Cell, Obstacle, RectObstacle, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outer limits of the navigable world (screen convention: `top < bottom`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl WorldBounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds spanning `[0, width] x [0, height]`.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Inclusive containment test against the bounds shrunk by `margin` on every side.
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        self.left + margin <= p.x
            && p.x <= self.right - margin
            && self.top + margin <= p.y
            && p.y <= self.bottom - margin
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 800.0, 600.0)
    }
}

/// "Is this point safe for an agent of this radius?"
///
/// Combines the world boundary, shrunk by `buffer_distance`, with an immutable snapshot of
/// the obstacle set. Every obstacle is inflated by `agent_radius + buffer_distance`. Edits
/// to the world are applied by building a new oracle between planning episodes.
#[derive(Debug)]
pub struct ValidityOracle<O = RectObstacle> {
    bounds: WorldBounds,
    obstacles: Arc<[O]>,
    buffer_distance: f32,
}

impl<O> Clone for ValidityOracle<O> {
    fn clone(&self) -> Self {
        Self {
            bounds: self.bounds,
            obstacles: Arc::clone(&self.obstacles),
            buffer_distance: self.buffer_distance,
        }
    }
}

impl<O: Obstacle> ValidityOracle<O> {
    pub fn new(bounds: WorldBounds, obstacles: impl Into<Arc<[O]>>) -> Self {
        Self::with_buffer(bounds, obstacles, DEFAULT_BUFFER_DISTANCE)
    }

    pub fn with_buffer(
        bounds: WorldBounds,
        obstacles: impl Into<Arc<[O]>>,
        buffer_distance: f32,
    ) -> Self {
        Self {
            bounds,
            obstacles: obstacles.into(),
            buffer_distance: buffer_distance.max(0.0),
        }
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn obstacles(&self) -> &[O] {
        &self.obstacles
    }

    pub fn buffer_distance(&self) -> f32 {
        self.buffer_distance
    }

    pub fn is_valid(&self, point: Vec2, agent_radius: f32) -> bool {
        if !self
            .bounds
            .contains_with_margin(point, self.buffer_distance)
        {
            return false;
        }

        let inflated = agent_radius + self.buffer_distance;
        !self
            .obstacles
            .iter()
            .any(|o| o.is_colliding(point, inflated))
    }

    pub fn is_cell_valid(&self, cell: Cell, agent_radius: f32) -> bool {
        self.is_valid(cell.center(), agent_radius)
    }
}
