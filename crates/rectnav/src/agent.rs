use std::sync::Arc;

use crate::{Obstacle, RectObstacle, Vec2, WorldBounds};

/// Agent collaborator driven by the navigation controller.
pub trait NavAgent {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn body_radius(&self) -> f32;
    /// Maximum distance covered in a single tick.
    fn linear_speed(&self) -> f32;
    /// Consulted before every committed move; `true` vetoes the move.
    fn will_collide(&self, next: Vec2) -> bool;
}

/// Reference agent: a disk moving through a static world snapshot.
#[derive(Debug, Clone)]
pub struct SimAgent {
    pub position: Vec2,
    pub body_radius: f32,
    pub linear_speed: f32,
    bounds: WorldBounds,
    obstacles: Arc<[RectObstacle]>,
}

impl SimAgent {
    pub fn new(position: Vec2, bounds: WorldBounds, obstacles: Arc<[RectObstacle]>) -> Self {
        Self {
            position,
            body_radius: 20.0,
            linear_speed: 2.0,
            bounds,
            obstacles,
        }
    }

    pub fn with_body_radius(mut self, body_radius: f32) -> Self {
        self.body_radius = body_radius.max(0.0);
        self
    }

    pub fn with_linear_speed(mut self, linear_speed: f32) -> Self {
        self.linear_speed = linear_speed.max(0.0);
        self
    }
}

impl NavAgent for SimAgent {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn body_radius(&self) -> f32 {
        self.body_radius
    }

    fn linear_speed(&self) -> f32 {
        self.linear_speed
    }

    fn will_collide(&self, next: Vec2) -> bool {
        if !self.bounds.contains_with_margin(next, self.body_radius) {
            return true;
        }
        self.obstacles
            .iter()
            .any(|o| o.is_colliding(next, self.body_radius))
    }
}
