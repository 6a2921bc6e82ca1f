use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered waypoints from one planning episode.
///
/// The start position is not included: `points[0]` is the first step away from it and
/// `points.last()` is the accepting goal vertex. An empty route means the start already
/// satisfied the goal test.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    pub points: Vec<Vec2>,
}

impl Route {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    /// Polyline length when travelled from `start` through every waypoint.
    pub fn length_from(&self, start: Vec2) -> f32 {
        let mut prev = start;
        let mut total = 0.0;
        for p in self.points.iter().copied() {
            total += prev.distance(p);
            prev = p;
        }
        total
    }
}

impl From<Vec<Vec2>> for Route {
    fn from(points: Vec<Vec2>) -> Self {
        Self::new(points)
    }
}
