use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static obstacle consulted by the validity oracle.
pub trait Obstacle {
    /// Whether a disk of `radius` centered at `center` overlaps this obstacle.
    fn is_colliding(&self, center: Vec2, radius: f32) -> bool;
}

/// Axis-aligned rectangle in screen convention (y grows downward).
///
/// Spans `[x, x + width]` horizontally and `[y, y + height]` vertically; edges are part of
/// the rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RectObstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectObstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from two opposite corners in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Point of the rectangle closest to `p` (`p` itself when inside).
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }

    /// Edges in order: top, right, bottom, left.
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let tl = Vec2::new(self.left(), self.top());
        let tr = Vec2::new(self.right(), self.top());
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.left(), self.bottom());
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }

    /// Distance from `start` to the first edge crossed by the segment `start -> end`.
    pub fn raycast(&self, start: Vec2, end: Vec2) -> Option<f32> {
        let dir = end - start;
        let ray_len = dir.length();
        let mut best: Option<f32> = None;

        for (a, b) in self.edges() {
            let Some(t) = segment_intersection_t(start, dir, a, b - a) else {
                continue;
            };
            let dist = t * ray_len;
            match best {
                Some(d) if d <= dist => {}
                _ => best = Some(dist),
            }
        }

        best
    }
}

impl Obstacle for RectObstacle {
    fn is_colliding(&self, center: Vec2, radius: f32) -> bool {
        let closest = self.closest_point(center);
        let d = center - closest;
        d.dot(d) < radius * radius
    }
}

impl<T: Obstacle + ?Sized> Obstacle for &T {
    fn is_colliding(&self, center: Vec2, radius: f32) -> bool {
        (**self).is_colliding(center, radius)
    }
}

impl<T: Obstacle + ?Sized> Obstacle for Box<T> {
    fn is_colliding(&self, center: Vec2, radius: f32) -> bool {
        (**self).is_colliding(center, radius)
    }
}

/// Nearest raycast hit distance over a set of rectangles.
pub fn nearest_hit(obstacles: &[RectObstacle], start: Vec2, end: Vec2) -> Option<f32> {
    obstacles
        .iter()
        .filter_map(|o| o.raycast(start, end))
        .min_by(|a, b| a.total_cmp(b))
}

pub(crate) fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Intersection between segments `p + t*r` and `q + u*s`. Returns `t` if they intersect.
///
/// Near-parallel segments are reported as non-intersecting.
pub fn segment_intersection_t(p: Vec2, r: Vec2, q: Vec2, s: Vec2) -> Option<f32> {
    let denom = cross(r, s);
    if denom.abs() < 1e-10 {
        return None;
    }
    let qp = q - p;
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}
