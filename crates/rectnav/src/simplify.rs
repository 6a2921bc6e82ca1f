//! Visibility-based route reduction.

use crate::{Cell, Obstacle, Route, ValidityOracle, Vec2};

/// Rasterized line-of-sight test between two lattice vertices.
///
/// Walks the Bresenham cells from `from` to `to`, checking each one (and `to` itself)
/// against the oracle. Stops at the first invalid cell.
pub fn has_line_of_sight<O: Obstacle>(
    oracle: &ValidityOracle<O>,
    agent_radius: f32,
    from: Cell,
    to: Cell,
) -> bool {
    let (mut x, mut y) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);

    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    while (x, y) != (x1, y1) {
        if !oracle.is_cell_valid(Cell::new(x as i32, y as i32), agent_radius) {
            return false;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    oracle.is_cell_valid(to, agent_radius)
}

/// Drop waypoints that can be skipped with an unobstructed straight segment.
///
/// Greedy forward scan: an interior point is dropped when the last kept point can see the
/// point after it. The first and last points are always kept. The scan is repeated until it
/// removes nothing, so the result is a fixed point of `simplify`.
pub fn simplify<O: Obstacle>(
    oracle: &ValidityOracle<O>,
    agent_radius: f32,
    route: &Route,
) -> Route {
    if route.len() < 3 {
        return route.clone();
    }

    let mut current = route.points.clone();
    loop {
        let next = simplify_pass(oracle, agent_radius, &current);
        if next.len() == current.len() {
            break;
        }
        current = next;
    }

    if current.len() < 2 {
        return route.clone();
    }

    tracing::trace!(before = route.len(), after = current.len(), "route simplified");
    Route::new(current)
}

fn simplify_pass<O: Obstacle>(
    oracle: &ValidityOracle<O>,
    agent_radius: f32,
    points: &[Vec2],
) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);

    for i in 1..points.len() - 1 {
        let anchor = Cell::from_vec2(kept[kept.len() - 1]);
        let next = Cell::from_vec2(points[i + 1]);
        if !has_line_of_sight(oracle, agent_radius, anchor, next) {
            kept.push(points[i]);
        }
    }

    kept.push(points[points.len() - 1]);
    kept
}
