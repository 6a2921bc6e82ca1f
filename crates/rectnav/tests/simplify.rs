use rectnav::{
    has_line_of_sight, simplify, Cell, PathSearch, RectObstacle, Route, ValidityOracle, Vec2,
    WorldBounds,
};

fn walled() -> ValidityOracle {
    ValidityOracle::new(
        WorldBounds::from_size(100.0, 200.0),
        vec![RectObstacle::new(40.0, 0.0, 20.0, 100.0)],
    )
}

fn assert_visible_chain(oracle: &ValidityOracle, radius: f32, route: &Route) {
    for pair in route.points.windows(2) {
        assert!(
            has_line_of_sight(
                oracle,
                radius,
                Cell::from_vec2(pair[0]),
                Cell::from_vec2(pair[1])
            ),
            "{:?} cannot see {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn short_routes_pass_through() {
    let oracle = walled();
    for points in [
        vec![],
        vec![Vec2::new(20.0, 20.0)],
        vec![Vec2::new(20.0, 20.0), Vec2::new(80.0, 150.0)],
    ] {
        let route = Route::new(points);
        assert_eq!(simplify(&oracle, 5.0, &route), route);
    }
}

#[test]
fn collinear_points_collapse_to_endpoints() {
    let oracle = walled();
    let route = Route::new(vec![
        Vec2::new(20.0, 20.0),
        Vec2::new(21.0, 20.0),
        Vec2::new(22.0, 20.0),
        Vec2::new(23.0, 20.0),
    ]);
    let simplified = simplify(&oracle, 5.0, &route);
    assert_eq!(
        simplified.points,
        vec![Vec2::new(20.0, 20.0), Vec2::new(23.0, 20.0)]
    );
}

#[test]
fn detour_keeps_corners_and_visibility() {
    let oracle = walled();
    let raw = PathSearch::new(&oracle, 5.0)
        .find_path(Vec2::new(20.0, 50.0), Vec2::new(80.0, 50.0))
        .expect("path should exist");

    let simplified = simplify(&oracle, 5.0, &raw);

    assert_eq!(simplified.first(), raw.first());
    assert_eq!(simplified.last(), raw.last());
    // The endpoints sit on opposite sides of the wall.
    assert!(simplified.len() >= 3);
    assert!(simplified.len() < raw.len());
    assert_visible_chain(&oracle, 5.0, &simplified);

    // Every kept point came from the raw route, in order.
    let mut rest = raw.points.iter();
    for p in &simplified.points {
        assert!(rest.any(|q| q == p), "{p:?} is out of order or invented");
    }
}

#[test]
fn simplify_is_idempotent() {
    let oracle = walled();
    let raw = PathSearch::new(&oracle, 5.0)
        .find_path(Vec2::new(20.0, 50.0), Vec2::new(80.0, 50.0))
        .expect("path should exist");

    let once = simplify(&oracle, 5.0, &raw);
    let twice = simplify(&oracle, 5.0, &once);
    assert_eq!(once, twice);
}

#[test]
fn line_of_sight_is_blocked_by_the_wall() {
    let oracle = walled();
    assert!(!has_line_of_sight(
        &oracle,
        5.0,
        Cell::new(20, 50),
        Cell::new(80, 50)
    ));
    assert!(has_line_of_sight(
        &oracle,
        5.0,
        Cell::new(20, 150),
        Cell::new(80, 150)
    ));
    // Below the wall's reach but too close once inflated by radius and buffer.
    assert!(!has_line_of_sight(
        &oracle,
        5.0,
        Cell::new(20, 110),
        Cell::new(80, 110)
    ));
}

#[test]
fn line_of_sight_to_itself_follows_cell_validity() {
    let oracle = walled();
    assert!(has_line_of_sight(&oracle, 5.0, Cell::new(20, 30), Cell::new(20, 30)));
    // Within radius + buffer of the wall's left edge.
    assert!(!has_line_of_sight(&oracle, 5.0, Cell::new(30, 30), Cell::new(30, 30)));
}
