use rectnav::{Obstacle, RectObstacle, ValidityOracle, Vec2, WorldBounds};

fn open_square() -> ValidityOracle {
    ValidityOracle::new(WorldBounds::from_size(100.0, 100.0), Vec::<RectObstacle>::new())
}

fn bisected_square() -> ValidityOracle {
    ValidityOracle::new(
        WorldBounds::from_size(100.0, 100.0),
        vec![RectObstacle::from_corners(
            Vec2::new(40.0, 0.0),
            Vec2::new(60.0, 100.0),
        )],
    )
}

#[test]
fn points_within_buffer_of_an_edge_are_rejected() {
    let oracle = open_square();
    assert_eq!(oracle.buffer_distance(), 10.0);

    for i in 0..=100 {
        let t = i as f32;
        for near in [0.0, 5.0, 9.99] {
            assert!(!oracle.is_valid(Vec2::new(near, t), 0.0), "left ({near}, {t})");
            assert!(!oracle.is_valid(Vec2::new(100.0 - near, t), 0.0), "right");
            assert!(!oracle.is_valid(Vec2::new(t, near), 0.0), "top");
            assert!(!oracle.is_valid(Vec2::new(t, 100.0 - near), 0.0), "bottom");
        }
    }

    // The shrunk interior is inclusive.
    assert!(oracle.is_valid(Vec2::new(10.0, 10.0), 0.0));
    assert!(oracle.is_valid(Vec2::new(90.0, 90.0), 0.0));
    assert!(oracle.is_valid(Vec2::new(50.0, 50.0), 30.0));
}

#[test]
fn boundary_rejection_ignores_obstacle_configuration() {
    let oracle = bisected_square();
    for y in 0..=100 {
        assert!(!oracle.is_valid(Vec2::new(3.0, y as f32), 0.0));
        assert!(!oracle.is_valid(Vec2::new(97.0, y as f32), 0.0));
    }
}

#[test]
fn validity_is_monotone_in_radius() {
    let oracle = ValidityOracle::new(
        WorldBounds::from_size(100.0, 100.0),
        vec![
            RectObstacle::new(40.0, 40.0, 20.0, 20.0),
            RectObstacle::new(15.0, 70.0, 10.0, 5.0),
        ],
    );
    let radii = [0.0, 1.0, 2.5, 5.0, 10.0, 20.0];

    for x in (0..=100).step_by(3) {
        for y in (0..=100).step_by(3) {
            let p = Vec2::new(x as f32, y as f32);
            for (i, &r) in radii.iter().enumerate() {
                if oracle.is_valid(p, r) {
                    for &smaller in &radii[..i] {
                        assert!(
                            oracle.is_valid(p, smaller),
                            "valid at r={r} but not at r={smaller} for {p:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn bisecting_rectangle_rejects_its_whole_span() {
    let oracle = bisected_square();
    for x in 40..=60 {
        for y in 0..=100 {
            assert!(
                !oracle.is_valid(Vec2::new(x as f32, y as f32), 5.0),
                "({x}, {y}) should be blocked"
            );
        }
    }
    assert!(oracle.is_valid(Vec2::new(20.0, 50.0), 5.0));
    assert!(oracle.is_valid(Vec2::new(80.0, 50.0), 5.0));
}

#[test]
fn rect_collision_uses_closest_point_distance() {
    let rect = RectObstacle::new(10.0, 10.0, 20.0, 20.0);

    // Exactly touching is not an overlap.
    assert!(!rect.is_colliding(Vec2::new(5.0, 20.0), 5.0));
    assert!(rect.is_colliding(Vec2::new(5.0, 20.0), 5.01));

    // Corner region measures to the corner, not to either edge line.
    let corner = Vec2::new(6.0, 6.0);
    assert!(!rect.is_colliding(corner, 5.0));
    assert!(rect.is_colliding(corner, 5.7));

    // Inside the rectangle.
    assert!(rect.is_colliding(Vec2::new(20.0, 20.0), 1.0));
    assert_eq!(rect.closest_point(Vec2::new(20.0, 20.0)), Vec2::new(20.0, 20.0));
}

#[test]
fn oracle_clones_share_the_obstacle_snapshot() {
    let oracle = bisected_square();
    let copy = oracle.clone();
    assert!(std::ptr::eq(
        oracle.obstacles().as_ptr(),
        copy.obstacles().as_ptr()
    ));
    assert_eq!(copy.obstacles().len(), 1);
}
