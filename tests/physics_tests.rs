use approx::assert_relative_eq;
use marble_phys::core::MarbleEvent;
use marble_phys::geometry::{ColliderLayer, TriangleMesh};
use marble_phys::gravity::GravityTransition;
use marble_phys::math::{Transform, Vector2, Vector3};
use marble_phys::platform::{MovementMode, MovingPlatform, PlatformSequence, Smoothing, Waypoint};
use marble_phys::{ControlFrame, ControlInput, MarbleBody, MarbleWorld, SurfaceMaterial};
use rand::Rng;

/// A 20x20 horizontal quad at y = 0 with normals facing +y
fn floor_mesh() -> TriangleMesh {
    let vertices = vec![
        Vector3::new(-10.0, 0.0, -10.0),
        Vector3::new(10.0, 0.0, -10.0),
        Vector3::new(10.0, 0.0, 10.0),
        Vector3::new(-10.0, 0.0, 10.0),
    ];
    let indices = vec![0, 2, 1, 0, 3, 2];
    TriangleMesh::from_vertices_and_indices(vertices, indices)
}

/// A 90 degree roof ridge along the z axis, apex at y = 0
fn ridge_mesh() -> TriangleMesh {
    let vertices = vec![
        Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(0.0, 0.0, 5.0),
        Vector3::new(-5.0, -5.0, -5.0),
        Vector3::new(-5.0, -5.0, 5.0),
        Vector3::new(5.0, -5.0, -5.0),
        Vector3::new(5.0, -5.0, 5.0),
    ];
    // Two slopes meeting at the apex edge (0, 0, z)
    let indices = vec![0, 1, 3, 0, 3, 2, 0, 5, 1, 0, 4, 5];
    TriangleMesh::from_vertices_and_indices(vertices, indices)
}

fn world_with_floor(material: SurfaceMaterial) -> MarbleWorld {
    let mut world = MarbleWorld::new(MarbleBody::new(0.5));
    world.register_collider(
        floor_mesh(),
        Transform::identity(),
        material,
        ColliderLayer::TERRAIN,
    );
    world
}

#[test]
fn test_resting_stability() {
    let mut world = world_with_floor(SurfaceMaterial::default());
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);

    let input = ControlInput::idle();
    let frame = ControlFrame::default();

    // One second of simulation at rest with no input
    for _ in 0..50 {
        world.step(0.02, &input, &frame);
    }

    let marble = world.marble();
    assert!(marble.position.distance(&Vector3::new(0.0, 0.5, 0.0)) < 0.01);
    assert!(marble.linear_velocity.length() < 0.01);
    assert!(marble.angular_velocity.length() < 0.01);
    assert!(world.is_colliding());
}

#[test]
fn test_restitution_bounce_ratio() {
    // Surface restitution 1.0 combines with the marble's 0.5
    let mut world = world_with_floor(SurfaceMaterial::new(0.5, 1.0));
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);
    world.marble_mut().linear_velocity = Vector3::new(0.0, -5.0, 0.0);

    let input = ControlInput::idle();
    let frame = ControlFrame::default();

    world.step(0.005, &input, &frame);

    let expected = 0.5 * 5.0;
    let actual = world.marble().linear_velocity.y;
    assert_relative_eq!(actual, expected, epsilon = 0.2);

    // The impact was reported for audio/particles
    let bounced = world
        .events()
        .iter()
        .any(|e| matches!(e, MarbleEvent::Bounced { speed, .. } if (*speed - 5.0).abs() < 0.1));
    assert!(bounced);
}

#[test]
fn test_jump_impulse_independent_of_incoming_velocity() {
    let input = ControlInput::new(Vector2::zero(), true);
    let frame = ControlFrame::default();

    let mut from_rest = world_with_floor(SurfaceMaterial::default());
    from_rest.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);
    from_rest.step(0.005, &input, &frame);

    let mut from_impact = world_with_floor(SurfaceMaterial::default());
    from_impact.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);
    from_impact.marble_mut().linear_velocity = Vector3::new(0.0, -3.0, 0.0);
    from_impact.step(0.005, &input, &frame);

    let rest_vy = from_rest.marble().linear_velocity.y;
    let impact_vy = from_impact.marble().linear_velocity.y;

    // Post-jump normal speed matches the configured impulse either way
    assert_relative_eq!(rest_vy, 7.5, epsilon = 0.15);
    assert_relative_eq!(impact_vy, 7.5, epsilon = 0.15);

    let jumped = from_rest
        .events()
        .iter()
        .any(|e| matches!(e, MarbleEvent::Jumped { .. }));
    assert!(jumped);
}

#[test]
fn test_jump_requires_ground_alignment() {
    // A vertical wall: jump input on a wall contact must not fire
    let vertices = vec![
        Vector3::new(1.0, -10.0, -10.0),
        Vector3::new(1.0, 10.0, -10.0),
        Vector3::new(1.0, 10.0, 10.0),
        Vector3::new(1.0, -10.0, 10.0),
    ];
    // Normals face -x, toward the marble
    let indices = vec![0, 2, 1, 0, 3, 2];
    let wall = TriangleMesh::from_vertices_and_indices(vertices, indices);

    let mut world = MarbleWorld::new(MarbleBody::new(0.5));
    world.register_collider(
        wall,
        Transform::identity(),
        SurfaceMaterial::default(),
        ColliderLayer::TERRAIN,
    );
    world.marble_mut().position = Vector3::new(0.5, 0.0, 0.0);

    let input = ControlInput::new(Vector2::zero(), true);
    let frame = ControlFrame::default();
    world.step(0.005, &input, &frame);

    let jumped = world
        .events()
        .iter()
        .any(|e| matches!(e, MarbleEvent::Jumped { .. }));
    assert!(!jumped);
}

#[test]
fn test_no_input_no_drift_scenario() {
    // Marble at rest, gravity magnitude 20, friction 1.1/0.7, one second
    let mut world = world_with_floor(SurfaceMaterial::default());
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);
    assert_relative_eq!(world.gravity().magnitude(), 20.0);

    let input = ControlInput::idle();
    let frame = ControlFrame::default();

    for _ in 0..100 {
        world.step(0.01, &input, &frame);
    }

    let displacement = world
        .marble()
        .position
        .distance(&Vector3::new(0.0, 0.5, 0.0));
    assert!(displacement < 0.01);
}

#[test]
fn test_corner_edge_deflection() {
    let mut world = MarbleWorld::new(MarbleBody::new(0.5));
    world.register_collider(
        ridge_mesh(),
        Transform::identity(),
        SurfaceMaterial::default(),
        ColliderLayer::TERRAIN,
    );

    // Arriving at the convex apex edge at speed
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);
    world.marble_mut().linear_velocity = Vector3::new(0.0, -5.0, 0.0);

    let input = ControlInput::idle();
    let frame = ControlFrame::default();

    world.step(0.005, &input, &frame);

    // The edge test produced a single contact whose normal points from the
    // apex to the center, deflecting instead of passing through
    let contact = world.active_contact().expect("edge contact expected");
    assert!(contact.normal.dot(&Vector3::unit_y()) > 0.99);

    for _ in 0..100 {
        world.step(0.005, &input, &frame);
    }

    // No tunneling below the apex
    assert!(world.marble().position.y > 0.0);
}

#[test]
fn test_continuous_sweep_prevents_tunneling() {
    let mut world = world_with_floor(SurfaceMaterial::new(0.5, 1.0));
    world.marble_mut().position = Vector3::new(0.0, 3.0, 0.0);
    // Fast enough that one slice of travel exceeds the radius
    world.marble_mut().linear_velocity = Vector3::new(0.0, -200.0, 0.0);

    let input = ControlInput::idle();
    let frame = ControlFrame::default();

    for _ in 0..20 {
        world.step(0.005, &input, &frame);
    }

    // The sweep clamps the step at the time of impact and the marble rebounds
    assert!(world.marble().position.y > 0.0);
    assert!(world.marble().linear_velocity.y > 0.0);
}

#[test]
fn test_orientation_stays_normalized() {
    let mut world = world_with_floor(SurfaceMaterial::default());
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);

    let frame = ControlFrame::default();
    let mut rng = rand::thread_rng();

    for i in 0..300 {
        // Erratic input and the occasional random spin kick
        let input = ControlInput::new(
            Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            i % 37 == 0,
        );
        if i % 50 == 0 {
            world.marble_mut().angular_velocity = Vector3::new(
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
            );
        }

        world.step(0.01, &input, &frame);

        let magnitude = world.marble().orientation.length();
        assert_relative_eq!(magnitude, 1.0, epsilon = 1e-3);
    }
}

#[test]
fn test_rolling_under_input_moves_marble() {
    let mut world = world_with_floor(SurfaceMaterial::default());
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);

    // Push forward (camera looks along +z)
    let input = ControlInput::new(Vector2::new(0.0, 1.0), false);
    let frame = ControlFrame::default();

    for _ in 0..100 {
        world.step(0.01, &input, &frame);
    }

    let marble = world.marble();
    assert!(marble.position.z > 0.5, "marble should roll forward");
    assert!(marble.linear_velocity.z > 0.0);
    // Rolling, not just sliding
    assert!(marble.angular_velocity.length() > 0.1);
}

#[test]
fn test_contact_carries_platform_velocity() {
    let mut world = MarbleWorld::new(MarbleBody::new(0.5));

    let sequence = PlatformSequence::new(
        &[
            Waypoint::new(Vector3::zero(), 10.0),
            Waypoint::new(Vector3::new(10.0, 0.0, 0.0), 0.0),
        ],
        Smoothing::Linear,
    )
    .unwrap();
    let platform = world.add_platform(MovingPlatform::new(
        sequence,
        MovementMode::Constant,
        Vector3::zero(),
    ));
    world
        .register_platform_collider(platform, floor_mesh(), SurfaceMaterial::default())
        .unwrap();

    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);

    let input = ControlInput::idle();
    let frame = ControlFrame::default();

    world.step(0.005, &input, &frame);

    let contact = world.active_contact().expect("platform contact expected");
    assert_relative_eq!(contact.surface_velocity.x, 1.0, epsilon = 0.05);

    // Friction drags the marble along with the platform
    for _ in 0..200 {
        world.step(0.005, &input, &frame);
    }
    assert!(world.marble().linear_velocity.x > 0.5);
}

#[test]
fn test_gravity_transition_reaches_target() {
    let start = Vector3::new(0.0, -1.0, 0.0);
    let target = Vector3::new(1.0, 0.0, 0.0);
    let mut transition =
        GravityTransition::new(start, target, Vector3::unit_z(), 0.5).expect("valid transition");

    let mut direction = start;
    for _ in 0..10 {
        direction = transition.advance(0.06);
        assert_relative_eq!(direction.length(), 1.0, epsilon = 1e-4);
    }

    assert!(transition.finished());
    assert_relative_eq!(direction.x, 1.0, epsilon = 1e-4);
    assert_relative_eq!(direction.y, 0.0, epsilon = 1e-4);
}

#[test]
fn test_gravity_transition_antipodal_flip() {
    let start = Vector3::new(0.0, -1.0, 0.0);
    let target = Vector3::new(0.0, 1.0, 0.0);
    let mut transition =
        GravityTransition::new(start, target, Vector3::unit_z(), 1.0).expect("valid transition");

    // Every intermediate direction stays unit length even though a direct
    // lerp would pass through zero
    for _ in 0..25 {
        let direction = transition.advance(0.04);
        assert_relative_eq!(direction.length(), 1.0, epsilon = 1e-4);
    }

    let final_dir = transition.advance(0.04);
    assert_relative_eq!(final_dir.y, 1.0, epsilon = 1e-4);
}

#[test]
fn test_gravity_transition_replacement_cancels() {
    let mut world = MarbleWorld::new(MarbleBody::new(0.5));

    world.begin_gravity_transition(Vector3::unit_x(), Vector3::unit_z(), 0.5);
    world.advance_frame(0.1);

    // Retargeting replaces the in-flight transition
    world.begin_gravity_transition(Vector3::unit_z(), Vector3::unit_x(), 0.2);
    for _ in 0..10 {
        world.advance_frame(0.05);
    }

    let direction = world.gravity().direction();
    assert_relative_eq!(direction.z, 1.0, epsilon = 1e-4);
    assert!(direction.x.abs() < 1e-3);
}

#[test]
fn test_powerup_parameter_writes() {
    let mut world = world_with_floor(SurfaceMaterial::new(0.5, 1.0));
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);
    world.marble_mut().linear_velocity = Vector3::new(0.0, -5.0, 0.0);

    // Shock absorber: no rebound at all
    world.marble_mut().params.bounce_restitution = 0.0;

    let input = ControlInput::idle();
    let frame = ControlFrame::default();
    world.step(0.005, &input, &frame);

    // The impact is fully absorbed apart from integration residue
    assert!(world.marble().linear_velocity.y.abs() < 0.2);
}

#[test]
fn test_sensor_layer_generates_no_contacts() {
    let mut world = MarbleWorld::new(MarbleBody::new(0.5));
    world.register_collider(
        floor_mesh(),
        Transform::identity(),
        SurfaceMaterial::default(),
        ColliderLayer::SENSOR,
    );
    world.marble_mut().position = Vector3::new(0.0, 0.5, 0.0);

    let input = ControlInput::idle();
    let frame = ControlFrame::default();
    world.step(0.005, &input, &frame);

    assert!(!world.is_colliding());
}

#[test]
fn test_fixed_step_time_accounting() {
    let mut world = MarbleWorld::new(MarbleBody::new(0.5));

    let input = ControlInput::idle();
    let frame = ControlFrame::default();

    // 12 ms of frame time drains two 5 ms slices; 2 ms carries over
    world.step(0.012, &input, &frame);
    assert_relative_eq!(world.time(), 0.010, epsilon = 1e-6);

    // The carried 2 ms tops up the next frame
    world.step(0.008, &input, &frame);
    assert_relative_eq!(world.time(), 0.020, epsilon = 1e-6);
}
