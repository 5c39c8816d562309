use approx::assert_relative_eq;
use marble_phys::collision::{closest_point_on_segment, closest_point_on_triangle};
use marble_phys::math::{Aabb, Quaternion, Transform, Vector3};
use std::f32::consts::PI;

#[test]
fn test_vector3_operations() {
    let v1 = Vector3::new(1.0, 2.0, 3.0);
    let v2 = Vector3::new(4.0, 5.0, 6.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum.x, 5.0);
    assert_eq!(sum.y, 7.0);
    assert_eq!(sum.z, 9.0);

    // Dot product
    let dot = v1.dot(&v2);
    assert_eq!(dot, 1.0 * 4.0 + 2.0 * 5.0 + 3.0 * 6.0);

    // Cross product
    let cross = v1.cross(&v2);
    assert_eq!(cross.x, v1.y * v2.z - v1.z * v2.y);
    assert_eq!(cross.y, v1.z * v2.x - v1.x * v2.z);
    assert_eq!(cross.z, v1.x * v2.y - v1.y * v2.x);

    // Length
    let length = v1.length();
    assert_relative_eq!(length, (1.0f32 + 4.0 + 9.0).sqrt());

    // Normalize
    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);

    // Normalizing a near-zero vector must not blow up
    let tiny = Vector3::new(1.0e-9, 0.0, 0.0);
    let normalized = tiny.normalize();
    assert!(normalized.length() < 1.0e-8);
}

#[test]
fn test_vector3_projection() {
    let v = Vector3::new(3.0, 4.0, 0.0);
    let up = Vector3::unit_y();

    let on_plane = v.project_on_plane(&up);
    assert_relative_eq!(on_plane.x, 3.0);
    assert_relative_eq!(on_plane.y, 0.0);
    assert_relative_eq!(on_plane.z, 0.0);

    // Projection onto a zero vector degenerates to no change
    let unchanged = v.project_on_plane(&Vector3::zero());
    assert_relative_eq!(unchanged.x, v.x);
    assert_relative_eq!(unchanged.y, v.y);
}

#[test]
fn test_quaternion_rotation() {
    let axis = Vector3::new(0.0, 1.0, 0.0);
    let angle = PI / 2.0;
    let q = Quaternion::from_axis_angle(axis, angle);

    assert_relative_eq!(q.length(), 1.0, epsilon = 1e-5);

    // 90 degrees around Y: +x maps to -z
    let rotated = q.rotate_vector(Vector3::unit_x());
    assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-5);

    // Composition of two quarter turns is a half turn
    let half = q * q;
    let rotated = half.rotate_vector(Vector3::unit_x());
    assert_relative_eq!(rotated.x, -1.0, epsilon = 1e-5);
    assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-5);

    // Conjugate rotates the other way
    let back = q.conjugate().rotate_vector(Vector3::unit_x());
    assert_relative_eq!(back.z, 1.0, epsilon = 1e-5);
}

#[test]
fn test_quaternion_axis_angle_round_trip() {
    let axis = Vector3::new(1.0, 2.0, -0.5).normalize();
    let angle = 1.2;
    let q = Quaternion::from_axis_angle(axis, angle);

    assert_relative_eq!(q.angle(), angle, epsilon = 1e-4);
    let recovered = q.axis();
    assert_relative_eq!(recovered.x, axis.x, epsilon = 1e-4);
    assert_relative_eq!(recovered.y, axis.y, epsilon = 1e-4);
    assert_relative_eq!(recovered.z, axis.z, epsilon = 1e-4);
}

#[test]
fn test_transform_matrices_round_trip() {
    let transform = Transform::new(
        Vector3::new(3.0, -2.0, 5.0),
        Quaternion::from_axis_angle(Vector3::new(0.3, 1.0, -0.2), 0.8),
        Vector3::new(2.0, 0.5, 1.5),
    );

    let local_to_world = transform.to_matrix();
    let world_to_local = transform.to_inverse_matrix();

    let point = Vector3::new(1.0, 2.0, 3.0);
    let world = local_to_world.multiply_point(point);
    let back = world_to_local.multiply_point(world);

    assert_relative_eq!(back.x, point.x, epsilon = 1e-4);
    assert_relative_eq!(back.y, point.y, epsilon = 1e-4);
    assert_relative_eq!(back.z, point.z, epsilon = 1e-4);

    // The product of the two matrices is identity on any point
    let another = Vector3::new(-4.0, 0.25, 9.0);
    let round = world_to_local.multiply_point(local_to_world.multiply_point(another));
    assert_relative_eq!(round.x, another.x, epsilon = 1e-3);
    assert_relative_eq!(round.y, another.y, epsilon = 1e-3);
    assert_relative_eq!(round.z, another.z, epsilon = 1e-3);
}

#[test]
fn test_aabb_sphere_tests() {
    let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

    assert!(aabb.contains_point(Vector3::zero()));
    assert!(!aabb.contains_point(Vector3::new(2.0, 0.0, 0.0)));

    // Sphere just touching a face
    assert!(aabb.intersects_sphere(Vector3::new(1.9, 0.0, 0.0), 1.0));
    assert!(!aabb.intersects_sphere(Vector3::new(2.1, 0.0, 0.0), 1.0));

    // Swept sphere reaches the box only with enough travel
    let travel = Vector3::new(-2.0, 0.0, 0.0);
    assert!(aabb.intersects_swept_sphere(Vector3::new(3.5, 0.0, 0.0), 0.5, travel));
    assert!(!aabb.intersects_swept_sphere(Vector3::new(5.5, 0.0, 0.0), 0.5, travel));
}

#[test]
fn test_closest_point_on_triangle_regions() {
    let a = Vector3::new(0.0, 0.0, 0.0);
    let b = Vector3::new(2.0, 0.0, 0.0);
    let c = Vector3::new(0.0, 2.0, 0.0);

    // Interior point projects straight down onto the face
    let p = Vector3::new(0.5, 0.5, 3.0);
    let closest = closest_point_on_triangle(p, a, b, c);
    assert_relative_eq!(closest.x, 0.5, epsilon = 1e-5);
    assert_relative_eq!(closest.y, 0.5, epsilon = 1e-5);
    assert_relative_eq!(closest.z, 0.0, epsilon = 1e-5);

    // Vertex region
    let p = Vector3::new(-1.0, -1.0, 0.0);
    let closest = closest_point_on_triangle(p, a, b, c);
    assert_relative_eq!(closest.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(closest.y, 0.0, epsilon = 1e-5);

    // Edge region along ab
    let p = Vector3::new(1.0, -2.0, 0.0);
    let closest = closest_point_on_triangle(p, a, b, c);
    assert_relative_eq!(closest.x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(closest.y, 0.0, epsilon = 1e-5);
}

#[test]
fn test_closest_point_on_segment() {
    let a = Vector3::new(0.0, 0.0, 0.0);
    let b = Vector3::new(4.0, 0.0, 0.0);

    // Past the ends the result clamps to the endpoints
    let closest = closest_point_on_segment(Vector3::new(-1.0, 2.0, 0.0), a, b);
    assert_relative_eq!(closest.x, 0.0, epsilon = 1e-5);

    let closest = closest_point_on_segment(Vector3::new(9.0, -1.0, 0.0), a, b);
    assert_relative_eq!(closest.x, 4.0, epsilon = 1e-5);

    let closest = closest_point_on_segment(Vector3::new(2.5, 7.0, 0.0), a, b);
    assert_relative_eq!(closest.x, 2.5, epsilon = 1e-5);
    assert_relative_eq!(closest.y, 0.0, epsilon = 1e-5);

    // Degenerate segment collapses to its start
    let closest = closest_point_on_segment(Vector3::new(1.0, 1.0, 1.0), a, a);
    assert_relative_eq!(closest.x, 0.0, epsilon = 1e-5);
}

#[test]
fn test_move_towards() {
    assert_relative_eq!(marble_phys::math::move_towards(0.0, 1.0, 0.25), 0.25);
    assert_relative_eq!(marble_phys::math::move_towards(0.9, 1.0, 0.25), 1.0);
    assert_relative_eq!(marble_phys::math::move_towards(1.0, 0.0, 0.25), 0.75);
    assert_relative_eq!(marble_phys::math::move_towards(0.5, 0.5, 0.25), 0.5);
}
