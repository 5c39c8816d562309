use crate::math::Vector3;

/// Returns the closest point to `p` on triangle `abc`
///
/// Region classification via barycentric coordinates; handles vertex, edge
/// and face regions without normalization.
pub fn closest_point_on_triangle(p: Vector3, a: Vector3, b: Vector3, c: Vector3) -> Vector3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Returns the closest point to `p` on segment `ab`
pub fn closest_point_on_segment(p: Vector3, a: Vector3, b: Vector3) -> Vector3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < crate::math::EPSILON {
        return a;
    }

    let t = crate::math::clamp((p - a).dot(&ab) / len_sq, 0.0, 1.0);
    a + ab * t
}

/// Intersects a ray with a sphere; returns the entry distance
pub fn ray_sphere(origin: Vector3, direction: Vector3, center: Vector3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;

    let a = direction.length_squared();
    let b = 2.0 * to_origin.dot(&direction);
    let c = to_origin.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a < crate::math::EPSILON {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        // Ray starts inside the sphere
        Some(0.0)
    } else {
        None
    }
}

/// Intersects a ray with a capsule around segment `ab`
///
/// Returns the ray distance and the closest point on the capsule axis. The
/// cylindrical side is solved as an infinite cylinder and clamped to the
/// segment range; the end caps fall back to sphere tests.
pub fn ray_capsule(
    origin: Vector3,
    direction: Vector3,
    a: Vector3,
    b: Vector3,
    radius: f32,
) -> Option<(f32, Vector3)> {
    let axis = b - a;
    let axis_len_sq = axis.length_squared();

    if axis_len_sq < crate::math::EPSILON {
        return ray_sphere(origin, direction, a, radius).map(|t| (t, a));
    }

    // Project out the axis component to reduce to a 2D circle intersection
    let ao = origin - a;
    let d_perp = direction - axis * (direction.dot(&axis) / axis_len_sq);
    let ao_perp = ao - axis * (ao.dot(&axis) / axis_len_sq);

    let qa = d_perp.length_squared();
    let qb = 2.0 * d_perp.dot(&ao_perp);
    let qc = ao_perp.length_squared() - radius * radius;

    let mut best: Option<f32> = None;

    if qa > crate::math::EPSILON {
        let discriminant = qb * qb - 4.0 * qa * qc;
        if discriminant >= 0.0 {
            let t = (-qb - discriminant.sqrt()) / (2.0 * qa);
            let t = if t >= 0.0 {
                Some(t)
            } else if qc <= 0.0 {
                Some(0.0)
            } else {
                None
            };

            // Accept only hits between the segment endpoints
            if let Some(t) = t {
                let hit = origin + direction * t;
                let s = (hit - a).dot(&axis) / axis_len_sq;
                if (0.0..=1.0).contains(&s) {
                    best = Some(t);
                }
            }
        }
    }

    if let Some(t) = best {
        let hit = origin + direction * t;
        let s = crate::math::clamp((hit - a).dot(&axis) / axis_len_sq, 0.0, 1.0);
        return Some((t, a + axis * s));
    }

    // End caps
    let cap_a = ray_sphere(origin, direction, a, radius).map(|t| (t, a));
    let cap_b = ray_sphere(origin, direction, b, radius).map(|t| (t, b));

    match (cap_a, cap_b) {
        (Some(ra), Some(rb)) => Some(if ra.0 <= rb.0 { ra } else { rb }),
        (Some(ra), None) => Some(ra),
        (None, Some(rb)) => Some(rb),
        (None, None) => None,
    }
}

/// Intersects a ray with the plane of a triangle lifted along its normal
///
/// Used for swept-sphere face tests: the plane is offset by `offset` along
/// `normal` and the hit must project inside the triangle.
pub fn ray_offset_triangle(
    origin: Vector3,
    direction: Vector3,
    v0: Vector3,
    v1: Vector3,
    v2: Vector3,
    normal: Vector3,
    offset: f32,
) -> Option<f32> {
    let denom = direction.dot(&normal);
    if denom.abs() < crate::math::EPSILON {
        return None;
    }

    let plane_point = v0 + normal * offset;
    let t = (plane_point - origin).dot(&normal) / denom;
    if t < 0.0 {
        return None;
    }

    // Project the hit back onto the triangle plane and test containment
    let hit = origin + direction * t - normal * offset;
    if point_in_triangle(hit, v0, v1, v2) {
        Some(t)
    } else {
        None
    }
}

/// Returns true if a point (on the triangle plane) lies inside the triangle
pub fn point_in_triangle(p: Vector3, a: Vector3, b: Vector3, c: Vector3) -> bool {
    let a = a - p;
    let b = b - p;
    let c = c - p;

    let bc = b.cross(&c);
    let ca = c.cross(&a);
    if bc.dot(&ca) < 0.0 {
        return false;
    }

    let ab = a.cross(&b);
    bc.dot(&ab) >= 0.0
}
