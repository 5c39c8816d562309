use crate::collision::queries::{closest_point_on_segment, closest_point_on_triangle};
use crate::collision::{Contact, SweepBackend};
use crate::geometry::{CachedMesh, GeometryCache};
use crate::math::Vector3;

/// Builds at most one contact per substep from the cached scene geometry
///
/// Contact generation is a pure query: it never mutates marble state. The
/// only side channel is the substep clamp when a continuous sweep hits.
#[derive(Debug, Clone)]
pub struct CollisionPipeline {
    /// Slack added to the marble radius in the proximity tests
    contact_epsilon: f32,

    /// Up-alignment threshold for floor-like surfaces
    floor_dot: f32,
}

impl CollisionPipeline {
    /// Creates a pipeline with the given proximity slack and floor threshold
    pub fn new(contact_epsilon: f32, floor_dot: f32) -> Self {
        Self {
            contact_epsilon,
            floor_dot,
        }
    }

    /// Produces zero or one contact for this substep
    ///
    /// When the projected travel exceeds the marble radius, a continuous
    /// sweep runs first; a sweep hit clamps `dt` to the time of impact and
    /// short-circuits the discrete tests. Otherwise every triangle of every
    /// solid cached mesh contributes face, edge and vertex candidates, which
    /// are filtered down to the deepest, most up-aligned contact.
    pub fn find_contact<S: SweepBackend>(
        &self,
        cache: &GeometryCache,
        sweep: &S,
        position: Vector3,
        velocity: Vector3,
        radius: f32,
        up: Vector3,
        dt: &mut f32,
    ) -> Option<Contact> {
        let speed = velocity.length();
        let travel = speed * *dt;

        if travel > radius {
            let direction = velocity / speed;
            if let Some(hit) = sweep.sweep_sphere(cache, position, radius, direction, travel) {
                let travel_time = hit.distance / speed;
                *dt = dt.min(travel_time);

                let mesh = cache.get(hit.collider)?;
                let material = mesh.material();

                // Walls absorb the impact; only floor-like hits rebound
                let restitution = if hit.normal.dot(&up) > self.floor_dot {
                    material.restitution
                } else {
                    0.0
                };

                return Some(Contact {
                    point: hit.point,
                    normal: hit.normal,
                    penetration: 0.0,
                    restitution,
                    friction: material.friction,
                    surface_velocity: mesh.surface_velocity(),
                    surface: hit.collider,
                });
            }
        }

        let mut candidates = Vec::new();
        let test_radius = radius + self.contact_epsilon;

        for mesh in cache.solid_meshes() {
            if !mesh.world_bounds().intersects_sphere(position, test_radius) {
                continue;
            }

            for index in 0..mesh.triangle_count() {
                let Some(triangle) = mesh.world_triangle(index) else {
                    continue;
                };
                let [v0, v1, v2] = triangle.vertices;

                let normal = triangle.normal();
                if normal.is_zero() {
                    continue;
                }

                // Face region: accept only the side the normal points to
                let closest = closest_point_on_triangle(position, v0, v1, v2);
                let diff = position - closest;
                if diff.length_squared() <= test_radius * test_radius && diff.dot(&normal) >= 0.0 {
                    push_candidate(&mut candidates, mesh, position, closest, test_radius);
                }

                for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
                    let closest = closest_point_on_segment(position, a, b);
                    push_candidate(&mut candidates, mesh, position, closest, test_radius);
                }

                for vertex in [v0, v1, v2] {
                    push_candidate(&mut candidates, mesh, position, vertex, test_radius);
                }
            }
        }

        self.filter(candidates, up)
    }

    /// Reduces a candidate set to a single stable contact
    ///
    /// Deepest penetration wins; among equally deep candidates the normal
    /// best aligned with "up" is kept. Averaging normals at seams would
    /// jitter, so exactly one contact survives.
    fn filter(&self, candidates: Vec<Contact>, up: Vector3) -> Option<Contact> {
        if candidates.is_empty() {
            return None;
        }

        let deepest = candidates
            .iter()
            .map(|c| c.penetration)
            .fold(f32::MIN, f32::max);

        let mut best: Option<Contact> = None;
        let mut best_dot = f32::MIN;

        for contact in candidates {
            if contact.penetration < deepest - crate::math::EPSILON {
                continue;
            }

            let alignment = contact.normal.dot(&up);
            if alignment > best_dot {
                best_dot = alignment;
                best = Some(contact);
            }
        }

        best
    }
}

impl Default for CollisionPipeline {
    fn default() -> Self {
        Self::new(1.0e-4, 0.7)
    }
}

/// Appends a proximity candidate if the closest point is within reach
fn push_candidate(
    candidates: &mut Vec<Contact>,
    mesh: &CachedMesh,
    position: Vector3,
    closest: Vector3,
    test_radius: f32,
) {
    let diff = position - closest;
    let dist_sq = diff.length_squared();

    if dist_sq > test_radius * test_radius || dist_sq < crate::math::EPSILON {
        return;
    }

    let distance = dist_sq.sqrt();
    let penetration = test_radius - distance;
    if penetration <= 0.0 {
        return;
    }

    let material = mesh.material();

    candidates.push(Contact {
        point: closest,
        normal: diff / distance,
        penetration,
        restitution: material.restitution,
        friction: material.friction,
        surface_velocity: mesh.surface_velocity(),
        surface: mesh.collider(),
    });
}
