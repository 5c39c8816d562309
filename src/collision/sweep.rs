use crate::collision::queries::{ray_capsule, ray_offset_triangle, ray_sphere};
use crate::core::ColliderHandle;
use crate::geometry::GeometryCache;
use crate::math::Vector3;

/// Result of a sphere sweep against the scene geometry
#[derive(Debug, Clone, Copy)]
pub struct SweepHit {
    /// Travel distance of the sphere center at the moment of impact
    pub distance: f32,

    /// Contact point on the struck surface
    pub point: Vector3,

    /// Surface normal at the contact point, facing the sphere
    pub normal: Vector3,

    /// The collider that was struck
    pub collider: ColliderHandle,
}

/// A narrow query interface for continuous sphere casts
///
/// Implementable by any geometry backend; the collision pipeline only ever
/// needs this one operation beyond the discrete proximity tests.
pub trait SweepBackend {
    /// Casts a sphere from `origin` along `direction` (unit length) over at
    /// most `max_distance`, returning the earliest hit
    fn sweep_sphere(
        &self,
        cache: &GeometryCache,
        origin: Vector3,
        radius: f32,
        direction: Vector3,
        max_distance: f32,
    ) -> Option<SweepHit>;
}

/// Sphere sweep against the cached triangle meshes
///
/// The swept sphere is tested against the Minkowski expansion of each
/// triangle: the face lifted by the radius, capsules around the edges, and
/// spheres at the vertices. The earliest hit across all solid colliders
/// wins.
#[derive(Debug, Default)]
pub struct CachedMeshSweep;

impl CachedMeshSweep {
    /// Creates a new mesh sweep backend
    pub fn new() -> Self {
        Self
    }
}

impl SweepBackend for CachedMeshSweep {
    fn sweep_sphere(
        &self,
        cache: &GeometryCache,
        origin: Vector3,
        radius: f32,
        direction: Vector3,
        max_distance: f32,
    ) -> Option<SweepHit> {
        let mut best: Option<SweepHit> = None;
        let travel = direction * max_distance;

        for mesh in cache.solid_meshes() {
            if !mesh
                .world_bounds()
                .intersects_swept_sphere(origin, radius, travel)
            {
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

                // Lift the face toward whichever side the sphere starts on
                let facing = if (origin - v0).dot(&normal) >= 0.0 {
                    normal
                } else {
                    -normal
                };

                if let Some(t) = ray_offset_triangle(origin, direction, v0, v1, v2, facing, radius)
                {
                    let center = origin + direction * t;
                    consider(
                        &mut best,
                        t,
                        max_distance,
                        center - facing * radius,
                        facing,
                        direction,
                        mesh.collider(),
                    );
                }

                for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
                    if let Some((t, axis_point)) = ray_capsule(origin, direction, a, b, radius) {
                        let center = origin + direction * t;
                        let normal = (center - axis_point).normalize();
                        consider(
                            &mut best,
                            t,
                            max_distance,
                            axis_point,
                            normal,
                            direction,
                            mesh.collider(),
                        );
                    }
                }

                for vertex in [v0, v1, v2] {
                    if let Some(t) = ray_sphere(origin, direction, vertex, radius) {
                        let center = origin + direction * t;
                        let normal = (center - vertex).normalize();
                        consider(
                            &mut best,
                            t,
                            max_distance,
                            vertex,
                            normal,
                            direction,
                            mesh.collider(),
                        );
                    }
                }
            }
        }

        best
    }
}

/// Keeps the earliest hit whose surface faces against the travel direction
#[allow(clippy::too_many_arguments)]
fn consider(
    best: &mut Option<SweepHit>,
    distance: f32,
    max_distance: f32,
    point: Vector3,
    normal: Vector3,
    direction: Vector3,
    collider: ColliderHandle,
) {
    if distance > max_distance || normal.is_zero() || normal.dot(&direction) >= 0.0 {
        return;
    }

    if best.map_or(true, |hit| distance < hit.distance) {
        *best = Some(SweepHit {
            distance,
            point,
            normal,
            collider,
        });
    }
}
