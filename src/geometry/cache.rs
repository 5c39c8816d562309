use crate::core::{ColliderHandle, PlatformHandle};
use crate::geometry::{ColliderLayer, SurfaceMaterial, Triangle, TriangleMesh};
use crate::math::{Aabb, Matrix4, Transform, Vector3};

/// Cached collision data for a single registered collider
///
/// The local-to-world and world-to-local matrices are derived from the
/// collider transform once and reused every substep; a transform change is
/// detected by comparing position, rotation and scale against the values
/// cached at the last refresh.
#[derive(Debug, Clone)]
pub struct CachedMesh {
    collider: ColliderHandle,
    mesh: TriangleMesh,

    transform: Transform,

    local_to_world: Matrix4,
    world_to_local: Matrix4,

    last_position: Vector3,
    last_rotation: crate::math::Quaternion,
    last_scale: Vector3,

    world_bounds: Aabb,

    material: SurfaceMaterial,
    layers: ColliderLayer,
    platform: Option<PlatformHandle>,
    surface_velocity: Vector3,
    enabled: bool,
}

impl CachedMesh {
    fn new(
        collider: ColliderHandle,
        mesh: TriangleMesh,
        transform: Transform,
        material: SurfaceMaterial,
        layers: ColliderLayer,
        platform: Option<PlatformHandle>,
    ) -> Self {
        let local_to_world = transform.to_matrix();
        let world_to_local = transform.to_inverse_matrix();
        let world_bounds = compute_world_bounds(&mesh, &local_to_world);

        Self {
            collider,
            mesh,
            transform,
            local_to_world,
            world_to_local,
            last_position: transform.position,
            last_rotation: transform.rotation,
            last_scale: transform.scale,
            world_bounds,
            material,
            layers,
            platform,
            surface_velocity: Vector3::ZERO,
            enabled: true,
        }
    }

    /// Returns the handle of the owning collider
    #[inline]
    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    /// Returns the surface material of the collider
    #[inline]
    pub fn material(&self) -> SurfaceMaterial {
        self.material
    }

    /// Returns the layer mask of the collider
    #[inline]
    pub fn layers(&self) -> ColliderLayer {
        self.layers
    }

    /// Returns the owning platform, if the collider rides one
    #[inline]
    pub fn platform(&self) -> Option<PlatformHandle> {
        self.platform
    }

    /// Returns true if the collider participates in contact generation
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the velocity of the surface (zero unless a platform moved it)
    #[inline]
    pub fn surface_velocity(&self) -> Vector3 {
        self.surface_velocity
    }

    /// Returns the current collider transform
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Returns the cached local-to-world matrix
    #[inline]
    pub fn local_to_world(&self) -> &Matrix4 {
        &self.local_to_world
    }

    /// Returns the cached world-to-local matrix
    #[inline]
    pub fn world_to_local(&self) -> &Matrix4 {
        &self.world_to_local
    }

    /// Returns the world-space bounds of the collider
    #[inline]
    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    /// Returns the number of triangles in the cached mesh
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Returns true if the cached mesh has no usable triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Returns the world-space triangle at the given index
    pub fn world_triangle(&self, index: usize) -> Option<Triangle> {
        let local = self.mesh.triangle(index)?;

        Some(Triangle::new(
            self.local_to_world.multiply_point(local.vertices[0]),
            self.local_to_world.multiply_point(local.vertices[1]),
            self.local_to_world.multiply_point(local.vertices[2]),
        ))
    }

    /// Recomputes the cached matrices if the transform changed since the
    /// last refresh
    fn refresh(&mut self) {
        if self.transform.position == self.last_position
            && self.transform.rotation == self.last_rotation
            && self.transform.scale == self.last_scale
        {
            return;
        }

        self.local_to_world = self.transform.to_matrix();
        self.world_to_local = self.transform.to_inverse_matrix();
        self.world_bounds = compute_world_bounds(&self.mesh, &self.local_to_world);

        self.last_position = self.transform.position;
        self.last_rotation = self.transform.rotation;
        self.last_scale = self.transform.scale;
    }
}

/// The set of cached collider meshes queried by the collision pipeline
///
/// Built once at scene initialization; during play only collider transforms
/// change (platforms), and only those refreshes recompute matrices.
#[derive(Debug, Default)]
pub struct GeometryCache {
    meshes: Vec<CachedMesh>,
}

impl GeometryCache {
    /// Creates a new empty cache
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    /// Registers a static collider and returns its handle
    pub fn register(
        &mut self,
        mesh: TriangleMesh,
        transform: Transform,
        material: SurfaceMaterial,
        layers: ColliderLayer,
    ) -> ColliderHandle {
        self.register_internal(mesh, transform, material, layers, None)
    }

    /// Registers a collider owned by a moving platform
    ///
    /// Contacts generated against it carry the platform's published velocity.
    pub fn register_platform_collider(
        &mut self,
        mesh: TriangleMesh,
        transform: Transform,
        material: SurfaceMaterial,
        platform: PlatformHandle,
    ) -> ColliderHandle {
        self.register_internal(
            mesh,
            transform,
            material,
            ColliderLayer::PLATFORM,
            Some(platform),
        )
    }

    fn register_internal(
        &mut self,
        mesh: TriangleMesh,
        transform: Transform,
        material: SurfaceMaterial,
        layers: ColliderLayer,
        platform: Option<PlatformHandle>,
    ) -> ColliderHandle {
        let handle = ColliderHandle(self.meshes.len() as u32);

        if mesh.is_empty() {
            // Excluded from contact generation; reported once, here.
            log::warn!(
                "collider {:?} registered with no usable triangles; it will generate no contacts",
                handle
            );
        }

        self.meshes
            .push(CachedMesh::new(handle, mesh, transform, material, layers, platform));

        handle
    }

    /// Returns the cached mesh for a collider
    pub fn get(&self, handle: ColliderHandle) -> Option<&CachedMesh> {
        self.meshes.get(handle.0 as usize)
    }

    /// Returns the surface material of a collider
    pub fn surface_material(&self, handle: ColliderHandle) -> Option<SurfaceMaterial> {
        self.get(handle).map(|m| m.material())
    }

    /// Updates the transform of a collider (platform motion)
    pub fn set_transform(&mut self, handle: ColliderHandle, transform: Transform) {
        if let Some(mesh) = self.meshes.get_mut(handle.0 as usize) {
            mesh.transform = transform;
        }
    }

    /// Publishes the current surface velocity of a collider
    pub fn set_surface_velocity(&mut self, handle: ColliderHandle, velocity: Vector3) {
        if let Some(mesh) = self.meshes.get_mut(handle.0 as usize) {
            mesh.surface_velocity = velocity;
        }
    }

    /// Enables or disables a collider
    pub fn set_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        if let Some(mesh) = self.meshes.get_mut(handle.0 as usize) {
            mesh.enabled = enabled;
        }
    }

    /// Recomputes cached matrices for colliders whose transform changed
    pub fn refresh(&mut self) {
        for mesh in &mut self.meshes {
            mesh.refresh();
        }
    }

    /// Returns the number of registered colliders
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns true if no colliders are registered
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Iterates over the colliders that participate in contact generation
    pub fn solid_meshes(&self) -> impl Iterator<Item = &CachedMesh> {
        self.meshes.iter().filter(|m| {
            m.is_enabled() && !m.is_empty() && m.layers().intersects(ColliderLayer::solid())
        })
    }

    /// Iterates over all registered colliders
    pub fn iter(&self) -> impl Iterator<Item = &CachedMesh> {
        self.meshes.iter()
    }
}

fn compute_world_bounds(mesh: &TriangleMesh, local_to_world: &Matrix4) -> Aabb {
    let vertices = mesh.vertices();

    if vertices.is_empty() {
        let origin = local_to_world.get_translation();
        return Aabb::new(origin, origin);
    }

    let mut min = local_to_world.multiply_point(vertices[0]);
    let mut max = min;

    for vertex in vertices.iter().skip(1) {
        let world = local_to_world.multiply_point(*vertex);

        min.x = min.x.min(world.x);
        min.y = min.y.min(world.y);
        min.z = min.z.min(world.z);

        max.x = max.x.max(world.x);
        max.y = max.y.max(world.y);
        max.z = max.z.max(world.z);
    }

    Aabb::new(min, max)
}
