use crate::collision::{CachedMeshSweep, CollisionPipeline, Contact};
use crate::core::{
    ColliderHandle, EventQueue, FixedStepScheduler, PlatformHandle, SimulationConfig,
};
use crate::error::PhysicsError;
use crate::geometry::{ColliderLayer, GeometryCache, SurfaceMaterial, TriangleMesh};
use crate::gravity::{GravityState, GravityTransition};
use crate::marble::{ContactResolver, ControlFrame, ControlInput, MarbleBody};
use crate::math::{Quaternion, Transform, Vector3};
use crate::platform::MovingPlatform;
use crate::Result;

/// The simulation context owning every piece of marble physics state
///
/// One marble body, the moving platforms, the geometry cache, the gravity
/// state and the event queue live here; the parts that need them are handed
/// references instead of reaching for globals. All mutation happens inside
/// the fixed-step tick boundary on the calling thread.
pub struct MarbleWorld {
    marble: MarbleBody,
    platforms: Vec<MovingPlatform>,

    /// Colliders that follow a platform, refreshed every substep
    platform_colliders: Vec<(PlatformHandle, ColliderHandle)>,

    cache: GeometryCache,

    gravity: GravityState,
    transition: Option<GravityTransition>,

    pipeline: CollisionPipeline,
    resolver: ContactResolver,
    sweep: CachedMeshSweep,
    scheduler: FixedStepScheduler,

    events: EventQueue,
    active_contact: Option<Contact>,
}

impl MarbleWorld {
    /// Creates a world around a marble with default settings
    pub fn new(marble: MarbleBody) -> Self {
        Self::with_config(marble, SimulationConfig::default())
    }

    /// Creates a world with the given configuration
    pub fn with_config(marble: MarbleBody, config: SimulationConfig) -> Self {
        Self {
            marble,
            platforms: Vec::new(),
            platform_colliders: Vec::new(),
            cache: GeometryCache::new(),
            gravity: GravityState::default(),
            transition: None,
            pipeline: CollisionPipeline::new(config.contact_epsilon, config.floor_dot),
            resolver: ContactResolver::new(config.clone()),
            sweep: CachedMeshSweep::new(),
            scheduler: FixedStepScheduler::new(config.time_step),
            events: EventQueue::new(),
            active_contact: None,
        }
    }

    /// Returns a reference to the marble body
    pub fn marble(&self) -> &MarbleBody {
        &self.marble
    }

    /// Returns a mutable reference to the marble body
    ///
    /// Power-up logic writes physical constants through this; respawn logic
    /// teleports through it.
    pub fn marble_mut(&mut self) -> &mut MarbleBody {
        &mut self.marble
    }

    /// Returns the marble's world pose for rendering and camera placement
    pub fn marble_pose(&self) -> (Vector3, Quaternion) {
        (self.marble.position, self.marble.orientation)
    }

    /// Returns the current gravity state
    pub fn gravity(&self) -> &GravityState {
        &self.gravity
    }

    /// Sets the gravity magnitude
    pub fn set_gravity_magnitude(&mut self, magnitude: f32) {
        self.gravity.set_magnitude(magnitude);
    }

    /// Starts a time-sliced rotation of gravity toward `target`
    ///
    /// `reference` picks the intermediate axis for a full flip (typically
    /// the camera forward). An in-flight transition is replaced, which
    /// cancels it. A degenerate target direction is ignored.
    pub fn begin_gravity_transition(&mut self, target: Vector3, reference: Vector3, duration: f32) {
        if let Some(transition) =
            GravityTransition::new(self.gravity.direction(), target, reference, duration)
        {
            self.transition = Some(transition);
        }
    }

    /// Restores gravity to straight down, cancelling any transition
    pub fn reset_gravity(&mut self) {
        self.transition = None;
        self.gravity.reset();
    }

    /// Advances the gravity transition; call once per rendered frame
    ///
    /// The transition deliberately runs on render time, not physics time,
    /// so a clamped physics substep never stretches a gravity flip.
    pub fn advance_frame(&mut self, frame_dt: f32) {
        if let Some(transition) = &mut self.transition {
            let direction = transition.advance(frame_dt);
            self.gravity.set_direction(direction);

            if transition.finished() {
                self.transition = None;
            }
        }
    }

    /// Registers a static collider and returns its handle
    pub fn register_collider(
        &mut self,
        mesh: TriangleMesh,
        transform: Transform,
        material: SurfaceMaterial,
        layers: ColliderLayer,
    ) -> ColliderHandle {
        self.cache.register(mesh, transform, material, layers)
    }

    /// Adds a moving platform and returns its handle
    pub fn add_platform(&mut self, platform: MovingPlatform) -> PlatformHandle {
        let handle = PlatformHandle(self.platforms.len() as u32);
        self.platforms.push(platform);
        handle
    }

    /// Registers a collider that rides a platform
    ///
    /// The collider's transform and surface velocity follow the platform
    /// every substep; contacts against it carry the platform velocity.
    pub fn register_platform_collider(
        &mut self,
        platform: PlatformHandle,
        mesh: TriangleMesh,
        material: SurfaceMaterial,
    ) -> Result<ColliderHandle> {
        let position = self
            .platforms
            .get(platform.0 as usize)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("platform {:?}", platform)))?
            .position();

        let collider = self.cache.register_platform_collider(
            mesh,
            Transform::from_position(position),
            material,
            platform,
        );
        self.platform_colliders.push((platform, collider));

        Ok(collider)
    }

    /// Returns a platform by handle
    pub fn platform(&self, handle: PlatformHandle) -> Option<&MovingPlatform> {
        self.platforms.get(handle.0 as usize)
    }

    /// Returns a platform's published velocity (for camera and rider logic)
    pub fn platform_velocity(&self, handle: PlatformHandle) -> Option<Vector3> {
        self.platform(handle).map(|p| p.velocity())
    }

    /// Sends a "go to time" trigger to a platform
    pub fn trigger_platform(&mut self, handle: PlatformHandle, target_time: f32) -> Result<()> {
        self.platforms
            .get_mut(handle.0 as usize)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("platform {:?}", handle)))?
            .go_to_time(target_time);
        Ok(())
    }

    /// Restores every platform to its initial pose
    pub fn reset_platforms(&mut self) {
        for platform in &mut self.platforms {
            platform.reset();
        }
    }

    /// Returns the surface material of a collider
    pub fn surface_material(&self, handle: ColliderHandle) -> Option<SurfaceMaterial> {
        self.cache.surface_material(handle)
    }

    /// Returns the contact resolved in the most recent substep
    pub fn active_contact(&self) -> Option<&Contact> {
        self.active_contact.as_ref()
    }

    /// Returns the surface the marble currently touches (for audio lookups)
    pub fn active_surface(&self) -> Option<ColliderHandle> {
        self.active_contact.as_ref().map(|c| c.surface)
    }

    /// Returns true if the marble touched anything in the last substep
    pub fn is_colliding(&self) -> bool {
        self.active_contact.is_some()
    }

    /// Returns the events produced since the last `step` call
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue, for draining
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Returns the total simulated time
    pub fn time(&self) -> f32 {
        self.scheduler.time()
    }

    /// Returns a reference to the geometry cache
    pub fn geometry(&self) -> &GeometryCache {
        &self.cache
    }

    /// Runs the physics simulation for a frame's worth of time
    ///
    /// The frame time is banked and drained in fixed slices; leftover time
    /// below one slice carries to the next call. `frame` carries the
    /// camera-relative control axes sampled this frame.
    pub fn step(&mut self, frame_dt: f32, input: &ControlInput, frame: &ControlFrame) {
        self.events.clear();
        self.scheduler.accumulate(frame_dt);

        while self.scheduler.ready() {
            let mut dt = self.scheduler.time_step();
            self.substep(&mut dt, input, frame);
            self.scheduler.consume(dt);
        }
    }

    /// Performs a single fixed slice of the simulation
    ///
    /// A continuous-sweep hit may clamp `dt` to the time of impact; the
    /// clamped value is what the scheduler consumes.
    fn substep(&mut self, dt: &mut f32, input: &ControlInput, frame: &ControlFrame) {
        let step = *dt;

        // Platforms first, so contacts see current surface velocities
        for platform in &mut self.platforms {
            platform.advance(step);
        }

        for &(platform, collider) in &self.platform_colliders {
            if let Some(platform) = self.platforms.get(platform.0 as usize) {
                self.cache
                    .set_transform(collider, Transform::from_position(platform.position()));
                self.cache.set_surface_velocity(collider, platform.velocity());
            }
        }

        self.cache.refresh();

        let contact = self.pipeline.find_contact(
            &self.cache,
            &self.sweep,
            self.marble.position,
            self.marble.linear_velocity,
            self.marble.radius(),
            self.gravity.up(),
            dt,
        );
        self.active_contact = contact;

        self.resolver.resolve(
            &mut self.marble,
            contact.as_ref(),
            input,
            frame,
            &self.gravity,
            *dt,
            &mut self.events,
        );
    }
}
