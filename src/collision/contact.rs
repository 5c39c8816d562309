use crate::core::ColliderHandle;
use crate::math::Vector3;

/// A single resolved contact between the marble and a surface
///
/// Constructed fresh each substep by the collision pipeline and discarded
/// after resolution; never persisted across steps.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Contact point in world space
    pub point: Vector3,

    /// Unit normal pointing away from the surface, into the marble
    pub normal: Vector3,

    /// Penetration depth along the normal
    pub penetration: f32,

    /// Restitution coefficient of the struck surface
    pub restitution: f32,

    /// Friction coefficient of the struck surface
    pub friction: f32,

    /// Velocity of the surface at the contact point (zero for static
    /// geometry, the published platform velocity otherwise)
    pub surface_velocity: Vector3,

    /// The collider the contact was generated against
    pub surface: ColliderHandle,
}
