use crate::math::{Quaternion, Vector3};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Tunable physical constants of the marble
///
/// Power-up collaborators write these fields directly: a shock absorber
/// zeroes `bounce_restitution`, a super bounce sets it to one, a gyrocopter
/// scales `gravity_scale`, surface effects swap the friction pair, and so
/// on. Defaults are the stock marble tuning.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct MarbleParams {
    /// Maximum surface speed the marble can roll itself up to
    pub max_roll_velocity: f32,

    /// Angular acceleration limit for input torque
    pub angular_acceleration: f32,

    /// Angular acceleration limit when braking (no input held)
    pub braking_acceleration: f32,

    /// Acceleration available from input while airborne
    pub air_acceleration: f32,

    /// Multiplier applied on top of the gravity state's magnitude
    pub gravity_scale: f32,

    /// Static friction coefficient of the marble
    pub static_friction: f32,

    /// Kinetic friction coefficient of the marble
    pub kinetic_friction: f32,

    /// Kinetic friction applied to the tangential component of a bounce
    pub bounce_kinetic_friction: f32,

    /// Impulse applied along the contact normal on a jump
    pub jump_impulse: f32,

    /// Inward speed below which a contact rests instead of bouncing
    pub min_bounce_velocity: f32,

    /// Marble-side restitution, multiplied with the surface's
    pub bounce_restitution: f32,

    /// Minimum rebound speed enforced at contacts (super-bounce floor)
    pub bounce: f32,
}

impl Default for MarbleParams {
    fn default() -> Self {
        Self {
            max_roll_velocity: 15.0,
            angular_acceleration: 75.0,
            braking_acceleration: 30.0,
            air_acceleration: 5.0,
            gravity_scale: 1.0,
            static_friction: 1.1,
            kinetic_friction: 0.7,
            bounce_kinetic_friction: 0.2,
            jump_impulse: 7.5,
            min_bounce_velocity: 0.1,
            bounce_restitution: 0.5,
            bounce: 0.0,
        }
    }
}

/// The controllable sphere body
///
/// Mutated once per physics substep by the contact resolver, which owns it
/// exclusively for the duration of the step.
#[derive(Debug, Clone)]
pub struct MarbleBody {
    /// Center position in world space
    pub position: Vector3,

    /// Orientation, kept unit length across substeps
    pub orientation: Quaternion,

    /// Linear velocity in world space
    pub linear_velocity: Vector3,

    /// Angular velocity in world space (radians per second)
    pub angular_velocity: Vector3,

    /// Physical constants
    pub params: MarbleParams,

    radius: f32,
}

impl MarbleBody {
    /// Creates a marble of the given radius at the origin
    pub fn new(radius: f32) -> Self {
        Self::with_params(radius, MarbleParams::default())
    }

    /// Creates a marble with explicit physical constants
    pub fn with_params(radius: f32, params: MarbleParams) -> Self {
        Self {
            position: Vector3::ZERO,
            orientation: Quaternion::identity(),
            linear_velocity: Vector3::ZERO,
            angular_velocity: Vector3::ZERO,
            params,
            radius: radius.max(0.0),
        }
    }

    /// Returns the marble radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Moves the marble to a position, discarding all momentum
    ///
    /// Used by respawn logic; mid-play position changes should go through
    /// the integrator instead.
    pub fn teleport(&mut self, position: Vector3) {
        self.position = position;
        self.linear_velocity = Vector3::ZERO;
        self.angular_velocity = Vector3::ZERO;
    }
}
