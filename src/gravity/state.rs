use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The current gravity of the simulation
///
/// Read by the contact resolver, the collision pipeline (contact filtering
/// uses "up" = the negated direction) and external collaborators such as
/// camera placement. Written only by [`GravityTransition`] advancement and
/// the world's reset operation.
///
/// [`GravityTransition`]: crate::gravity::GravityTransition
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct GravityState {
    direction: Vector3,
    magnitude: f32,
}

impl GravityState {
    /// Creates a gravity state with the given direction and magnitude
    pub fn new(direction: Vector3, magnitude: f32) -> Self {
        let mut state = Self {
            direction: Vector3::new(0.0, -1.0, 0.0),
            magnitude,
        };
        state.set_direction(direction);
        state
    }

    /// Returns the current unit gravity direction
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Returns the current gravity magnitude
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Returns the gravity acceleration vector (direction * magnitude)
    #[inline]
    pub fn acceleration(&self) -> Vector3 {
        self.direction * self.magnitude
    }

    /// Returns the "up" direction (opposite of gravity)
    #[inline]
    pub fn up(&self) -> Vector3 {
        -self.direction
    }

    /// Sets the gravity direction, normalizing the input
    ///
    /// A near-zero vector leaves the current direction unchanged.
    pub fn set_direction(&mut self, direction: Vector3) {
        if direction.length_squared() > crate::math::EPSILON {
            self.direction = direction.normalize();
        }
    }

    /// Sets the gravity magnitude
    pub fn set_magnitude(&mut self, magnitude: f32) {
        self.magnitude = magnitude;
    }

    /// Restores gravity to straight down
    pub fn reset(&mut self) {
        self.direction = Vector3::new(0.0, -1.0, 0.0);
    }
}

impl Default for GravityState {
    fn default() -> Self {
        Self {
            direction: Vector3::new(0.0, -1.0, 0.0),
            magnitude: 20.0,
        }
    }
}
