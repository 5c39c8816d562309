use crate::math::Vector3;
use crate::platform::{MovementMode, PlatformSequence};

/// A platform following a waypoint sequence on a fixed schedule
///
/// Advanced once per physics substep, before contact generation, so the
/// published velocity is current when the collision pipeline attaches it to
/// contacts against this platform's collider.
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    sequence: PlatformSequence,
    mode: MovementMode,

    /// World position of the first waypoint; path offsets are added to it
    base_position: Vector3,

    time: f32,
    target_time: f32,
    initial_time: f32,

    previous_position: Vector3,
    velocity: Vector3,
}

impl MovingPlatform {
    /// Creates a platform at the start of its sequence
    pub fn new(sequence: PlatformSequence, mode: MovementMode, base_position: Vector3) -> Self {
        Self::with_initial_time(sequence, mode, base_position, 0.0)
    }

    /// Creates a platform starting partway through its sequence
    pub fn with_initial_time(
        sequence: PlatformSequence,
        mode: MovementMode,
        base_position: Vector3,
        initial_time: f32,
    ) -> Self {
        let time = crate::math::clamp(initial_time, 0.0, sequence.max_reachable_time());
        let position = base_position + sequence.sample(time);

        Self {
            sequence,
            mode,
            base_position,
            time,
            target_time: time,
            initial_time: time,
            previous_position: position,
            velocity: Vector3::ZERO,
        }
    }

    /// Returns the platform's current world position
    #[inline]
    pub fn position(&self) -> Vector3 {
        self.previous_position
    }

    /// Returns the platform's instantaneous velocity
    #[inline]
    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Returns the platform's elapsed path time
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Returns the platform's movement mode
    #[inline]
    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Returns the platform's path sequence
    #[inline]
    pub fn sequence(&self) -> &PlatformSequence {
        &self.sequence
    }

    /// Sets the elapsed time the platform should seek toward
    ///
    /// Triggered platforms clamp the target to the reachable range;
    /// constant platforms take the value as-is.
    pub fn go_to_time(&mut self, target: f32) {
        self.target_time = match self.mode {
            MovementMode::Triggered => {
                crate::math::clamp(target, 0.0, self.sequence.max_reachable_time())
            }
            MovementMode::Constant => target,
        };
    }

    /// Restores the platform to its initial pose
    pub fn reset(&mut self) {
        self.time = self.initial_time;
        self.target_time = self.initial_time;
        self.previous_position = self.base_position + self.sequence.sample(self.time);
        self.velocity = Vector3::ZERO;
    }

    /// Advances the platform by one substep and publishes its velocity
    pub fn advance(&mut self, dt: f32) {
        if dt <= crate::math::EPSILON {
            return;
        }

        // Triggered platforms hold position once the target is reached
        if self.mode == MovementMode::Triggered && crate::math::approx_eq(self.time, self.target_time)
        {
            self.velocity = Vector3::ZERO;
            return;
        }

        match self.mode {
            MovementMode::Triggered => {
                self.time = crate::math::move_towards(self.time, self.target_time, dt);
            }
            MovementMode::Constant => {
                self.time += dt;

                // Loop: wrap elapsed time to zero past the full duration
                if self.time > self.sequence.total_time() {
                    self.time = 0.0;
                }
            }
        }

        let new_position = self.base_position + self.sequence.sample(self.time);

        self.velocity = (new_position - self.previous_position) / dt;
        self.previous_position = new_position;
    }
}
