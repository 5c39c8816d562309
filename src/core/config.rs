#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the simulation core
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The fixed time step drained by the scheduler (200 Hz physics)
    pub time_step: f32,

    /// Slack added to the marble radius in the proximity tests
    pub contact_epsilon: f32,

    /// Up-alignment threshold for a contact to count as floor-like
    pub floor_dot: f32,

    /// Up-alignment threshold for a contact to accept a jump
    pub jump_dot: f32,

    /// World-frame normal speed above which a contact always bounces,
    /// regardless of the surface-relative speed (moving-platform impacts)
    pub hard_bounce_speed: f32,

    /// Maximum iterations of the velocity-cancel relaxation
    pub cancel_iterations: u32,

    /// Angular speed below which the orientation update is skipped
    pub min_angular_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.005,
            contact_epsilon: 1.0e-4,
            floor_dot: 0.7,
            jump_dot: 0.5,
            hard_bounce_speed: 3.0,
            cancel_iterations: 6,
            min_angular_speed: 1.0e-7,
        }
    }
}
