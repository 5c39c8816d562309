mod sequence;
mod platform;

pub use self::sequence::{MovementMode, PlatformSequence, Smoothing, Waypoint};
pub use self::platform::MovingPlatform;
