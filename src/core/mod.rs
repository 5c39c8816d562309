pub mod world;
pub mod config;
pub mod events;
pub mod scheduler;

pub use self::world::MarbleWorld;
pub use self::config::SimulationConfig;
pub use self::events::{EventQueue, MarbleEvent};
pub use self::scheduler::FixedStepScheduler;

/// A unique identifier for a collider registered with the geometry cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle(pub(crate) u32);

/// A unique identifier for a moving platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformHandle(pub(crate) u32);
