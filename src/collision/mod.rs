mod contact;
mod queries;
mod sweep;
mod pipeline;

pub use self::contact::Contact;
pub use self::queries::{closest_point_on_segment, closest_point_on_triangle};
pub use self::sweep::{CachedMeshSweep, SweepBackend, SweepHit};
pub use self::pipeline::CollisionPipeline;
