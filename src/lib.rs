pub mod math;
pub mod core;
pub mod gravity;
pub mod geometry;
pub mod collision;
pub mod marble;
pub mod platform;

/// Re-export common types for easier usage
pub use crate::core::{MarbleWorld, SimulationConfig};
pub use crate::marble::{MarbleBody, MarbleParams, ControlFrame, ControlInput};
pub use crate::geometry::SurfaceMaterial;
pub use crate::math::Vector3;

/// Error types for the marble physics core
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Degenerate geometry: {0}")]
        DegenerateGeometry(String),
    }
}

/// Result type for marble physics operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
