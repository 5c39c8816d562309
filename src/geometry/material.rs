/// Surface properties sampled by the collision pipeline
///
/// Every contact copies the friction and restitution of the surface it was
/// generated against; the resolver combines them with the marble's own
/// friction coefficients.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceMaterial {
    /// Coefficient of friction, 0-1
    pub friction: f32,

    /// Coefficient of restitution (bounciness), 0-1
    pub restitution: f32,
}

impl SurfaceMaterial {
    /// Creates a new material with the specified properties
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction,
            restitution,
        }
    }

    /// Creates a material for ice (very low grip, slight bounce)
    pub fn ice() -> Self {
        Self {
            friction: 0.05,
            restitution: 0.3,
        }
    }

    /// Creates a material for sand (high grip, dead surface)
    pub fn sand() -> Self {
        Self {
            friction: 0.9,
            restitution: 0.0,
        }
    }

    /// Creates a material for a trampoline pad (full rebound)
    pub fn trampoline() -> Self {
        Self {
            friction: 0.5,
            restitution: 1.0,
        }
    }

    /// Creates a material for polished stone (standard course surface)
    pub fn stone() -> Self {
        Self {
            friction: 0.6,
            restitution: 0.4,
        }
    }
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.5,
        }
    }
}
