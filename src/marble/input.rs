use crate::math::{Vector2, Vector3};

/// Player input consumed by one physics substep
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    /// Camera-relative movement axes, each in [-1, 1]
    pub movement: Vector2,

    /// True while the jump control is held
    pub jump: bool,
}

impl ControlInput {
    /// Creates an input state
    pub fn new(movement: Vector2, jump: bool) -> Self {
        Self { movement, jump }
    }

    /// Returns an input state with no movement and no jump
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Camera-relative control axes
///
/// Supplied by the camera collaborator each frame; the resolver projects
/// them onto the plane perpendicular to "up" so input always drives motion
/// along the ground, whatever the current gravity is.
#[derive(Debug, Clone, Copy)]
pub struct ControlFrame {
    forward: Vector3,
    right: Vector3,
}

impl ControlFrame {
    /// Creates a control frame from the camera's forward and right vectors
    pub fn new(forward: Vector3, right: Vector3) -> Self {
        Self {
            forward: forward.normalize(),
            right: right.normalize(),
        }
    }

    /// Returns the raw forward axis
    #[inline]
    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    /// Returns the raw right axis
    #[inline]
    pub fn right(&self) -> Vector3 {
        self.right
    }

    /// Returns the side and motion directions on the plane perpendicular
    /// to `up`
    ///
    /// A degenerate projection (camera looking straight along gravity)
    /// yields a zero axis, which downstream code treats as no input along
    /// that axis.
    pub fn axes_on_plane(&self, up: Vector3) -> (Vector3, Vector3) {
        let side = self.right.project_on_plane(&up).normalize();
        let motion = self.forward.project_on_plane(&up).normalize();
        (side, motion)
    }
}

impl Default for ControlFrame {
    fn default() -> Self {
        Self {
            forward: Vector3::unit_z(),
            right: Vector3::unit_x(),
        }
    }
}
