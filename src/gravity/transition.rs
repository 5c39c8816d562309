use crate::math::Vector3;

/// A time-sliced rotation of the gravity direction
///
/// Advanced once per rendered frame, not per physics substep. At most one
/// transition is active at a time; starting a new one replaces (and thereby
/// cancels) the in-flight instance.
#[derive(Debug, Clone)]
pub struct GravityTransition {
    start: Vector3,
    target: Vector3,

    /// Reference direction used to pick an intermediate axis when the start
    /// and target are nearly opposite (typically the camera forward)
    reference: Vector3,

    elapsed: f32,
    duration: f32,
}

impl GravityTransition {
    /// Creates a transition from `start` toward `target` over `duration` seconds
    ///
    /// Returns None when the target direction is degenerate.
    pub fn new(start: Vector3, target: Vector3, reference: Vector3, duration: f32) -> Option<Self> {
        if target.length_squared() < crate::math::EPSILON {
            return None;
        }

        Some(Self {
            start: start.normalize(),
            target: target.normalize(),
            reference,
            elapsed: 0.0,
            duration: duration.max(0.0),
        })
    }

    /// Advances the transition and returns the new gravity direction
    pub fn advance(&mut self, dt: f32) -> Vector3 {
        self.elapsed += dt;

        if self.finished() {
            return self.target;
        }

        let t = crate::math::clamp(self.elapsed / self.duration, 0.0, 1.0);
        self.blend(t)
    }

    /// Returns true once the transition has reached its target
    #[inline]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Returns the target direction of the transition
    #[inline]
    pub fn target(&self) -> Vector3 {
        self.target
    }

    /// Interpolates between start and target directions
    ///
    /// Nearly opposite directions would lerp through zero, so those route
    /// through an intermediate direction perpendicular to the start.
    fn blend(&self, t: f32) -> Vector3 {
        let dot = self.start.dot(&self.target);

        if dot < -0.9999 {
            let mut intermediate = self.reference.project_on_plane(&self.start);

            if intermediate.length_squared() < crate::math::EPSILON {
                intermediate = self.start.cross(&Vector3::unit_x());
            }
            let intermediate = intermediate.normalize();

            if t < 0.5 {
                self.start.lerp(&intermediate, t * 2.0).normalize()
            } else {
                intermediate.lerp(&self.target, (t - 0.5) * 2.0).normalize()
            }
        } else {
            self.start.lerp(&self.target, t).normalize()
        }
    }
}
