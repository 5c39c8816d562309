/// Fixed-step time accumulator
///
/// Variable frame time goes into a time bank which is drained in fixed
/// slices, making the physics outcome independent of render frame rate.
/// Leftover time below one slice carries over to the next frame.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    time_step: f32,
    accumulator: f32,
    time: f32,
}

/// Smallest amount of bank time a substep may consume
///
/// A sweep hit can clamp a substep almost to zero; consuming at least this
/// much keeps the drain loop finite.
const MIN_CONSUMED: f32 = 1.0e-4;

impl FixedStepScheduler {
    /// Creates a scheduler draining slices of `time_step` seconds
    pub fn new(time_step: f32) -> Self {
        Self {
            time_step,
            accumulator: 0.0,
            time: 0.0,
        }
    }

    /// Banks a frame's worth of elapsed time
    pub fn accumulate(&mut self, frame_dt: f32) {
        self.accumulator += frame_dt.max(0.0);
    }

    /// Returns true while at least one full slice is banked
    #[inline]
    pub fn ready(&self) -> bool {
        self.accumulator >= self.time_step
    }

    /// Returns the fixed slice duration
    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Consumes the time a substep actually used
    ///
    /// Usually the full slice; less when a sweep hit clamped the substep.
    pub fn consume(&mut self, dt: f32) {
        let consumed = dt.max(MIN_CONSUMED);
        self.accumulator -= consumed;
        self.time += consumed;
    }

    /// Returns the total simulated time
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Returns the banked, not yet simulated time
    #[inline]
    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}
