use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::Result;

/// How a platform interpolates between waypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Smoothing {
    /// Straight-line constant-rate interpolation
    Linear,

    /// Cosine ease-in/ease-out within each segment
    Accelerate,

    /// Waypoints resampled into a dense Catmull-Rom curve at build time,
    /// then followed linearly
    Spline,
}

/// Whether a platform runs continuously or seeks externally set targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    /// Loops over the full sequence forever
    Constant,

    /// Holds position until a target time is set, then moves toward it
    Triggered,
}

/// A single stop on a platform's path
#[derive(Debug, Clone, Copy)]
pub struct Waypoint {
    /// World position of the waypoint
    pub position: Vector3,

    /// Seconds spent traveling to the next waypoint
    pub seconds_to_next: f32,
}

impl Waypoint {
    /// Creates a new waypoint
    pub fn new(position: Vector3, seconds_to_next: f32) -> Self {
        Self {
            position,
            seconds_to_next,
        }
    }
}

/// Default sampling resolution for spline expansion (fraction of a segment)
pub const DEFAULT_SPLINE_RESOLUTION: f32 = 0.1;

/// A platform path with precomputed segment timing tables
///
/// Positions are stored relative to the first waypoint; the platform adds
/// its own base position at evaluation time. All tables are built once at
/// construction and never reallocated.
#[derive(Debug, Clone)]
pub struct PlatformSequence {
    positions: Vec<Vector3>,
    segment_start_times: Vec<f32>,
    segment_inv_durations: Vec<f32>,
    total_time: f32,
    max_reachable_time: f32,
    smoothing: Smoothing,
}

impl PlatformSequence {
    /// Builds a sequence from waypoints with the default spline resolution
    pub fn new(waypoints: &[Waypoint], smoothing: Smoothing) -> Result<Self> {
        Self::with_resolution(waypoints, smoothing, DEFAULT_SPLINE_RESOLUTION)
    }

    /// Builds a sequence from waypoints
    ///
    /// The final waypoint's outgoing duration is always treated as zero.
    /// `resolution` only affects [`Smoothing::Spline`] and is the sampling
    /// step as a fraction of each segment.
    pub fn with_resolution(
        waypoints: &[Waypoint],
        smoothing: Smoothing,
        resolution: f32,
    ) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(PhysicsError::InvalidParameter(
                "platform sequence needs at least one waypoint".into(),
            ));
        }

        for waypoint in waypoints {
            let p = waypoint.position;
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
                || !waypoint.seconds_to_next.is_finite()
            {
                return Err(PhysicsError::InvalidParameter(
                    "platform waypoint contains non-finite values".into(),
                ));
            }
        }

        let expanded;
        let stops: &[Waypoint] = if smoothing == Smoothing::Spline && waypoints.len() > 1 {
            if resolution <= 0.0 || resolution > 1.0 {
                return Err(PhysicsError::InvalidParameter(
                    "spline resolution must be in (0, 1]".into(),
                ));
            }
            expanded = expand_spline(waypoints, resolution);
            &expanded
        } else {
            waypoints
        };

        let origin = stops[0].position;
        let count = stops.len();

        let mut positions = Vec::with_capacity(count);
        let mut segment_start_times = Vec::with_capacity(count);
        let mut segment_inv_durations = Vec::with_capacity(count);

        let mut total_time = 0.0;
        let mut max_reachable_time = 0.0;

        for (i, stop) in stops.iter().enumerate() {
            positions.push(stop.position - origin);
            segment_start_times.push(total_time);

            // The last waypoint has no outgoing segment
            let dt = if i + 1 < count {
                stop.seconds_to_next.max(0.0)
            } else {
                0.0
            };
            segment_inv_durations.push(if dt > 0.0 { 1.0 / dt } else { 0.0 });

            total_time += dt;
            if i + 1 < count {
                max_reachable_time += dt;
            }
        }

        Ok(Self {
            positions,
            segment_start_times,
            segment_inv_durations,
            total_time,
            max_reachable_time,
            smoothing,
        })
    }

    /// Returns the duration of one full pass over the sequence
    #[inline]
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Returns the largest elapsed time a triggered platform can seek to
    #[inline]
    pub fn max_reachable_time(&self) -> f32 {
        self.max_reachable_time
    }

    /// Returns the number of path stops (after any spline expansion)
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true when the sequence holds no stops
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the smoothing mode of the sequence
    #[inline]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Finds the segment containing the given elapsed time
    ///
    /// Linear scan over the cumulative start times; clamps to the last
    /// valid segment at the far end.
    pub fn segment_index(&self, time: f32) -> usize {
        let count = self.segment_start_times.len();
        if count < 2 {
            return 0;
        }

        for i in 0..count - 1 {
            if time < self.segment_start_times[i + 1] {
                return i;
            }
        }
        count - 2
    }

    /// Evaluates the path offset (relative to the first stop) at a time
    pub fn sample(&self, time: f32) -> Vector3 {
        if self.positions.len() < 2 {
            return self.positions.first().copied().unwrap_or(Vector3::ZERO);
        }

        let index = self.segment_index(time);
        let mut t = (time - self.segment_start_times[index]) * self.segment_inv_durations[index];

        if self.smoothing == Smoothing::Accelerate {
            t = 0.5 - 0.5 * (t * std::f32::consts::PI).cos();
        }

        // Unclamped on purpose: a triggered platform seeking backward can
        // momentarily evaluate just outside the segment.
        self.positions[index].lerp(&self.positions[index + 1], t)
    }
}

/// Resamples a waypoint polyline into a dense Catmull-Rom sequence
fn expand_spline(waypoints: &[Waypoint], resolution: f32) -> Vec<Waypoint> {
    let origin = waypoints[0].position;
    let relative = |i: usize| waypoints[wrap_index(i, waypoints.len())].position - origin;

    let loops = (1.0 / resolution).round().max(1.0) as usize;
    let mut stops = Vec::with_capacity((waypoints.len() - 1) * loops + 1);

    for i in 0..waypoints.len() - 1 {
        let p0 = relative(i.wrapping_sub(1));
        let p1 = relative(i);
        let p2 = relative(i + 1);
        let p3 = relative(i + 2);

        // Dividing by the sample count keeps the segment duration exact
        let step_time = waypoints[i].seconds_to_next / loops as f32;

        let mut last = p1;
        for step in 1..=loops {
            let t = step as f32 / loops as f32;
            let next = catmull_rom(t, p0, p1, p2, p3);
            stops.push(Waypoint::new(last + origin, step_time));
            last = next;
        }
    }

    stops.push(Waypoint::new(
        waypoints[waypoints.len() - 1].position,
        0.0,
    ));

    stops
}

/// Wraps an out-of-range waypoint index around the sequence ends
fn wrap_index(index: usize, len: usize) -> usize {
    // Callers pass at most one step outside the range in either direction
    if index == usize::MAX {
        len - 1
    } else if index >= len {
        index - len
    } else {
        index
    }
}

/// Evaluates a Catmull-Rom curve segment between `p1` and `p2`
fn catmull_rom(t: f32, p0: Vector3, p1: Vector3, p2: Vector3, p3: Vector3) -> Vector3 {
    let a = p1 * 2.0;
    let b = p2 - p0;
    let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let d = -p0 + p1 * 3.0 - p2 * 3.0 + p3;

    (a + b * t + c * (t * t) + d * (t * t * t)) * 0.5
}
