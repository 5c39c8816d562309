use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// The minimum corner of the box
    pub min: Vector3,

    /// The maximum corner of the box
    pub max: Vector3,
}

impl Aabb {
    /// Creates a new AABB from minimum and maximum corners
    #[inline]
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Creates an AABB enclosing a set of points, or None for an empty set
    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let first = points.first()?;

        let mut min = *first;
        let mut max = *first;

        for point in points.iter().skip(1) {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            min.z = min.z.min(point.z);

            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
            max.z = max.z.max(point.z);
        }

        Some(Self { min, max })
    }

    /// Returns the center of the box
    #[inline]
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// Returns a copy of the box grown by `margin` on all sides
    #[inline]
    pub fn inflated(&self, margin: f32) -> Self {
        let m = Vector3::new(margin, margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Returns true if the point is inside the box
    #[inline]
    pub fn contains_point(&self, point: Vector3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Returns true if a sphere overlaps the box
    pub fn intersects_sphere(&self, center: Vector3, radius: f32) -> bool {
        let closest = Vector3::new(
            crate::math::clamp(center.x, self.min.x, self.max.x),
            crate::math::clamp(center.y, self.min.y, self.max.y),
            crate::math::clamp(center.z, self.min.z, self.max.z),
        );

        closest.distance_squared(&center) <= radius * radius
    }

    /// Returns true if a moving sphere's swept volume can overlap the box
    ///
    /// Conservative test: the box is inflated by the radius plus the travel
    /// distance and the start point is tested against it.
    pub fn intersects_swept_sphere(&self, center: Vector3, radius: f32, travel: Vector3) -> bool {
        self.inflated(radius + travel.length()).contains_point(center)
    }
}
