//! Minimal 3D vector used for actor and scanner placement.

/// Position in world space, in scene units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Vec3::new(7.0, 0.0, 11.0);
        let b = Vec3::new(10.0, 0.0, 15.0);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn lerp_clamps_parameter() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 4.0, -2.0);
        assert_eq!(a.lerp(&b, 0.5), Vec3::new(1.0, 2.0, -1.0));
        assert_eq!(a.lerp(&b, 3.0), b);
        assert_eq!(a.lerp(&b, -1.0), a);
    }
}
