//! Beam ray representation
//!
//! A ray is an origin plus a unit direction: r(t) = origin + t * direction.
//! Rays are immutable once built; a fresh one is derived after every
//! reflection rather than mutating the previous bounce's ray.

use glam::Vec2;

/// Directions shorter than this are treated as zero-length (degenerate aim)
pub const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// A directed half-line in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point in world coordinates
    pub origin: Vec2,
    /// Unit direction; guaranteed normalized by the constructor
    pub direction: Vec2,
}

impl Ray {
    /// Build a ray, normalizing the direction.
    ///
    /// Returns `None` when the direction is (near) zero-length, e.g. when
    /// the beam source and the aim point coincide.
    pub fn new(origin: Vec2, direction: Vec2) -> Option<Self> {
        if direction.length_squared() < MIN_DIRECTION_LENGTH * MIN_DIRECTION_LENGTH {
            return None;
        }
        Some(Self {
            origin,
            direction: direction.normalize(),
        })
    }

    /// Point at parameter t along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}

/// Mirror reflection about a unit surface normal: d' = d - 2(d·n)n
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    dir - 2.0 * dir.dot(normal) * normal
}
