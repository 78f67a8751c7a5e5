//! Intersection model
//!
//! Classification happens once, at query time: every hit already knows
//! whether its collider reflects, absorbs, or is beam-irrelevant. The
//! propagator never inspects colliders directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a scene collider.
///
/// Only used for the one-bounce ignore rule: the entity struck at bounce k
/// is excluded from the query at bounce k+1, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Reflective surface sub-types.
///
/// Both obey the same reflection law; the distinction feeds gameplay and
/// diagnostics, not the bounce math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReflectorKind {
    Mirror,
    Prism,
}

/// Beam-relevant classification of a collider surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    /// Reflects the beam about the surface normal and continues propagation
    Reflective(ReflectorKind),
    /// Absorbs the beam unconditionally (darkness region)
    Terminator,
    /// No beam-relevant tag; the ray passes through as if invisible
    Passive,
}

impl Surface {
    /// Whether a hit on this surface ends the current segment
    #[inline]
    pub fn qualifies(&self) -> bool {
        !matches!(self, Surface::Passive)
    }

    /// Whether a hit on this surface bounces the beam onward
    #[inline]
    pub fn is_reflective(&self) -> bool {
        matches!(self, Surface::Reflective(_))
    }
}

/// One ray/collider intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The struck collider
    pub entity: EntityId,
    /// Contact point on the collider surface
    pub point: Vec2,
    /// Unit surface normal at the contact point, facing the incoming ray.
    /// Zero for terminator hits, where no reflection happens.
    pub normal: Vec2,
    /// Distance from the ray origin to the contact point
    pub distance: f32,
    /// Classification resolved at query time
    pub surface: Surface,
}
