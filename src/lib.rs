//! Beamcast - 2D light-beam propagation for mirror puzzles
//!
//! Core modules:
//! - `beam`: Deterministic beam propagation (rays, scene queries, the bounce loop)
//! - `render`: The seam a computed path is handed across for display

pub mod beam;
pub mod render;

pub use beam::hit::{EntityId, RayHit, ReflectorKind, Surface};
pub use beam::path::{BeamPath, Segment, Termination};
pub use beam::propagate::{PropagateConfig, propagate};
pub use beam::scene::{Collider, ColliderScene, QueryError, SceneQuery, Shape};
pub use beam::source::{BeamSource, TickInput, tick};
pub use render::{PathRenderer, RecordingRenderer};

/// Propagation defaults
pub mod consts {
    /// Reflections allowed per pass before the beam is cut off
    pub const MAX_BOUNCES: u32 = 10;
    /// How far an unobstructed beam travels before we stop tracing it
    pub const MAX_BEAM_LENGTH: f32 = 100.0;
    /// Nudge applied to each bounced ray's origin, along the reflected
    /// direction, so it starts clear of the surface it just left
    pub const CONTACT_EPSILON: f32 = 1e-3;
    /// Hits closer than this along a ray are discarded as contact noise
    pub const MIN_HIT_DISTANCE: f32 = 1e-4;
}
