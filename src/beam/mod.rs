//! Deterministic beam propagation module
//!
//! All beam logic lives here. This module must be pure and deterministic:
//! - One full pass per call, never suspended mid-bounce
//! - Stable hit ordering (by distance, then collider id)
//! - No rendering or platform dependencies

pub mod hit;
pub mod path;
pub mod propagate;
pub mod ray;
pub mod scene;
pub mod source;

pub use hit::{EntityId, RayHit, ReflectorKind, Surface};
pub use path::{BeamPath, Segment, Termination};
pub use propagate::{PropagateConfig, propagate};
pub use ray::{Ray, reflect};
pub use scene::{Collider, ColliderScene, QueryError, SceneQuery, Shape};
pub use source::{BeamSource, TickInput, tick};
