//! Tick-driven beam source
//!
//! The puzzle recomputes its beam once per fixed tick, from the emitter's
//! current position toward the aim point. Every pass replaces the previous
//! path wholesale; nothing about a path persists between ticks. At most
//! one in-flight path per source, enforced by the tick-driven caller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::path::BeamPath;
use super::propagate::{PropagateConfig, propagate};
use super::scene::{QueryError, SceneQuery};

/// A beam emitter in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSource {
    /// Emitter position
    pub pos: Vec2,
    /// Point the beam is aimed at (pointer position in the original game)
    pub aim: Vec2,
    pub config: PropagateConfig,
}

impl BeamSource {
    /// New source aimed at its own position (degenerate until aimed)
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            aim: pos,
            config: PropagateConfig::default(),
        }
    }

    /// Run one propagation pass for this source.
    ///
    /// Aiming at the emitter itself produces the degenerate empty path.
    pub fn cast(&self, scene: &impl SceneQuery) -> Result<BeamPath, QueryError> {
        propagate(scene, self.pos, self.aim - self.pos, &self.config)
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// New aim point (from pointer position), if it moved this tick
    pub aim: Option<Vec2>,
}

/// Advance the source one tick and recompute its beam.
///
/// On a query failure the caller keeps whatever path it already handed to
/// the renderer; this function clears no state it does not own.
pub fn tick(
    source: &mut BeamSource,
    input: &TickInput,
    scene: &impl SceneQuery,
) -> Result<BeamPath, QueryError> {
    if let Some(aim) = input.aim {
        source.aim = aim;
    }
    source.cast(scene)
}
