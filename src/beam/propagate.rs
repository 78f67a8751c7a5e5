//! Beam propagation
//!
//! The core bounce loop: query the scene, pick the nearest qualifying hit,
//! absorb or reflect, repeat until the beam escapes, dies, or runs out of
//! bounce budget. An explicit bounded loop with an accumulator path, never
//! recursion.

use glam::Vec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::path::{BeamPath, Segment, Termination};
use super::ray::{Ray, reflect};
use super::scene::{QueryError, SceneQuery};
use crate::consts::{CONTACT_EPSILON, MAX_BEAM_LENGTH, MAX_BOUNCES};

/// Tunables for one propagation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagateConfig {
    /// Maximum reflections before the pass is cut off (at least 1)
    pub max_bounces: u32,
    /// Segment length when the beam escapes without hitting anything
    pub max_beam_length: f32,
    /// Offset applied to each bounced ray's origin along the reflected
    /// direction. Paired with the ignore rule; either alone leaves
    /// zero-distance re-hits possible on curved colliders.
    pub contact_epsilon: f32,
}

impl Default for PropagateConfig {
    fn default() -> Self {
        Self {
            max_bounces: MAX_BOUNCES,
            max_beam_length: MAX_BEAM_LENGTH,
            contact_epsilon: CONTACT_EPSILON,
        }
    }
}

/// Trace a beam from `origin` along `direction` through `scene`.
///
/// All expected outcomes (degenerate aim, escape, absorption, budget
/// exhaustion) come back as a path whose `termination` says what happened;
/// only a scene query failure is an error, and then no partial path is
/// returned. Pure function of its inputs and the scene state.
pub fn propagate(
    scene: &impl SceneQuery,
    origin: Vec2,
    direction: Vec2,
    config: &PropagateConfig,
) -> Result<BeamPath, QueryError> {
    let Some(mut ray) = Ray::new(origin, direction) else {
        // Source and aim coincide this frame; nothing to trace
        return Ok(BeamPath::degenerate());
    };

    let mut segments = Vec::new();
    let mut budget = config.max_bounces.max(1);
    let mut ignore = None;
    // Segment starts stay on the surface even when the query ray is nudged off it
    let mut start = ray.origin;

    loop {
        let hits = scene.query_ray(ray.origin, ray.direction, config.max_beam_length, ignore)?;

        // Nearest hit that reflects or absorbs; passive colliders are
        // transparent to the beam
        let Some(hit) = hits.into_iter().find(|h| h.surface.qualifies()) else {
            segments.push(Segment {
                start,
                end: ray.at(config.max_beam_length),
            });
            return Ok(BeamPath {
                segments,
                termination: Termination::Escaped,
            });
        };

        segments.push(Segment {
            start,
            end: hit.point,
        });

        if !hit.surface.is_reflective() {
            return Ok(BeamPath {
                segments,
                termination: Termination::Absorbed,
            });
        }

        budget -= 1;
        if budget == 0 {
            debug!(
                "bounce budget exhausted after {} segments, truncating beam",
                segments.len()
            );
            return Ok(BeamPath {
                segments,
                termination: Termination::BudgetExhausted,
            });
        }

        let bounced = reflect(ray.direction, hit.normal);
        let Some(next) = Ray::new(hit.point + bounced * config.contact_epsilon, bounced) else {
            // A reflective hit reported a degenerate normal; treat the
            // surface as absorbing rather than guessing a direction
            warn!("degenerate reflection normal at {:?}, absorbing beam", hit.point);
            return Ok(BeamPath {
                segments,
                termination: Termination::Absorbed,
            });
        };

        start = hit.point;
        ignore = Some(hit.entity);
        ray = next;
    }
}
