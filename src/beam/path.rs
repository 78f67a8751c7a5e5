//! Beam path output
//!
//! The polyline produced by one propagation pass. A path is rebuilt from
//! scratch every pass; whoever displays it owns the visuals for the
//! previous one and disposes of them when the new path arrives.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One straight stretch of the beam between bounces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

/// How a propagation pass ended.
///
/// All of these are normal results, encoded in the path rather than raised
/// as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Beam reached a terminator region and was absorbed
    Absorbed,
    /// No qualifying hit; the final segment runs to the max beam length
    Escaped,
    /// Bounce budget ran out; the path is truncated, not wrong
    BudgetExhausted,
    /// Zero-length initial direction; empty path, no queries issued
    Degenerate,
}

/// Ordered polyline result of one propagation pass.
///
/// Contiguous by construction: each segment starts where the previous one
/// ended, and the first starts at the pass origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamPath {
    pub segments: Vec<Segment>,
    pub termination: Termination,
}

impl BeamPath {
    /// The degenerate no-op path
    pub fn degenerate() -> Self {
        Self {
            segments: Vec::new(),
            termination: Termination::Degenerate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Where the beam stopped, if it went anywhere
    pub fn end_point(&self) -> Option<Vec2> {
        self.segments.last().map(|s| s.end)
    }

    /// Total traced length
    pub fn total_length(&self) -> f32 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// The path as a point strip: first start followed by every segment end
    pub fn points(&self) -> Vec<Vec2> {
        let Some(first) = self.segments.first() else {
            return Vec::new();
        };
        let mut points = Vec::with_capacity(self.segments.len() + 1);
        points.push(first.start);
        points.extend(self.segments.iter().map(|s| s.end));
        points
    }
}
