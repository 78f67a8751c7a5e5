//! Renderer seam
//!
//! Propagation produces a `BeamPath`; drawing it is someone else's job.
//! An implementation owns whatever it allocated to display the previous
//! pass and disposes of it when the next path is submitted.

use crate::beam::path::BeamPath;

/// Consumer of computed beam paths
pub trait PathRenderer {
    /// Replace the displayed beam with `path`
    fn submit(&mut self, path: &BeamPath);
}

/// Keeps only the most recent path. Used by tests and the demo binary.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    last: Option<BeamPath>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last submitted path, if any
    pub fn last(&self) -> Option<&BeamPath> {
        self.last.as_ref()
    }
}

impl PathRenderer for RecordingRenderer {
    fn submit(&mut self, path: &BeamPath) {
        // Dropping the previous path is this renderer's "dispose"
        self.last = Some(path.clone());
    }
}
