//! Services a trail needs from its host engine.

use crate::coords::Vec3;

use super::mesh::RibbonMesh;

/// Provides the world-space camera position for billboarding.
pub trait CameraSource {
    fn camera_position(&self) -> Vec3;
}

/// A fixed camera position.
impl CameraSource for Vec3 {
    #[inline]
    fn camera_position(&self) -> Vec3 {
        *self
    }
}

/// Receives the rebuilt ribbon each frame.
pub trait MeshSink {
    /// Replaces whatever was submitted before with `mesh`.
    fn submit(&mut self, mesh: &RibbonMesh);

    /// Stops drawing the trail.
    fn clear(&mut self);
}

/// Sink that keeps a copy of the last submitted mesh.
///
/// Useful for headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub mesh: RibbonMesh,
    pub submits: usize,
    pub clears: usize,
}

impl MeshSink for RecordingSink {
    fn submit(&mut self, mesh: &RibbonMesh) {
        self.mesh.clone_from(mesh);
        self.submits += 1;
    }

    fn clear(&mut self) {
        self.mesh.clear();
        self.clears += 1;
    }
}
