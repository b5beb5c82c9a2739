use crate::coords::Vec3;

use super::buffer::TrailBuffer;
use super::config::TrailConfig;
use super::error::ConfigError;
use super::host::{CameraSource, MeshSink};
use super::mesh::{RibbonMesh, RibbonStyle};
use super::mesher::RibbonMesher;

/// A trail attached to one tracked object.
///
/// Bundles the history buffer, the mesher and the last built mesh. The host
/// calls `on_start` once, `update` every frame with the frame's elapsed time,
/// and `on_disable`/`on_enable` when the object is hidden or shown again.
#[derive(Debug)]
pub struct Trail {
    config: TrailConfig,
    style: RibbonStyle,
    buffer: TrailBuffer,
    mesher: RibbonMesher,
    mesh: RibbonMesh,
    enabled: bool,
}

impl Trail {
    pub fn new(config: TrailConfig) -> Result<Self, ConfigError> {
        let buffer = TrailBuffer::new(&config)?;
        Ok(Self {
            style: config.style(),
            config,
            buffer,
            mesher: RibbonMesher::new(),
            mesh: RibbonMesh::new(),
            enabled: true,
        })
    }

    /// Seeds the first control point with the object's starting position.
    pub fn on_start(&mut self, position: Vec3) {
        self.buffer.seed(position);
    }

    /// Per-frame update: ages and extends the trail, rebuilds the ribbon and
    /// hands it to `sink`. Fewer than two live points clear the sink instead.
    ///
    /// Disabled trails ignore updates.
    pub fn update<C, S>(&mut self, position: Vec3, now: f64, camera: &C, sink: &mut S)
    where
        C: CameraSource + ?Sized,
        S: MeshSink + ?Sized,
    {
        if !self.enabled {
            return;
        }

        let points = self.buffer.tick(position, now);
        let built = self
            .mesher
            .build(points, camera.camera_position(), &self.style, &mut self.mesh);

        if built {
            sink.submit(&self.mesh);
        } else {
            sink.clear();
        }
    }

    /// Clears all state and the rendered mesh, and stops updating.
    pub fn on_disable<S>(&mut self, sink: &mut S)
    where
        S: MeshSink + ?Sized,
    {
        self.buffer.clear();
        self.mesh.clear();
        sink.clear();
        if self.enabled {
            log::info!("trail disabled");
        }
        self.enabled = false;
    }

    /// Resumes updating, starting a fresh trail at `position`.
    pub fn on_enable(&mut self, position: Vec3) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        self.buffer.seed(position);
        log::info!("trail enabled");
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    #[inline]
    pub fn buffer(&self) -> &TrailBuffer {
        &self.buffer
    }

    /// The mesh built by the last `update`.
    #[inline]
    pub fn mesh(&self) -> &RibbonMesh {
        &self.mesh
    }
}
