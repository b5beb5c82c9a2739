//! Smoothed ribbon trails.
//!
//! A trail samples the tracked object's position into a small ring of control
//! points, interpolates Catmull-Rom segments between them into time-stamped
//! display points, expires display points after `life_time`, and rebuilds a
//! camera-facing quad strip from the survivors every frame.
//!
//! The core is engine-agnostic: time arrives as an explicit `now`, the camera
//! through [`CameraSource`], and the mesh leaves through [`MeshSink`].

mod buffer;
mod component;
mod config;
mod control;
mod display;
mod error;
mod host;
mod mesh;
mod mesher;
mod spline;

pub use buffer::TrailBuffer;
pub use component::Trail;
pub use config::TrailConfig;
pub use control::{ControlRing, CONTROL_CAPACITY};
pub use display::{DisplayPoint, DisplayStore, DISPLAY_CAPACITY};
pub use error::ConfigError;
pub use host::{CameraSource, MeshSink, RecordingSink};
pub use mesh::{RibbonMesh, RibbonStyle};
pub use mesher::{build_ribbon, RibbonMesher};
pub use spline::{catmull_rom, sample_segment, SEGMENT_SAMPLES};
