//! GPU rendering.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily from the [`RenderCtx`] of the first frame that needs them.
//! Geometry is in world space; the vertex shader applies the camera's
//! view-projection uniform.

mod camera;
mod ctx;
mod ribbon;

pub use camera::{Camera, Mat4};
pub use ctx::{RenderCtx, RenderTarget};
pub use ribbon::RibbonRenderer;
