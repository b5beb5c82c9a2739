//! Coordinate and geometry types shared across the trail core and renderers.
//!
//! World space:
//! - right-handed, +Y up, units are arbitrary scene units
//! - trail geometry is produced in world space and projected by the host camera
//!
//! `Vec2` carries texture coordinates, `Vec3` carries positions and directions.

mod vec2;
mod vec3;
mod viewport;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;
