//! Scripted movers that produce a position per frame.

mod oscillator;

pub use oscillator::Oscillator;

use crate::coords::Vec3;

/// Something that moves over time.
pub trait Motion {
    /// Advances by `dt` seconds and returns the new position.
    fn tick(&mut self, dt: f32) -> Vec3;

    /// Position after the last `tick`.
    fn position(&self) -> Vec3;
}
