use crate::coords::Vec3;

use super::Motion;

/// Moves along a circle in the XY plane around `origin`.
///
/// Each tick advances the phase by `dt * speed` and places the object at
/// `origin + (cos(phase), sin(phase), 0) * radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    origin: Vec3,
    speed: f32,
    radius: f32,
    phase: f32,
    position: Vec3,
}

impl Oscillator {
    pub const DEFAULT_SPEED: f32 = 1.0;

    pub fn new(origin: Vec3) -> Self {
        let mut osc = Self {
            origin,
            speed: Self::DEFAULT_SPEED,
            radius: 1.0,
            phase: 0.0,
            position: origin,
        };
        osc.position = osc.point_at(0.0);
        osc
    }

    /// Angular speed in radians per second.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self.position = self.point_at(self.phase);
        self
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Rewinds to phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.position = self.point_at(0.0);
    }

    fn point_at(&self, phase: f32) -> Vec3 {
        let (sin, cos) = phase.sin_cos();
        self.origin + Vec3::new(cos, sin, 0.0) * self.radius
    }
}

impl Motion for Oscillator {
    fn tick(&mut self, dt: f32) -> Vec3 {
        // Keep the phase bounded so long runs don't lose precision.
        self.phase = (self.phase + dt * self.speed).rem_euclid(std::f32::consts::TAU);
        self.position = self.point_at(self.phase);
        self.position
    }

    #[inline]
    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn starts_on_positive_x() {
        let osc = Oscillator::new(Vec3::ZERO);
        assert_eq!(osc.position(), Vec3::X);
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn quarter_turn_reaches_positive_y() {
        let mut osc = Oscillator::new(Vec3::ZERO);
        let p = osc.tick(FRAC_PI_2);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn speed_and_radius_scale_the_path() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let mut osc = Oscillator::new(origin).with_speed(2.0).with_radius(3.0);
        let p = osc.tick(FRAC_PI_2);
        // Half a turn.
        assert_abs_diff_eq!(p.x, 1.0 - 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-5);
        assert_eq!(p.z, 3.0);
        assert_abs_diff_eq!(osc.phase(), PI, epsilon = 1e-6);
    }

    #[test]
    fn stays_on_circle() {
        let mut osc = Oscillator::new(Vec3::ZERO).with_speed(3.7);
        for _ in 0..1000 {
            let p = osc.tick(1.0 / 60.0);
            assert_abs_diff_eq!(p.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn reset_rewinds_phase() {
        let mut osc = Oscillator::new(Vec3::ZERO);
        osc.tick(1.0);
        osc.reset();
        assert_eq!(osc.phase(), 0.0);
        assert_eq!(osc.position(), Vec3::X);
    }

    #[test]
    fn starting_point_follows_radius() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let osc = Oscillator::new(origin).with_radius(2.5);
        assert_eq!(osc.position(), Vec3::new(3.5, 2.0, 3.0));
    }

    #[test]
    fn orbit_keeps_origin_height() {
        let mut osc = Oscillator::new(Vec3::new(1.0, 2.0, 3.0));
        for _ in 0..10 {
            assert_eq!(osc.tick(1.0).z, 3.0);
        }
        osc.reset();
        assert_eq!(osc.position(), Vec3::new(2.0, 2.0, 3.0));
    }
}
