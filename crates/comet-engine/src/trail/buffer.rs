use crate::coords::Vec3;

use super::config::TrailConfig;
use super::control::ControlRing;
use super::display::{DisplayPoint, DisplayStore};
use super::error::ConfigError;
use super::spline::sample_segment;

/// Admissions needed before the first segment is interpolated.
///
/// Interpolation starts on the third admission, while the fourth ring slot
/// still reads as the origin.
const ADMISSIONS_BEFORE_INTERPOLATION: u64 = 3;

/// Rolling trail history: raw control points plus aging display points.
///
/// Per tick:
/// 1. expire display points older than `life_time`
/// 2. admit the current position if it moved far enough from the newest
///    control point
/// 3. on admission (once enough points were admitted), interpolate three
///    display points and insert them as the newest entries
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    controls: ControlRing,
    display: DisplayStore,
    admitted: u64,
    life_time: f64,
    min_control_distance: f32,
}

impl TrailBuffer {
    pub fn new(config: &TrailConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            controls: ControlRing::new(),
            display: DisplayStore::default(),
            admitted: 0,
            life_time: f64::from(config.life_time),
            min_control_distance: config.min_control_distance,
        })
    }

    /// Admits `position` unconditionally without interpolating.
    ///
    /// This is the start hook: the object's initial position becomes the first
    /// control point.
    pub fn seed(&mut self, position: Vec3) {
        self.controls.push(position);
        self.admitted += 1;
        log::trace!("trail seeded at {position:?}");
    }

    /// Advances the trail by one frame and returns the live points newest-first.
    ///
    /// `now` is a monotonic timestamp in seconds; it stamps new display points
    /// and ages existing ones.
    pub fn tick(&mut self, position: Vec3, now: f64) -> &[DisplayPoint] {
        let expired = self.display.expire(now, self.life_time);
        if expired > 0 {
            log::trace!("trail expired {expired} points");
        }

        if self.should_admit(position) {
            self.controls.push(position);
            self.admitted += 1;

            if self.admitted >= ADMISSIONS_BEFORE_INTERPOLATION {
                self.interpolate(now);
            }
        }

        self.display.as_slice()
    }

    /// Drops all control and display points. The buffer is then equivalent to a
    /// freshly constructed one with the same configuration.
    pub fn clear(&mut self) {
        self.controls.clear();
        self.display.clear();
        self.admitted = 0;
    }

    /// Live display points newest-first.
    #[inline]
    pub fn display_points(&self) -> &[DisplayPoint] {
        self.display.as_slice()
    }

    #[inline]
    pub fn iter_display(&self) -> impl Iterator<Item = &DisplayPoint> {
        self.display.iter()
    }

    /// Control points newest-first.
    #[inline]
    pub fn control_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.controls.iter()
    }

    #[inline]
    pub fn control_len(&self) -> usize {
        self.controls.len()
    }

    #[inline]
    pub fn display_len(&self) -> usize {
        self.display.len()
    }

    /// Total admissions since construction or the last `clear`.
    #[inline]
    pub fn admitted_count(&self) -> u64 {
        self.admitted
    }

    #[inline]
    pub fn life_time(&self) -> f64 {
        self.life_time
    }

    fn should_admit(&self, position: Vec3) -> bool {
        match self.controls.newest() {
            None => true,
            Some(last) => last.distance(position) > self.min_control_distance,
        }
    }

    fn interpolate(&mut self, now: f64) {
        let samples = sample_segment(self.controls.window());
        let evicted = self
            .display
            .insert_newest(samples.map(|p| DisplayPoint::new(p, now)));

        if evicted > 0 {
            log::debug!(
                "trail display store full ({}); evicted {evicted} oldest points",
                self.display.capacity()
            );
        }
        log::trace!("trail interpolated segment, {} live points", self.display.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::display::DISPLAY_CAPACITY;
    use crate::trail::spline::{catmull_rom, SEGMENT_SAMPLES};
    use approx::assert_relative_eq;

    fn x(v: f32) -> Vec3 {
        Vec3::new(v, 0.0, 0.0)
    }

    fn buffer(cfg: TrailConfig) -> TrailBuffer {
        TrailBuffer::new(&cfg).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = TrailConfig::default().with_life_time(-1.0);
        assert!(TrailBuffer::new(&cfg).is_err());
    }

    #[test]
    fn three_admissions_produce_one_batch() {
        let mut trail = buffer(TrailConfig::default().with_min_control_distance(0.1));

        assert!(trail.tick(x(0.0), 0.0).is_empty());
        assert!(trail.tick(x(0.2), 0.01).is_empty());
        let points = trail.tick(x(0.4), 0.02).to_vec();

        assert_eq!(trail.admitted_count(), 3);
        assert_eq!(points.len(), 3);

        // Ring newest-first is [0.4, 0.2, 0.0, <origin>]; the formula gets it oldest-first.
        let (p0, p1, p2, p3) = (Vec3::ZERO, x(0.0), x(0.2), x(0.4));
        let expected: Vec<Vec3> = SEGMENT_SAMPLES
            .iter()
            .rev()
            .map(|&t| catmull_rom(t, p0, p1, p2, p3))
            .collect();

        for (got, want) in points.iter().zip(&expected) {
            assert_eq!(got.position, *want);
            assert_eq!(got.created_at, 0.02);
        }
        assert_relative_eq!(points[0].position.x, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn small_moves_are_not_admitted() {
        let mut trail = buffer(TrailConfig::default());
        trail.tick(x(0.0), 0.0);
        trail.tick(x(0.05), 0.0);
        trail.tick(x(0.09), 0.0);
        assert_eq!(trail.control_len(), 1);
        assert_eq!(trail.admitted_count(), 1);
    }

    #[test]
    fn distance_is_measured_from_last_admitted_point() {
        let mut trail = buffer(TrailConfig::default());
        trail.tick(x(0.0), 0.0);
        trail.tick(x(0.06), 0.0);
        trail.tick(x(0.12), 0.0);
        assert_eq!(trail.control_points().collect::<Vec<_>>(), vec![x(0.12), x(0.0)]);
    }

    #[test]
    fn seed_counts_as_first_admission() {
        let mut trail = buffer(TrailConfig::default());
        trail.seed(x(0.0));
        trail.tick(x(0.2), 0.0);
        assert_eq!(trail.display_len(), 0);
        trail.tick(x(0.4), 0.0);
        assert_eq!(trail.display_len(), 3);
    }

    #[test]
    fn each_later_admission_adds_three_points() {
        let mut trail = buffer(TrailConfig::default().with_life_time(100.0));
        for i in 0..10 {
            trail.tick(x(i as f32 * 0.2), 0.0);
        }
        // Batches start on the third admission.
        assert_eq!(trail.display_len(), 3 * 8);
        assert_eq!(trail.control_len(), 4);
    }

    #[test]
    fn expiry_is_strict_on_next_tick() {
        let mut trail = buffer(TrailConfig::default().with_life_time(0.125));
        trail.tick(x(0.0), 0.0);
        trail.tick(x(0.2), 0.0);
        trail.tick(x(0.4), 0.0);
        assert_eq!(trail.display_len(), 3);

        // Exactly at the lifetime the points survive.
        trail.tick(x(0.4), 0.125);
        assert_eq!(trail.display_len(), 3);

        trail.tick(x(0.4), 0.126);
        assert_eq!(trail.display_len(), 0);
    }

    #[test]
    fn expiry_runs_before_admission() {
        let mut trail = buffer(TrailConfig::default().with_life_time(0.1));
        trail.tick(x(0.0), 0.0);
        trail.tick(x(0.2), 0.0);
        trail.tick(x(0.4), 0.0);

        // Old batch expires, a fresh one is admitted in the same tick.
        let points = trail.tick(x(0.6), 1.0).to_vec();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.created_at == 1.0));
    }

    #[test]
    fn display_store_is_capped() {
        let mut trail = buffer(TrailConfig::default().with_life_time(1e6));
        for i in 0..500 {
            trail.tick(x(i as f32), i as f64 * 0.01);
            assert!(trail.display_len() <= DISPLAY_CAPACITY);
        }
        assert_eq!(trail.display_len(), DISPLAY_CAPACITY);

        // Oldest entries were dropped; the newest batch is at the front.
        let newest = trail.display_points()[0];
        assert_eq!(newest.created_at, 499.0 * 0.01);
    }

    #[test]
    fn clear_resets_everything() {
        let mut trail = buffer(TrailConfig::default());
        trail.tick(x(0.0), 0.0);
        trail.tick(x(0.2), 0.0);
        trail.tick(x(0.4), 0.0);
        trail.clear();

        assert_eq!(trail.control_len(), 0);
        assert_eq!(trail.display_len(), 0);
        assert_eq!(trail.admitted_count(), 0);
        assert!(trail.display_points().is_empty());

        // After a reset the next sample is admitted without a distance test.
        trail.tick(x(0.4), 1.0);
        assert_eq!(trail.control_len(), 1);
    }
}
