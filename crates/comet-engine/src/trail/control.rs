use crate::coords::Vec3;

/// Number of control points a Catmull-Rom segment reads.
pub const CONTROL_CAPACITY: usize = 4;

/// Fixed ring of the most recently admitted control points.
///
/// Indexing is by age: `0` is the newest point. Pushing into a full ring
/// overwrites the oldest slot.
#[derive(Debug, Clone, Default)]
pub struct ControlRing {
    slots: [Vec3; CONTROL_CAPACITY],
    head: usize,
    len: usize,
}

impl ControlRing {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, point: Vec3) {
        self.head = (self.head + 1) % CONTROL_CAPACITY;
        self.slots[self.head] = point;
        self.len = (self.len + 1).min(CONTROL_CAPACITY);
    }

    /// Point admitted `age` admissions ago.
    #[inline]
    pub fn get(&self, age: usize) -> Option<Vec3> {
        if age >= self.len {
            return None;
        }
        Some(self.slots[(self.head + CONTROL_CAPACITY - age) % CONTROL_CAPACITY])
    }

    #[inline]
    pub fn newest(&self) -> Option<Vec3> {
        self.get(0)
    }

    /// All four slots newest-first. Slots not yet filled read as the origin.
    #[inline]
    pub fn window(&self) -> [Vec3; CONTROL_CAPACITY] {
        core::array::from_fn(|age| self.get(age).unwrap_or(Vec3::ZERO))
    }

    /// Iterates live points newest-first.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len).filter_map(|age| self.get(age))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == CONTROL_CAPACITY
    }

    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f32) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    #[test]
    fn empty_ring_has_no_newest() {
        let ring = ControlRing::new();
        assert!(ring.is_empty());
        assert_eq!(ring.newest(), None);
        assert_eq!(ring.window(), [Vec3::ZERO; CONTROL_CAPACITY]);
    }

    #[test]
    fn partial_ring_pads_window_with_origin() {
        let mut ring = ControlRing::new();
        ring.push(p(1.0));
        ring.push(p(2.0));
        assert_eq!(ring.window(), [p(2.0), p(1.0), Vec3::ZERO, Vec3::ZERO]);
    }

    #[test]
    fn full_ring_drops_oldest() {
        let mut ring = ControlRing::new();
        for x in 1..=5 {
            ring.push(p(x as f32));
        }
        assert!(ring.is_full());
        assert_eq!(ring.window(), [p(5.0), p(4.0), p(3.0), p(2.0)]);
        assert_eq!(ring.get(4), None);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut ring = ControlRing::new();
        ring.push(p(1.0));
        ring.clear();
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.iter().count(), 0);
    }

    proptest! {
        #[test]
        fn ring_reflects_most_recent_admissions(xs in prop::collection::vec(-100.0f32..100.0, 0..40)) {
            let mut ring = ControlRing::new();
            for &x in &xs {
                ring.push(p(x));
            }

            prop_assert!(ring.len() <= CONTROL_CAPACITY);
            prop_assert_eq!(ring.len(), xs.len().min(CONTROL_CAPACITY));

            let expected: Vec<Vec3> = xs.iter().rev().take(CONTROL_CAPACITY).map(|&x| p(x)).collect();
            let actual: Vec<Vec3> = ring.iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
