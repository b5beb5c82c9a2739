use std::collections::VecDeque;

use crate::coords::Vec3;

/// Maximum number of live interpolated points per trail.
pub const DISPLAY_CAPACITY: usize = 400;

/// Interpolated, time-stamped point along the smoothed trail.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayPoint {
    pub position: Vec3,
    /// Timestamp (seconds) at which the point was interpolated.
    pub created_at: f64,
}

impl DisplayPoint {
    #[inline]
    pub const fn new(position: Vec3, created_at: f64) -> Self {
        Self { position, created_at }
    }

    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }

    /// Strictly older than `life_time`.
    #[inline]
    pub fn is_expired(&self, now: f64, life_time: f64) -> bool {
        self.age(now) > life_time
    }
}

/// Bounded newest-first store of display points.
///
/// Front is the newest point, back the oldest. Inserting past capacity evicts
/// from the back. Every mutation leaves the storage contiguous, so the live
/// points can be read as one slice through a shared reference.
#[derive(Debug, Clone)]
pub struct DisplayStore {
    points: VecDeque<DisplayPoint>,
    capacity: usize,
}

impl Default for DisplayStore {
    fn default() -> Self {
        Self::with_capacity(DISPLAY_CAPACITY)
    }
}

impl DisplayStore {
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Removes every point older than `life_time`; survivors keep their order.
    ///
    /// Returns the number of removed points.
    pub fn expire(&mut self, now: f64, life_time: f64) -> usize {
        let before = self.points.len();
        self.points.retain(|p| !p.is_expired(now, life_time));
        self.points.make_contiguous();
        before - self.points.len()
    }

    /// Inserts `batch` as the newest entries.
    ///
    /// `batch` is given in path order (oldest first), so its last element ends
    /// up at the front. Returns how many old points were evicted to make room.
    pub fn insert_newest<const N: usize>(&mut self, batch: [DisplayPoint; N]) -> usize {
        let incoming = N.min(self.capacity);
        let overflow = (self.points.len() + incoming).saturating_sub(self.capacity);
        for _ in 0..overflow {
            self.points.pop_back();
        }
        for point in batch.into_iter().skip(N - incoming) {
            self.points.push_front(point);
        }
        self.points.make_contiguous();
        overflow
    }

    /// Live points newest-first as one contiguous slice.
    #[inline]
    pub fn as_slice(&self) -> &[DisplayPoint] {
        let (front, back) = self.points.as_slices();
        debug_assert!(back.is_empty(), "display store lost contiguity");
        front
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DisplayPoint> {
        self.points.iter()
    }

    #[inline]
    pub fn newest(&self) -> Option<&DisplayPoint> {
        self.points.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
