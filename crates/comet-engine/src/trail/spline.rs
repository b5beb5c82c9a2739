use crate::coords::Vec3;

/// Parameters sampled per admitted control point, in emission order.
pub const SEGMENT_SAMPLES: [f32; 3] = [0.33, 0.66, 1.0];

/// Uniform Catmull-Rom evaluation.
///
/// The curve passes through `p1` at `t = 0` and `p2` at `t = 1`; `p0` and `p3`
/// shape the tangents.
#[inline]
pub fn catmull_rom(t: f32, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    let a = 3.0 * p1 - p0 - 3.0 * p2 + p3;
    let b = 2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3;
    let c = p2 - p0;

    p1 + (0.5 * t) * (c + t * (b + t * a))
}

/// Samples the segment between the two middle points of `window`.
///
/// `window` is ordered newest-first (as stored in the control ring); the curve
/// runs from `window[2]` towards `window[1]`, so the returned points are in
/// path order, oldest first.
#[inline]
pub fn sample_segment(window: [Vec3; 4]) -> [Vec3; 3] {
    let [newest, second, third, oldest] = window;
    SEGMENT_SAMPLES.map(|t| catmull_rom(t, oldest, third, second, newest))
}
