use crate::coords::Vec3;
use crate::trail::CameraSource;

/// Column-major 4x4 matrix, laid out the way WGSL's `mat4x4<f32>` expects.
pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Right-handed perspective camera.
///
/// Clip-space depth follows wgpu: `0` at `near`, `1` at `far`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn view(&self) -> Mat4 {
        look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        mul(&self.projection(aspect), &self.view())
    }
}

impl CameraSource for Camera {
    #[inline]
    fn camera_position(&self) -> Vec3 {
        self.position
    }
}

fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    const EPS: f32 = 1e-6;

    // Degenerate inputs fall back to looking down -Z with +X as right.
    let f = (target - eye).try_normalize(EPS).unwrap_or(-Vec3::Z);
    let s = f.cross(up).try_normalize(EPS).unwrap_or(Vec3::X);
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

fn perspective_rh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let h = 1.0 / (fov_y * 0.5).tan();
    let depth = far / (near - far);
    [
        [h / aspect, 0.0, 0.0, 0.0],
        [0.0, h, 0.0, 0.0],
        [0.0, 0.0, depth, -1.0],
        [0.0, 0.0, near * depth, 0.0],
    ]
}

/// `a * b` for column-major matrices.
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (c, col) in out.iter_mut().enumerate() {
        for (r, v) in col.iter_mut().enumerate() {
            *v = (0..4).map(|k| a[k][r] * b[c][k]).sum();
        }
    }
    out
}

/// Transforms a point (w = 1) and returns homogeneous clip coordinates.
pub fn transform_point(m: &Mat4, p: Vec3) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (r, v) in out.iter_mut().enumerate() {
        *v = m[0][r] * p.x + m[1][r] * p.y + m[2][r] * p.z + m[3][r];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ndc(m: &Mat4, p: Vec3) -> [f32; 3] {
        let c = transform_point(m, p);
        [c[0] / c[3], c[1] / c[3], c[2] / c[3]]
    }

    #[test]
    fn identity_is_neutral() {
        let cam = Camera::default();
        assert_eq!(mul(&IDENTITY, &cam.view()), cam.view());
        assert_eq!(mul(&cam.view(), &IDENTITY), cam.view());
    }

    #[test]
    fn view_moves_target_onto_negative_z() {
        let cam = Camera::default();
        let p = transform_point(&cam.view(), Vec3::ZERO);
        assert_abs_diff_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[2], -5.0, epsilon = 1e-6);
    }

    #[test]
    fn near_and_far_map_to_depth_range() {
        let cam = Camera::default();
        let vp = cam.view_proj(1.0);
        assert_abs_diff_eq!(ndc(&vp, Vec3::new(0.0, 0.0, 4.9))[2], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(ndc(&vp, Vec3::new(0.0, 0.0, -95.0))[2], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn aspect_squeezes_x() {
        let cam = Camera::default();
        let square = ndc(&cam.view_proj(1.0), Vec3::X);
        let wide = ndc(&cam.view_proj(2.0), Vec3::X);
        assert!(square[0] > 0.0);
        assert_abs_diff_eq!(wide[0], square[0] * 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(square[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn up_stays_up() {
        let cam = Camera::default();
        let p = ndc(&cam.view_proj(1.0), Vec3::Y);
        assert!(p[1] > 0.0);
    }

    #[test]
    fn degenerate_view_is_finite() {
        let cam = Camera::looking_at(Vec3::ZERO, Vec3::ZERO);
        assert!(cam.view().iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn reports_position_as_camera_source() {
        let cam = Camera::looking_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        assert_eq!(cam.camera_position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
