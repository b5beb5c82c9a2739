use crate::coords::{Vec2, Vec3};

use super::display::DisplayPoint;
use super::mesh::{RibbonMesh, RibbonStyle};

/// Minimum sine of the angle between path direction and view direction.
///
/// Below this the cross product is treated as degenerate.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Builds camera-facing quad strips from a path of points.
///
/// Every point is expanded into a left/right vertex pair along
/// `normalize(cross(direction, to_camera))`. Consecutive pairs are joined by
/// two triangles wound `(prev_left, prev_right, left)` and
/// `(left, prev_right, right)`.
///
/// Degenerate points (path direction parallel to the view ray, or repeated
/// positions) reuse the previous perpendicular. The first point of a path has
/// no previous one and collapses to zero width instead.
#[derive(Debug, Default)]
pub struct RibbonMesher {
    scratch: Vec<Vec3>,
    degenerate_points: usize,
    warned_degenerate: bool,
}

impl RibbonMesher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the ribbon for display points stored newest-first.
    ///
    /// The newest point becomes the `u = 0` end of the ribbon.
    /// Returns `false` (and leaves `out` empty) for fewer than two points.
    pub fn build(
        &mut self,
        points: &[DisplayPoint],
        camera: Vec3,
        style: &RibbonStyle,
        out: &mut RibbonMesh,
    ) -> bool {
        let mut path = std::mem::take(&mut self.scratch);
        path.clear();
        path.extend(points.iter().map(|p| p.position));

        let built = self.build_path(&path, camera, style, out);

        self.scratch = path;
        built
    }

    /// Builds the ribbon for an arbitrary ordered path.
    pub fn build_path(
        &mut self,
        path: &[Vec3],
        camera: Vec3,
        style: &RibbonStyle,
        out: &mut RibbonMesh,
    ) -> bool {
        out.clear();
        self.degenerate_points = 0;

        let n = path.len();
        if n < 2 {
            return false;
        }

        out.reserve_for(n);

        let half_width = style.width * 0.5;
        let last = (n - 1) as f32;
        let mut prev_perpendicular: Option<Vec3> = None;

        for (i, &point) in path.iter().enumerate() {
            let ratio = i as f32 / last;

            let direction = if i + 1 < n {
                path[i + 1] - point
            } else {
                point - path[i - 1]
            };
            let to_camera = camera - point;

            let perpendicular = match perpendicular(direction, to_camera) {
                Some(p) => p,
                None => {
                    self.note_degenerate(i);
                    prev_perpendicular.unwrap_or(Vec3::ZERO)
                }
            };
            prev_perpendicular = Some(perpendicular);

            let offset = perpendicular * half_width;
            out.positions.push(point - offset);
            out.positions.push(point + offset);

            out.uvs.push(Vec2::new(ratio, 0.0));
            out.uvs.push(Vec2::new(ratio, 1.0));

            let color = if style.fade_tail {
                style.color.faded(1.0 - ratio)
            } else {
                style.color
            };
            out.colors.push(color);
            out.colors.push(color);

            if i > 0 {
                let v = (i * 2) as u32;
                out.indices.extend_from_slice(&[v - 2, v - 1, v, v, v - 1, v + 1]);
            }
        }

        true
    }

    /// Degenerate points encountered by the most recent build.
    #[inline]
    pub fn degenerate_points(&self) -> usize {
        self.degenerate_points
    }

    fn note_degenerate(&mut self, index: usize) {
        self.degenerate_points += 1;
        if !self.warned_degenerate {
            log::debug!(
                "ribbon point {index} is view-aligned or repeated; reusing previous perpendicular"
            );
            self.warned_degenerate = true;
        }
    }
}

/// Pure form of [`RibbonMesher::build_path`].
pub fn build_ribbon(path: &[Vec3], camera: Vec3, style: &RibbonStyle) -> RibbonMesh {
    let mut mesh = RibbonMesh::new();
    RibbonMesher::new().build_path(path, camera, style, &mut mesh);
    mesh
}

fn perpendicular(direction: Vec3, to_camera: Vec3) -> Option<Vec3> {
    let scale = direction.length() * to_camera.length();
    direction.cross(to_camera).try_normalize(scale * PARALLEL_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const CAMERA: Vec3 = Vec3::new(0.0, 0.0, 10.0);

    fn line(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
    }

    fn style(width: f32) -> RibbonStyle {
        RibbonStyle { width, ..RibbonStyle::default() }
    }

    #[test]
    fn fewer_than_two_points_emit_nothing() {
        let mut mesher = RibbonMesher::new();
        let mut mesh = RibbonMesh::new();
        mesh.indices.push(7);

        assert!(!mesher.build_path(&[], CAMERA, &style(1.0), &mut mesh));
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);

        assert!(!mesher.build_path(&line(1), CAMERA, &style(1.0), &mut mesh));
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn straight_line_facing_camera() {
        let mesh = build_ribbon(&line(3), CAMERA, &style(2.0));

        // Path along +X, camera along +Z: cross(+X, +Z) = -Y.
        assert_eq!(mesh.positions[0], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.positions[1], Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.positions[4], Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(mesh.positions[5], Vec3::new(2.0, -1.0, 0.0));
    }

    #[test]
    fn uvs_run_from_zero_to_one() {
        let mesh = build_ribbon(&line(5), CAMERA, &style(1.0));
        assert_eq!(mesh.uvs[0], Vec2::new(0.0, 0.0));
        assert_eq!(mesh.uvs[1], Vec2::new(0.0, 1.0));
        assert_eq!(mesh.uvs[4], Vec2::new(0.5, 0.0));
        assert_eq!(mesh.uvs[8], Vec2::new(1.0, 0.0));
        assert_eq!(mesh.uvs[9], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn triangle_winding_is_preserved() {
        let mesh = build_ribbon(&line(3), CAMERA, &style(1.0));
        let tris: Vec<[u32; 3]> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [2, 1, 3], [2, 3, 4], [4, 3, 5]]);
    }

    #[test]
    fn uniform_color_by_default() {
        let color = Color::from_straight(1.0, 0.5, 0.0, 1.0);
        let mesh = build_ribbon(&line(4), CAMERA, &RibbonStyle { color, ..style(1.0) });
        assert!(mesh.colors.iter().all(|&c| c == color));
    }

    #[test]
    fn fade_tail_dims_towards_the_end() {
        let mesh = build_ribbon(
            &line(3),
            CAMERA,
            &RibbonStyle { fade_tail: true, ..style(1.0) },
        );
        assert_eq!(mesh.colors[0], Color::white());
        assert_eq!(mesh.colors[2], Color::white().faded(0.5));
        assert_eq!(mesh.colors[5], Color::transparent());
    }

    #[test]
    fn last_point_reuses_incoming_direction() {
        // Bent path: the last point must use the (1,0)->(1,1) segment.
        let path = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)];
        // Camera straight above the last point.
        let mesh = build_ribbon(&path, Vec3::new(1.0, 1.0, 10.0), &style(2.0));

        // cross(+Y, +Z) = +X
        assert_relative_eq!(mesh.positions[4].x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(mesh.positions[5].x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(mesh.positions[5].y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn view_aligned_segment_reuses_previous_perpendicular() {
        // Second segment points straight at the camera.
        let path = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)];
        let mut mesher = RibbonMesher::new();
        let mut mesh = RibbonMesh::new();
        mesher.build_path(&path, CAMERA, &style(2.0), &mut mesh);

        assert_eq!(mesher.degenerate_points(), 2);
        assert!(mesh.positions.iter().all(|p| p.is_finite()));
        assert_eq!(mesh.positions[2], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.positions[3], Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn leading_degenerate_point_collapses_to_zero_width() {
        let path = [Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)];
        let mut mesher = RibbonMesher::new();
        let mut mesh = RibbonMesh::new();
        mesher.build_path(&path, CAMERA, &style(2.0), &mut mesh);

        assert_eq!(mesh.positions[0], Vec3::ZERO);
        assert_eq!(mesh.positions[1], Vec3::ZERO);
        assert!(mesh.positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn build_from_display_points_keeps_storage_order() {
        let points = [
            DisplayPoint::new(Vec3::new(2.0, 0.0, 0.0), 1.0),
            DisplayPoint::new(Vec3::new(1.0, 0.0, 0.0), 0.5),
            DisplayPoint::new(Vec3::new(0.0, 0.0, 0.0), 0.0),
        ];
        let mut mesher = RibbonMesher::new();
        let mut mesh = RibbonMesh::new();
        assert!(mesher.build(&points, CAMERA, &style(2.0), &mut mesh));

        // Newest point first, at u = 0.
        assert_eq!(mesh.positions[0].x, 2.0);
        assert_eq!(mesh.uvs[0].x, 0.0);
        assert_eq!(mesh.positions[4].x, 0.0);
    }

    #[test]
    fn rebuild_replaces_previous_geometry() {
        let mut mesher = RibbonMesher::new();
        let mut mesh = RibbonMesh::new();
        mesher.build_path(&line(10), CAMERA, &style(1.0), &mut mesh);
        mesher.build_path(&line(3), CAMERA, &style(1.0), &mut mesh);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.index_count(), 12);
    }

    proptest! {
        #[test]
        fn buffer_sizes_match_point_count(
            coords in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0, -5.0f32..5.0), 0..64),
        ) {
            let path: Vec<Vec3> = coords.iter().map(|&(x, y, z)| Vec3::new(x, y, z)).collect();
            let mesh = build_ribbon(&path, Vec3::new(0.0, 0.0, 100.0), &style(0.5));
            let n = path.len();

            if n < 2 {
                prop_assert_eq!(mesh.vertex_count(), 0);
                prop_assert_eq!(mesh.index_count(), 0);
            } else {
                prop_assert_eq!(mesh.vertex_count(), 2 * n);
                prop_assert_eq!(mesh.uvs.len(), 2 * n);
                prop_assert_eq!(mesh.colors.len(), 2 * n);
                prop_assert_eq!(mesh.index_count(), 6 * (n - 1));
                prop_assert!(mesh.indices.iter().all(|&i| (i as usize) < 2 * n));
                prop_assert!(mesh.positions.iter().all(|p| p.is_finite()));
            }
        }
    }
}
