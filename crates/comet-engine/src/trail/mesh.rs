use crate::coords::{Vec2, Vec3};
use crate::paint::Color;

/// Visual parameters the mesher needs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RibbonStyle {
    pub width: f32,
    pub color: Color,
    /// Scale vertex opacity by `1 - ratio` so the oldest end is transparent.
    pub fade_tail: bool,
}

impl Default for RibbonStyle {
    fn default() -> Self {
        Self {
            width: 0.5,
            color: Color::white(),
            fade_tail: false,
        }
    }
}

/// CPU-side ribbon geometry, rebuilt every frame.
///
/// Layout for `N` path points:
/// - `positions`, `uvs`, `colors`: `2N` entries, left edge at `2i`, right at `2i + 1`
/// - `indices`: `6(N - 1)` entries, two triangles per path segment
///
/// Buffers keep their allocation across `clear` so steady-state rebuilds do
/// not allocate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
}

impl RibbonMesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.positions.clear();
        self.uvs.clear();
        self.colors.clear();
        self.indices.clear();
    }

    /// Reserves room for a ribbon over `points` path points.
    pub fn reserve_for(&mut self, points: usize) {
        let verts = points * 2;
        let idx = points.saturating_sub(1) * 6;
        self.positions.reserve(verts);
        self.uvs.reserve(verts);
        self.colors.reserve(verts);
        self.indices.reserve(idx);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}
