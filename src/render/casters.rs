//! Height-field ray casting, one screen column at a time.
//!
//! Each column marches a 2D ray away from the camera one depth unit per step.
//! At every step the terrain height under the ray is projected onto the screen;
//! if it rises above everything drawn so far in that column (a smaller row
//! index than the current threshold) the rows in between are filled with the
//! cell's color and the threshold moves up. Near terrain therefore hides far
//! terrain without a depth buffer.
use crate::core::camera::Camera;
use crate::core::terrain::TerrainGrid;

/// Left and right view-frustum edges at depth `zfar`.
///
/// The `(cos +- sin)` construction rotates the heading by +-45 degrees, giving
/// a fixed 90 degree field of view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    pub left: (f32, f32),
    pub right: (f32, f32),
    pub zfar: f32,
}

impl Frustum {
    pub fn new(camera: &Camera) -> Self {
        let (sin_a, cos_a) = camera.angle.sin_cos();
        let zfar = camera.zfar;
        Self {
            left: (cos_a * zfar + sin_a * zfar, sin_a * zfar - cos_a * zfar),
            right: (cos_a * zfar - sin_a * zfar, sin_a * zfar + cos_a * zfar),
            zfar,
        }
    }

    /// Per-depth-unit step of the ray for screen column `column` out of `width`.
    #[inline]
    pub fn ray_step(&self, column: u32, width: u32) -> (f32, f32) {
        let i = column as f32;
        let w = width as f32;
        let (lx, ly) = self.left;
        let (rx, ry) = self.right;
        (
            (lx + (rx - lx) / w * i) / self.zfar,
            (ly + (ry - ly) / w * i) / self.zfar,
        )
    }
}

/// A run of rows `[top, bottom)` in one column painted with one color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub column: u32,
    pub top: u32,
    pub bottom: u32,
    pub color: u32,
}

/// Frame-constant inputs to the column march.
pub struct ColumnCaster<'a> {
    camera: &'a Camera,
    terrain: &'a TerrainGrid,
    frustum: Frustum,
    width: u32,
    height: u32,
    scale: f32,
    early_exit: bool,
}

impl<'a> ColumnCaster<'a> {
    pub fn new(
        camera: &'a Camera,
        terrain: &'a TerrainGrid,
        width: u32,
        height: u32,
        scale: f32,
    ) -> Self {
        Self {
            camera,
            terrain,
            frustum: Frustum::new(camera),
            width,
            height,
            scale,
            early_exit: true,
        }
    }

    /// Stop marching once the column is filled to the top row. Output is the
    /// same either way.
    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }

    /// Marches column `column` and hands every visible span to `emit`,
    /// nearest first. Spans never leave rows `[0, height)`.
    pub fn cast(&self, column: u32, mut emit: impl FnMut(Span)) {
        let (dx, dy) = self.frustum.ray_step(column, self.width);
        let mut rx = self.camera.x;
        let mut ry = self.camera.y;
        let mut max_height = self.height as i32;

        let mut z = 1u32;
        while (z as f32) < self.camera.zfar {
            rx += dx;
            ry += dy;

            let cell = self.terrain.sample_world(rx, ry);
            let proj = ((self.camera.height - cell.height as f32) / z as f32 * self.scale
                + self.camera.horizon) as i32;

            if proj < max_height {
                let top = proj.max(0);
                if top < max_height {
                    emit(Span {
                        column,
                        top: top as u32,
                        bottom: max_height as u32,
                        color: self.terrain.palette().color(cell.color_index),
                    });
                }
                max_height = proj;
                if self.early_exit && max_height <= 0 {
                    break;
                }
            }
            z += 1;
        }
    }

    /// Collects one column's spans into `out`, replacing its contents.
    pub fn cast_into(&self, column: u32, out: &mut Vec<Span>) {
        out.clear();
        self.cast(column, |span| out.push(span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::terrain::{Cell, Palette};

    fn palette() -> Palette {
        let mut colors = [0u32; 256];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = i as u32 * 0x010101;
        }
        Palette::new(colors)
    }

    #[test]
    fn frustum_spans_ninety_degrees() {
        let cam = Camera::new(0.0, 0.0, 100.0, 0.0, 0.0, 10.0);
        let f = Frustum::new(&cam);
        assert_eq!(f.left, (10.0, -10.0));
        assert_eq!(f.right, (10.0, 10.0));
        assert_eq!(f.ray_step(0, 4), (1.0, -1.0));
        assert_eq!(f.ray_step(2, 4), (1.0, 0.0));
    }

    #[test]
    fn spans_stack_upward_without_gaps() {
        let mut terrain = TerrainGrid::flat(64, 0, 1, palette()).unwrap();
        for x in 0..64 {
            for y in 0..64 {
                let h = ((x * 7 + y * 13) % 200) as u8;
                terrain.set(x, y, Cell { height: h, color_index: h });
            }
        }
        let cam = Camera::new(5.0, 5.0, 220.0, 0.3, 80.0, 300.0);
        let caster = ColumnCaster::new(&cam, &terrain, 120, 120, 100.0);
        let mut spans = Vec::new();
        for col in 0..120 {
            caster.cast_into(col, &mut spans);
            let mut threshold = 120;
            for s in &spans {
                assert_eq!(s.column, col);
                assert!(s.top < s.bottom);
                assert!(s.bottom <= threshold);
                threshold = s.top;
            }
        }
    }

    #[test]
    fn zfar_at_most_one_draws_nothing() {
        let terrain = TerrainGrid::flat(16, 0, 1, palette()).unwrap();
        let cam = Camera::new(0.0, 0.0, 100.0, 0.0, 50.0, 1.0);
        let caster = ColumnCaster::new(&cam, &terrain, 10, 10, 100.0);
        let mut spans = vec![Span { column: 0, top: 0, bottom: 1, color: 0 }];
        caster.cast_into(3, &mut spans);
        assert!(spans.is_empty());
    }

    #[test]
    fn projection_above_screen_clips_to_row_zero() {
        // camera below the ground: projected rows go negative immediately
        let terrain = TerrainGrid::flat(16, 255, 7, palette()).unwrap();
        let cam = Camera::new(0.0, 0.0, 0.0, 0.0, 0.0, 50.0);
        let caster = ColumnCaster::new(&cam, &terrain, 8, 8, 100.0);
        let mut spans = Vec::new();
        caster.cast_into(0, &mut spans);
        assert_eq!(spans, vec![Span { column: 0, top: 0, bottom: 8, color: 0x070707 }]);
    }

    #[test]
    fn early_exit_matches_full_march() {
        let terrain = TerrainGrid::flat(16, 200, 3, palette()).unwrap();
        let cam = Camera::new(0.0, 0.0, 210.0, 1.0, -50.0, 200.0);
        let fast = ColumnCaster::new(&cam, &terrain, 16, 64, 100.0);
        let slow = ColumnCaster::new(&cam, &terrain, 16, 64, 100.0).with_early_exit(false);
        let (mut a, mut b) = (Vec::new(), Vec::new());
        for col in 0..16 {
            fast.cast_into(col, &mut a);
            slow.cast_into(col, &mut b);
            assert_eq!(a, b);
        }
    }
}
