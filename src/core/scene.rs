//! The world handed through the frame loop: camera + terrain.
use crate::core::camera::{Camera, MotionConfig};
use crate::core::input::InputState;
use crate::core::terrain::TerrainGrid;

pub struct Scene {
    pub camera: Camera,
    terrain: TerrainGrid,
    motion: MotionConfig,
    clearance: f32,
}

impl Scene {
    /// The camera is clamped once up front so the first frame already
    /// satisfies the clearance rule.
    pub fn new(camera: Camera, terrain: TerrainGrid, motion: MotionConfig, clearance: f32) -> Self {
        let mut scene = Self { camera, terrain, motion, clearance };
        scene.camera.clamp_to_ground(&scene.terrain, clearance);
        scene
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    pub fn clearance(&self) -> f32 {
        self.clearance
    }

    /// Input first, then the collision clamp. Runs between frames only.
    pub fn update(&mut self, input: &InputState) {
        self.camera.apply_input(input, &self.motion);
        if self.camera.clamp_to_ground(&self.terrain, self.clearance) {
            tracing::trace!(height = self.camera.height, "camera lifted to ground clearance");
        }
    }
}
