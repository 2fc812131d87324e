//! Camera pose, input response and the ground collision rule.
use crate::core::input::InputState;
use crate::core::terrain::TerrainGrid;

/// Per-frame increments applied while a control is held.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub move_step: f32,
    pub turn_step: f32,
    pub climb_step: f32,
    pub pitch_step: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_step: 1.0,
            turn_step: 0.01,
            climb_step: 1.0,
            pitch_step: 1.5,
        }
    }
}

/// Roughly 270 degrees: looking toward -y.
const START_ANGLE: f32 = 4.71;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,       // grid space, unwrapped
    pub y: f32,
    pub height: f32,  // above the ground plane
    pub angle: f32,   // radians, clockwise
    pub horizon: f32, // screen-row offset, stands in for pitch
    pub zfar: f32,    // ray march depth in grid units
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 512.0,
            y: 512.0,
            height: 150.0,
            angle: START_ANGLE,
            horizon: 100.0,
            zfar: 600.0,
        }
    }
}

impl Camera {
    pub fn new(x: f32, y: f32, height: f32, angle: f32, horizon: f32, zfar: f32) -> Self {
        Self { x, y, height, angle, horizon, zfar }
    }

    /// Applies one frame of held controls.
    ///
    /// Backward wins over forward when both are held. Opposing turn, climb and
    /// pitch controls are both applied and cancel out.
    pub fn apply_input(&mut self, input: &InputState, motion: &MotionConfig) {
        let (sin_a, cos_a) = self.angle.sin_cos();
        if input.backward {
            self.x -= cos_a * motion.move_step;
            self.y -= sin_a * motion.move_step;
        } else if input.forward {
            self.x += cos_a * motion.move_step;
            self.y += sin_a * motion.move_step;
        }

        if input.turn_left {
            self.angle -= motion.turn_step;
        }
        if input.turn_right {
            self.angle += motion.turn_step;
        }

        if input.ascend {
            self.height += motion.climb_step;
        }
        if input.descend {
            self.height -= motion.climb_step;
        }

        if input.pitch_up {
            self.horizon += motion.pitch_step;
        }
        if input.pitch_down {
            self.horizon -= motion.pitch_step;
        }
    }

    /// Lifts the camera to at least `clearance` above the ground cell it is over.
    /// Returns true when the camera had to be moved.
    pub fn clamp_to_ground(&mut self, terrain: &TerrainGrid, clearance: f32) -> bool {
        let floor = terrain.sample_world(self.x, self.y).height as f32 + clearance;
        if floor > self.height {
            self.height = floor;
            true
        } else {
            false
        }
    }
}
