//! World state: terrain data, camera and input.
//!
//! Re-exports:
//! - `terrain`: wrapped heightmap/colormap grid and palette
//! - `camera`: camera pose, input response, collision clamp
//! - `input`: per-frame control flags and input sources
//! - `scene`: camera + terrain aggregate passed through the frame loop
//! - `process_events`: raylib keyboard mapping

pub mod camera;
pub mod input;
pub mod process_events;
pub mod scene;
pub mod terrain;

pub use camera::{Camera, MotionConfig};
pub use input::{InputSource, InputState, ScriptedInput};
pub use scene::Scene;
pub use terrain::{Cell, Palette, TerrainGrid};
