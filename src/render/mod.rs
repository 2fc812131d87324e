//! Rendering: framebuffer, column ray caster, frame renderer and display sinks.
//!
//! Re-exports:
//! - `framebuffer`: packed-RGB CPU framebuffer
//! - `casters`: frustum setup and per-column height-field ray march
//! - `render3d`: frame renderer (sequential and column-parallel)
//! - `display`: display sinks (raylib window, headless)

pub mod casters;
pub mod display;
pub mod framebuffer;
pub mod render3d;

pub use casters::{ColumnCaster, Frustum, Span};
pub use display::{DisplaySink, HeadlessDisplay, RaylibDisplay};
pub use framebuffer::Framebuffer;
pub use render3d::FrameRenderer;
