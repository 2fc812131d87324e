//! Where finished frames go.
use anyhow::{Result, anyhow};
use raylib::prelude::*;

use crate::core::input::{InputSource, InputState};
use crate::core::process_events::process_events;
use crate::render::framebuffer::Framebuffer;

/// Receives each finished frame. Only called after the whole frame is drawn.
pub trait DisplaySink {
    fn present(&mut self, frame: &Framebuffer) -> Result<()>;
}

/// Raylib window showing the framebuffer through a streaming texture,
/// upscaled by an integer factor. Also the keyboard input source.
pub struct RaylibDisplay {
    texture: Texture2D, // dropped before the window
    window: RaylibHandle,
    thread: RaylibThread,
    scale: u32,
    rgba: Vec<u8>,
}

impl RaylibDisplay {
    pub fn open(width: u32, height: u32, scale: u32, title: &str) -> Result<Self> {
        let window_size = |side: u32| {
            side.checked_mul(scale)
                .and_then(|px| i32::try_from(px).ok())
                .ok_or_else(|| anyhow!("window side {side} at scale {scale} is too large"))
        };
        let (window_width, window_height) = (window_size(width)?, window_size(height)?);
        let (mut window, thread) = raylib::init()
            .size(window_width, window_height)
            .title(title)
            .build();
        // present waits here, as a vsync would
        window.set_target_fps(60);

        let blank = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
        let texture = window
            .load_texture_from_image(&thread, &blank)
            .map_err(|e| anyhow!("cannot create framebuffer texture: {e}"))?;

        tracing::info!(width, height, scale, "window opened");
        Ok(Self { texture, window, thread, scale, rgba: Vec::new() })
    }
}

impl DisplaySink for RaylibDisplay {
    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        frame.upload_to_texture(&mut self.texture, &mut self.rgba)?;

        let mut d = self.window.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_ex(
            &self.texture,
            Vector2::new(0.0, 0.0),
            0.0,
            self.scale as f32,
            Color::WHITE,
        );
        Ok(())
    }
}

impl InputSource for RaylibDisplay {
    fn poll(&mut self) -> InputState {
        process_events(&self.window)
    }
}

/// Windowless sink: counts frames and remembers the last frame's checksum.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    pub frames: u64,
    pub last_checksum: Option<u64>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for HeadlessDisplay {
    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        self.frames += 1;
        self.last_checksum = Some(frame.checksum());
        Ok(())
    }
}
