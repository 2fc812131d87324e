use anyhow::{Result, anyhow, ensure};
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

use crate::core::terrain::unpack_rgb;

/// Row-major `width x height` grid of packed `0x00RRGGBB` pixels, origin top-left.
pub struct Framebuffer {
    pub color_buffer: Vec<u32>,
    pub width: u32,
    pub height: u32,
    pub background_color: u32,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![0; size],
            width,
            height,
            background_color: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn clear_with(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_background_color(&mut self, c: u32) {
        self.background_color = c;
    }

    /// No-op outside the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.color_buffer[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> u32 {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    /// Paints rows `[top, bottom)` of one column, clipped to the buffer.
    pub fn fill_column(&mut self, x: u32, top: i32, bottom: i32, color: u32) {
        if x >= self.width {
            return;
        }
        let top = top.max(0) as u32;
        let bottom = bottom.clamp(0, self.height as i32) as u32;
        for y in top..bottom {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    /// FNV-1a over the pixels. Cheap frame identity for logs and tests.
    pub fn checksum(&self) -> u64 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for px in &self.color_buffer {
            for b in px.to_le_bytes() {
                hash ^= b as u64;
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
        }
        hash
    }

    /// Pixels as opaque RGBA8, the layout raylib textures expect.
    pub fn write_rgba(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color_buffer.len() * 4);
        for &px in &self.color_buffer {
            let (r, g, b) = unpack_rgb(px);
            out.extend_from_slice(&[r, g, b, 255]);
        }
    }

    /// Fails unless a `width x height` texture can take these pixels as-is.
    pub fn check_texture_size(&self, width: i32, height: i32) -> Result<()> {
        ensure!(
            u32::try_from(width) == Ok(self.width) && u32::try_from(height) == Ok(self.height),
            "texture is {width}x{height}, framebuffer is {}x{}",
            self.width,
            self.height
        );
        Ok(())
    }

    /// Uploads the pixels into a persistent texture of the same size.
    /// `scratch` holds the converted bytes between frames.
    pub fn upload_to_texture(&self, tex: &mut Texture2D, scratch: &mut Vec<u8>) -> Result<()> {
        self.check_texture_size(tex.width(), tex.height())?;
        self.write_rgba(scratch);
        tex.update_texture(scratch.as_slice())
            .map_err(|e| anyhow!("texture upload failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pixel_ignores_out_of_range() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(-1, 0, 7);
        fb.set_pixel(0, -1, 7);
        fb.set_pixel(4, 0, 7);
        fb.set_pixel(0, 3, 7);
        assert!(fb.color_buffer.iter().all(|&c| c == 0));
        fb.set_pixel(3, 2, 7);
        assert_eq!(fb.get_pixel(3, 2), 7);
    }

    #[test]
    fn fill_column_clips_rows() {
        let mut fb = Framebuffer::new(2, 5);
        fb.fill_column(1, -10, 100, 9);
        for y in 0..5 {
            assert_eq!(fb.get_pixel(1, y), 9);
            assert_eq!(fb.get_pixel(0, y), 0);
        }
        fb.fill_column(2, 0, 5, 3);
        fb.fill_column(0, 4, 2, 3);
        assert!((0..5).all(|y| fb.get_pixel(0, y) == 0));
    }

    #[test]
    fn clear_and_rgba_layout() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_background_color(0x36BBE0);
        fb.clear();
        let mut out = vec![1, 2, 3];
        fb.write_rgba(&mut out);
        assert_eq!(out, [0x36, 0xBB, 0xE0, 255, 0x36, 0xBB, 0xE0, 255]);
    }

    #[test]
    fn texture_size_must_match() {
        let fb = Framebuffer::new(240, 120);
        assert!(fb.check_texture_size(240, 120).is_ok());
        let err = fb.check_texture_size(120, 240).unwrap_err();
        assert!(err.to_string().contains("120x240"));
        assert!(fb.check_texture_size(-240, 120).is_err());
    }

    #[test]
    fn checksum_tracks_content() {
        let mut a = Framebuffer::new(3, 3);
        let b = Framebuffer::new(3, 3);
        assert_eq!(a.checksum(), b.checksum());
        a.set_pixel(1, 1, 1);
        assert_ne!(a.checksum(), b.checksum());
    }
}
