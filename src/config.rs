//! Tunable parameters and the command line that sets them.
use std::path::PathBuf;

use clap::Parser;

use crate::core::camera::{Camera, MotionConfig};
use crate::error::ConfigError;

/// Sky fill behind the terrain.
pub const SKY_COLOR: u32 = 0x36BBE0;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub map_size: usize,
    /// Vertical exaggeration of projected heights.
    pub height_scale: f32,
    /// Minimum gap kept between camera and ground.
    pub clearance: f32,
    pub sky_color: u32,
    pub early_exit: bool,
    pub parallel: bool,
    pub window_scale: u32,
    pub motion: MotionConfig,
    pub camera: Camera,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_width: 240,
            screen_height: 240,
            map_size: 1024,
            height_scale: 100.0,
            clearance: 10.0,
            sky_color: SKY_COLOR,
            early_exit: true,
            parallel: false,
            window_scale: 3,
            motion: MotionConfig::default(),
            camera: Camera::default(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if !self.map_size.is_power_of_two() {
            return Err(ConfigError::MapSize(self.map_size));
        }
        if self.window_scale == 0 {
            return Err(ConfigError::WindowScale);
        }
        // pixel indices are u32 and raylib takes i32 window sides
        let fits_window = |side: u32| {
            side.checked_mul(self.window_scale)
                .is_some_and(|px| px <= i32::MAX as u32)
        };
        if self.screen_width.checked_mul(self.screen_height).is_none()
            || !fits_window(self.screen_width)
            || !fits_window(self.screen_height)
        {
            return Err(ConfigError::ScreenTooLarge {
                width: self.screen_width,
                height: self.screen_height,
                scale: self.window_scale,
            });
        }
        for (name, value) in [
            ("height scale", self.height_scale),
            ("clearance", self.clearance),
            ("zfar", self.camera.zfar),
            ("camera x", self.camera.x),
            ("camera y", self.camera.y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        Ok(())
    }
}

/// Height-field terrain flyover.
#[derive(Parser, Debug)]
#[command(name = "voxelspace", version)]
pub struct Args {
    /// Indexed GIF holding palette indices (requires --height-map)
    #[arg(long, requires = "height_map")]
    pub color_map: Option<PathBuf>,

    /// Indexed GIF holding ground heights (requires --color-map)
    #[arg(long, requires = "color_map")]
    pub height_map: Option<PathBuf>,

    /// Seed for the generated terrain when no maps are given
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Side of the square terrain tile, a power of two
    #[arg(long, default_value_t = 1024)]
    pub map_size: usize,

    /// Framebuffer width in pixels
    #[arg(long, default_value_t = 240)]
    pub width: u32,

    /// Framebuffer height in pixels
    #[arg(long, default_value_t = 240)]
    pub height: u32,

    /// Integer upscale from framebuffer to window
    #[arg(long, default_value_t = 3)]
    pub window_scale: u32,

    /// Ray march depth in grid units
    #[arg(long, default_value_t = 600.0)]
    pub zfar: f32,

    /// Vertical exaggeration of projected heights
    #[arg(long, default_value_t = 100.0)]
    pub height_scale: f32,

    /// Cast columns on all cores
    #[arg(long)]
    pub parallel: bool,

    /// March every column to full depth
    #[arg(long)]
    pub no_early_exit: bool,

    /// Render this many frames without a window, then exit
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u64>,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        RenderConfig {
            screen_width: self.width,
            screen_height: self.height,
            map_size: self.map_size,
            height_scale: self.height_scale,
            early_exit: !self.no_early_exit,
            parallel: self.parallel,
            window_scale: self.window_scale,
            camera: Camera { zfar: self.zfar, ..defaults.camera },
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(RenderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let c = RenderConfig { screen_width: 0, ..RenderConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::ScreenSize { .. })));

        let c = RenderConfig { map_size: 1000, ..RenderConfig::default() };
        assert_eq!(c.validate(), Err(ConfigError::MapSize(1000)));

        let c = RenderConfig { height_scale: f32::NAN, ..RenderConfig::default() };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NotFinite { name: "height scale", .. })
        ));
    }

    #[test]
    fn rejects_oversized_screens() {
        let args = Args::parse_from(["voxelspace", "--width", "70000", "--height", "70000"]);
        assert!(matches!(
            args.render_config().validate(),
            Err(ConfigError::ScreenTooLarge { width: 70000, height: 70000, .. })
        ));

        let c = RenderConfig { screen_width: 1 << 30, screen_height: 1, ..RenderConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::ScreenTooLarge { scale: 3, .. })));

        let c = RenderConfig { window_scale: 1, ..c };
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn args_map_onto_config() {
        let args = Args::parse_from([
            "voxelspace",
            "--width",
            "320",
            "--zfar",
            "300",
            "--parallel",
            "--no-early-exit",
        ]);
        let c = args.render_config();
        assert_eq!(c.screen_width, 320);
        assert_eq!(c.screen_height, 240);
        assert_eq!(c.camera.zfar, 300.0);
        assert!(c.parallel && !c.early_exit);
        assert!(args.color_map.is_none());
    }

    #[test]
    fn maps_come_in_pairs() {
        let res = Args::try_parse_from(["voxelspace", "--color-map", "c.gif"]);
        assert!(res.is_err());
        let args =
            Args::try_parse_from(["voxelspace", "--color-map", "c.gif", "--height-map", "h.gif"])
                .unwrap();
        assert_eq!(args.height_map, Some(PathBuf::from("h.gif")));
    }
}
