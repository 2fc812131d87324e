//! Frame loop: poll input, update the camera, render, present.
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::core::input::InputSource;
use crate::core::scene::Scene;
use crate::render::display::DisplaySink;
use crate::render::framebuffer::Framebuffer;
use crate::render::render3d::FrameRenderer;

/// Runs frames until the input source reports quit or `max_frames` frames
/// have been presented. Returns the number of frames presented.
///
/// The quit flag is read once per frame, before any work for that frame.
pub fn run<P>(
    scene: &mut Scene,
    renderer: &mut FrameRenderer,
    fb: &mut Framebuffer,
    platform: &mut P,
    max_frames: Option<u64>,
) -> Result<u64>
where
    P: InputSource + DisplaySink,
{
    let mut frames = 0u64;
    let mut window_start = Instant::now();
    let mut window_frames = 0u32;

    while max_frames.is_none_or(|max| frames < max) {
        let input = platform.poll();
        if input.quit {
            tracing::info!(frames, "quit requested");
            break;
        }

        scene.update(&input);
        renderer.draw(scene, fb);
        platform
            .present(fb)
            .with_context(|| format!("presenting frame {frames}"))?;

        frames += 1;
        window_frames += 1;
        let elapsed = window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let cam = &scene.camera;
            tracing::debug!(
                fps = window_frames as f32 / elapsed.as_secs_f32(),
                x = cam.x,
                y = cam.y,
                height = cam.height,
                angle = cam.angle,
                "frame stats"
            );
            window_start = Instant::now();
            window_frames = 0;
        }
    }
    Ok(frames)
}

/// Pairs any input source with any display sink for `run`.
pub struct Platform<I, D> {
    pub input: I,
    pub display: D,
}

impl<I: InputSource, D> InputSource for Platform<I, D> {
    fn poll(&mut self) -> crate::core::input::InputState {
        self.input.poll()
    }
}

impl<I, D: DisplaySink> DisplaySink for Platform<I, D> {
    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        self.display.present(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::core::camera::{Camera, MotionConfig};
    use crate::core::input::{InputState, ScriptedInput};
    use crate::core::terrain::{Palette, TerrainGrid};
    use crate::render::display::HeadlessDisplay;

    fn scene() -> Scene {
        let terrain = TerrainGrid::flat(32, 50, 1, Palette::new([0x112233; 256])).unwrap();
        let camera = Camera::new(0.0, 0.0, 150.0, 0.0, 100.0, 60.0);
        Scene::new(camera, terrain, MotionConfig::default(), 10.0)
    }

    fn setup() -> (Scene, FrameRenderer, Framebuffer) {
        let config = RenderConfig {
            screen_width: 32,
            screen_height: 32,
            ..RenderConfig::default()
        };
        (scene(), FrameRenderer::new(&config), Framebuffer::new(32, 32))
    }

    #[test]
    fn stops_on_quit() {
        let (mut scene, mut renderer, mut fb) = setup();
        let mut platform = Platform {
            input: ScriptedInput::idle_frames(5),
            display: HeadlessDisplay::new(),
        };
        let n = run(&mut scene, &mut renderer, &mut fb, &mut platform, None).unwrap();
        assert_eq!(n, 5);
        assert_eq!(platform.display.frames, 5);
        assert_eq!(platform.display.last_checksum, Some(fb.checksum()));
    }

    #[test]
    fn stops_at_frame_limit() {
        let (mut scene, mut renderer, mut fb) = setup();
        let mut platform = Platform {
            input: ScriptedInput::idle_frames(100),
            display: HeadlessDisplay::new(),
        };
        let n = run(&mut scene, &mut renderer, &mut fb, &mut platform, Some(3)).unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn input_reaches_camera_before_render() {
        let (mut scene, mut renderer, mut fb) = setup();
        let frames = vec![InputState { forward: true, descend: true, ..InputState::idle() }; 200];
        let mut platform = Platform {
            input: ScriptedInput::new(frames),
            display: HeadlessDisplay::new(),
        };
        run(&mut scene, &mut renderer, &mut fb, &mut platform, None).unwrap();
        assert!((scene.camera.x - 200.0).abs() < 1e-2);
        assert_eq!(scene.camera.height, 60.0);
    }

    /// Sink whose upload fails after a number of good frames.
    struct FailingDisplay {
        good_frames: u32,
    }

    impl DisplaySink for FailingDisplay {
        fn present(&mut self, _frame: &Framebuffer) -> Result<()> {
            if self.good_frames == 0 {
                anyhow::bail!("texture upload failed");
            }
            self.good_frames -= 1;
            Ok(())
        }
    }

    #[test]
    fn present_failure_stops_the_loop() {
        let (mut scene, mut renderer, mut fb) = setup();
        let mut platform = Platform {
            input: ScriptedInput::idle_frames(10),
            display: FailingDisplay { good_frames: 2 },
        };
        let err = run(&mut scene, &mut renderer, &mut fb, &mut platform, None).unwrap_err();
        assert_eq!(err.to_string(), "presenting frame 2");
        assert_eq!(err.root_cause().to_string(), "texture upload failed");
    }
}
