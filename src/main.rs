// main.rs
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use voxelspace::app::{self, Platform};
use voxelspace::assets;
use voxelspace::config::{Args, RenderConfig};
use voxelspace::core::input::ScriptedInput;
use voxelspace::core::scene::Scene;
use voxelspace::core::terrain::TerrainGrid;
use voxelspace::render::display::{HeadlessDisplay, RaylibDisplay};
use voxelspace::render::framebuffer::Framebuffer;
use voxelspace::render::render3d::FrameRenderer;

fn load_terrain(args: &Args, config: &RenderConfig) -> Result<TerrainGrid> {
    match (&args.color_map, &args.height_map) {
        (Some(color), Some(height)) => assets::load_gif_maps(color, height, config.map_size)
            .with_context(|| format!("loading maps {} / {}", color.display(), height.display())),
        _ => assets::generate(config.map_size, args.seed).context("generating terrain"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.render_config();
    config.validate().context("invalid configuration")?;

    let terrain = match load_terrain(&args, &config) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("{e:#}");
            return Err(e);
        }
    };

    let mut scene = Scene::new(config.camera, terrain, config.motion, config.clearance);
    let mut renderer = FrameRenderer::new(&config);
    let mut framebuffer = Framebuffer::new(config.screen_width, config.screen_height);
    framebuffer.set_background_color(config.sky_color);

    if let Some(frames) = args.headless {
        let mut platform = Platform {
            input: ScriptedInput::idle_frames(frames as usize),
            display: HeadlessDisplay::new(),
        };
        let started = std::time::Instant::now();
        let rendered = app::run(
            &mut scene,
            &mut renderer,
            &mut framebuffer,
            &mut platform,
            Some(frames),
        )?;
        let elapsed = started.elapsed();
        tracing::info!(
            frames = rendered,
            ms_per_frame = elapsed.as_secs_f64() * 1000.0 / rendered.max(1) as f64,
            checksum = platform.display.last_checksum.unwrap_or(0),
            "headless run finished"
        );
        return Ok(());
    }

    let mut display = RaylibDisplay::open(
        config.screen_width,
        config.screen_height,
        config.window_scale,
        "voxelspace",
    )?;
    let rendered = app::run(&mut scene, &mut renderer, &mut framebuffer, &mut display, None)?;
    tracing::info!(frames = rendered, "window closed");
    Ok(())
}
