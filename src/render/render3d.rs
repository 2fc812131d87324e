//! Frame renderer: sky fill, then every column through the ray caster.
use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::core::scene::Scene;
use crate::render::casters::{ColumnCaster, Span};
use crate::render::framebuffer::Framebuffer;

pub struct FrameRenderer {
    sky_color: u32,
    scale: f32,
    early_exit: bool,
    parallel: bool,
    spans: Vec<Span>,
}

impl FrameRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            sky_color: config.sky_color,
            scale: config.height_scale,
            early_exit: config.early_exit,
            parallel: config.parallel,
            spans: Vec::new(),
        }
    }

    /// Renders with whichever strategy the config asked for.
    pub fn draw(&mut self, scene: &Scene, fb: &mut Framebuffer) {
        if self.parallel {
            self.render_parallel(scene, fb);
        } else {
            self.render(scene, fb);
        }
    }

    fn caster<'a>(&self, scene: &'a Scene, fb: &Framebuffer) -> ColumnCaster<'a> {
        ColumnCaster::new(&scene.camera, scene.terrain(), fb.width, fb.height, self.scale)
            .with_early_exit(self.early_exit)
    }

    /// Columns left to right on the calling thread.
    pub fn render(&mut self, scene: &Scene, fb: &mut Framebuffer) {
        fb.clear_with(self.sky_color);
        let caster = self.caster(scene, fb);
        for column in 0..fb.width {
            caster.cast(column, |s| {
                fb.fill_column(s.column, s.top as i32, s.bottom as i32, s.color)
            });
        }
    }

    /// Columns cast concurrently, then written in one pass. Columns share no
    /// state, so the result is pixel-identical to `render`.
    pub fn render_parallel(&mut self, scene: &Scene, fb: &mut Framebuffer) {
        fb.clear_with(self.sky_color);
        let caster = self.caster(scene, fb);
        let columns: Vec<Vec<Span>> = (0..fb.width)
            .into_par_iter()
            .map(|column| {
                let mut spans = Vec::new();
                caster.cast_into(column, &mut spans);
                spans
            })
            .collect();

        self.spans.clear();
        self.spans.extend(columns.into_iter().flatten());
        for s in &self.spans {
            fb.fill_column(s.column, s.top as i32, s.bottom as i32, s.color);
        }
    }

    /// Renders the given columns in the given order onto an already cleared buffer.
    pub fn render_columns(
        &mut self,
        scene: &Scene,
        fb: &mut Framebuffer,
        order: impl IntoIterator<Item = u32>,
    ) {
        let caster = self.caster(scene, fb);
        for column in order {
            caster.cast_into(column, &mut self.spans);
            for s in &self.spans {
                fb.fill_column(s.column, s.top as i32, s.bottom as i32, s.color);
            }
        }
    }

    pub fn sky_color(&self) -> u32 {
        self.sky_color
    }
}
