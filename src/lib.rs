//! Height-field terrain rendering: a camera flies over a wrapped heightmap and
//! every screen column is ray-marched through it, near terrain occluding far.
//!
//! Modules:
//! - `core`: terrain grid, camera, input, scene
//! - `render`: framebuffer, column ray caster, frame renderer, display sinks
//! - `assets`: GIF / raw / generated terrain datasets
//! - `config`: tunable parameters and command line
//! - `app`: the frame loop
//! - `error`: typed startup errors

pub mod app;
pub mod assets;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
