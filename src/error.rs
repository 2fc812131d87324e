//! Error types for terrain loading and configuration.
//!
//! Everything here is a startup failure: once a `TerrainGrid` exists and the
//! config validates, presenting a frame is the only step that can still fail.

use std::path::PathBuf;

/// Rejected terrain data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    #[error("map size {0} is not a power of two")]
    SizeNotPowerOfTwo(usize),

    #[error("{grid} grid holds {actual} bytes, expected {expected} ({size}x{size})")]
    GridLength {
        grid: &'static str,
        size: usize,
        expected: usize,
        actual: usize,
    },

    #[error("palette holds {0} bytes, expected a multiple of 3 and at most 768")]
    PaletteLength(usize),

    #[error("{grid} map is {width}x{height}, configured map size is {size}x{size}")]
    Dimensions {
        grid: &'static str,
        width: usize,
        height: usize,
        size: usize,
    },
}

/// Failure while reading a terrain dataset from disk.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: gif::DecodingError,
    },

    #[error("{0} contains no image frame")]
    NoFrame(PathBuf),

    #[error("{0} carries no color palette")]
    NoPalette(PathBuf),

    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

/// Invalid tunable parameter.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("screen must be at least 1x1, got {width}x{height}")]
    ScreenSize { width: u32, height: u32 },

    #[error("map size {0} is not a power of two")]
    MapSize(usize),

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("window scale must be at least 1")]
    WindowScale,

    #[error("screen {width}x{height} at scale {scale} does not fit in a window")]
    ScreenTooLarge { width: u32, height: u32, scale: u32 },
}
