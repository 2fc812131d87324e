//! Terrain datasets: indexed GIF pairs, raw byte grids, or generated terrain.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::terrain::{PALETTE_LEN, Palette, TerrainGrid};
use crate::error::{AssetError, TerrainError};

/// An indexed image: one palette index per pixel plus the palette it refers to.
pub struct IndexedImage {
    pub width: usize,
    pub height: usize,
    pub indices: Vec<u8>,
    pub palette: Option<Vec<u8>>,
}

/// Decodes the first frame of a GIF without expanding it to RGBA.
pub fn read_indexed_gif(path: &Path) -> Result<IndexedImage, AssetError> {
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |source: gif::DecodingError| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(BufReader::new(file)).map_err(decode_err)?;
    let global = decoder.global_palette().map(|p| p.to_vec());

    let frame = decoder
        .read_next_frame()
        .map_err(decode_err)?
        .ok_or_else(|| AssetError::NoFrame(path.to_path_buf()))?;

    Ok(IndexedImage {
        width: frame.width as usize,
        height: frame.height as usize,
        indices: frame.buffer.to_vec(),
        palette: frame.palette.clone().or(global),
    })
}

fn check_dimensions(
    grid: &'static str,
    image: &IndexedImage,
    size: usize,
) -> Result<(), TerrainError> {
    if image.width != size || image.height != size {
        return Err(TerrainError::Dimensions {
            grid,
            width: image.width,
            height: image.height,
            size,
        });
    }
    Ok(())
}

/// Loads a color map and a height map from indexed GIFs.
///
/// The color map's palette is read as 6-bit channels. The height map's pixel
/// indices are the heights. Both images must be `size x size`.
pub fn load_gif_maps(
    color_path: &Path,
    height_path: &Path,
    size: usize,
) -> Result<TerrainGrid, AssetError> {
    let color = read_indexed_gif(color_path)?;
    let height = read_indexed_gif(height_path)?;
    let terrain = terrain_from_indexed(color, height, size, color_path)?;
    tracing::info!(
        color = %color_path.display(),
        height = %height_path.display(),
        size,
        "terrain loaded"
    );
    Ok(terrain)
}

/// Builds the terrain from an already decoded image pair. `color_path` only
/// names the color map in errors and logs.
pub fn terrain_from_indexed(
    color: IndexedImage,
    height: IndexedImage,
    size: usize,
    color_path: &Path,
) -> Result<TerrainGrid, AssetError> {
    check_dimensions("color", &color, size)?;
    check_dimensions("height", &height, size)?;

    let rgb = color
        .palette
        .ok_or_else(|| AssetError::NoPalette(color_path.to_path_buf()))?;
    if rgb.len() < PALETTE_LEN * 3 {
        tracing::warn!(
            path = %color_path.display(),
            entries = rgb.len() / 3,
            "short palette, remaining entries are black"
        );
    }
    let palette = Palette::from_vga6(&rgb)?;
    Ok(TerrainGrid::new(size, height.indices, color.indices, palette)?)
}

/// Same contract as `load_gif_maps`, from bytes already in memory.
/// `palette_vga6` holds up to 256 RGB triples with 6-bit channels.
pub fn load_raw_maps(
    colors: Vec<u8>,
    heights: Vec<u8>,
    palette_vga6: &[u8],
    size: usize,
) -> Result<TerrainGrid, TerrainError> {
    let palette = Palette::from_vga6(palette_vga6)?;
    TerrainGrid::new(size, heights, colors, palette)
}

const SEA_LEVEL: u8 = 40;
const ROUGHNESS: f32 = 0.55;

/// Color stops by height, 6-bit channels.
const BANDS: [(u8, [u8; 3]); 6] = [
    (0, [2, 6, 20]),     // deep water
    (40, [8, 24, 44]),   // shallows
    (56, [50, 46, 30]),  // sand
    (100, [12, 36, 10]), // grass
    (180, [30, 28, 24]), // rock
    (255, [62, 62, 63]), // snow
];

fn band_palette() -> Vec<u8> {
    let mut rgb = Vec::with_capacity(PALETTE_LEN * 3);
    for i in 0..PALETTE_LEN {
        let h = i as f32;
        let hi = BANDS
            .iter()
            .position(|(at, _)| *at as f32 >= h)
            .unwrap_or(BANDS.len() - 1)
            .max(1);
        let (h0, c0) = BANDS[hi - 1];
        let (h1, c1) = BANDS[hi];
        let t = ((h - h0 as f32) / (h1 as f32 - h0 as f32).max(1.0)).clamp(0.0, 1.0);
        for ch in 0..3 {
            rgb.push((c0[ch] as f32 + (c1[ch] as f32 - c0[ch] as f32) * t) as u8);
        }
    }
    rgb
}

/// Seamless fractal terrain (diamond-square on a torus) of side `size`.
///
/// The same seed always gives the same terrain. Below sea level the ground is
/// flattened to a water plane; colors follow height bands with a little noise.
pub fn generate(size: usize, seed: u64) -> Result<TerrainGrid, TerrainError> {
    if !size.is_power_of_two() {
        return Err(TerrainError::SizeNotPowerOfTwo(size));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let field = diamond_square(size, &mut rng);

    let (lo, hi) = field
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = (hi - lo).max(f32::EPSILON);

    let mut heights = Vec::with_capacity(field.len());
    let mut colors = Vec::with_capacity(field.len());
    for &v in &field {
        let h = ((v - lo) / span * 255.0) as u8;
        let jitter: i16 = rng.gen_range(-4..=4);
        heights.push(h.max(SEA_LEVEL));
        colors.push((h as i16 + jitter).clamp(0, 255) as u8);
    }

    let palette = Palette::from_vga6(&band_palette())?;
    let terrain = TerrainGrid::new(size, heights, colors, palette)?;
    tracing::info!(size, seed, "terrain generated");
    Ok(terrain)
}

fn diamond_square(n: usize, rng: &mut StdRng) -> Vec<f32> {
    let mut h = vec![0.0f32; n * n];
    let at = |x: usize, y: usize| (y & (n - 1)) * n + (x & (n - 1));

    let mut step = n;
    let mut amp = 1.0f32;
    while step > 1 {
        let half = step / 2;

        for y in (0..n).step_by(step) {
            for x in (0..n).step_by(step) {
                let avg = (h[at(x, y)]
                    + h[at(x + step, y)]
                    + h[at(x, y + step)]
                    + h[at(x + step, y + step)])
                    * 0.25;
                h[at(x + half, y + half)] = avg + rng.gen_range(-amp..=amp);
            }
        }

        for y in (0..n).step_by(half) {
            let start = if (y / half) % 2 == 0 { half } else { 0 };
            for x in (start..n).step_by(step) {
                let avg = (h[at(x + n - half, y)]
                    + h[at(x + half, y)]
                    + h[at(x, y + n - half)]
                    + h[at(x, y + half)])
                    * 0.25;
                h[at(x, y)] = avg + rng.gen_range(-amp..=amp);
            }
        }

        step = half;
        amp *= ROUGHNESS;
    }
    h
}
