//! Terrain grid: heightmap + colormap + palette, wrapped into an infinite tile.
use crate::error::TerrainError;

pub const PALETTE_LEN: usize = 256;

/// 256 packed `0x00RRGGBB` colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [u32; PALETTE_LEN],
}

impl Palette {
    pub fn new(colors: [u32; PALETTE_LEN]) -> Self {
        Self { colors }
    }

    /// Builds the palette from 6-bit-per-channel RGB triples (VGA style).
    /// Each channel is masked to 6 bits and shifted up to the 8-bit range.
    /// Entries past the end of `rgb` stay black.
    pub fn from_vga6(rgb: &[u8]) -> Result<Self, TerrainError> {
        Self::from_triples(rgb, |c| (c & 63) << 2)
    }

    /// Builds the palette from plain 8-bit RGB triples.
    pub fn from_rgb8(rgb: &[u8]) -> Result<Self, TerrainError> {
        Self::from_triples(rgb, |c| c)
    }

    fn from_triples(rgb: &[u8], channel: impl Fn(u8) -> u8) -> Result<Self, TerrainError> {
        if rgb.len() % 3 != 0 || rgb.len() > PALETTE_LEN * 3 {
            return Err(TerrainError::PaletteLength(rgb.len()));
        }
        let mut colors = [0u32; PALETTE_LEN];
        for (slot, c) in colors.iter_mut().zip(rgb.chunks_exact(3)) {
            *slot = pack_rgb(channel(c[0]), channel(c[1]), channel(c[2]));
        }
        Ok(Self { colors })
    }

    #[inline]
    pub fn color(&self, index: u8) -> u32 {
        self.colors[index as usize]
    }
}

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Splits a packed color back into `(r, g, b)`.
#[inline]
pub const fn unpack_rgb(c: u32) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// One terrain cell as seen by the ray caster.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub height: u8,
    pub color_index: u8,
}

/// Square `N x N` heightmap and colormap sharing one palette.
///
/// Storage is row-major (`y * N + x`). Every accessor wraps its coordinates
/// with the `N - 1` mask, so callers never repeat the masking and no read can
/// leave the buffers.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    size: usize,
    mask: i32,
    heights: Vec<u8>,
    colors: Vec<u8>,
    palette: Palette,
}

impl TerrainGrid {
    pub fn new(
        size: usize,
        heights: Vec<u8>,
        colors: Vec<u8>,
        palette: Palette,
    ) -> Result<Self, TerrainError> {
        if !size.is_power_of_two() || size > i32::MAX as usize {
            return Err(TerrainError::SizeNotPowerOfTwo(size));
        }
        let expected = size * size;
        for (grid, len) in [("height", heights.len()), ("color", colors.len())] {
            if len != expected {
                return Err(TerrainError::GridLength {
                    grid,
                    size,
                    expected,
                    actual: len,
                });
            }
        }
        Ok(Self {
            size,
            mask: size as i32 - 1,
            heights,
            colors,
            palette,
        })
    }

    /// Uniform terrain: every cell has the same height and color index.
    pub fn flat(
        size: usize,
        height: u8,
        color_index: u8,
        palette: Palette,
    ) -> Result<Self, TerrainError> {
        let cells = size.saturating_mul(size);
        Self::new(size, vec![height; cells], vec![color_index; cells], palette)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        // two's complement masking wraps negative coordinates as well
        ((y & self.mask) as usize) * self.size + (x & self.mask) as usize
    }

    #[inline]
    pub fn sample(&self, x: i32, y: i32) -> Cell {
        let i = self.offset(x, y);
        Cell {
            height: self.heights[i],
            color_index: self.colors[i],
        }
    }

    #[inline]
    pub fn height_at(&self, x: i32, y: i32) -> u8 {
        self.heights[self.offset(x, y)]
    }

    /// Samples at a world position, truncating toward zero like an integer cast.
    #[inline]
    pub fn sample_world(&self, x: f32, y: f32) -> Cell {
        self.sample(x as i32, y as i32)
    }

    /// Packed RGB of the cell's color index.
    #[inline]
    pub fn color_at(&self, x: i32, y: i32) -> u32 {
        self.palette.color(self.colors[self.offset(x, y)])
    }

    /// Overwrites one cell. Used by generators before the grid is handed to the renderer.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        let i = self.offset(x, y);
        self.heights[i] = cell.height;
        self.colors[i] = cell.color_index;
    }

    pub fn heights(&self) -> &[u8] {
        &self.heights
    }

    pub fn color_indices(&self) -> &[u8] {
        &self.colors
    }
}
