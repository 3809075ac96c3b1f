//! BC1/BC2/BC3 (DXT1/DXT3/DXT5) block decompression.
//!
//! Every format stores the image as 4x4 texel blocks, visited row-major.
//! Each block decodes to sixteen RGBA8 texels in row-major order; texels of
//! right/bottom edge blocks that fall outside the image are decoded and then
//! dropped when written to the output.

use std::fmt;

use lodkit_common::BinaryReader;

use crate::color::rgb565_to_rgb888;
use crate::header::FourCC;
use crate::texture::PixelBuffer;
use crate::Result;

/// Texels per block edge.
pub const BLOCK_DIM: usize = 4;

/// Texels per block.
const BLOCK_TEXELS: usize = BLOCK_DIM * BLOCK_DIM;

/// Sixteen decoded texels, row-major within the block.
pub type DecodedBlock = [[u8; 4]; BLOCK_TEXELS];

/// Supported block-compression formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// DXT1: colour only, optional 1-bit punch-through alpha.
    Bc1,
    /// DXT3: explicit 4-bit alpha.
    Bc2,
    /// DXT5: interpolated 8-bit alpha.
    Bc3,
}

impl BlockFormat {
    /// Map a fourCC tag to a block format.
    pub fn from_four_cc(four_cc: FourCC) -> Option<Self> {
        match four_cc {
            FourCC::DXT1 => Some(Self::Bc1),
            FourCC::DXT3 => Some(Self::Bc2),
            FourCC::DXT5 => Some(Self::Bc3),
            _ => None,
        }
    }

    /// Compressed size of one block in bytes.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Bc1 => 8,
            Self::Bc2 | Self::Bc3 => 16,
        }
    }

    /// Read and decode one block from the stream.
    pub fn decode_block(self, reader: &mut BinaryReader<'_>) -> Result<DecodedBlock> {
        match self {
            Self::Bc1 => decode_bc1_block(reader),
            Self::Bc2 => decode_bc2_block(reader),
            Self::Bc3 => decode_bc3_block(reader),
        }
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bc1 => "BC1 (DXT1)",
            Self::Bc2 => "BC2 (DXT3)",
            Self::Bc3 => "BC3 (DXT5)",
        })
    }
}

/// Decode every block of a `width` x `height` surface into `buffer`.
pub(crate) fn decode_surface(
    reader: &mut BinaryReader<'_>,
    format: BlockFormat,
    width: u32,
    height: u32,
    buffer: &mut PixelBuffer,
) -> Result<()> {
    let blocks_wide = (width as usize).div_ceil(BLOCK_DIM);
    let blocks_high = (height as usize).div_ceil(BLOCK_DIM);

    for by in 0..blocks_high {
        for bx in 0..blocks_wide {
            let texels = format.decode_block(reader)?;

            for row in 0..BLOCK_DIM {
                for col in 0..BLOCK_DIM {
                    let px = bx * BLOCK_DIM + col;
                    let py = by * BLOCK_DIM + row;
                    buffer.put(px, py, texels[row * BLOCK_DIM + col]);
                }
            }
        }
    }

    Ok(())
}

/// How the colour palette treats `c0 <= c1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaletteMode {
    /// BC1: `c0 <= c1` selects three colours plus transparent black.
    PunchThrough,
    /// BC2/BC3: always four opaque colours.
    Opaque,
}

/// The 8-byte colour half shared by all three formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBlock {
    /// First RGB565 endpoint.
    pub c0: u16,
    /// Second RGB565 endpoint.
    pub c1: u16,
    /// Sixteen 2-bit palette indices, texel 0 in the low bits.
    pub selectors: u32,
}

impl ColorBlock {
    /// Read `c0`, `c1` and the selector word.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            c0: reader.read_u16()?,
            c1: reader.read_u16()?,
            selectors: reader.read_u32()?,
        })
    }

    /// BC1 palette: four opaque colours when `c0 > c1`, otherwise three
    /// colours and transparent black.
    pub fn bc1_palette(&self) -> [[u8; 4]; 4] {
        self.palette(PaletteMode::PunchThrough)
    }

    /// BC2/BC3 palette: always four opaque colours.
    pub fn opaque_palette(&self) -> [[u8; 4]; 4] {
        self.palette(PaletteMode::Opaque)
    }

    fn palette(&self, mode: PaletteMode) -> [[u8; 4]; 4] {
        let a = rgb565_to_rgb888(self.c0).map(u32::from);
        let b = rgb565_to_rgb888(self.c1).map(u32::from);

        let opaque = |rgb: [u32; 3]| [rgb[0] as u8, rgb[1] as u8, rgb[2] as u8, 255];
        let mix = |wa: u32, wb: u32, div: u32| {
            opaque([
                (wa * a[0] + wb * b[0]) / div,
                (wa * a[1] + wb * b[1]) / div,
                (wa * a[2] + wb * b[2]) / div,
            ])
        };

        if mode == PaletteMode::Opaque || self.c0 > self.c1 {
            [opaque(a), opaque(b), mix(2, 1, 3), mix(1, 2, 3)]
        } else {
            [opaque(a), opaque(b), mix(1, 1, 2), [0, 0, 0, 0]]
        }
    }

    /// Palette index of texel `i` (0..16).
    #[inline]
    pub fn index(&self, i: usize) -> usize {
        ((self.selectors >> (2 * i)) & 0x3) as usize
    }
}

/// Decode one 8-byte BC1 block.
pub fn decode_bc1_block(reader: &mut BinaryReader<'_>) -> Result<DecodedBlock> {
    let color = ColorBlock::read(reader)?;
    let palette = color.bc1_palette();

    let mut texels = [[0u8; 4]; BLOCK_TEXELS];
    for (i, texel) in texels.iter_mut().enumerate() {
        *texel = palette[color.index(i)];
    }
    Ok(texels)
}

/// Decode one 16-byte BC2 block: explicit alpha first, then colour.
pub fn decode_bc2_block(reader: &mut BinaryReader<'_>) -> Result<DecodedBlock> {
    let alpha = reader.read_u64()?;
    let color = ColorBlock::read(reader)?;
    let palette = color.opaque_palette();

    let mut texels = [[0u8; 4]; BLOCK_TEXELS];
    for (i, texel) in texels.iter_mut().enumerate() {
        let nibble = ((alpha >> (4 * i)) & 0xF) as u8;
        let [r, g, b, _] = palette[color.index(i)];
        *texel = [r, g, b, nibble * 17];
    }
    Ok(texels)
}

/// The 8-byte interpolated alpha half of a BC3 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaBlock {
    /// First alpha endpoint.
    pub alpha0: u8,
    /// Second alpha endpoint.
    pub alpha1: u8,
    /// Sixteen 3-bit palette indices packed into the low 48 bits, texel 0 lowest.
    pub selectors: u64,
}

impl AlphaBlock {
    /// Read the two endpoints and the six selector bytes.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            alpha0: reader.read_u8()?,
            alpha1: reader.read_u8()?,
            selectors: reader.read_uint(6)?,
        })
    }

    /// Eight-entry alpha palette. Interpolated entries truncate.
    pub fn palette(&self) -> [u8; 8] {
        let a0 = u32::from(self.alpha0);
        let a1 = u32::from(self.alpha1);
        let mut palette = [0u8; 8];
        palette[0] = self.alpha0;
        palette[1] = self.alpha1;

        if a0 > a1 {
            for (i, entry) in palette.iter_mut().enumerate().skip(2) {
                let i = i as u32;
                *entry = (((8 - i) * a0 + (i - 1) * a1) / 7) as u8;
            }
        } else {
            for (i, entry) in palette.iter_mut().enumerate().take(6).skip(2) {
                let i = i as u32;
                *entry = (((6 - i) * a0 + (i - 1) * a1) / 5) as u8;
            }
            palette[6] = 0;
            palette[7] = 255;
        }
        palette
    }

    /// Palette index of texel `i` (0..16).
    #[inline]
    pub fn index(&self, i: usize) -> usize {
        ((self.selectors >> (3 * i)) & 0x7) as usize
    }
}

/// Decode one 16-byte BC3 block: interpolated alpha first, then colour.
pub fn decode_bc3_block(reader: &mut BinaryReader<'_>) -> Result<DecodedBlock> {
    let alpha = AlphaBlock::read(reader)?;
    let color = ColorBlock::read(reader)?;
    let alpha_palette = alpha.palette();
    let palette = color.opaque_palette();

    let mut texels = [[0u8; 4]; BLOCK_TEXELS];
    for (i, texel) in texels.iter_mut().enumerate() {
        let [r, g, b, _] = palette[color.index(i)];
        *texel = [r, g, b, alpha_palette[alpha.index(i)]];
    }
    Ok(texels)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn decode(format: BlockFormat, bytes: &[u8]) -> DecodedBlock {
        let mut reader = BinaryReader::new(bytes);
        let block = format.decode_block(&mut reader).unwrap();
        assert!(reader.is_empty(), "block must consume exactly {} bytes", format.block_size());
        block
    }

    #[test]
    fn test_bc1_golden_block() {
        // c0 = pure red, c1 = pure blue, each row selects indices 0, 1, 2, 3.
        let bytes = [0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4];
        let texels = decode(BlockFormat::Bc1, &bytes);

        let row = [RED, BLUE, [170, 0, 85, 255], [85, 0, 170, 255]];
        for y in 0..4 {
            assert_eq!(texels[y * 4..y * 4 + 4], row, "row {}", y);
        }
    }

    #[test]
    fn test_bc1_punch_through_when_endpoints_equal() {
        let color = ColorBlock {
            c0: 0x7BEF,
            c1: 0x7BEF,
            selectors: 0xFFFF_FFFF,
        };
        let palette = color.bc1_palette();
        assert_eq!(palette[3], [0, 0, 0, 0]);

        let bytes = [0xEF, 0x7B, 0xEF, 0x7B, 0xFF, 0xFF, 0xFF, 0xFF];
        let texels = decode(BlockFormat::Bc1, &bytes);
        assert!(texels.iter().all(|t| t[3] == 0));
    }

    #[test]
    fn test_bc1_three_color_mode_averages() {
        // c0 < c1 selects the 3-colour mode.
        let color = ColorBlock {
            c0: 0x001F,
            c1: 0xF800,
            selectors: 0,
        };
        let palette = color.bc1_palette();
        assert_eq!(palette[0], BLUE);
        assert_eq!(palette[1], RED);
        assert_eq!(palette[2], [127, 0, 127, 255]);
        assert_eq!(palette[3], [0, 0, 0, 0]);
    }

    #[test]
    fn test_opaque_palette_ignores_endpoint_order() {
        let color = ColorBlock {
            c0: 0x001F,
            c1: 0xF800,
            selectors: 0,
        };
        let palette = color.opaque_palette();
        assert_eq!(palette[2], [85, 0, 170, 255]);
        assert_eq!(palette[3], [170, 0, 85, 255]);
    }

    #[test]
    fn test_bc2_explicit_alpha() {
        // Alpha nibbles 0..15 in texel order, then a solid red colour block.
        let mut bytes = vec![0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE];
        bytes.extend_from_slice(&[0x00, 0xF8, 0x00, 0xF8, 0x00, 0x00, 0x00, 0x00]);
        let texels = decode(BlockFormat::Bc2, &bytes);

        for (i, texel) in texels.iter().enumerate() {
            assert_eq!(*texel, [255, 0, 0, (i * 17) as u8], "texel {}", i);
        }
    }

    #[test]
    fn test_bc2_never_punches_through() {
        let mut bytes = vec![0xFF; 8];
        // c0 == c1 with every selector 3.
        bytes.extend_from_slice(&[0x1F, 0x00, 0x1F, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]);
        let texels = decode(BlockFormat::Bc2, &bytes);
        assert!(texels.iter().all(|t| *t == BLUE));
    }

    #[test]
    fn test_bc3_gradient_palette() {
        let alpha = AlphaBlock {
            alpha0: 255,
            alpha1: 0,
            selectors: 0,
        };
        assert_eq!(alpha.palette(), [255, 0, 218, 182, 145, 109, 72, 36]);
    }

    #[test]
    fn test_bc3_six_step_palette() {
        let alpha = AlphaBlock {
            alpha0: 0,
            alpha1: 255,
            selectors: 0,
        };
        assert_eq!(alpha.palette(), [0, 255, 51, 102, 153, 204, 0, 255]);

        let equal = AlphaBlock {
            alpha0: 100,
            alpha1: 100,
            selectors: 0,
        };
        assert_eq!(equal.palette(), [100, 100, 100, 100, 100, 100, 0, 255]);
    }

    #[test]
    fn test_bc3_selectors_span_both_halves() {
        // Texel i uses alpha index i % 8.
        let mut selectors = 0u64;
        for i in 0..16u64 {
            selectors |= (i % 8) << (3 * i);
        }
        let mut bytes = vec![255, 0];
        bytes.extend_from_slice(&selectors.to_le_bytes()[..6]);
        bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00]);
        let texels = decode(BlockFormat::Bc3, &bytes);

        let expected = [255, 0, 218, 182, 145, 109, 72, 36];
        for (i, texel) in texels.iter().enumerate() {
            assert_eq!(*texel, [255, 255, 255, expected[i % 8]], "texel {}", i);
        }
    }

    #[test]
    fn test_truncated_block_is_an_error() {
        let bytes = [0x00, 0xF8, 0x1F, 0x00, 0xE4];
        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            BlockFormat::Bc1.decode_block(&mut reader),
            Err(crate::Error::Truncated { .. })
        ));
    }
}
