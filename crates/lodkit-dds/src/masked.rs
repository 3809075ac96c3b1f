//! Uncompressed 32-bit pixels with arbitrary per-channel bit masks.

use lodkit_common::BinaryReader;

use crate::header::DdsPixelFormat;
use crate::texture::PixelBuffer;
use crate::Result;

/// Position of the lowest set bit of `mask`.
///
/// Returns 32 for an empty mask.
#[inline]
pub fn mask_shift(mask: u32) -> u32 {
    mask.trailing_zeros()
}

/// Length of the contiguous run of set bits starting at the lowest set bit.
///
/// Returns 0 for an empty mask.
#[inline]
pub fn mask_width(mask: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    (mask >> mask_shift(mask)).trailing_ones()
}

/// Extraction parameters for one channel mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMask {
    shift: u32,
    bits: u32,
    /// Value for an empty mask.
    fallback: u8,
}

impl ChannelMask {
    /// Build a colour channel; an empty mask reads as 0.
    pub fn color(mask: u32) -> Self {
        Self::with_fallback(mask, 0)
    }

    /// Build an alpha channel; an empty mask reads as fully opaque.
    pub fn alpha(mask: u32) -> Self {
        Self::with_fallback(mask, 255)
    }

    fn with_fallback(mask: u32, fallback: u8) -> Self {
        Self {
            shift: mask_shift(mask),
            bits: mask_width(mask),
            fallback,
        }
    }

    /// Extract this channel from `word` and rescale it to 8 bits.
    #[inline]
    pub fn extract(&self, word: u32) -> u8 {
        if self.bits == 0 {
            return self.fallback;
        }
        let max = (1u64 << self.bits) - 1;
        let value = (u64::from(word) >> self.shift) & max;
        (value * 255 / max) as u8
    }
}

/// Channel masks for an uncompressed surface, in RGBA order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelMasks {
    pub r: ChannelMask,
    pub g: ChannelMask,
    pub b: ChannelMask,
    pub a: ChannelMask,
}

impl PixelMasks {
    /// Build from raw masks.
    pub fn new(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            r: ChannelMask::color(r),
            g: ChannelMask::color(g),
            b: ChannelMask::color(b),
            a: ChannelMask::alpha(a),
        }
    }

    /// Build from a header pixel format.
    pub fn from_pixel_format(pf: &DdsPixelFormat) -> Self {
        Self::new(pf.r_bit_mask, pf.g_bit_mask, pf.b_bit_mask, pf.a_bit_mask)
    }

    /// Unpack one 32-bit word to RGBA8.
    #[inline]
    pub fn unpack(&self, word: u32) -> [u8; 4] {
        [
            self.r.extract(word),
            self.g.extract(word),
            self.b.extract(word),
            self.a.extract(word),
        ]
    }
}

/// Read `width * height` little-endian words into `buffer`, row-major.
pub(crate) fn decode_surface(
    reader: &mut BinaryReader<'_>,
    masks: &PixelMasks,
    width: u32,
    height: u32,
    buffer: &mut PixelBuffer,
) -> Result<()> {
    for y in 0..height as usize {
        for x in 0..width as usize {
            let word = reader.read_u32()?;
            buffer.put(x, y, masks.unpack(word));
        }
    }
    Ok(())
}
