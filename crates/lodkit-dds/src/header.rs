//! DDS header structures.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::bc::BlockFormat;

/// DDS file header.
///
/// Read positionally after the magic. The declared `size` fields are kept
/// for inspection but never checked against the bytes actually consumed.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Decoder this header dispatches to, if any.
    pub fn surface_kind(&self) -> Option<SurfaceKind> {
        let pf = self.pixel_format;
        if let Some(format) = BlockFormat::from_four_cc(pf.four_cc) {
            return Some(SurfaceKind::Block(format));
        }
        if pf.flags & DdsPixelFormat::DDPF_RGB != 0 && pf.rgb_bit_count == 32 {
            return Some(SurfaceKind::Masked32);
        }
        None
    }

    /// Size in bytes of the top-level surface for the selected decoder.
    ///
    /// Returns `None` for unsupported formats or when the size overflows.
    pub fn surface_size(&self) -> Option<usize> {
        let width = self.width as usize;
        let height = self.height as usize;
        match self.surface_kind()? {
            SurfaceKind::Block(format) => block_count(width, height)?.checked_mul(format.block_size()),
            SurfaceKind::Masked32 => width.checked_mul(height)?.checked_mul(4),
        }
    }
}

/// The decoding path a header selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// One of the BC1/BC2/BC3 block formats.
    Block(BlockFormat),
    /// Uncompressed 32 bits per pixel with per-channel masks.
    Masked32,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(format) => write!(f, "{}", format),
            Self::Masked32 => f.write_str("uncompressed 32bpp (masked)"),
        }
    }
}

/// Number of 4x4 blocks covering a `width` x `height` surface.
pub(crate) fn block_count(width: usize, height: usize) -> Option<usize> {
    width.div_ceil(4).checked_mul(height.div_ceil(4))
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Alpha mask is valid.
    pub const DDPF_ALPHAPIXELS: u32 = 0x1;
    /// `four_cc` holds a compression code.
    pub const DDPF_FOURCC: u32 = 0x4;
    /// Uncompressed RGB data; the masks are valid.
    pub const DDPF_RGB: u32 = 0x40;
}

/// Four-character code for compression type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header (not supported).
    pub const DX10: Self = Self(*b"DX10");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC(\"{}\")", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_sizes() {
        assert_eq!(std::mem::size_of::<DdsHeader>(), DdsHeader::SIZE as usize);
        assert_eq!(std::mem::size_of::<DdsPixelFormat>(), 32);
    }

    #[test]
    fn test_four_cc_display() {
        assert_eq!(FourCC::DXT5.to_string(), "DXT5");
        assert_eq!(FourCC([0, b'A', b'B', b'C']).to_string(), "\\x00ABC");
    }

    #[test]
    fn test_block_count_rounds_up() {
        assert_eq!(block_count(4, 4), Some(1));
        assert_eq!(block_count(5, 5), Some(4));
        assert_eq!(block_count(1, 9), Some(3));
    }
}
