//! Decoded RGBA8 texture.

/// A decoded texture: tightly packed RGBA8, row-major, top row first.
///
/// The pixel buffer always holds exactly `width * height * 4` bytes and both
/// dimensions are non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Bytes per RGBA8 pixel.
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wrap an existing RGBA8 buffer.
    ///
    /// Returns `None` if a dimension is zero or the buffer length does not
    /// match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = rgba_len(width, height)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + Self::BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Consume the texture, returning the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Length of an RGBA8 buffer for the given dimensions, if representable.
pub(crate) fn rgba_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(Texture::BYTES_PER_PIXEL)
}

/// Mutable RGBA8 buffer filled in by the decoders.
pub(crate) struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed buffer. Callers validate dimensions with [`rgba_len`] first.
    pub(crate) fn new(width: u32, height: u32, len: usize) -> Self {
        Self {
            width: width as usize,
            height: height as usize,
            pixels: vec![0u8; len],
        }
    }

    /// Write one pixel. Coordinates outside the image are dropped.
    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let offset = (y * self.width + x) * Texture::BYTES_PER_PIXEL;
            self.pixels[offset..offset + Texture::BYTES_PER_PIXEL].copy_from_slice(&rgba);
        }
    }

    pub(crate) fn finish(self) -> Texture {
        Texture {
            width: self.width as u32,
            height: self.height as u32,
            pixels: self.pixels,
        }
    }
}
