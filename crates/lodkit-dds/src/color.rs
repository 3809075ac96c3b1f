//! RGB565 packing helpers.

/// Expand a packed RGB565 value to 8-bit channels, rounding to nearest.
#[inline]
pub fn rgb565_to_rgb888(value: u16) -> [u8; 3] {
    let r = u32::from((value >> 11) & 0x1F);
    let g = u32::from((value >> 5) & 0x3F);
    let b = u32::from(value & 0x1F);

    [
        ((r * 255 + 15) / 31) as u8,
        ((g * 255 + 31) / 63) as u8,
        ((b * 255 + 15) / 31) as u8,
    ]
}

/// Quantize 8-bit channels back to RGB565, rounding to nearest.
///
/// Inverse of [`rgb565_to_rgb888`] for every 16-bit input.
#[inline]
pub fn rgb888_to_rgb565(rgb: [u8; 3]) -> u16 {
    let r = (u32::from(rgb[0]) * 31 + 127) / 255;
    let g = (u32::from(rgb[1]) * 63 + 127) / 255;
    let b = (u32::from(rgb[2]) * 31 + 127) / 255;
    ((r << 11) | (g << 5) | b) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(rgb565_to_rgb888(0x0000), [0, 0, 0]);
        assert_eq!(rgb565_to_rgb888(0xFFFF), [255, 255, 255]);
        assert_eq!(rgb565_to_rgb888(0xF800), [255, 0, 0]);
        assert_eq!(rgb565_to_rgb888(0x07E0), [0, 255, 0]);
        assert_eq!(rgb565_to_rgb888(0x001F), [0, 0, 255]);
    }

    #[test]
    fn test_rounds_rather_than_truncates() {
        // r5 = 1: 255 / 31 = 8.23
        assert_eq!(rgb565_to_rgb888(1 << 11)[0], 8);
        // r5 = 16: 16 * 255 / 31 = 131.6
        assert_eq!(rgb565_to_rgb888(16 << 11)[0], 132);
        // g6 = 32: 32 * 255 / 63 = 129.5
        assert_eq!(rgb565_to_rgb888(32 << 5)[1], 130);
    }

    #[test]
    fn test_roundtrip_all_values() {
        for value in 0..=u16::MAX {
            assert_eq!(rgb888_to_rgb565(rgb565_to_rgb888(value)), value, "value 0x{:04X}", value);
        }
    }
}
