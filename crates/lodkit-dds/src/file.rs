//! DDS container parsing and decode dispatch.

use std::fs;
use std::path::Path;

use lodkit_common::BinaryReader;
use tracing::debug;

use crate::bc;
use crate::header::{DdsHeader, SurfaceKind};
use crate::masked::{self, PixelMasks};
use crate::texture::{rgba_len, PixelBuffer, Texture};
use crate::{Error, Result, DDS_MAGIC};

/// A parsed DDS container: the header plus the bytes that follow it.
#[derive(Debug, Clone)]
pub struct DdsFile<'a> {
    header: DdsHeader,
    payload: &'a [u8],
}

impl<'a> DdsFile<'a> {
    /// Check the magic and read the 124-byte header.
    ///
    /// Fails with [`Error::InvalidMagic`] before touching any header field when
    /// the data does not start with `"DDS "`.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        reader.expect_magic(DDS_MAGIC)?;

        let header: DdsHeader = reader.read_struct()?;

        Ok(Self {
            header,
            payload: reader.remaining_bytes(),
        })
    }

    /// The parsed header.
    pub fn header(&self) -> &DdsHeader {
        &self.header
    }

    /// Pixel data following the header.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Decode the top-level surface to RGBA8.
    pub fn decode(&self) -> Result<Texture> {
        let header = self.header;
        let pf = header.pixel_format;
        let (width, height) = (header.width, header.height);

        let kind = header.surface_kind().ok_or(Error::UnsupportedFormat {
            four_cc: pf.four_cc,
            flags: pf.flags,
            rgb_bit_count: pf.rgb_bit_count,
        })?;

        let len = rgba_len(width, height).ok_or_else(|| {
            Error::InvalidHeader(format!("cannot allocate a {}x{} texture", width, height))
        })?;

        // Reject short payloads before allocating the output.
        let needed = header
            .surface_size()
            .ok_or_else(|| Error::InvalidHeader(format!("{}x{} surface is too large", width, height)))?;
        if self.payload.len() < needed {
            return Err(Error::Truncated {
                needed,
                available: self.payload.len(),
            });
        }

        debug!(width, height, format = %kind, "decoding DDS surface");

        let mut reader = BinaryReader::new(self.payload);
        let mut buffer = PixelBuffer::new(width, height, len);
        match kind {
            SurfaceKind::Block(format) => {
                bc::decode_surface(&mut reader, format, width, height, &mut buffer)?
            }
            SurfaceKind::Masked32 => {
                let masks = PixelMasks::from_pixel_format(&pf);
                masked::decode_surface(&mut reader, &masks, width, height, &mut buffer)?
            }
        }

        Ok(buffer.finish())
    }
}

/// Decode a DDS image held in memory.
pub fn decode(data: &[u8]) -> Result<Texture> {
    DdsFile::parse(data)?.decode()
}

/// Read and decode a DDS file from disk.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Texture> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "read DDS file");
    decode(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{DdsPixelFormat, FourCC};
    use byteorder::{LittleEndian, WriteBytesExt};

    const DDSD_CAPS_HEIGHT_WIDTH_PIXELFORMAT: u32 = 0x1 | 0x2 | 0x4 | 0x1000;

    struct Fixture {
        width: u32,
        height: u32,
        pf_flags: u32,
        four_cc: [u8; 4],
        rgb_bit_count: u32,
        masks: [u32; 4],
    }

    impl Fixture {
        fn compressed(four_cc: &[u8; 4], width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pf_flags: DdsPixelFormat::DDPF_FOURCC,
                four_cc: *four_cc,
                rgb_bit_count: 0,
                masks: [0; 4],
            }
        }

        fn rgba32(width: u32, height: u32, masks: [u32; 4]) -> Self {
            Self {
                width,
                height,
                pf_flags: DdsPixelFormat::DDPF_RGB | DdsPixelFormat::DDPF_ALPHAPIXELS,
                four_cc: [0; 4],
                rgb_bit_count: 32,
                masks,
            }
        }

        fn build(&self, payload: &[u8]) -> Vec<u8> {
            let mut out = Vec::new();
            out.extend_from_slice(DDS_MAGIC);
            out.write_u32::<LittleEndian>(DdsHeader::SIZE).unwrap();
            out.write_u32::<LittleEndian>(DDSD_CAPS_HEIGHT_WIDTH_PIXELFORMAT).unwrap();
            out.write_u32::<LittleEndian>(self.height).unwrap();
            out.write_u32::<LittleEndian>(self.width).unwrap();
            out.write_u32::<LittleEndian>(0).unwrap(); // pitch or linear size
            out.write_u32::<LittleEndian>(0).unwrap(); // depth
            out.write_u32::<LittleEndian>(1).unwrap(); // mipmap count
            out.extend_from_slice(&[0u8; 44]);
            out.write_u32::<LittleEndian>(32).unwrap();
            out.write_u32::<LittleEndian>(self.pf_flags).unwrap();
            out.extend_from_slice(&self.four_cc);
            out.write_u32::<LittleEndian>(self.rgb_bit_count).unwrap();
            for mask in self.masks {
                out.write_u32::<LittleEndian>(mask).unwrap();
            }
            out.write_u32::<LittleEndian>(0x1000).unwrap(); // caps
            out.extend_from_slice(&[0u8; 16]);
            assert_eq!(out.len(), 4 + DdsHeader::SIZE as usize);
            out.extend_from_slice(payload);
            out
        }
    }

    const RED_BLUE_GRADIENT: [u8; 8] = [0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4];

    #[test]
    fn test_parse_header_fields() {
        let data = Fixture::compressed(b"DXT1", 16, 8).build(&[]);
        let file = DdsFile::parse(&data).unwrap();
        let header = file.header();

        assert_eq!({ header.width }, 16);
        assert_eq!({ header.height }, 8);
        assert_eq!({ header.pixel_format.four_cc }, FourCC::DXT1);
        assert_eq!(header.surface_size(), Some(4 * 2 * 8));
        assert!(file.payload().is_empty());
    }

    #[test]
    fn test_declared_sizes_are_not_validated() {
        let mut data = Fixture::compressed(b"DXT1", 4, 4).build(&RED_BLUE_GRADIENT);
        data[4..8].copy_from_slice(&999u32.to_le_bytes());
        data[76..80].copy_from_slice(&7u32.to_le_bytes());

        let texture = decode(&data).unwrap();
        assert_eq!(texture.pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_bad_magic() {
        let mut data = Fixture::compressed(b"DXT1", 4, 4).build(&RED_BLUE_GRADIENT);
        data[3] = b'X';
        assert!(matches!(decode(&data), Err(Error::InvalidMagic(_))));

        // Too short to even hold the magic.
        assert!(matches!(decode(b"DD"), Err(Error::InvalidMagic(_))));
        assert!(matches!(decode(&[]), Err(Error::InvalidMagic(_))));
    }

    #[test]
    fn test_truncated_header() {
        let data = Fixture::compressed(b"DXT1", 4, 4).build(&[]);
        assert!(matches!(
            DdsFile::parse(&data[..64]),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn test_golden_dxt1_image() {
        let data = Fixture::compressed(b"DXT1", 4, 4).build(&RED_BLUE_GRADIENT);
        let texture = decode(&data).unwrap();

        let row: Vec<u8> = [
            [255, 0, 0, 255],
            [0, 0, 255, 255],
            [170, 0, 85, 255],
            [85, 0, 170, 255],
        ]
        .concat();
        let golden = row.repeat(4);

        assert_eq!(texture.width(), 4);
        assert_eq!(texture.height(), 4);
        assert_eq!(texture.pixels(), golden.as_slice());
    }

    #[test]
    fn test_edge_texels_are_dropped() {
        // 5x5 needs 2x2 blocks; each block is a solid colour.
        let solid = |c: u16| {
            let mut block = Vec::new();
            block.write_u16::<LittleEndian>(c).unwrap();
            block.write_u16::<LittleEndian>(c).unwrap();
            block.write_u32::<LittleEndian>(0).unwrap();
            block
        };
        let payload = [solid(0xF800), solid(0x07E0), solid(0x001F), solid(0xFFFF)].concat();
        let data = Fixture::compressed(b"DXT1", 5, 5).build(&payload);
        let texture = decode(&data).unwrap();

        assert_eq!(texture.pixels().len(), 5 * 5 * 4);
        assert_eq!(texture.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(texture.pixel(4, 0), Some([0, 255, 0, 255]));
        assert_eq!(texture.pixel(0, 4), Some([0, 0, 255, 255]));
        assert_eq!(texture.pixel(4, 4), Some([255, 255, 255, 255]));
        // Block (1, 0) must not wrap into the next row.
        assert_eq!(texture.pixel(0, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_truncated_payload() {
        let data = Fixture::compressed(b"DXT5", 8, 8).build(&[0u8; 48]);
        match decode(&data) {
            Err(Error::Truncated { needed, available }) => {
                assert_eq!(needed, 64);
                assert_eq!(available, 48);
            }
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_masked_payload() {
        // 3x3 at 4 bytes per pixel, one byte short.
        let masks = [0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000];
        let data = Fixture::rgba32(3, 3, masks).build(&[0u8; 35]);
        match decode(&data) {
            Err(Error::Truncated { needed, available }) => {
                assert_eq!(needed, 36);
                assert_eq!(available, 35);
            }
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_dxt3_and_dxt5_dispatch() {
        let mut bc2 = vec![0xFF; 8];
        bc2.extend_from_slice(&RED_BLUE_GRADIENT);
        let texture = decode(&Fixture::compressed(b"DXT3", 4, 4).build(&bc2)).unwrap();
        assert_eq!(texture.pixel(1, 0), Some([0, 0, 255, 255]));

        let mut bc3 = vec![128, 0, 0, 0, 0, 0, 0, 0];
        bc3.extend_from_slice(&RED_BLUE_GRADIENT);
        let texture = decode(&Fixture::compressed(b"DXT5", 4, 4).build(&bc3)).unwrap();
        assert_eq!(texture.pixel(0, 3), Some([255, 0, 0, 128]));
    }

    #[test]
    fn test_unsupported_four_cc() {
        let data = Fixture::compressed(b"DX10", 4, 4).build(&[0u8; 64]);
        match decode(&data) {
            Err(Error::UnsupportedFormat { four_cc, .. }) => assert_eq!(four_cc, FourCC::DX10),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_uncompressed_24bpp_is_unsupported() {
        let mut fixture = Fixture::rgba32(2, 2, [0xFF0000, 0xFF00, 0xFF, 0]);
        fixture.rgb_bit_count = 24;
        let data = fixture.build(&[0u8; 12]);
        assert!(matches!(decode(&data), Err(Error::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_zero_sized_surface() {
        let data = Fixture::compressed(b"DXT1", 0, 4).build(&[]);
        assert!(matches!(decode(&data), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_rgba32_roundtrip() {
        let source: Vec<u8> = (0..8 * 8 * 4).map(|i| (i * 37 % 251) as u8).collect();
        let masks = [0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000];
        let data = Fixture::rgba32(8, 8, masks).build(&source);

        let texture = decode(&data).unwrap();
        assert_eq!(texture.pixels(), source.as_slice());
    }

    #[test]
    fn test_bgrx32_without_alpha_mask_is_opaque() {
        let masks = [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0];
        let mut payload = Vec::new();
        payload.write_u32::<LittleEndian>(0x0012_3456).unwrap();
        let data = Fixture::rgba32(1, 1, masks).build(&payload);

        let texture = decode(&data).unwrap();
        assert_eq!(texture.pixel(0, 0), Some([0x12, 0x34, 0x56, 255]));
    }

    #[test]
    fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.dds");
        std::fs::write(&path, Fixture::compressed(b"DXT1", 4, 4).build(&RED_BLUE_GRADIENT)).unwrap();

        let texture = decode_file(&path).unwrap();
        assert_eq!(texture.pixel(3, 3), Some([85, 0, 170, 255]));

        assert!(matches!(
            decode_file(dir.path().join("missing.dds")),
            Err(Error::Io(_))
        ));
    }
}
