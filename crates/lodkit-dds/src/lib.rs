//! DDS texture decoding.
//!
//! Decodes the top-level surface of a DirectDraw Surface file into a flat
//! RGBA8 [`Texture`]. Supported layouts:
//!
//! - `DXT1` (BC1) with 1-bit punch-through alpha
//! - `DXT3` (BC2) with explicit 4-bit alpha
//! - `DXT5` (BC3) with interpolated alpha
//! - Uncompressed 32 bits per pixel with arbitrary channel masks
//!
//! Mipmaps below the top level, cube faces and the DX10 extended header are
//! not decoded.
//!
//! # Example
//!
//! ```no_run
//! use lodkit_dds::decode_file;
//!
//! let texture = decode_file("path/to/atlas.dds")?;
//! println!("{}x{}", texture.width(), texture.height());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod file;
mod header;
mod texture;

pub mod bc;
pub mod color;
pub mod masked;

pub use bc::BlockFormat;
pub use error::{Error, Result};
pub use file::{decode, decode_file, DdsFile};
pub use header::{DdsHeader, DdsPixelFormat, FourCC, SurfaceKind};
pub use texture::Texture;

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
