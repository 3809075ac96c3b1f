//! Error types for DDS decoding.

use thiserror::Error;

use crate::header::FourCC;

/// Errors that can occur when decoding DDS files.
///
/// Every variant is fatal to the decode call that raised it; no partially
/// decoded texture is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The buffer does not start with `"DDS "`.
    #[error("not a DDS file: expected magic 'DDS ', got {0:?}")]
    InvalidMagic(Vec<u8>),

    /// Recognized container with a pixel layout this decoder does not handle.
    #[error("unsupported DDS format: {four_cc} (flags 0x{flags:08X}, {rgb_bit_count} bpp)")]
    UnsupportedFormat {
        four_cc: FourCC,
        flags: u32,
        rgb_bit_count: u32,
    },

    /// The stream ended before an expected read completed.
    #[error("truncated DDS data: needed {needed} bytes but only {available} available")]
    Truncated { needed: usize, available: usize },

    /// Header values that cannot describe a texture.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),
}

impl From<lodkit_common::Error> for Error {
    fn from(err: lodkit_common::Error) -> Self {
        match err {
            lodkit_common::Error::UnexpectedEof { needed, available } => {
                Self::Truncated { needed, available }
            }
            lodkit_common::Error::InvalidMagic { actual, .. } => Self::InvalidMagic(actual),
        }
    }
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
