//! Common utilities for lodkit.
//!
//! This crate provides the low-level pieces shared by the lodkit crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`Error`] - End-of-buffer and magic mismatch errors raised by the reader

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;
