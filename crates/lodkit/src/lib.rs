//! Lodkit - DDS texture decoding and LOD billboard atlas tooling.
//!
//! This crate provides a unified interface to the lodkit crates.
//!
//! # Crates
//!
//! - [`lodkit_common`] - Common utilities (binary reading)
//! - [`lodkit_dds`] - DDS decoding (BC1/BC2/BC3 and masked 32-bit RGBA)
//! - [`lodkit_atlas`] - Atlas tile UV mapping and LOD candidate export
//!
//! # Example
//!
//! ```no_run
//! use lodkit::prelude::*;
//!
//! // Decode an atlas texture
//! let texture = decode_file("lod_atlas.dds")?;
//! println!("{}x{}", texture.width(), texture.height());
//!
//! // Map a prop to its tile and save the candidates
//! let mut row = MappingRow::seed("prop_tree_oak_01");
//! row.apply_preset();
//! let candidates = generate_candidates(AtlasGrid::new(4, 4), SplitMode::default(), &[row]);
//! candidates.save("lod_candidates.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use lodkit_atlas as atlas;
pub use lodkit_common as common;
pub use lodkit_dds as dds;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use lodkit_atlas::{
        find_preset, generate_candidates, load_archetype_names_dir, load_mapping, load_prop_names_file, map_tile,
        save_mapping, AtlasGrid, LodCandidate, LodCandidateMap, MappingRow, SplitMode, TileUvs,
    };
    pub use lodkit_common::BinaryReader;
    pub use lodkit_dds::{decode, decode_file, DdsFile, Texture};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
