//! LOD billboard atlas mapping.
//!
//! Maps atlas tiles to the front and top UV rectangles of a billboard and
//! exports per-prop LOD candidates as JSON.
//!
//! An atlas is a grid of equally sized tiles. Each tile is split
//! vertically into a front view (upper part) and a top view (lower part),
//! or both views cover the whole tile when the split is a full overlap.
//!
//! # Example
//!
//! ```
//! use lodkit_atlas::{generate_candidates, AtlasGrid, MappingRow, SplitMode};
//!
//! let grid = AtlasGrid::new(2, 4);
//! let rows = vec![MappingRow::seed("prop_tree_oak_01")];
//! let candidates = generate_candidates(grid, SplitMode::default(), &rows);
//!
//! let oak = candidates.get("PROP_TREE_OAK_01").unwrap();
//! assert_eq!(oak.uv_front_max, [0.25, 0.25]);
//! ```

mod candidate;
mod error;
mod mapping;
mod props;

pub mod grid;
pub mod presets;
pub mod split;

pub use candidate::{LodCandidate, LodCandidateMap};
pub use error::{Error, Result};
pub use grid::{map_tile, AtlasGrid, TileUvs, Uv};
pub use mapping::{generate_candidates, load_mapping, save_mapping, MappingRow};
pub use presets::{find_preset, presets, PropPreset};
pub use props::{load_archetype_names, load_archetype_names_dir, load_prop_names, load_prop_names_file};
pub use split::{SplitMode, PRESET_RATIOS, SPLIT_LABELS};
