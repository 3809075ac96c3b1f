//! Mapping table: which atlas tile each prop uses.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::candidate::{LodCandidate, LodCandidateMap};
use crate::grid::AtlasGrid;
use crate::presets::find_preset;
use crate::split::SplitMode;
use crate::Result;

const DEFAULT_ANCHOR: f64 = 0.5;

fn default_anchor() -> f64 {
    DEFAULT_ANCHOR
}

/// One row of the mapping table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRow {
    /// Prop (archetype) name. Rows with a blank name are ignored.
    pub prop_name: String,
    /// Tile row; clamped into the grid when generating.
    #[serde(default)]
    pub row: i64,
    /// Tile column; clamped into the grid when generating.
    #[serde(default)]
    pub col: i64,
    #[serde(default = "default_anchor")]
    pub texture_origin: f64,
    #[serde(default = "default_anchor")]
    pub plane_z: f64,
}

impl MappingRow {
    /// A fresh row for `prop_name`: tile (0, 0) and centred anchors.
    pub fn seed(prop_name: impl Into<String>) -> Self {
        Self {
            prop_name: prop_name.into(),
            row: 0,
            col: 0,
            texture_origin: DEFAULT_ANCHOR,
            plane_z: DEFAULT_ANCHOR,
        }
    }

    /// Overwrite the anchors from the preset table. Returns whether a preset matched.
    pub fn apply_preset(&mut self) -> bool {
        match find_preset(&self.prop_name) {
            Some(preset) => {
                self.texture_origin = preset.texture_origin;
                self.plane_z = preset.plane_z;
                true
            }
            None => false,
        }
    }
}

/// Clamp an anchor into `[0, 1]`, treating NaN as the default.
fn clamp_anchor(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_ANCHOR
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Build the candidate map for every row with a non-blank prop name.
///
/// Later rows replace earlier rows with the same name (ignoring case).
pub fn generate_candidates(grid: AtlasGrid, split: SplitMode, rows: &[MappingRow]) -> LodCandidateMap {
    let mut candidates = LodCandidateMap::new();

    for row in rows {
        let name = row.prop_name.trim();
        if name.is_empty() {
            continue;
        }

        let uvs = grid.map_tile(row.row, row.col, split);
        let candidate = LodCandidate::new(clamp_anchor(row.texture_origin), clamp_anchor(row.plane_z), uvs);
        if candidates.insert(name, candidate).is_some() {
            warn!(prop = name, "duplicate prop in mapping table, keeping the last row");
        }
    }

    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        split = %split,
        count = candidates.len(),
        "generated LOD candidates"
    );
    candidates
}

/// Read a mapping table (a JSON array of rows).
pub fn load_mapping<P: AsRef<Path>>(path: P) -> Result<Vec<MappingRow>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write a mapping table as indented JSON, creating parent directories.
pub fn save_mapping<P: AsRef<Path>>(path: P, rows: &[MappingRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_string_pretty(rows)?)?;
    Ok(())
}
