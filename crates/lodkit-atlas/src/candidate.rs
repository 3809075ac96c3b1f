//! LOD candidates keyed by prop name.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::grid::{TileUvs, Uv};
use crate::Result;

/// Billboard parameters of one prop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LodCandidate {
    pub texture_origin: f64,
    pub plane_z: f64,
    pub uv_front_min: Uv,
    pub uv_front_max: Uv,
    pub uv_top_min: Uv,
    pub uv_top_max: Uv,
}

impl LodCandidate {
    /// Combine anchor values with the UV rectangles of a tile.
    pub fn new(texture_origin: f64, plane_z: f64, uvs: TileUvs) -> Self {
        Self {
            texture_origin,
            plane_z,
            uv_front_min: uvs.front_min,
            uv_front_max: uvs.front_max,
            uv_top_min: uvs.top_min,
            uv_top_max: uvs.top_max,
        }
    }
}

/// Candidates keyed case-insensitively by prop name, in insertion order.
///
/// Re-inserting a name (in any case) replaces the candidate but keeps the
/// spelling and position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LodCandidateMap {
    entries: Vec<(String, LodCandidate)>,
    index: HashMap<String, usize>,
}

fn fold_key(name: &str) -> String {
    name.to_lowercase()
}

impl LodCandidateMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a candidate, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, candidate: LodCandidate) -> Option<LodCandidate> {
        let name = name.into();
        let key = fold_key(&name);
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, candidate));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push((name, candidate));
        None
    }

    /// Look up a candidate, ignoring case.
    pub fn get(&self, name: &str) -> Option<&LodCandidate> {
        self.index.get(&fold_key(name)).map(|&i| &self.entries[i].1)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LodCandidate)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Serialize as indented JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON candidates document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the map to `path`, replacing any existing file.
    ///
    /// Missing parent directories are created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_json_string()?)?;
        debug!(path = %path.display(), count = self.len(), "saved LOD candidates");
        Ok(())
    }

    /// Read a candidates file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

impl Serialize for LodCandidateMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, candidate) in &self.entries {
            map.serialize_entry(name, candidate)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LodCandidateMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = LodCandidateMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of prop names to LOD candidates")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut map = LodCandidateMap::new();
                while let Some((name, candidate)) = access.next_entry::<String, LodCandidate>()? {
                    map.insert(name, candidate);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
