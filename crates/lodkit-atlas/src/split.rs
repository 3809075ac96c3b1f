//! Front/top split modes.

use std::fmt;

/// Labels of the built-in split modes, in menu order.
pub const SPLIT_LABELS: [&str; 6] = [
    "50% front / 50% top",
    "75% front / 25% top (vegetation_lod)",
    "100% front / 0% top",
    "25% front / 75% top",
    "0% front / 100% top",
    FULL_OVERLAP_LABEL,
];

/// Label marker that selects full-overlap mode.
const FULL_OVERLAP_LABEL: &str = "100% top / 100% front";

/// Front ratios of the preset table.
pub const PRESET_RATIOS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// How a tile is shared between the front and top sprites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitMode {
    front_ratio: f64,
    full_overlap: bool,
}

impl SplitMode {
    /// Build a split mode. The ratio is clamped to `[0, 1]`; NaN becomes 0.5.
    pub fn new(front_ratio: f64, full_overlap: bool) -> Self {
        let front_ratio = if front_ratio.is_nan() {
            0.5
        } else {
            front_ratio.clamp(0.0, 1.0)
        };
        Self {
            front_ratio,
            full_overlap,
        }
    }

    /// Both sprites cover the whole tile.
    pub fn full_overlap() -> Self {
        Self::new(1.0, true)
    }

    /// Fraction of the tile height used by the front sprite.
    pub fn front_ratio(&self) -> f64 {
        self.front_ratio
    }

    /// Whether front and top sprites both cover the whole tile.
    pub fn is_full_overlap(&self) -> bool {
        self.full_overlap
    }

    /// Split mode of the built-in menu entry at `index`; unknown indices give
    /// an even split.
    pub fn from_preset_index(index: usize) -> Self {
        SPLIT_LABELS
            .get(index)
            .map(|label| Self::from_label(label))
            .unwrap_or_default()
    }

    /// Parse a free-text label such as `"75% front / 25% top"`.
    ///
    /// The number before the first `%` is the front percentage, clamped to
    /// `[0, 100]`. A label containing `"100% top / 100% front"` (any case)
    /// selects full overlap. Labels without a readable percentage fall back to
    /// an even split.
    pub fn from_label(label: &str) -> Self {
        let full_overlap = label
            .to_ascii_lowercase()
            .contains(FULL_OVERLAP_LABEL);

        let ratio = parse_leading_percent(label)
            .map(|percent| percent / 100.0)
            .unwrap_or(0.5);

        Self::new(ratio, full_overlap)
    }
}

impl Default for SplitMode {
    fn default() -> Self {
        Self::new(0.5, false)
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.full_overlap {
            return f.write_str(FULL_OVERLAP_LABEL);
        }
        let front = self.front_ratio * 100.0;
        write!(
            f,
            "{}% front / {}% top",
            format_percent(front),
            format_percent(100.0 - front)
        )
    }
}

/// Two decimals at most, without trailing zeros.
fn format_percent(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// The number before the first `%`, if there is one and it parses.
fn parse_leading_percent(label: &str) -> Option<f64> {
    let percent_index = label.find('%')?;
    if percent_index == 0 {
        return None;
    }
    label[..percent_index]
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
}
