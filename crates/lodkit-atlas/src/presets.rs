//! Known vegetation props and their billboard anchor values.
//!
//! `texture_origin` is the horizontal anchor of the trunk inside the sprite
//! and `plane_z` the relative height of the top-view plane.

/// Anchor values for one known prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropPreset {
    pub name: &'static str,
    pub texture_origin: f64,
    pub plane_z: f64,
}

const fn preset(name: &'static str, texture_origin: f64, plane_z: f64) -> PropPreset {
    PropPreset {
        name,
        texture_origin,
        plane_z,
    }
}

static PRESETS: &[PropPreset] = &[
    preset("prop_bush_lrg_04b", 0.375, 0.46875),
    preset("prop_bush_lrg_04c", 0.38157894736, 0.453125),
    preset("prop_bush_lrg_04d", 0.38970588235, 0.484375),
    preset("prop_palm_fan_02_b", 0.515625, 0.13125),
    preset("prop_palm_fan_03_c", 0.5, 0.08854166666),
    preset("prop_palm_fan_03_d", 0.484375, 0.08173076923),
    preset("prop_palm_fan_04_b", 0.484375, 0.20625),
    preset("prop_palm_fan_04_c", 0.5, 0.140625),
    preset("prop_palm_fan_04_d", 0.421875, 0.12019230769),
    preset("prop_palm_huge_01a", 0.484375, 0.05092592592),
    preset("prop_palm_huge_01b", 0.4765625, 0.04166666666),
    preset("prop_palm_med_01b", 0.515625, 0.17613636363),
    preset("prop_palm_med_01c", 0.515625, 0.16666666666),
    preset("prop_palm_med_01d", 0.5, 0.11057692307),
    preset("prop_rus_olive", 0.484375, 0.546875),
    preset("prop_s_pine_dead_01", 0.40625, 0.4875),
    preset("prop_tree_birch_01", 0.546875, 0.6484375),
    preset("prop_tree_birch_02", 0.421875, 0.4765625),
    preset("prop_tree_birch_04", 0.5625, 0.3515625),
    preset("prop_tree_cedar_02", 0.5078125, 0.40104166666),
    preset("prop_tree_cedar_03", 0.5234375, 0.46875),
    preset("prop_tree_cedar_04", 0.484375, 0.34375),
    preset("prop_tree_cedar_s_01", 0.484375, 0.66875),
    preset("prop_tree_cedar_s_04", 0.5, 0.67307692307),
    preset("prop_tree_cypress_01", 0.5, 0.66666666666),
    preset("prop_tree_eng_oak_01", 0.5, 0.375),
    preset("prop_tree_eucalip_01", 0.5, 0.28125),
    preset("prop_tree_jacada_01", 0.484375, 0.421875),
    preset("prop_tree_jacada_02", 0.515625, 0.34375),
    preset("prop_tree_lficus_02", 0.4453125, 0.359375),
    preset("prop_tree_lficus_03", 0.46875, 0.21875),
    preset("prop_tree_lficus_05", 0.46875, 0.203125),
    preset("prop_tree_lficus_06", 0.453125, 0.25),
    preset("prop_tree_oak_01", 0.46875, 0.453125),
    preset("prop_tree_olive_01", 0.5, 0.375),
    preset("prop_tree_pine_01", 0.515625, 0.50625),
    preset("prop_tree_pine_02", 0.546875, 0.63125),
    preset("prop_w_r_cedar_01", 0.515625, 0.67708333333),
    preset("prop_w_r_cedar_dead", 0.59375, 0.425),
    preset("test_tree_cedar_trunk_001", 0.5234375, 0.54807692307),
    preset("test_tree_forest_trunk_01", 0.515625, 0.54807692307),
];

/// All known presets, sorted by name.
pub fn presets() -> &'static [PropPreset] {
    PRESETS
}

/// Look up a preset by prop name, ignoring ASCII case.
pub fn find_preset(name: &str) -> Option<&'static PropPreset> {
    let name = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
