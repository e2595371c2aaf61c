//! Per-element lookup tables: CPK-style colors, van der Waals radii and
//! covalent radii. Every table has a default entry for unknown elements.

use super::color::Color;

/// Color used for elements missing from [`element_color`].
pub const DEFAULT_COLOR: u32 = 0xCC_CC_CC;
/// Van der Waals radius for unknown elements.
pub const DEFAULT_VDW_RADIUS: f32 = 1.70;
/// Covalent radius for unknown elements.
pub const DEFAULT_COVALENT_RADIUS: f32 = 0.76;

/// Canonical symbol casing: first letter upper, rest lower (`CL` -> `Cl`).
fn canonical(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Display color for an element symbol.
#[must_use]
pub fn element_color(symbol: &str) -> Color {
    let hex = match canonical(symbol).as_str() {
        "H" => 0xFF_FF_FF,
        "C" => 0x90_90_90,
        "N" => 0x30_50_F8,
        "O" => 0xFF_0D_0D,
        "F" => 0x90_E0_50,
        "P" => 0xFF_80_00,
        "S" => 0xFF_FF_30,
        "Cl" => 0x1F_F0_1F,
        "Br" => 0xA6_29_29,
        "I" => 0x94_00_94,
        "Fe" => 0xE0_66_33,
        "Mg" => 0x8A_FF_00,
        "Ca" => 0x3D_FF_00,
        "Mn" => 0x9C_7A_C7,
        "Zn" => 0xB3_B3_B3,
        _ => DEFAULT_COLOR,
    };
    Color::from_rgb_u32(hex)
}

/// Van der Waals radius in angstroms.
#[must_use]
pub fn vdw_radius(symbol: &str) -> f32 {
    match canonical(symbol).as_str() {
        "H" => 1.20,
        "C" => 1.70,
        "N" => 1.55,
        "O" => 1.52,
        "F" => 1.47,
        "P" | "S" => 1.80,
        "Cl" => 1.75,
        "Br" => 1.85,
        "I" => 1.98,
        _ => DEFAULT_VDW_RADIUS,
    }
}

/// Covalent radius in angstroms.
#[must_use]
pub fn covalent_radius(symbol: &str) -> f32 {
    match canonical(symbol).as_str() {
        "H" => 0.31,
        "C" => 0.76,
        "N" => 0.71,
        "O" => 0.66,
        "F" => 0.57,
        "P" => 1.07,
        "S" => 1.05,
        "Cl" => 1.02,
        "Br" => 1.20,
        "I" => 1.39,
        _ => DEFAULT_COVALENT_RADIUS,
    }
}
