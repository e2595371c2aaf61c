//! Small fixed palettes for chain and residue coloring.
//!
//! Keys are hashed by summing their character codes, so the same chain or
//! residue name always lands on the same entry. Distinct keys can share a
//! color; with six entries that is expected.

use super::color::Color;

const CHAIN_PALETTE: [u32; 6] =
    [0x3B_82_F6, 0x10_B9_81, 0xF5_9E_0B, 0xEF_44_44, 0x8B_5C_F6, 0xEC_48_99];

const RESIDUE_PALETTE: [u32; 6] =
    [0x63_66_F1, 0x8B_5C_F6, 0xEC_48_99, 0xF4_3F_5E, 0xF9_73_16, 0xF5_9E_0B];

/// Sum of the key's character codes.
#[must_use]
pub fn char_code_sum(key: &str) -> u32 {
    key.chars().fold(0u32, |acc, c| acc.wrapping_add(u32::from(c)))
}

fn pick(palette: &[u32], key: &str) -> Color {
    let slot = char_code_sum(key) as usize % palette.len();
    Color::from_rgb_u32(palette[slot])
}

/// Palette color for a chain identifier.
#[must_use]
pub fn chain_color(chain_id: &str) -> Color {
    pick(&CHAIN_PALETTE, chain_id)
}

/// Palette color for a residue name.
#[must_use]
pub fn residue_color(res_name: &str) -> Color {
    pick(&RESIDUE_PALETTE, res_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_hash_selects_expected_slot() {
        // 'A' = 65, 65 % 6 = 5
        assert_eq!(chain_color("A").to_hex(), "#EC4899");
        // 'B' = 66, 66 % 6 = 0
        assert_eq!(chain_color("B").to_hex(), "#3B82F6");
    }

    #[test]
    fn same_key_same_color() {
        assert_eq!(residue_color("ALA"), residue_color("ALA"));
    }

    #[test]
    fn collisions_are_tolerated() {
        // 'A' (65) and 'G' (71) differ by six.
        assert_eq!(chain_color("A"), chain_color("G"));
        // Anagrams sum to the same code.
        assert_eq!(residue_color("ALA"), residue_color("LAA"));
    }

    #[test]
    fn empty_key_maps_to_first_entry() {
        assert_eq!(chain_color("").to_hex(), "#3B82F6");
    }
}
