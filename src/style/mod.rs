//! Per-atom appearance policy.
//!
//! Pure functions over static tables: given an atom and the active
//! [`ViewMode`] / [`ColorScheme`], produce a radius and a color. Unknown
//! elements and schemes never fail; they fall through to a default arm.

/// RGBA colors and CSS color parsing.
pub mod color;
pub mod element;
pub mod palette;

pub use color::Color;
use rustc_hash::FxHashSet;

use crate::state::{ColorScheme, ViewMode};
use crate::structure::Atom;

/// Radius used by [`ViewMode::Sticks`].
pub const STICKS_RADIUS: f32 = 0.15;
/// Radius used by [`ViewMode::Lines`].
pub const LINES_RADIUS: f32 = 0.1;
/// Fraction of the covalent radius used by [`ViewMode::BallAndStick`].
pub const BALL_AND_STICK_SCALE: f32 = 0.3;
/// Fraction of the covalent radius used by every other mode.
pub const DEFAULT_COVALENT_SCALE: f32 = 0.5;

/// Color of `atom` under `scheme`. Atoms whose index is in `hidden` are
/// transparent whatever the scheme.
#[must_use]
pub fn color_of(
    atom: &Atom,
    scheme: ColorScheme,
    hidden: &FxHashSet<usize>,
) -> Color {
    if hidden.contains(&atom.index) {
        return Color::TRANSPARENT;
    }
    match scheme {
        ColorScheme::Chain => palette::chain_color(&atom.chain_id),
        ColorScheme::Residue => palette::residue_color(&atom.res_name),
        ColorScheme::Element | ColorScheme::Custom | ColorScheme::Other => {
            element::element_color(&atom.element)
        }
    }
}

/// Drawn sphere radius for `element` in `mode`. Always positive.
#[must_use]
pub fn radius_of(element: &str, mode: ViewMode) -> f32 {
    match mode {
        ViewMode::SpaceFilling => element::vdw_radius(element),
        ViewMode::BallAndStick => {
            element::covalent_radius(element) * BALL_AND_STICK_SCALE
        }
        ViewMode::Sticks => STICKS_RADIUS,
        ViewMode::Lines => LINES_RADIUS,
        ViewMode::Ribbon | ViewMode::Other => {
            element::covalent_radius(element) * DEFAULT_COVALENT_SCALE
        }
    }
}
