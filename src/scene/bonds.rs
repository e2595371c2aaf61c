use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::scene::segment::LineSegment;
use crate::state::ViewMode;
use crate::structure::{Bond, BondType, StructureData};
use crate::style::Color;
use crate::util::memo::{ByIdentity, Memo};

/// Bond line color.
pub const BOND_COLOR: Color = Color::rgb(0.69, 0.69, 0.69);
/// Width of a single bond in pixels.
pub const BOND_BASE_WIDTH: f32 = 1.5;

/// Width multiplier for a bond's order. Aromatic bonds sit between single
/// and double.
#[must_use]
pub fn order_weight(bond: &Bond) -> f32 {
    match bond.bond_type {
        BondType::Aromatic => 1.5,
        _ => f32::from(bond.order.clamp(1, 3)),
    }
}

type BondKey = (ByIdentity<StructureData>, ViewMode, Vec<usize>);

/// Turns bond records into solid segments between atom centers.
#[derive(Debug, Default)]
pub struct BondBuilder {
    memo: Memo<BondKey, Vec<LineSegment>>,
}

impl BondBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments for `structure`'s bonds. Empty in space-filling mode.
    pub fn segments(
        &mut self,
        structure: &Arc<StructureData>,
        mode: ViewMode,
        hidden: &[usize],
    ) -> &[LineSegment] {
        let key = (ByIdentity(Arc::clone(structure)), mode, hidden.to_vec());
        self.memo.get_or_update(key, |(structure, mode, hidden), out| {
            out.clear();
            if *mode != ViewMode::SpaceFilling {
                build_bond_segments(&structure.0, hidden, out);
            }
        })
    }

    /// How many times segments were rebuilt.
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.memo.recomputes()
    }
}

/// Append one segment per drawable bond to `out`. Bonds touching a hidden
/// or missing atom are skipped.
pub fn build_bond_segments(
    structure: &StructureData,
    hidden: &[usize],
    out: &mut Vec<LineSegment>,
) {
    let Some(bonds) = structure.bonds.as_deref() else {
        return;
    };
    let hidden: FxHashSet<usize> = hidden.iter().copied().collect();
    out.reserve(bonds.len());

    let mut dangling = 0usize;
    for bond in bonds {
        if hidden.contains(&bond.atom1_index) || hidden.contains(&bond.atom2_index) {
            continue;
        }
        let (Some(a), Some(b)) = (
            structure.atom(bond.atom1_index),
            structure.atom(bond.atom2_index),
        ) else {
            dangling += 1;
            continue;
        };
        out.push(LineSegment {
            start: a.position(),
            end: b.position(),
            color: BOND_COLOR,
            width: BOND_BASE_WIDTH * order_weight(bond),
            dashed: false,
        });
    }
    if dangling > 0 {
        log::warn!("skipped {dangling} bonds with missing atoms");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bond, carbon_chain, structure};

    fn bonded() -> Arc<StructureData> {
        let mut s = structure("s", carbon_chain(4));
        let mut aromatic = bond(2, 3);
        aromatic.bond_type = BondType::Aromatic;
        let mut double = bond(1, 2);
        double.order = 2;
        s.bonds = Some(vec![bond(0, 1), double, aromatic, bond(3, 17)]);
        Arc::new(s)
    }

    #[test]
    fn one_segment_per_resolvable_bond() {
        let s = bonded();
        let mut b = BondBuilder::new();
        let out = b.segments(&s, ViewMode::BallAndStick, &[]);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|seg| !seg.dashed));
        assert_eq!(out[0].width, 1.5);
        assert_eq!(out[1].width, 3.0);
        assert_eq!(out[2].width, 2.25);
    }

    #[test]
    fn hidden_endpoints_drop_the_bond() {
        let s = bonded();
        let mut b = BondBuilder::new();
        let out = b.segments(&s, ViewMode::Sticks, &[1]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start.x, 2.0);
    }

    #[test]
    fn space_filling_draws_no_bonds() {
        let s = bonded();
        let mut b = BondBuilder::new();
        assert!(b.segments(&s, ViewMode::SpaceFilling, &[]).is_empty());
        assert_eq!(b.segments(&s, ViewMode::Lines, &[]).len(), 3);
        assert_eq!(b.rebuilds(), 2);
    }

    #[test]
    fn no_bond_list_is_empty() {
        let s = Arc::new(structure("s", carbon_chain(2)));
        let mut b = BondBuilder::new();
        assert!(b.segments(&s, ViewMode::BallAndStick, &[]).is_empty());
    }
}
