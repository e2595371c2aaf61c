use std::sync::Arc;

use crate::scene::segment::LineSegment;
use crate::structure::{Interaction, InteractionKind, StructureData};
use crate::style::Color;
use crate::util::memo::{ByIdentity, Memo};

/// Line style for one interaction kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f32,
    /// Dashed or solid.
    pub dashed: bool,
}

impl OverlayStyle {
    /// Hydrogen bonds: blue, thin.
    pub const HYDROGEN_BOND: Self = Self {
        color: Color::rgb(0x33 as f32 / 255.0, 0x99 as f32 / 255.0, 1.0),
        width: 2.0,
        dashed: true,
    };
    /// Van der Waals contacts: amber, thin.
    pub const VDW_CONTACT: Self = Self {
        color: Color::rgb(0xF5 as f32 / 255.0, 0x9E as f32 / 255.0, 0x0B as f32 / 255.0),
        width: 2.0,
        dashed: true,
    };
    /// Salt bridges: red, thick.
    pub const SALT_BRIDGE: Self = Self {
        color: Color::rgb(0xEF as f32 / 255.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0),
        width: 3.0,
        dashed: true,
    };

    /// Style for a record of `kind`. Unrecognized kinds draw as vdW
    /// contacts.
    #[must_use]
    pub const fn for_kind(kind: InteractionKind) -> Self {
        match kind {
            InteractionKind::HydrogenBond => Self::HYDROGEN_BOND,
            InteractionKind::SaltBridge => Self::SALT_BRIDGE,
            InteractionKind::VdwContact | InteractionKind::Unknown => {
                Self::VDW_CONTACT
            }
        }
    }
}

/// One drawable interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySegment {
    /// Stable element id, `interaction-<n>`, where `n` counts every record
    /// visited in draw order, drawn or not.
    pub element_id: String,
    /// Kind of the underlying record.
    pub kind: InteractionKind,
    /// Accessible name, e.g. `Hydrogen bond between ALA12 and GLU45`.
    pub label: String,
    /// Geometry and style.
    pub line: LineSegment,
}

type OverlayKey = (ByIdentity<StructureData>, Vec<InteractionKind>);

/// Turns interaction records into styled segments between atom centers.
///
/// Active kinds are visited in the order given; records keep their stored
/// order within a kind. Records that name a missing atom are skipped.
#[derive(Debug, Default)]
pub struct OverlayBuilder {
    memo: Memo<OverlayKey, Vec<OverlaySegment>>,
}

impl OverlayBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments for the active kinds of `structure`.
    pub fn segments(
        &mut self,
        structure: &Arc<StructureData>,
        active: &[InteractionKind],
    ) -> &[OverlaySegment] {
        let key = (ByIdentity(Arc::clone(structure)), active.to_vec());
        self.memo.get_or_update(key, |(structure, active), out| {
            build_segments(&structure.0, active, out);
        })
    }

    /// How many times segments were rebuilt.
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.memo.recomputes()
    }
}

fn accessible_name(record: &Interaction) -> String {
    let (first, second) = record.residue_labels();
    format!(
        "{} between {first} and {second}",
        record.interaction_type.display_name()
    )
}

/// Fill `out` with segments for `active`, reusing its allocation.
pub fn build_segments(
    structure: &StructureData,
    active: &[InteractionKind],
    out: &mut Vec<OverlaySegment>,
) {
    out.clear();
    let records = active
        .iter()
        .flat_map(|&kind| structure.interactions_of(kind));

    let mut dangling = 0usize;
    for (n, record) in records.enumerate() {
        let (Some(a), Some(b)) = (
            structure.atom(record.atom1_index),
            structure.atom(record.atom2_index),
        ) else {
            dangling += 1;
            continue;
        };
        let style = OverlayStyle::for_kind(record.interaction_type);
        out.push(OverlaySegment {
            element_id: format!("interaction-{n}"),
            kind: record.interaction_type,
            label: accessible_name(record),
            line: LineSegment {
                start: a.position(),
                end: b.position(),
                color: style.color,
                width: style.width,
                dashed: style.dashed,
            },
        });
    }
    if dangling > 0 {
        log::warn!("skipped {dangling} interactions with missing atoms");
    }
    log::debug!("rebuilt {} interaction segments", out.len());
}
