//! Parsed structure records consumed by the renderer.
//!
//! These mirror the JSON documents produced by the upstream parsing and
//! interaction-analysis services. The renderer never mutates them; a loaded
//! [`StructureData`] is shared behind an `Arc` and compared by identity.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// A single atom record. `index` is the stable identity used by bonds,
/// interactions and visibility sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atom {
    /// Position in the atom sequence (0..N-1).
    pub index: usize,
    /// Serial number from the source file.
    #[serde(default)]
    pub serial: i64,
    /// Atom name (e.g. `CA`).
    #[serde(default)]
    pub name: String,
    /// Alternate location indicator.
    #[serde(default)]
    pub alt_loc: String,
    /// Residue name (e.g. `ALA`).
    #[serde(default)]
    pub res_name: String,
    /// Chain identifier.
    #[serde(default)]
    pub chain_id: String,
    /// Residue sequence number.
    #[serde(default)]
    pub res_seq: i64,
    /// Insertion code.
    #[serde(default)]
    pub i_code: String,
    /// X coordinate in angstroms.
    pub x: f32,
    /// Y coordinate in angstroms.
    pub y: f32,
    /// Z coordinate in angstroms.
    pub z: f32,
    /// Occupancy.
    #[serde(default)]
    pub occupancy: f32,
    /// B-factor.
    #[serde(default)]
    pub temp_factor: f32,
    /// Element symbol (e.g. `C`, `Cl`).
    #[serde(default)]
    pub element: String,
    /// Formal charge.
    #[serde(default)]
    pub charge: f32,
}

impl Atom {
    /// Atom position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Residue name and sequence number joined, e.g. `ALA12`. Padding in the
/// name is dropped.
#[must_use]
pub fn residue_label(name: &str, seq: i64) -> String {
    format!("{}{seq}", name.trim())
}

/// Covalent bond kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondType {
    /// Single bond.
    #[default]
    Single,
    /// Double bond.
    Double,
    /// Triple bond.
    Triple,
    /// Aromatic bond.
    Aromatic,
}

/// A covalent bond between two atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    /// Index of the first atom.
    pub atom1_index: usize,
    /// Index of the second atom.
    pub atom2_index: usize,
    /// Bond kind.
    #[serde(rename = "type", default)]
    pub bond_type: BondType,
    /// Bond order.
    #[serde(default = "default_bond_order")]
    pub order: u8,
    /// Bond length in angstroms.
    #[serde(default)]
    pub distance: f32,
}

fn default_bond_order() -> u8 {
    1
}

/// Classified non-covalent contact kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Hydrogen bond.
    HydrogenBond,
    /// Van der Waals contact.
    VdwContact,
    /// Salt bridge.
    SaltBridge,
    /// Any tag the renderer does not know. Never drawn when requested as an
    /// active kind; styled like a vdW contact when found on a record.
    #[serde(other)]
    Unknown,
}

impl InteractionKind {
    /// The three kinds the renderer knows how to draw, in display order.
    pub const KNOWN: [Self; 3] =
        [Self::HydrogenBond, Self::VdwContact, Self::SaltBridge];

    /// Key under which records of this kind are grouped. `None` for
    /// [`InteractionKind::Unknown`].
    #[must_use]
    pub const fn key(self) -> Option<&'static str> {
        match self {
            Self::HydrogenBond => Some("hydrogen_bond"),
            Self::VdwContact => Some("vdw_contact"),
            Self::SaltBridge => Some("salt_bridge"),
            Self::Unknown => None,
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HydrogenBond => "Hydrogen bond",
            Self::VdwContact => "Van der Waals contact",
            Self::SaltBridge => "Salt bridge",
            Self::Unknown => "Interaction",
        }
    }
}

/// A non-covalent interaction between two atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Interaction classification.
    pub interaction_type: InteractionKind,
    /// Index of the first atom.
    pub atom1_index: usize,
    /// Index of the second atom.
    pub atom2_index: usize,
    /// Contact distance in angstroms.
    #[serde(default)]
    pub distance: f32,
    /// Donor-hydrogen-acceptor angle, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
    /// Residue name of the first atom.
    #[serde(default)]
    pub atom1_residue: String,
    /// Residue sequence number of the first atom.
    #[serde(default)]
    pub atom1_residue_seq: i64,
    /// Residue name of the second atom.
    #[serde(default)]
    pub atom2_residue: String,
    /// Residue sequence number of the second atom.
    #[serde(default)]
    pub atom2_residue_seq: i64,
    /// Detector confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f32,
    /// Whether the contact was predicted rather than observed.
    #[serde(default)]
    pub is_predicted: bool,
}

impl Interaction {
    /// Residue labels of the two partners, first atom first.
    #[must_use]
    pub fn residue_labels(&self) -> (String, String) {
        (
            residue_label(&self.atom1_residue, self.atom1_residue_seq),
            residue_label(&self.atom2_residue, self.atom2_residue_seq),
        )
    }
}

/// Interactions grouped by kind key (`hydrogen_bond`, `vdw_contact`,
/// `salt_bridge`). Order within each group is preserved.
pub type InteractionSet = BTreeMap<String, Vec<Interaction>>;

/// Descriptive metadata attached by the parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructureMetadata {
    /// Original file name.
    pub file_name: String,
    /// Original file size in bytes.
    pub file_size: u64,
    /// Atom count reported by the parser.
    pub atom_count: usize,
    /// Bond count reported by the parser.
    pub bond_count: usize,
    /// Number of chains.
    pub chain_count: usize,
    /// Number of models.
    pub model_count: usize,
    /// Structure title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Experimental technique (e.g. X-RAY DIFFRACTION).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental_technique: Option<String>,
    /// Resolution in angstroms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f32>,
    /// Parser warnings.
    pub warnings: Vec<String>,
}

/// A parsed structure plus its (optional) interaction analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureData {
    /// Structure identifier assigned at upload.
    pub id: String,
    /// Atom records; required.
    pub atoms: Vec<Atom>,
    /// Covalent bonds, when the parser exposes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonds: Option<Vec<Bond>>,
    /// Interaction analysis results, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<InteractionSet>,
    /// Parser metadata.
    #[serde(default)]
    pub metadata: StructureMetadata,
}

impl StructureData {
    /// Parse a structure document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::StructureLoad`] when the document is malformed or
    /// has no `atoms` array.
    pub fn from_json(text: &str) -> Result<Self, VizError> {
        serde_json::from_str(text)
            .map_err(|e| VizError::StructureLoad(e.to_string()))
    }

    /// Load a structure document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Io`] when the file cannot be read, or
    /// [`VizError::StructureLoad`] when it does not parse.
    pub fn load(path: &Path) -> Result<Self, VizError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Atom at `index`, or `None` for a dangling reference.
    #[must_use]
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Records of one interaction kind, in stored order.
    #[must_use]
    pub fn interactions_of(&self, kind: InteractionKind) -> &[Interaction] {
        kind.key()
            .and_then(|key| self.interactions.as_ref()?.get(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
