use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::options::{AnalysisThresholds, ExportOptions};
use crate::state::{CameraSettings, VisualizationState};
use crate::structure::{InteractionKind, StructureData};
use crate::style::Color;
use crate::util::hash::structure_digest;

/// Identity of the exported structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSummary {
    /// Structure id.
    pub name: String,
    /// Number of atoms.
    pub atom_count: usize,
    /// SHA-256 of the atom records.
    pub file_hash: String,
}

/// Interaction counts per kind plus the kinds on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSummary {
    /// Hydrogen bond records.
    pub hydrogen_bonds: usize,
    /// Van der Waals contact records.
    pub vdw_contacts: usize,
    /// Salt bridge records.
    pub salt_bridges: usize,
    /// Kinds drawn in the image; empty when overlays are off.
    pub displayed_types: Vec<InteractionKind>,
}

/// Analysis parameters behind the overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Detection thresholds.
    pub thresholds: AnalysisThresholds,
}

/// Everything needed to reproduce an exported image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Capture time, RFC 3339 UTC with milliseconds.
    pub timestamp: String,
    /// Exported structure.
    pub structure: StructureSummary,
    /// Display state at capture time.
    pub visualization: VisualizationState,
    /// Camera pose at capture time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSettings>,
    /// Interaction counts.
    pub interactions: InteractionSummary,
    /// Echoed analysis thresholds.
    pub analysis: AnalysisSummary,
    /// Image format, always `png`.
    pub export_format: String,
    /// Image width in pixels.
    pub resolution: u32,
    /// Dots per inch.
    pub dpi: u32,
    /// Opaque background the image was flattened onto.
    pub background_color: String,
    /// Indices of atoms drawn visibly.
    pub visible_atoms: Vec<usize>,
    /// Indices of atoms drawn transparent, sorted.
    pub hidden_atoms: Vec<usize>,
}

/// Background for export: transparent or unparseable colors become the
/// opaque fallback. Returns the CSS string recorded in metadata and the
/// color the image is flattened onto.
#[must_use]
pub fn resolve_export_background(css: &str, fallback: &str) -> (String, Color) {
    match Color::parse_css(css) {
        Some(color) if !color.is_transparent() => {
            (css.to_owned(), Color { a: 1.0, ..color })
        }
        parsed => {
            if parsed.is_none() {
                log::warn!("unparseable background {css:?}; exporting on {fallback}");
            }
            let color = Color::parse_css(fallback)
                .filter(|c| !c.is_transparent())
                .unwrap_or(Color::WHITE);
            (fallback.to_owned(), Color { a: 1.0, ..color })
        }
    }
}

/// Inputs to one export, fixed when the export starts.
#[derive(Debug, Clone)]
pub struct SnapshotRequest<'a> {
    /// Structure on screen.
    pub structure: &'a StructureData,
    /// Display state on screen.
    pub state: &'a VisualizationState,
    /// Live camera pose, when a camera is mounted.
    pub camera: Option<CameraSettings>,
    /// Export parameters.
    pub export: &'a ExportOptions,
    /// Thresholds to echo.
    pub thresholds: &'a AnalysisThresholds,
}

impl SnapshotMetadata {
    /// Metadata for an image of `width` pixels captured at `captured_at`.
    #[must_use]
    pub fn build(
        request: &SnapshotRequest<'_>,
        width: u32,
        captured_at: DateTime<Utc>,
    ) -> Self {
        let SnapshotRequest {
            structure,
            state,
            camera,
            export,
            thresholds,
        } = request;
        let atom_count = structure.atoms.len();

        let hidden: BTreeSet<usize> = state
            .hidden_atoms
            .iter()
            .copied()
            .filter(|&i| i < atom_count)
            .collect();
        let visible_atoms = (0..atom_count).filter(|i| !hidden.contains(i)).collect();

        let displayed_types = if state.show_interactions {
            state
                .interaction_types
                .iter()
                .copied()
                .filter(|k| k.key().is_some())
                .collect()
        } else {
            Vec::new()
        };

        let (background_color, _) = resolve_export_background(
            &state.background_color,
            &export.fallback_background,
        );

        Self {
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            structure: StructureSummary {
                name: structure.id.clone(),
                atom_count,
                file_hash: structure_digest(&structure.atoms),
            },
            visualization: (*state).clone(),
            camera: camera.or(state.camera),
            interactions: InteractionSummary {
                hydrogen_bonds: structure
                    .interactions_of(InteractionKind::HydrogenBond)
                    .len(),
                vdw_contacts: structure
                    .interactions_of(InteractionKind::VdwContact)
                    .len(),
                salt_bridges: structure
                    .interactions_of(InteractionKind::SaltBridge)
                    .len(),
                displayed_types,
            },
            analysis: AnalysisSummary {
                thresholds: (*thresholds).clone(),
            },
            export_format: "png".to_owned(),
            resolution: width,
            dpi: export.dpi,
            background_color,
            visible_atoms,
            hidden_atoms: hidden.into_iter().collect(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VizError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, crate::VizError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Common stem of both artifact names: `<product>_<id>_<YYYY-MM-DD>`.
/// Characters unsafe in file names are replaced with `_`.
#[must_use]
pub fn artifact_stem(product: &str, structure_id: &str, date: DateTime<Utc>) -> String {
    let id: String = structure_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{product}_{id}_{}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::test_support::{carbon_chain, interaction, interaction_set, structure};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).single().unwrap_or_default()
    }

    fn sample() -> StructureData {
        let mut s = structure("1abc", carbon_chain(5));
        s.interactions = Some(interaction_set(&[
            (
                InteractionKind::HydrogenBond,
                vec![
                    interaction(InteractionKind::HydrogenBond, 0, 1),
                    interaction(InteractionKind::HydrogenBond, 1, 2),
                ],
            ),
            (
                InteractionKind::SaltBridge,
                vec![interaction(InteractionKind::SaltBridge, 3, 4)],
            ),
        ]));
        s
    }

    fn build(state: &VisualizationState) -> SnapshotMetadata {
        let s = sample();
        let export = ExportOptions::default();
        let thresholds = AnalysisThresholds::default();
        SnapshotMetadata::build(
            &SnapshotRequest {
                structure: &s,
                state,
                camera: None,
                export: &export,
                thresholds: &thresholds,
            },
            1280,
            at(),
        )
    }

    #[test]
    fn transparent_background_uses_fallback() {
        let state = VisualizationState {
            background_color: "transparent".into(),
            ..VisualizationState::default()
        };
        assert_eq!(build(&state).background_color, "#FFFFFF");
        let (css, color) = resolve_export_background("rgba(0,0,0,0)", "#FFFFFF");
        assert_eq!(css, "#FFFFFF");
        assert_eq!(color, Color::WHITE);
        let (css, _) = resolve_export_background("#112233", "#FFFFFF");
        assert_eq!(css, "#112233");
    }

    #[test]
    fn counts_and_visibility() {
        let state = VisualizationState {
            hidden_atoms: vec![3, 1, 3, 40],
            interaction_types: vec![InteractionKind::SaltBridge],
            ..VisualizationState::default()
        };
        let m = build(&state);
        assert_eq!(m.structure.atom_count, 5);
        assert_eq!(m.structure.file_hash.len(), 64);
        assert_eq!(m.interactions.hydrogen_bonds, 2);
        assert_eq!(m.interactions.vdw_contacts, 0);
        assert_eq!(m.interactions.salt_bridges, 1);
        assert_eq!(m.interactions.displayed_types, [InteractionKind::SaltBridge]);
        assert_eq!(m.hidden_atoms, [1, 3]);
        assert_eq!(m.visible_atoms, [0, 2, 4]);
        assert_eq!(m.resolution, 1280);
        assert_eq!(m.dpi, 96);
        assert_eq!(m.export_format, "png");
        assert_eq!(m.timestamp, "2024-03-09T14:05:00.000Z");
    }

    #[test]
    fn overlays_off_displays_nothing() {
        let state = VisualizationState {
            show_interactions: false,
            ..VisualizationState::default()
        };
        assert!(build(&state).interactions.displayed_types.is_empty());
    }

    #[test]
    fn json_shape_is_camel_case() {
        let m = build(&VisualizationState::default());
        let json: serde_json::Value =
            serde_json::from_str(&m.to_json().unwrap()).unwrap();
        assert_eq!(json["structure"]["atomCount"], 5);
        assert_eq!(json["exportFormat"], "png");
        assert_eq!(json["backgroundColor"], "#000000");
        assert_eq!(json["interactions"]["displayedTypes"][0], "hydrogen_bond");
        assert_eq!(json["analysis"]["thresholds"]["hydrogen_bond_max"], 2.5);
        assert!(json.get("camera").is_none());
    }

    #[test]
    fn stem_format() {
        assert_eq!(
            artifact_stem("BioDockViz", "1abc", at()),
            "BioDockViz_1abc_2024-03-09"
        );
        assert_eq!(artifact_stem("P", "a/b c", at()), "P_a_b_c_2024-03-09");
    }
}
