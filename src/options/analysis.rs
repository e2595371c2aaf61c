use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Interaction-detection thresholds in effect for the loaded analysis.
///
/// The renderer never recomputes interactions; these values are echoed
/// into snapshot metadata so an image can be traced back to the analysis
/// that produced its overlays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Analysis Thresholds", inline)]
#[serde(default)]
pub struct AnalysisThresholds {
    /// Minimum hydrogen-bond H...acceptor distance (angstroms).
    pub hydrogen_bond_min: f32,
    /// Maximum hydrogen-bond H...acceptor distance (angstroms).
    pub hydrogen_bond_max: f32,
    /// Minimum donor-H...acceptor angle (degrees).
    pub hydrogen_bond_angle_min: f32,
    /// Maximum charged-group distance for a salt bridge (angstroms).
    pub salt_bridge_max: f32,
    /// Lower bound of the vdW contact window (fraction of radius sum).
    pub vdw_min: f32,
    /// Upper bound of the vdW contact window (fraction of radius sum).
    pub vdw_max: f32,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            hydrogen_bond_min: 1.5,
            hydrogen_bond_max: 2.5,
            hydrogen_bond_angle_min: 120.0,
            salt_bridge_max: 4.0,
            vdw_min: 0.7,
            vdw_max: 1.1,
        }
    }
}
