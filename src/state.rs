//! Host-owned display state and the patches the core proposes against it.
//!
//! [`VisualizationState`] is the single source of truth for what the viewer
//! shows. The core reads it every frame but never writes it: camera changes
//! come back to the host as a [`VisualizationPatch`] through the state
//! channel, and the host decides whether to fold them in.

use serde::{Deserialize, Serialize};

use crate::structure::InteractionKind;

/// Atom rendering style; selects the radius policy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Small spheres joined by bonds.
    #[default]
    BallAndStick,
    /// Van der Waals spheres.
    SpaceFilling,
    /// Thin fixed-radius atoms.
    Sticks,
    /// Minimal fixed-radius atoms.
    Lines,
    /// Cartoon ribbon; atoms use the default radius arm.
    Ribbon,
    /// Any mode this core does not draw; atoms use the default radius arm.
    #[serde(other)]
    Other,
}

/// Attribute used to pick per-atom color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// CPK element colors.
    #[default]
    Element,
    /// Palette color keyed by chain id.
    Chain,
    /// Palette color keyed by residue name.
    Residue,
    /// Host-defined colors; falls back to element colors.
    Custom,
    /// Any scheme this core does not know; falls back to element colors.
    #[serde(other)]
    Other,
}

/// A complete camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    /// Eye position.
    pub position: [f32; 3],
    /// Orbit target.
    pub target: [f32; 3],
    /// Zoom factor (1.0 = unzoomed).
    pub zoom: f32,
    /// Vertical field of view in degrees.
    #[serde(alias = "fov")]
    pub field_of_view: f32,
    /// Whether the projection is orthographic.
    #[serde(default)]
    pub orthographic: bool,
}

/// Everything the host controls about the display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct VisualizationState {
    /// Atom rendering style.
    pub view_mode: ViewMode,
    /// Atom coloring attribute.
    pub color_scheme: ColorScheme,
    /// CSS background color (`transparent` allowed on screen).
    pub background_color: String,
    /// Draw atoms.
    pub show_atoms: bool,
    /// Draw covalent bonds.
    pub show_bonds: bool,
    /// Draw interaction overlays.
    pub show_interactions: bool,
    /// Atom indices the host marked visible.
    pub visible_atoms: Vec<usize>,
    /// Atom indices drawn transparent.
    pub hidden_atoms: Vec<usize>,
    /// Interaction kinds to overlay, in draw order.
    pub interaction_types: Vec<InteractionKind>,
    /// Last persisted camera pose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSettings>,
}

impl Default for VisualizationState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            color_scheme: ColorScheme::default(),
            background_color: "#000000".to_owned(),
            show_atoms: true,
            show_bonds: true,
            show_interactions: true,
            visible_atoms: Vec::new(),
            hidden_atoms: Vec::new(),
            interaction_types: InteractionKind::KNOWN.to_vec(),
            camera: None,
        }
    }
}

impl VisualizationState {
    /// Fold a patch into this state. Absent fields are left untouched.
    pub fn apply(&mut self, patch: VisualizationPatch) {
        let VisualizationPatch {
            view_mode,
            color_scheme,
            background_color,
            show_atoms,
            show_bonds,
            show_interactions,
            visible_atoms,
            hidden_atoms,
            interaction_types,
            camera,
        } = patch;
        if let Some(v) = view_mode {
            self.view_mode = v;
        }
        if let Some(v) = color_scheme {
            self.color_scheme = v;
        }
        if let Some(v) = background_color {
            self.background_color = v;
        }
        if let Some(v) = show_atoms {
            self.show_atoms = v;
        }
        if let Some(v) = show_bonds {
            self.show_bonds = v;
        }
        if let Some(v) = show_interactions {
            self.show_interactions = v;
        }
        if let Some(v) = visible_atoms {
            self.visible_atoms = v;
        }
        if let Some(v) = hidden_atoms {
            self.hidden_atoms = v;
        }
        if let Some(v) = interaction_types {
            self.interaction_types = v;
        }
        if let Some(v) = camera {
            self.camera = Some(v);
        }
    }
}

/// A partial [`VisualizationState`]; `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationPatch {
    /// New view mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,
    /// New color scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
    /// New background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// New atom toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_atoms: Option<bool>,
    /// New bond toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_bonds: Option<bool>,
    /// New overlay toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_interactions: Option<bool>,
    /// New visible set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_atoms: Option<Vec<usize>>,
    /// New hidden set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_atoms: Option<Vec<usize>>,
    /// New active interaction kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_types: Option<Vec<InteractionKind>>,
    /// New camera pose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSettings>,
}

impl VisualizationPatch {
    /// A patch touching only the camera.
    #[must_use]
    pub fn camera(settings: CameraSettings) -> Self {
        Self {
            camera: Some(settings),
            ..Self::default()
        }
    }
}
