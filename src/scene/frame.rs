use std::sync::Arc;

use glam::Vec3;

use crate::camera::core::Camera;
use crate::scene::bonds::BondBuilder;
use crate::scene::bounds::SceneBounds;
use crate::scene::instancer::{AtomInstance, AtomInstancer};
use crate::scene::lighting::LightRig;
use crate::scene::overlay::{OverlayBuilder, OverlaySegment};
use crate::scene::segment::{LineInstance, LineSegment};
use crate::state::VisualizationState;
use crate::structure::StructureData;
use crate::style::Color;

/// Everything a render target needs to draw one frame.
///
/// Positions are in structure space; `offset` moves the structure's center
/// to the origin.
#[derive(Debug, Clone)]
pub struct SceneFrame<'a> {
    /// Sphere instances, one per atom. Empty when atoms are switched off.
    pub atoms: &'a [AtomInstance],
    /// Bond lines. Empty when bonds are off or absent.
    pub bonds: &'a [LineSegment],
    /// Interaction lines. Empty when overlays are off or absent.
    pub overlay: &'a [OverlaySegment],
    /// Viewing camera.
    pub camera: Camera,
    /// Translation applied to every position.
    pub offset: Vec3,
    /// Scene lights.
    pub lights: LightRig,
    /// Clear color; may be transparent.
    pub background: Color,
}

impl SceneFrame<'_> {
    /// Bond and overlay lines packed for the line pass, bonds first.
    #[must_use]
    pub fn line_instances(&self) -> Vec<LineInstance> {
        self.bonds
            .iter()
            .chain(self.overlay.iter().map(|s| &s.line))
            .map(LineSegment::to_instance)
            .collect()
    }

    /// Whether nothing would be drawn besides the background.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty() && self.overlay.is_empty()
    }
}

/// Owns the memoized builders and assembles a [`SceneFrame`] per frame.
#[derive(Debug, Default)]
pub struct SceneComposer {
    instancer: AtomInstancer,
    overlay: OverlayBuilder,
    bonds: BondBuilder,
    lights: LightRig,
}

impl SceneComposer {
    /// Composer with the fixed light rig.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the frame for `structure` under `state`.
    pub fn compose<'a>(
        &'a mut self,
        structure: &Arc<StructureData>,
        state: &VisualizationState,
        bounds: &SceneBounds,
        camera: &Camera,
    ) -> SceneFrame<'a> {
        let atoms: &[AtomInstance] = if state.show_atoms {
            self.instancer.instances(structure, state)
        } else {
            &[]
        };
        let overlay: &[OverlaySegment] =
            if state.show_interactions && structure.interactions.is_some() {
                self.overlay.segments(structure, &state.interaction_types)
            } else {
                &[]
            };
        let bonds: &[LineSegment] = if state.show_bonds && structure.bonds.is_some() {
            self.bonds
                .segments(structure, state.view_mode, &state.hidden_atoms)
        } else {
            &[]
        };

        SceneFrame {
            atoms,
            bonds,
            overlay,
            camera: camera.clone(),
            offset: bounds.offset(),
            lights: self.lights,
            background: resolve_background(&state.background_color),
        }
    }

    /// The overlay segments from the last composition, for accessibility
    /// queries between frames.
    pub fn overlay_segments(
        &mut self,
        structure: &Arc<StructureData>,
        state: &VisualizationState,
    ) -> &[OverlaySegment] {
        if state.show_interactions {
            self.overlay.segments(structure, &state.interaction_types)
        } else {
            &[]
        }
    }

    /// Rebuild counters `(atoms, overlay, bonds)`.
    #[must_use]
    pub fn rebuilds(&self) -> (u64, u64, u64) {
        (
            self.instancer.rebuilds(),
            self.overlay.rebuilds(),
            self.bonds.rebuilds(),
        )
    }
}

/// Parse the on-screen background. Unparseable colors draw black.
#[must_use]
pub fn resolve_background(css: &str) -> Color {
    Color::parse_css(css).unwrap_or_else(|| {
        log::warn!("unparseable background color {css:?}; using black");
        Color::BLACK
    })
}
