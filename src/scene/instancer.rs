use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::state::{ColorScheme, ViewMode, VisualizationState};
use crate::structure::StructureData;
use crate::style::{color_of, radius_of};
use crate::util::memo::{ByIdentity, Memo};

/// Per-atom instance for the sphere pass.
/// Must match the WGSL `AtomInstance` struct layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AtomInstance {
    /// xyz = position, w = radius
    pub center: [f32; 4],
    /// RGBA color; alpha 0 marks a hidden atom
    pub color: [f32; 4],
}

impl AtomInstance {
    /// Whether the slot is drawn invisible.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.color[3] <= 0.0
    }
}

type InstanceKey = (
    ByIdentity<StructureData>,
    ViewMode,
    ColorScheme,
    Vec<usize>,
    Vec<usize>,
);

/// Builds one [`AtomInstance`] per atom, in atom order.
///
/// Instances are cached against the structure identity, view mode, color
/// scheme and both visibility lists; any other state change reuses them.
#[derive(Debug, Default)]
pub struct AtomInstancer {
    memo: Memo<InstanceKey, Vec<AtomInstance>>,
}

impl AtomInstancer {
    /// Empty instancer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances for `structure` under `state`. Instance `i` is atom `i`.
    pub fn instances(
        &mut self,
        structure: &Arc<StructureData>,
        state: &VisualizationState,
    ) -> &[AtomInstance] {
        let key = (
            ByIdentity(Arc::clone(structure)),
            state.view_mode,
            state.color_scheme,
            state.visible_atoms.clone(),
            state.hidden_atoms.clone(),
        );
        self.memo.get_or_update(key, |(structure, mode, scheme, _, hidden), out| {
            build_instances(&structure.0, *mode, *scheme, hidden, out);
        })
    }

    /// How many times instances were rebuilt.
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.memo.recomputes()
    }
}

/// Fill `out` with one instance per atom, reusing its allocation.
pub fn build_instances(
    structure: &StructureData,
    mode: ViewMode,
    scheme: ColorScheme,
    hidden: &[usize],
    out: &mut Vec<AtomInstance>,
) {
    let hidden: FxHashSet<usize> = hidden.iter().copied().collect();
    out.clear();
    out.reserve(structure.atoms.len());
    out.extend(structure.atoms.iter().map(|atom| {
        let p = atom.position();
        AtomInstance {
            center: [p.x, p.y, p.z, radius_of(&atom.element, mode)],
            color: color_of(atom, scheme, &hidden).to_array(),
        }
    }));
    log::debug!(
        "rebuilt {} atom instances ({mode:?}, {scheme:?}, {} hidden)",
        out.len(),
        hidden.len()
    );
}
