//! Scene assembly: bounds, per-atom instances, bond and interaction lines,
//! fixed lighting, and the per-frame [`SceneFrame`] handed to a render
//! target.
//!
//! Every builder is memoized against the inputs it actually reads, so a
//! frame where nothing relevant changed reuses the previous geometry.

/// Solid bond segments between visible atoms.
pub mod bonds;
/// Axis-aligned bounds and the recentering offset.
pub mod bounds;
/// Per-frame composition of everything a target draws.
pub mod frame;
/// One GPU instance per atom.
pub mod instancer;
/// The fixed light rig and its uniform.
pub mod lighting;
/// Dashed interaction segments and their styles.
pub mod overlay;
/// Line segments and their GPU instance layout.
pub mod segment;

pub use bounds::SceneBounds;
pub use frame::{SceneComposer, SceneFrame};
pub use instancer::AtomInstance;
pub use lighting::LightRig;
pub use overlay::{OverlaySegment, OverlayStyle};
pub use segment::{LineInstance, LineSegment};
