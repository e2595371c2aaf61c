// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Graphics allowances: casts between pixel, index and float domains are
// intentional, and these pedantic/nursery lints fight the math code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::use_self)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::too_many_lines)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![warn(unused_results)]
#![deny(unused_qualifications)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Instanced 3D rendering of docked molecular structures with reproducible
//! image + metadata snapshots.
//!
//! The crate turns an already-parsed structure (atoms, optional bonds) and an
//! already-computed interaction set (hydrogen bonds, van der Waals contacts,
//! salt bridges) into pixels, and exports what is on screen together with a
//! metadata record sufficient to reproduce it.
//!
//! # Key entry points
//!
//! - [`viewer::Viewer`] - the scene composer and its Loading / Empty /
//!   Ready / Error state machine
//! - [`state::VisualizationState`] - the host-owned display state, and
//!   [`state::VisualizationPatch`] for the updates the core proposes
//! - [`camera::manager::CameraManager`] - framing, orbit limits and
//!   debounced camera persistence
//! - [`snapshot::SnapshotExporter`] - paired PNG + metadata export
//! - [`renderer::OffscreenRenderer`] - the wgpu render target
//!
//! # Frame loop
//!
//! Everything except snapshot encoding runs on the caller's thread. The host
//! calls [`viewer::Viewer::frame`] once per display refresh; instance and
//! overlay buffers are recomputed only when their inputs change, the camera
//! debounce fires from inside `frame`, and finished exports are collected
//! there as well.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod labels;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod snapshot;
pub mod state;
pub mod structure;
pub mod style;
#[cfg(test)]
mod test_support;
pub mod util;
pub mod viewer;

pub use error::VizError;
pub use options::Options;
pub use state::{CameraSettings, VisualizationPatch, VisualizationState};
pub use structure::StructureData;
pub use viewer::Viewer;
