//! User-facing strings. Localization is the host's concern; these are the
//! English defaults the core presents.

/// Render surface title.
pub const VIEWER_TITLE: &str = "Molecular Visualization";
/// Render surface description.
pub const VIEWER_DESCRIPTION: &str = "Open molecular visualization viewer";
/// Accessible label of the render surface.
pub const VIEWER_ARIA_LABEL: &str =
    "Molecular Visualization - Open molecular visualization viewer";

/// Shown while no structure is present, and on a busy export control.
pub const LOADING: &str = "Loading...";
/// Shown for a structure with zero atoms.
pub const NO_ATOMS: &str = "No atoms to display.";
/// Shown when a render fault has no message of its own.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
/// Recovery action in the error state.
pub const RETRY: &str = "Retry";

/// Export control.
pub const EXPORT_SNAPSHOT: &str = "Export Snapshot";
/// Export confirmation.
pub const EXPORT: &str = "Export";
/// Format badge.
pub const PNG_FORMAT: &str = "PNG Format";
/// Quality badge.
pub const PUBLICATION_READY: &str = "Publication Ready";

/// Shown when the active kinds produce no overlay.
pub const NO_INTERACTIONS: &str = "No interactions found";
