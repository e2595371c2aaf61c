//! Centralized rendering/export options with TOML file support.
//!
//! Camera controls, snapshot export, echoed analysis thresholds and the
//! offscreen render target are consolidated here. Options serialize to/from
//! TOML; every section uses `#[serde(default)]` so partial files work.

mod analysis;
mod camera;
mod export;
mod render;

use std::path::Path;

pub use analysis::AnalysisThresholds;
pub use camera::CameraOptions;
pub use export::ExportOptions;
pub use render::RenderOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, control and persistence parameters.
    pub camera: CameraOptions,
    /// Snapshot export parameters.
    pub export: ExportOptions,
    /// Thresholds echoed into snapshot metadata.
    #[schemars(skip)]
    pub analysis: AnalysisThresholds,
    /// Offscreen render target parameters.
    pub render: RenderOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Io`] if the file cannot be read or
    /// [`VizError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, VizError> {
        let content = std::fs::read_to_string(path).map_err(VizError::Io)?;
        toml::from_str(&content)
            .map_err(|e| VizError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`VizError::OptionsParse`] on serialization failure or
    /// [`VizError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), VizError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VizError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VizError::Io)?;
        }
        std::fs::write(path, content).map_err(VizError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
fovy = 45.0

[export]
product_name = "DockLab"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.export.product_name, "DockLab");
        // Everything else should be default
        assert_eq!(opts.camera.debounce_ms, 100);
        assert_eq!(opts.export.dpi, 96);
        assert_eq!(opts.analysis.hydrogen_bond_max, 2.5);
        assert_eq!(opts.render.width, 1280);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets/view.toml");
        let mut opts = Options::default();
        opts.render.width = 640;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[camera\nfovy = ").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(VizError::OptionsParse(_))
        ));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("export"));
        assert!(props.contains_key("render"));
        assert!(!props.contains_key("analysis"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("debounce_ms").is_none());
    }
}
