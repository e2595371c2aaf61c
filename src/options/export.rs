use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Export", inline)]
#[serde(default)]
/// Snapshot export parameters.
pub struct ExportOptions {
    /// Prefix of every artifact file name.
    #[schemars(title = "Product Name")]
    pub product_name: String,
    /// Opaque background substituted when the view background is
    /// transparent.
    #[schemars(title = "Fallback Background")]
    pub fallback_background: String,
    /// Dots per inch recorded in the metadata.
    #[schemars(skip)]
    pub dpi: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            product_name: "BioDockViz".to_owned(),
            fallback_background: "#FFFFFF".to_owned(),
            dpi: 96,
        }
    }
}
