use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory (all optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: ColorOverrides,
}

/// Per-theme hex color overrides, e.g.
///
/// ```toml
/// [ui.colors.dark]
/// background = "#101018"
/// highlight = "#FB4196"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorOverrides {
    #[serde(default)]
    pub light: HashMap<String, String>,
    #[serde(default)]
    pub dark: HashMap<String, String>,
}
