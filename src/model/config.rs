use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Minimum seconds between opportunistic task saves
    #[serde(default = "default_autosave_secs")]
    pub autosave_secs: f64,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            autosave_secs: default_autosave_secs(),
            ui: UiConfig::default(),
        }
    }
}

fn default_autosave_secs() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key hint line at the bottom of the normal view
    #[serde(default = "default_true")]
    pub show_help_line: bool,
    /// Theme overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_help_line: true,
            colors: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.autosave_secs, 2.0);
        assert!(config.ui.show_help_line);
    }

    #[test]
    fn partial_config() {
        let config: AppConfig = toml::from_str(
            "autosave_secs = 5.5\n\n[ui]\nshow_help_line = false\n\n[ui.colors]\nhighlight = \"#FF0000\"\n",
        )
        .unwrap();
        assert_eq!(config.autosave_secs, 5.5);
        assert!(!config.ui.show_help_line);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#FF0000");
    }
}
