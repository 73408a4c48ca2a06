//! # Configuration
//!
//! Session behavior knobs, loaded with [`confique`] from an optional TOML
//! file plus environment variables (`ATTRFORM_*`), falling back to compiled
//! defaults.

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Configuration for a form session.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Expand the first section of a freshly built model.
    #[config(default = true, env = "ATTRFORM_EXPAND_FIRST_SECTION")]
    pub expand_first_section: bool,

    /// When the host bridge is unavailable, fall back to the built-in
    /// sample dataset instead of failing, so the form stays exercisable.
    #[config(default = true, env = "ATTRFORM_PLACEHOLDER_ON_MISSING_BRIDGE")]
    pub placeholder_on_missing_bridge: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            expand_first_section: true,
            placeholder_on_missing_bridge: true,
        }
    }
}

impl FormConfig {
    /// Load configuration layered from environment variables, the given
    /// TOML file, and compiled defaults, in that priority order.
    pub fn load(path: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| FormError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_expands_first_section_and_falls_back() {
        let config = FormConfig::default();
        assert!(config.expand_first_section);
        assert!(config.placeholder_on_missing_bridge);
    }

    #[test]
    fn loads_overrides_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "expand_first_section = false").expect("write config");

        let config = FormConfig::load(file.path()).expect("load config");
        assert!(!config.expand_first_section);
        assert!(config.placeholder_on_missing_bridge);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = FormConfig {
            expand_first_section: false,
            placeholder_on_missing_bridge: true,
        };
        let text = toml::to_string(&config).expect("serialize");
        let back: FormConfig = toml::from_str(&text).expect("deserialize");
        assert_eq!(back, config);
    }
}
