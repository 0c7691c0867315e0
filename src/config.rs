//! Application settings and the tank category catalog.
//!
//! Both live in `config/tankmate.toml`, embedded in the binary at compile
//! time. `TANKMATE_API_BASE`, if set when building, replaces `api_base`.

use serde::Deserialize;

use crate::error::ConfigError;

const EMBEDDED_CONFIG: &str = include_str!("../config/tankmate.toml");

/// A selectable product line. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub code: String,
    pub name: String,
    pub short: String,
    #[serde(default)]
    pub description: String,
    pub capacity_range: String,
    pub unit: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Category {
    /// Heading shown above the search form, e.g. "RCT - Rhino Commercial Tank".
    pub fn title(&self) -> String {
        format!("{} - {}", self.short, self.name)
    }
}

fn default_placeholder() -> String {
    "Type to search models...".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub api_base: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    #[serde(default = "default_selection_hint_ms")]
    pub selection_hint_ms: u32,
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_debounce_ms() -> u32 {
    200
}

fn default_selection_hint_ms() -> u32 {
    2000
}

fn default_notification_ms() -> u32 {
    3000
}

impl AppConfig {
    /// Parse a TOML document. A config without categories is rejected since
    /// nothing could be searched.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(content)?;
        if config.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// The configuration compiled into the binary.
    ///
    /// # Panics
    /// Panics if the embedded TOML is invalid (a build defect, covered by tests).
    pub fn embedded() -> Self {
        let mut config = Self::from_toml(EMBEDDED_CONFIG)
            .expect("embedded config/tankmate.toml must be valid");
        if let Some(base) = option_env!("TANKMATE_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        config
    }

    pub fn category(&self, code: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}
