//! Runtime settings shared by the shape matcher and the record decorators.

use std::path::Path;
use std::sync::{LazyLock, PoisonError, RwLock};

use miette::Report;
use serde::{Deserialize, Serialize};

pub type ConfigError = Report;

/// Names a TOML settings file to load at startup.
pub const CONFIG_ENV: &str = "AXISCOPE_CONFIG";
/// Overrides `disable` from the environment.
pub const DISABLE_ENV: &str = "AXISCOPE_DISABLE";

fn config_msg(message: impl Into<String>) -> ConfigError {
    Report::msg(message.into())
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Every shape check passes without touching bindings.
    #[serde(default)]
    pub disable: bool,

    /// Check record fields after construction.
    #[serde(default = "default_verify_records")]
    pub verify_records: bool,
}

fn default_verify_records() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            disable: false,
            verify_records: default_verify_records(),
        }
    }
}

impl Settings {
    /// Parse TOML from string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| config_msg(format!("Invalid settings: {}", e)))
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_msg(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_str(&content)
    }

    /// File named by `AXISCOPE_CONFIG` (if any), then the `AXISCOPE_DISABLE` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Ok(raw) = std::env::var(DISABLE_ENV) {
            settings.disable = parse_flag(&raw).ok_or_else(|| {
                config_msg(format!("{DISABLE_ENV}='{raw}' is not a boolean flag"))
            })?;
        }
        Ok(settings)
    }

    pub fn to_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| config_msg(format!("Failed to serialize: {}", e)))
    }
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

static SETTINGS: LazyLock<RwLock<Settings>> = LazyLock::new(|| {
    let settings = Settings::from_env().unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to default settings");
        Settings::default()
    });
    RwLock::new(settings)
});

/// Process-wide settings, loaded from the environment on first use.
pub fn settings() -> Settings {
    SETTINGS.read().unwrap_or_else(PoisonError::into_inner).clone()
}

pub fn set_settings(settings: Settings) {
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = settings;
}

pub fn is_disabled() -> bool {
    SETTINGS.read().unwrap_or_else(PoisonError::into_inner).disable
}
