//! User preferences, loaded from and saved to `settings.toml`.
//!
//! Preferences are the user-editable side of persisted state: the theme
//! and the server connection. App-managed state (the session) is stored
//! separately - see [`crate::session`].

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "settings.toml";

/// Base URL used when the config names none.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Request timeout used when the config names none.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Resolves `System` against the desktop's current appearance.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct General {
    #[serde(default)]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub server: Server,
}

impl Config {
    /// Effective server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.server.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Effective request timeout in seconds.
    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

/// Loads preferences from the default location. A missing file is the
/// default config; an unreadable or invalid one also loads as defaults
/// but carries a warning the app surfaces through feedback.
pub fn load() -> (Config, Option<String>) {
    let Some(mut path) = paths::config_dir() else {
        return (Config::default(), None);
    };
    path.push(CONFIG_FILE);
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(_) => (
            Config::default(),
            Some("Could not read saved preferences; using defaults.".to_string()),
        ),
    }
}

/// Saves preferences to the default location.
pub fn save(config: &Config) -> Result<()> {
    if let Some(mut path) = paths::config_dir() {
        path.push(CONFIG_FILE);
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
