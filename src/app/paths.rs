// SPDX-License-Identifier: MPL-2.0
//! Application directory resolution.
//!
//! Preferences (`settings.toml`) live in the config directory; the
//! session file lives in the data directory. Both resolve through the
//! same ladder: explicit override (tests) → CLI flag → environment
//! variable → platform default.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Directory name under the platform config/data roots.
const APP_NAME: &str = "RoomDesk";

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "ROOMDESK_DATA_DIR";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "ROOMDESK_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Stores the `--data-dir`/`--config-dir` CLI overrides. Call once at
/// startup, before any path resolution.
///
/// # Panics
///
/// Panics when called a second time.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .expect("CLI data dir override already initialized");
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .expect("CLI config dir override already initialized");
}

/// The directory holding the session file.
pub fn data_dir() -> Option<PathBuf> {
    data_dir_with_override(None)
}

/// Like [`data_dir`] with an explicit highest-priority override.
pub fn data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = CLI_DATA_DIR.get().and_then(Clone::clone) {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(ENV_DATA_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// The directory holding `settings.toml`.
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_override(None)
}

/// Like [`config_dir`] with an explicit highest-priority override.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = CLI_CONFIG_DIR.get().and_then(Clone::clone) {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Serializes tests that touch the `ROOMDESK_*` environment variables,
/// across every test module in the crate.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_contains_app_name_by_default() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::remove_var(ENV_DATA_DIR);

        if let Some(path) = data_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn env_var_overrides_data_dir() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/tmp/roomdesk-test-data");

        assert_eq!(data_dir(), Some(PathBuf::from("/tmp/roomdesk-test-data")));

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn explicit_override_beats_env_var() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/env/config");

        let override_path = PathBuf::from("/override/config");
        assert_eq!(
            config_dir_with_override(Some(override_path.clone())),
            Some(override_path)
        );

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_env_var_falls_back_to_default() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        if let Some(path) = config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_CONFIG_DIR);
    }
}
