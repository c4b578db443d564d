// SPDX-License-Identifier: MPL-2.0
//! Persisted session state.
//!
//! Holds the auth token and the signed-in user's profile summary across
//! restarts, stored in CBOR in the app data directory - app-managed
//! state, kept apart from the user-editable TOML preferences.
//!
//! The stored role is a convenience for picking screens and hiding
//! controls. It is *not* an authorization mechanism: the server checks
//! the token on every request.

use crate::app::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Session file name within the app data directory.
const SESSION_FILE: &str = "session.cbor";

/// Role the service reported at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Landing route after a successful login.
    #[must_use]
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::User => "/user/dashboard",
        }
    }
}

/// Profile summary returned by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub role: Role,
    pub email: String,
}

/// Client session state that persists across restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl Session {
    /// Whether both a token and a profile are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some() && self.profile.is_some()
    }

    /// Whether the stored profile claims the admin role. UI gating only;
    /// the server decides for real.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.role == Role::Admin)
    }

    /// Signs out: wipes token and profile.
    pub fn clear(&mut self) {
        self.auth_token = None;
        self.profile = None;
    }

    /// Loads the session from the default location.
    ///
    /// Never fails: a missing file is an empty session; a corrupt or
    /// unreadable one is an empty session plus a warning for the user.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads the session from a custom base directory (tests).
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::file_path(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(session) => (session, None),
                Err(_) => (
                    Self::default(),
                    Some("Stored session could not be read; please sign in again.".to_string()),
                ),
            },
            Err(_) => (
                Self::default(),
                Some("Stored session could not be opened; please sign in again.".to_string()),
            ),
        }
    }

    /// Saves the session to the default location. Returns a warning
    /// message instead of an error when saving fails.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves the session under a custom base directory (tests).
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::file_path(base_dir) else {
            return Some("No data directory available to store the session.".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("Could not create the session directory.".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if ciborium::into_writer(self, BufWriter::new(file)).is_err() {
                    return Some("Could not write the session file.".to_string());
                }
                None
            }
            Err(_) => Some("Could not create the session file.".to_string()),
        }
    }

    fn file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::data_dir_with_override(base_dir).map(|mut path| {
            path.push(SESSION_FILE);
            path
        })
    }
}
