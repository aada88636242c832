//! Persisted user profile and repository annotations.
//!
//! The profile is a single JSON document holding the last-used username, the
//! username history, the access token, the selected theme and language, and
//! per-user repository comments.
//!
//! The token is only base64 encoded. This keeps it out of casual view but is
//! not encryption.
//!
//! Writes are read-modify-write without locking: two processes updating the
//! profile at the same time may lose one update (last writer wins).

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::constants::{DEFAULT_LANGUAGE, USERNAME_HISTORY_LIMIT};

/// UI theme name persisted for front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings scoped to one GitHub username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Repository full name -> comment
    pub comments: BTreeMap<String, String>,
}

/// On-disk profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub username: String,
    pub username_history: Vec<String>,
    /// Base64-encoded access token
    pub token: String,
    pub theme: Theme,
    pub language: String,
    pub user_configs: BTreeMap<String, UserConfig>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: String::new(),
            username_history: Vec::new(),
            token: String::new(),
            theme: Theme::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            user_configs: BTreeMap::new(),
        }
    }
}

impl Profile {
    /// Make `username` the active user and move it to the front of the history.
    pub fn record_username(&mut self, username: &str) {
        self.username_history.retain(|entry| entry != username);
        self.username_history.insert(0, username.to_string());
        self.username_history.truncate(USERNAME_HISTORY_LIMIT);
        self.username = username.to_string();
    }

    pub fn set_token(&mut self, token: &str) {
        self.token = BASE64.encode(token.as_bytes());
    }

    /// Decoded token; empty when unset or not valid base64/UTF-8.
    pub fn token(&self) -> String {
        if self.token.is_empty() {
            return String::new();
        }
        match BASE64.decode(self.token.as_bytes()) {
            Ok(bytes) => String::from_utf8(bytes).unwrap_or_default(),
            Err(e) => {
                warn!("⚠️  Stored token is not valid base64: {e}");
                String::new()
            }
        }
    }

    /// Comments for `username`; empty when the user has none.
    pub fn comments(&self, username: &str) -> BTreeMap<String, String> {
        self.user_configs
            .get(username)
            .map(|config| config.comments.clone())
            .unwrap_or_default()
    }

    /// Set a trimmed comment. Blank comments are rejected and `false` returned.
    pub fn set_comment(&mut self, username: &str, repo: &str, comment: &str) -> bool {
        let comment = comment.trim();
        if comment.is_empty() {
            return false;
        }
        self.user_configs
            .entry(username.to_string())
            .or_default()
            .comments
            .insert(repo.to_string(), comment.to_string());
        true
    }

    /// Remove a comment, returning whether one existed.
    pub fn remove_comment(&mut self, username: &str, repo: &str) -> bool {
        self.user_configs
            .get_mut(username)
            .map(|config| config.comments.remove(repo).is_some())
            .unwrap_or(false)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// JSON-file backed profile storage.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.profile_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile. Missing or unreadable files yield the defaults.
    pub fn load(&self) -> Profile {
        if !self.path.exists() {
            return Profile::default();
        }

        let parsed = std::fs::read_to_string(&self.path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str::<Profile>(&content).map_err(anyhow::Error::from));

        match parsed {
            Ok(profile) => profile,
            Err(e) => {
                warn!("⚠️  Ignoring unreadable profile {}: {e}", self.path.display());
                Profile::default()
            }
        }
    }

    /// Write the profile, creating parent directories as needed.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create profile directory: {}", parent.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write profile: {}", self.path.display()))?;

        info!("💾 Saved profile to {}", self.path.display());
        Ok(())
    }

    /// Load, apply `change`, and save.
    pub fn update<R>(&self, change: impl FnOnce(&mut Profile) -> R) -> Result<R> {
        let mut profile = self.load();
        let result = change(&mut profile);
        self.save(&profile)?;
        Ok(result)
    }
}
