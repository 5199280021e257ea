//! Layered settings
//!
//! Defaults, then `cafe.toml` at the repository root (or the user config
//! file when the repository has none), then `.env`, then the process
//! environment. Later layers win.

use crate::error::{Error, Result};
use crate::platform::parse_repo_slug;
use crate::types::{Backend, PlatformConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file looked up at the repository root
pub const CONFIG_FILE: &str = "cafe.toml";

/// Dotenv file looked up at the repository root
pub const ENV_FILE: &str = ".env";

/// Web server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    /// Listen address
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

/// All settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Target repository, `owner/repo`
    pub repo: Option<String>,
    /// Branch PRs target
    pub base_branch: String,
    /// Git remote to push to
    pub remote: String,
    /// Ref the base branch is reset to
    pub base_ref: String,
    /// How PR operations reach GitHub
    pub backend: Backend,
    /// Status check the ruleset requires
    pub required_check: String,
    /// Web server settings
    pub server: ServerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo: None,
            base_branch: "main".to_string(),
            remote: "origin".to_string(),
            base_ref: "demo-base".to_string(),
            backend: Backend::default(),
            required_check: "test".to_string(),
            server: ServerSettings::default(),
        }
    }
}

impl Settings {
    /// Parse a settings file body
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.message().to_string()))
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(repo) = get("REPO") {
            self.repo = Some(repo);
        }
        if let Some(branch) = get("CAFE_BASE_BRANCH") {
            self.base_branch = branch;
        }
        if let Some(remote) = get("CAFE_REMOTE") {
            self.remote = remote;
        }
        if let Some(base_ref) = get("CAFE_BASE_REF") {
            self.base_ref = base_ref;
        }
        if let Some(backend) = get("CAFE_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(check) = get("CAFE_REQUIRED_CHECK") {
            self.required_check = check;
        }
        if let Some(bind) = get("CAFE_BIND") {
            self.server.bind = bind;
        }
        Ok(())
    }

    /// Platform config for the target repository
    pub fn platform_config(&self) -> Result<PlatformConfig> {
        let repo = self.repo.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "REPO is not set; add it to {ENV_FILE} or {CONFIG_FILE} (e.g. REPO=owner/merge-queue-cafe)"
            ))
        })?;
        parse_repo_slug(repo)
    }
}

/// User-level settings file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mq-cafe").join("config.toml"))
}

/// Load settings for the repository at `root`
///
/// `explicit` replaces the file lookup and must exist.
pub fn load_settings(root: &Path, explicit: Option<&Path>) -> Result<Settings> {
    let file = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let repo_file = root.join(CONFIG_FILE);
            if repo_file.is_file() {
                Some(repo_file)
            } else {
                user_config_path().filter(|p| p.is_file())
            }
        }
    };

    let mut settings = match &file {
        Some(path) => {
            debug!(path = %path.display(), "loading settings");
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("failed to read {}: {e}", path.display()))
            })?;
            Settings::from_toml(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        }
        None => Settings::default(),
    };

    let env_file = root.join(ENV_FILE);
    if env_file.is_file() {
        debug!(path = %env_file.display(), "loading dotenv");
        dotenvy::from_path(&env_file)
            .map_err(|e| Error::Config(format!("failed to load {}: {e}", env_file.display())))?;
    }

    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}
