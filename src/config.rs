//! Configuration for locating the `security` tool and the target keychain.

use crate::error::{KeychainError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the macOS `security` command
pub const DEFAULT_SECURITY_PATH: &str = "/usr/bin/security";

/// Config file name looked up under `<config_dir>/kodegen/`
pub const CONFIG_FILE_NAME: &str = "keychain.toml";

/// Keychain tooling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Path to the `security` executable
    #[serde(default = "default_security_path")]
    pub security_path: PathBuf,

    /// Keychain used when a command does not name one
    #[serde(default)]
    pub default_keychain: Option<PathBuf>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            security_path: default_security_path(),
            default_keychain: None,
        }
    }
}

impl SecurityConfig {
    /// Parse a TOML document, expanding `~` in configured paths.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.expanded()
    }

    /// Load configuration from a TOML file.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    /// Load from `explicit` if given, else from the user config directory
    /// when the file exists, else defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path).await;
        }

        match default_config_path() {
            Some(path) => Self::load_or_default(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Load `path` when it exists; otherwise, or when its existence cannot
    /// be determined, fall back to defaults.
    async fn load_or_default(path: &Path) -> Result<Self> {
        match tokio::fs::try_exists(path).await {
            Ok(true) => {
                tracing::debug!(path = %path.display(), "loading keychain config");
                Self::from_file(path).await
            }
            Ok(false) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config not readable, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve the keychain for a command: the explicit one (with `~`
    /// expanded), else the default.
    pub fn keychain_or_default(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return expand_tilde(path);
        }
        self.default_keychain.clone().ok_or_else(|| {
            KeychainError::InvalidConfig(
                "No keychain given and no default_keychain configured".to_string(),
            )
        })
    }

    fn expanded(mut self) -> Result<Self> {
        self.security_path = expand_tilde(&self.security_path)?;
        if let Some(keychain) = self.default_keychain.take() {
            self.default_keychain = Some(expand_tilde(&keychain)?);
        }
        Ok(self)
    }
}

/// `<config_dir>/kodegen/keychain.toml`, if a config directory exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kodegen").join(CONFIG_FILE_NAME))
}

/// Expand a leading `~`, failing when it cannot be resolved.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| KeychainError::InvalidPath(path.display().to_string()))?;
    let expanded = shellexpand::tilde(raw).to_string();

    // shellexpand leaves ~ untouched when HOME is unset and never expands ~user
    if raw.starts_with('~') && expanded.starts_with('~') {
        return Err(KeychainError::InvalidConfig(format!(
            "Could not expand ~ in {raw}: only a leading ~/ is supported and it \
             requires HOME to be set. Use an absolute path."
        )));
    }

    Ok(PathBuf::from(expanded))
}

fn default_security_path() -> PathBuf {
    PathBuf::from(DEFAULT_SECURITY_PATH)
}
