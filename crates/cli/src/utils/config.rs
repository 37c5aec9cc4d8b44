//! Settings file and session token storage
//!
//! Everything lives in one directory: `$SF_HOME` when set, otherwise
//! `~/.simpleflags`. The directory is created on first use.

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "https://api.simpleflags.io/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SETTINGS_FILE: &str = "settings.yaml";
const AUTH_FILE: &str = "auth.data";

/// Persisted defaults, written by `sf set` and `sf key --set-env`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Resolve the settings directory, creating it when missing.
pub fn settings_dir() -> CliResult<PathBuf> {
    let dir = match std::env::var_os("SF_HOME").filter(|v| !v.is_empty()) {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .ok_or_else(|| CliError::Settings("cannot determine home directory".to_string()))?
            .join(".simpleflags"),
    };
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| {
            CliError::Settings(format!("Failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(dir)
}

pub fn settings_path() -> CliResult<PathBuf> {
    Ok(settings_dir()?.join(SETTINGS_FILE))
}

pub fn auth_path() -> CliResult<PathBuf> {
    Ok(settings_dir()?.join(AUTH_FILE))
}

/// Keep a value only when it is non-empty
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn env_value(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

impl Settings {
    /// Load the settings file; a missing file yields empty settings.
    pub fn load() -> CliResult<Self> {
        Self::load_from(&settings_path()?)
    }

    pub fn load_from(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| CliError::Settings(format!("Failed to parse {}: {e}", path.display())))
    }

    pub fn save(&self) -> CliResult<()> {
        self.save_to(&settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> CliResult<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CliError::Settings(format!("Failed to serialize settings: {e}")))?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// `SF_URL`, then the settings file, then the built-in default
    pub fn server_url(&self) -> String {
        env_value("SF_URL")
            .or_else(|| non_empty(self.server_url.clone()))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// `SF_API_KEY`, then the settings file
    pub fn api_key(&self) -> Option<String> {
        env_value("SF_API_KEY").or_else(|| non_empty(self.api_key.clone()))
    }

    pub fn key_type(&self) -> Option<String> {
        env_value("SF_KEY_TYPE").or_else(|| non_empty(self.key_type.clone()))
    }

    /// Overall deadline for one command
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Command-line value (clap already merged `SF_ACCOUNT`), else the file
    pub fn account_or(&self, flag: Option<&str>) -> Option<String> {
        non_empty(flag.map(str::to_string)).or_else(|| non_empty(self.account.clone()))
    }

    pub fn project_or(&self, flag: Option<&str>) -> Option<String> {
        non_empty(flag.map(str::to_string)).or_else(|| non_empty(self.project.clone()))
    }
}

/// Apply one `sf set` update: `None` leaves the field alone, an empty value
/// removes it.
pub fn apply_setting(field: &mut Option<String>, update: Option<&str>) {
    if let Some(value) = update {
        *field = non_empty(Some(value.to_string()));
    }
}

pub fn read_token() -> CliResult<Option<String>> {
    let path = auth_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let token = fs::read_to_string(&path)?;
    Ok(non_empty(Some(token.trim().to_string())))
}

pub fn write_token(token: &str) -> CliResult<()> {
    fs::write(auth_path()?, token)?;
    Ok(())
}

/// Remove the stored session; returns whether one existed.
pub fn remove_token() -> CliResult<bool> {
    let path = auth_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
