//! Configuration management for the TIDAL favorites tool.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every endpoint has a default, so the tool
//! works without any configuration as long as a credentials INI file is
//! supplied. The client id and secret are only needed for the interactive
//! device login and for refreshing tokens.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.tidal.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://auth.tidal.com/v1/oauth2";
pub const DEFAULT_IMAGE_URL: &str = "https://resources.tidal.com/images";
pub const DEFAULT_SCOPE: &str = "r_usr w_usr w_sub";

/// Snapshot file name used by both backup and restore when `--filename` is absent.
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "tidal_favorites.json";

/// Directory backups and cover images are written to when `--dir` is absent.
pub const DEFAULT_BACKUP_DIR: &str = "backup";

/// Loads environment variables from `.env` in the local data directory.
///
/// The file is looked up at:
/// - Linux: `~/.local/share/tidalfav/.env`
/// - macOS: `~/Library/Application Support/tidalfav/.env`
/// - Windows: `%LOCALAPPDATA%/tidalfav/.env`
///
/// Returns `Ok(false)` when there is no such file, `Ok(true)` once it has been
/// loaded.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub async fn load_env() -> Result<bool, String> {
    let path = env_path();
    if !path.is_file() {
        return Ok(false);
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(true)
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tidalfav/.env");
    path
}

/// Endpoints and client registration used to talk to TIDAL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub api_url: String,
    pub auth_url: String,
    pub image_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            client_id: None,
            client_secret: None,
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl ApiSettings {
    /// Reads the settings from the process environment, falling back to the
    /// built-in defaults for anything unset or empty.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: var("TIDAL_API_URL").unwrap_or(defaults.api_url),
            auth_url: var("TIDAL_AUTH_URL").unwrap_or(defaults.auth_url),
            image_url: var("TIDAL_IMAGE_URL").unwrap_or(defaults.image_url),
            client_id: var("TIDAL_CLIENT_ID"),
            client_secret: var("TIDAL_CLIENT_SECRET"),
            scope: var("TIDAL_SCOPE").unwrap_or(defaults.scope),
        }
    }

    /// Returns the client id, or an error naming the variable to set.
    pub fn require_client_id(&self) -> Result<&str, String> {
        self.client_id
            .as_deref()
            .ok_or_else(|| "TIDAL_CLIENT_ID must be set".to_string())
    }

    /// Returns the client secret, or an error naming the variable to set.
    pub fn require_client_secret(&self) -> Result<&str, String> {
        self.client_secret
            .as_deref()
            .ok_or_else(|| "TIDAL_CLIENT_SECRET must be set".to_string())
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let settings = ApiSettings::default();
        assert_eq!(settings.api_url, "https://api.tidal.com/v1");
        assert_eq!(settings.scope, "r_usr w_usr w_sub");
        assert!(settings.client_id.is_none());
    }

    #[test]
    fn missing_client_credentials_are_reported() {
        let settings = ApiSettings::default();
        assert_eq!(
            settings.require_client_id().unwrap_err(),
            "TIDAL_CLIENT_ID must be set"
        );
        assert!(settings.require_client_secret().is_err());
    }
}
