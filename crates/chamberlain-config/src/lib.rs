//! Configuration for the chamberlain bridge.
//!
//! TOML file + environment loading, credential resolution (env + plaintext
//! + keyring), and translation to `chamberlain_core::AccessoryConfig` and
//! `chamberlain_api::ClientConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use chamberlain_api::{ClientConfig, TransportConfig};
use chamberlain_core::{AccessoryConfig, PollConfig, ProtocolCodes};

const KEYRING_SERVICE: &str = "chamberlain";
const ENV_PREFIX: &str = "CHAMBERLAIN_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("missing required setting '{field}'")]
    Missing { field: String },

    #[error("no password configured for user '{username}'")]
    NoCredentials { username: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Accessory display name.
    #[serde(default = "default_name")]
    pub name: String,

    /// MyQ device identifier.
    pub device_id: Option<String>,

    /// MyQ account username.
    pub username: Option<String>,

    /// Password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Service root URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub poll: PollSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            device_id: None,
            username: None,
            password: None,
            password_env: None,
            api_url: default_api_url(),
            timeout: default_timeout(),
            poll: PollSettings::default(),
        }
    }
}

/// Reconciliation loop cadence, in milliseconds.
#[derive(Debug, Deserialize, Serialize)]
pub struct PollSettings {
    #[serde(default = "default_active_ms")]
    pub active_ms: u64,

    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            active_ms: default_active_ms(),
            idle_ms: default_idle_ms(),
        }
    }
}

fn default_name() -> String {
    "Garage Door".into()
}
fn default_api_url() -> String {
    "https://myqexternal.myqdevice.com".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_active_ms() -> u64 {
    2_000
}
fn default_idle_ms() -> u64 {
    10_000
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "chamberlain", "chamberlain").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("chamberlain");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then `CHAMBERLAIN_*` variables.
///
/// Nested keys use a double underscore: `CHAMBERLAIN_POLL__IDLE_MS`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the config from `path`, or from [`config_path`] when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

impl Config {
    fn require<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str, ConfigError> {
        value
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: field.into(),
            })
    }

    /// Resolve the account password.
    ///
    /// Order: `password_env` variable, plaintext `password`, system keyring
    /// entry for the username.
    pub fn resolve_password(&self) -> Result<SecretString, ConfigError> {
        let username = Self::require(self.username.as_ref(), "username")?;

        // 1. Named env var
        if let Some(ref env_name) = self.password_env {
            if let Ok(val) = std::env::var(env_name) {
                return Ok(SecretString::from(val));
            }
        }

        // 2. Plaintext in config
        if let Some(ref pw) = self.password {
            return Ok(SecretString::from(pw.clone()));
        }

        // 3. System keyring
        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, username) {
            if let Ok(pw) = entry.get_password() {
                return Ok(SecretString::from(pw));
            }
        }

        Err(ConfigError::NoCredentials {
            username: username.into(),
        })
    }

    // ── Translation ─────────────────────────────────────────────────

    /// Build the accessory settings.
    pub fn accessory_config(&self) -> Result<AccessoryConfig, ConfigError> {
        if self.poll.active_ms == 0 {
            return Err(ConfigError::Validation {
                field: "poll.active_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.poll.idle_ms == 0 {
            return Err(ConfigError::Validation {
                field: "poll.idle_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(AccessoryConfig {
            name: self.name.clone(),
            codes: ProtocolCodes::default(),
            poll: PollConfig {
                active_delay: Duration::from_millis(self.poll.active_ms),
                idle_delay: Duration::from_millis(self.poll.idle_ms),
            },
        })
    }

    /// Build the remote client settings, resolving credentials.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let device_id = Self::require(self.device_id.as_ref(), "device_id")?;
        let username = Self::require(self.username.as_ref(), "username")?;

        let base_url: url::Url = self.api_url.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", self.api_url),
        })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be greater than zero".into(),
            });
        }

        let password = self.resolve_password()?;

        Ok(ClientConfig {
            base_url,
            device_id: device_id.into(),
            username: username.into(),
            password,
            transport: TransportConfig::default()
                .with_timeout(Duration::from_secs(self.timeout)),
        })
    }
}
