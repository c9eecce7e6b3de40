//! CLI error types with miette diagnostics.
//!
//! Maps `ConfigError` and `CoreError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use chamberlain_config::ConfigError;
use chamberlain_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CONFIG: i32 = 78;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration")]
    #[diagnostic(
        code(chamberlain::config),
        help(
            "Check {path}\n\
             or override settings with CHAMBERLAIN_* environment variables."
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("No password found for '{username}'")]
    #[diagnostic(
        code(chamberlain::no_credentials),
        help(
            "Set `password_env` or `password` in the config file,\n\
             or store it in the system keyring (service 'chamberlain', account '{username}')."
        )
    )]
    NoCredentials { username: String },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(chamberlain::auth_failed),
        help("Verify the MyQ username and password.")
    )]
    AuthFailed { message: String },

    #[error("Could not reach the MyQ service at {url}")]
    #[diagnostic(
        code(chamberlain::connection_failed),
        help("Check network access and the `api_url` setting.\nReason: {reason}")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Remote request timed out")]
    #[diagnostic(
        code(chamberlain::timeout),
        help("Raise `timeout` in the config file if the service is slow.")
    )]
    Timeout,

    #[error(transparent)]
    #[diagnostic(code(chamberlain::remote))]
    Core(CoreError),

    // ── Local ────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    #[diagnostic(code(chamberlain::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn config(path: impl Into<String>, source: ConfigError) -> Self {
        match source {
            ConfigError::NoCredentials { username } => Self::NoCredentials { username },
            source => Self::Config {
                path: path.into(),
                source,
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::NoCredentials { .. } => exit_code::CONFIG,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Core(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            other => Self::Core(other),
        }
    }
}

impl From<chamberlain_api::Error> for CliError {
    fn from(err: chamberlain_api::Error) -> Self {
        CoreError::from(err).into()
    }
}
