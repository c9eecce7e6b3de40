// ── Core error types ──
//
// Domain errors from chamberlain-core. Consumers never see HTTP status
// codes or JSON parse failures directly. The `From<chamberlain_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach remote service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Remote request timed out")]
    Timeout,

    // ── Remote errors (wrapped, not exposed raw) ─────────────────────
    #[error("Remote error: {message}")]
    Remote {
        message: String,
        /// The service return code, if the envelope carried one.
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── State errors ─────────────────────────────────────────────────
    #[error("Remote reported unknown door state code {code}")]
    UnknownDoorState { code: i64 },

    #[error("Value {value} is not a valid target door state")]
    InvalidTarget { value: u8 },

    #[error("Property {property} is read-only")]
    ReadOnly { property: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<chamberlain_api::Error> for CoreError {
    fn from(err: chamberlain_api::Error) -> Self {
        use chamberlain_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Remote {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            ApiError::Api {
                message,
                code,
                status,
            } => CoreError::Remote {
                message,
                code,
                status,
            },
            ApiError::Deserialization { message, body: _ } => CoreError::Remote {
                message: format!("Unexpected response: {message}"),
                code: None,
                status: None,
            },
        }
    }
}
