use thiserror::Error;

/// Top-level error type for the `chamberlain-api` crate.
///
/// Covers transport failures, rejected credentials, and envelope-level
/// errors reported by the MyQ service. `chamberlain-core` maps these into
/// domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The service rejected the supplied credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Service ─────────────────────────────────────────────────────
    /// The service answered, but reported a failure.
    ///
    /// `code` is the envelope `ReturnCode` when one was present.
    #[error("MyQ API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body did not match the expected shape.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the credentials were rejected.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => *status == Some(401),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api {
                status: Some(status),
                ..
            } => *status >= 500,
            _ => false,
        }
    }

    /// Extract the envelope return code, if available.
    pub fn return_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Api {
            message: "bad gateway".into(),
            code: None,
            status: Some(502),
        };
        assert!(err.is_transient());
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn envelope_errors_expose_return_code() {
        let err = Error::Api {
            message: "device offline".into(),
            code: Some("-3333".into()),
            status: Some(200),
        };
        assert_eq!(err.return_code(), Some("-3333"));
        assert!(!err.is_transient());
    }

    #[test]
    fn unauthorized_status_is_auth_failure() {
        let err = Error::Api {
            message: "nope".into(),
            code: None,
            status: Some(401),
        };
        assert!(err.is_auth_failure());
        assert!(
            Error::Authentication {
                message: "bad password".into()
            }
            .is_auth_failure()
        );
    }
}
