// ── Core error types ──
//
// User-facing errors from edgectl-core. Front ends never match on HTTP
// details directly. The `From<edgectl_api::Error>` impl translates
// transport-layer errors into domain variants while keeping any text
// the server sent.

use thiserror::Error;

/// Suffix appended when the backend gave no reason of its own.
pub const TRY_AGAIN_LATER: &str = "Please try again later.";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Session expired -- log in again")]
    SessionExpired,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{message}")]
    NotFound { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
        /// Whether `message` is text the server sent.
        from_server: bool,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Text for a toast: the server's own words when it sent any,
    /// otherwise this error followed by "Please try again later."
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message,
                from_server: true,
                ..
            }
            | Self::NotFound { message }
            | Self::Validation { message } => message.clone(),
            _ => format!("{self}. {TRY_AGAIN_LATER}"),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<edgectl_api::Error> for CoreError {
    fn from(err: edgectl_api::Error) -> Self {
        use edgectl_api::Error as ApiError;

        match err {
            ApiError::Unauthorized => CoreError::SessionExpired,
            ApiError::Session(message) => CoreError::Internal(message),
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                        from_server: false,
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::Api {
                status: 404,
                message,
                body,
            } => CoreError::NotFound {
                message: if body.is_some() {
                    message
                } else {
                    "Not found".into()
                },
            },
            ApiError::Api {
                status,
                message,
                body,
            } => CoreError::Api {
                message,
                status: Some(status),
                from_server: body.is_some(),
            },
            ApiError::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("unexpected response: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_text_wins_over_generic_suffix() {
        let err = CoreError::from(edgectl_api::Error::Api {
            status: 409,
            message: "app already deployed".into(),
            body: Some(r#"{"message":"app already deployed"}"#.into()),
        });
        assert_eq!(err.user_message(), "app already deployed");
    }

    #[test]
    fn bodiless_failure_gets_try_again_later() {
        let err = CoreError::from(edgectl_api::Error::Api {
            status: 503,
            message: "503 Service Unavailable".into(),
            body: None,
        });
        assert_eq!(
            err.user_message(),
            "503 Service Unavailable. Please try again later."
        );
    }

    #[test]
    fn unparseable_response_hides_the_body() {
        let err = CoreError::from(edgectl_api::Error::Deserialization {
            message: "expected value at line 1 column 1".into(),
            body: "<html><body>secret-token-page</body></html>".into(),
        });
        let text = err.user_message();
        assert!(!text.contains("secret-token-page"), "got: {text}");
        assert_eq!(
            text,
            "Internal error: unexpected response: expected value at line 1 column 1. \
             Please try again later."
        );
    }

    #[test]
    fn unauthorized_becomes_session_expired() {
        let err = CoreError::from(edgectl_api::Error::Unauthorized);
        assert!(err.is_session_expired());
    }
}
