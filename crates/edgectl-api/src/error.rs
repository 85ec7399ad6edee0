use thiserror::Error;

/// Top-level error type for the `edgectl-api` crate.
///
/// Covers every failure mode of the REST surfaces: session handling,
/// transport, server-side rejections, and response decoding.
/// `edgectl-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend answered 401. The session has already been cleared
    /// and the unauthorized hook has fired by the time this is returned.
    #[error("Session expired -- re-authentication required")]
    Unauthorized,

    /// Token could not be read or written by the session store.
    #[error("Session storage error: {0}")]
    Session(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS or client-builder failure.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-success response. `message` carries the server-supplied text
    /// when the body had any, otherwise the HTTP status line.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        body: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status of a server rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text the server put in the error body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                message,
                body: Some(_),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_requires_body() {
        let with_body = Error::Api {
            status: 400,
            message: "name is required".into(),
            body: Some("name is required".into()),
        };
        let without_body = Error::Api {
            status: 500,
            message: "500 Internal Server Error".into(),
            body: None,
        };

        assert_eq!(with_body.server_message(), Some("name is required"));
        assert_eq!(without_body.server_message(), None);
        assert_eq!(without_body.status(), Some(500));
    }

    #[test]
    fn not_found_and_unauthorized_status() {
        let nf = Error::Api {
            status: 404,
            message: "not found".into(),
            body: None,
        };
        assert!(nf.is_not_found());
        assert!(!Error::Unauthorized.is_not_found());
        assert_eq!(Error::Unauthorized.status(), Some(401));
    }
}
