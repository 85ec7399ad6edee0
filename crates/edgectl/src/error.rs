//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use edgectl_config::ConfigError;
use edgectl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(edgectl::connection_failed),
        help(
            "Check that the console is running and reachable: {reason}\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(edgectl::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login failed: {message}")]
    #[diagnostic(
        code(edgectl::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             Store a password with: edgectl config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("Not logged in to profile '{profile}'")]
    #[diagnostic(code(edgectl::not_logged_in), help("run `edgectl login`"))]
    NotLoggedIn { profile: String },

    #[error("Session expired")]
    #[diagnostic(code(edgectl::session_expired), help("run `edgectl login`"))]
    SessionExpired,

    #[error("No username configured for profile '{profile}'")]
    #[diagnostic(
        code(edgectl::no_credentials),
        help(
            "Pass --username, set EDGECTL_USERNAME, or run:\n\
             edgectl config set username <name>"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(edgectl::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(edgectl::api_error))]
    Api { message: String, status: Option<u16> },

    /// A view operation failed; its notifications were the only report.
    #[error("{message}")]
    #[diagnostic(code(edgectl::operation_failed))]
    OperationFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(edgectl::validation))]
    Validation { field: String, reason: String },

    #[error("Payload does not match the {kind} schema")]
    #[diagnostic(code(edgectl::schema), help("{details}"))]
    SchemaViolation { kind: String, details: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(edgectl::misconfigured),
        help("Update the profile with: edgectl config set <key> <value>")
    )]
    Misconfigured { message: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(edgectl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: edgectl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(edgectl::no_config),
        help(
            "Create one with: edgectl config init\n\
             Expected at: {path}\n\
             Or pass --controller for a one-off command."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(edgectl::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(edgectl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(edgectl::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(edgectl::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. }
            | Self::NotLoggedIn { .. }
            | Self::SessionExpired
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Api {
                status: Some(403), ..
            } => exit_code::PERMISSION,
            Self::Api {
                status: Some(409), ..
            } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::SchemaViolation { .. }
            | Self::Misconfigured { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SessionExpired => CliError::SessionExpired,

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                profile: "current".into(),
                message,
            },

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound { message } => CliError::NotFound { message },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            ref api @ CoreError::Api { status, .. } => CliError::Api {
                message: api.user_message(),
                status,
            },

            CoreError::Config { message } => CliError::Misconfigured { message },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            other => CliError::Config(other),
        }
    }
}
