//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use paydeck_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the back office")]
    #[diagnostic(
        code(paydeck::connection_failed),
        help(
            "Check that the API is reachable and the base URL is correct.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Session expired")]
    #[diagnostic(
        code(paydeck::session_expired),
        help(
            "The API token was rejected. Issue a fresh token and store it with:\n\
             paydeck config set-token --profile {profile}"
        )
    )]
    SessionExpired { profile: String },

    #[error("Permission denied: {message}")]
    #[diagnostic(code(paydeck::forbidden))]
    Forbidden { message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(paydeck::no_token),
        help(
            "Store one with: paydeck config set-token --profile {profile}\n\
             Or set the PAYDECK_TOKEN environment variable."
        )
    )]
    NoToken { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(paydeck::not_found),
        help("Run: paydeck {list_command} to see available records")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("The back office rejected the request: {message}")]
    #[diagnostic(code(paydeck::rejected))]
    Rejected { message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(paydeck::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(paydeck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(paydeck::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No configuration found")]
    #[diagnostic(
        code(paydeck::no_config),
        help(
            "Pass --api-url and --token, or create a config file at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(paydeck::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(paydeck::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(paydeck::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::SessionExpired { .. } | Self::NoToken { .. } => exit_code::AUTH,
            Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },

            CoreError::AuthExpired => Self::SessionExpired {
                profile: "current".into(),
            },

            CoreError::Forbidden { message } => Self::Forbidden { message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: format!("{entity_type}s list"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Rejected { message } => Self::Rejected { message },

            CoreError::Api { message, .. } => Self::ApiError { message },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => Self::ApiError { message },
        }
    }
}

impl From<paydeck_config::ConfigError> for CliError {
    fn from(err: paydeck_config::ConfigError) -> Self {
        match err {
            paydeck_config::ConfigError::NoToken { profile } => Self::NoToken { profile },
            paydeck_config::ConfigError::Validation { field, reason } => {
                Self::Validation { field, reason }
            }
            paydeck_config::ConfigError::Figment(e) => Self::Config(e),
            paydeck_config::ConfigError::Io(e) => Self::Io(e),
            paydeck_config::ConfigError::Serialization(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}
