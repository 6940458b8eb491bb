// ── Core error types ──
//
// User-facing errors from paydeck-core. Consumers never see raw reqwest
// errors or JSON parse failures directly; the `From<paydeck_api::Error>`
// impl translates transport-layer errors into display-ready variants.

use thiserror::Error;

/// User-facing error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the back office: {reason}")]
    ConnectionFailed { reason: String },

    /// The session is no longer valid. UIs route this to the dedicated
    /// session-expired surface, never the generic error banner.
    #[error("Session expired -- sign in again")]
    AuthExpired,

    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api { status: u16, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if the user must re-authenticate.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }

    /// Attach entity context to a bare 404.
    pub(crate) fn or_not_found(self, entity_type: &str, identifier: &str) -> Self {
        match self {
            Self::Api { status: 404, .. } => Self::NotFound {
                entity_type: entity_type.to_owned(),
                identifier: identifier.to_owned(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<paydeck_api::Error> for CoreError {
    fn from(err: paydeck_api::Error) -> Self {
        use paydeck_api::Error as ApiError;

        match err {
            ApiError::SessionExpired | ApiError::Authentication { .. } => Self::AuthExpired,

            ApiError::Forbidden { message } => Self::Forbidden { message },

            ApiError::Transport(e) => {
                let reason = if e.is_timeout() {
                    "request timed out".to_owned()
                } else if e.is_connect() {
                    format!("connection failed: {e}")
                } else {
                    e.to_string()
                };
                Self::ConnectionFailed { reason }
            }

            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("invalid base URL: {e}"),
            },

            ApiError::Tls(message) => Self::ConnectionFailed { reason: message },

            ApiError::Validation { messages } => Self::ValidationFailed {
                message: messages.join("; "),
            },

            ApiError::Api { status: 409, message } => Self::Rejected { message },

            ApiError::Api { status, message } => Self::Api { status, message },

            ApiError::Deserialization { message, .. } => {
                Self::Internal(format!("unexpected response shape: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_maps_to_auth_path() {
        let err = CoreError::from(paydeck_api::Error::SessionExpired);
        assert!(err.is_auth_expired());
    }

    #[test]
    fn validation_messages_join() {
        let err = CoreError::from(paydeck_api::Error::Validation {
            messages: vec!["amount: too large".into(), "notes: blank".into()],
        });
        assert_eq!(
            err.to_string(),
            "Validation failed: amount: too large; notes: blank"
        );
    }

    #[test]
    fn bare_404_gains_entity_context() {
        let err = CoreError::from(paydeck_api::Error::Api {
            status: 404,
            message: "Not found.".into(),
        })
        .or_not_found("transaction", "TX-9");
        assert_eq!(err.to_string(), "transaction 'TX-9' not found");
    }
}
