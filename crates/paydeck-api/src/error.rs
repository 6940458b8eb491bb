use thiserror::Error;

/// Top-level error type for the `paydeck-api` crate.
///
/// Covers every failure mode of the back-office API surface: transport,
/// authentication, validation, and payload decoding. `paydeck-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials were rejected outright (bad token, disabled account).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The session token has expired or been revoked (HTTP 401).
    ///
    /// Consumers route this to a dedicated "session expired" surface,
    /// never the generic error path.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// The token is valid but lacks permission for this operation (HTTP 403).
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Field-level validation rejection (HTTP 400/422), flattened from
    /// the API's error body into display-ready messages.
    #[error("Validation failed: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    /// Any other non-success response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is no longer valid
    /// and the user must re-authenticate.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying manually.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}

// ── Error body flattening ───────────────────────────────────────────

/// Flatten an API error body into human-readable messages.
///
/// The back office emits several shapes:
/// - `{"detail": "Not found."}`
/// - `{"amount": ["Must be positive."], "currency": ["Unknown code."]}`
/// - `{"non_field_errors": ["Cancellation already decided."]}`
/// - bare arrays of strings
///
/// Returns `None` when the body is not JSON in any of those shapes; the
/// caller then falls back to the raw text or the HTTP status line.
pub(crate) fn flatten_error_body(raw: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let mut messages = Vec::new();
    collect_messages(None, &value, &mut messages);
    if messages.is_empty() {
        None
    } else {
        Some(messages)
    }
}

fn collect_messages(field: Option<&str>, value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => match field {
            // "detail" and "non_field_errors" are envelope keys, not fields
            Some("detail" | "non_field_errors") | None => out.push(s.clone()),
            Some(name) => out.push(format!("{name}: {s}")),
        },
        serde_json::Value::Array(items) => {
            for item in items {
                collect_messages(field, item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for (key, inner) in map {
                collect_messages(Some(key), inner, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn detail_body_yields_single_message() {
        let msgs = flatten_error_body(r#"{"detail": "Not found."}"#).unwrap();
        assert_eq!(msgs, vec!["Not found."]);
    }

    #[test]
    fn field_errors_are_prefixed_with_field_name() {
        let msgs =
            flatten_error_body(r#"{"amount": ["Must be positive.", "Too large."]}"#).unwrap();
        assert_eq!(msgs, vec!["amount: Must be positive.", "amount: Too large."]);
    }

    #[test]
    fn non_field_errors_are_not_prefixed() {
        let msgs =
            flatten_error_body(r#"{"non_field_errors": ["Cancellation already decided."]}"#)
                .unwrap();
        assert_eq!(msgs, vec!["Cancellation already decided."]);
    }

    #[test]
    fn nested_field_errors_flatten() {
        let msgs = flatten_error_body(r#"{"config": {"rate": ["Out of range."]}}"#).unwrap();
        assert_eq!(msgs, vec!["rate: Out of range."]);
    }

    #[test]
    fn bare_array_flattens() {
        let msgs = flatten_error_body(r#"["First problem.", "Second problem."]"#).unwrap();
        assert_eq!(msgs, vec!["First problem.", "Second problem."]);
    }

    #[test]
    fn non_json_body_yields_none() {
        assert!(flatten_error_body("<html>502 Bad Gateway</html>").is_none());
    }

    #[test]
    fn json_without_strings_yields_none() {
        assert!(flatten_error_body(r#"{"code": 42}"#).is_none());
    }
}
