use thiserror::Error;

/// Top-level error type for the `vegadns-api` crate.
///
/// Nothing is retried or recovered inside the client: every failure is
/// returned to the caller with the operation name and, where the API
/// answered, the status code and raw body.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, TLS, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API responses ───────────────────────────────────────────────
    /// The API answered, but not with the status the operation expects.
    #[error("bad answer from VegaDNS during {operation} (HTTP {status}): {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("malformed response during {operation}: {message}")]
    MalformedResponse {
        operation: &'static str,
        message: String,
        body: String,
    },

    // ── Authentication ──────────────────────────────────────────────
    /// No usable credentials for the requested auth flow.
    #[error("Authentication unavailable: {message}")]
    AuthenticationUnavailable { message: String },

    /// The token endpoint issued something other than a bearer token.
    #[error("unsupported token type '{token_type}' (only bearer tokens are supported)")]
    UnsupportedTokenType { token_type: String },

    // ── Lookups ─────────────────────────────────────────────────────
    /// A domain, record, or auth zone search had no match.
    #[error("{entity} '{identifier}' not found")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    ///
    /// Covers both client-side lookups that found nothing and a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::UnexpectedStatus { status: 404, .. }
        )
    }

    /// Returns `true` if this error came from missing, rejected, or
    /// unusable credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationUnavailable { .. }
                | Self::UnsupportedTokenType { .. }
                | Self::UnexpectedStatus {
                    status: 401 | 403,
                    ..
                }
        )
    }

    /// Returns `true` if this is a transient error worth retrying at a
    /// higher layer.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status reported by the API, if it answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
