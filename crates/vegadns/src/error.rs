//! CLI error types with miette diagnostics.
//!
//! Maps library errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use vegadns_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the VegaDNS API")]
    #[diagnostic(
        code(vegadns::connection_failed),
        help(
            "Check that the API is running and reachable.\n\
             Try a longer --timeout, or --insecure (-k) for self-signed certificates."
        )
    )]
    ConnectionFailed {
        #[source]
        source: vegadns_api::Error,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(vegadns::tls_error),
        help("Check ca_cert in your profile, or use --insecure (-k).")
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed for profile '{profile}'")]
    #[diagnostic(
        code(vegadns::auth_failed),
        help(
            "The API said: {message}\n\
             Verify the credentials with: vegadns config show"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No {secret} configured for profile '{profile}'")]
    #[diagnostic(
        code(vegadns::no_credentials),
        help(
            "Pass it with a flag, set VEGADNS_PASSWORD / VEGADNS_API_SECRET,\n\
             or store it in the system keyring under service 'vegadns'."
        )
    )]
    NoCredentials {
        profile: String,
        secret: &'static str,
    },

    #[error("Profile '{profile}' mixes basic auth and OAuth credentials")]
    #[diagnostic(
        code(vegadns::conflicting_credentials),
        help("Use either username/password or api_key/api_secret, not both.")
    )]
    ConflictingCredentials { profile: String },

    #[error("'{operation}' requires {required}")]
    #[diagnostic(code(vegadns::unsupported))]
    Unsupported {
        operation: String,
        required: String,
    },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(vegadns::not_found),
        help("Run: vegadns {list_command}")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{operation} failed with HTTP {status}")]
    #[diagnostic(code(vegadns::api_error), help("Response body: {body}"))]
    ApiError {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("{operation}: unexpected response ({message})")]
    #[diagnostic(code(vegadns::malformed_response))]
    MalformedResponse { operation: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vegadns::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vegadns::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API URL configured")]
    #[diagnostic(
        code(vegadns::no_config),
        help(
            "Pass --url or set VEGADNS_URL, or add a profile to\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error("{0}")]
    #[diagnostic(code(vegadns::config))]
    Config(String),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(vegadns::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Rendering ────────────────────────────────────────────────────

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(vegadns::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ConflictingCredentials { .. }
            | Self::Unsupported { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Fill in the profile name on auth failures raised without one.
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { profile, message } if profile.is_empty() => Self::AuthFailed {
                profile: name.into(),
                message,
            },
            other => other,
        }
    }

    /// Translate an API error, naming the profile in auth failures.
    pub fn from_api(err: vegadns_api::Error, profile: &str) -> Self {
        use vegadns_api::Error;

        if let Some(status @ (401 | 403)) = err.status() {
            let message = match err {
                Error::UnexpectedStatus { body, .. } if !body.is_empty() => body,
                _ => format!("HTTP {status}"),
            };
            return Self::AuthFailed {
                profile: profile.into(),
                message,
            };
        }

        match err {
            Error::AuthenticationUnavailable { message } => Self::AuthFailed {
                profile: profile.into(),
                message,
            },
            Error::UnsupportedTokenType { token_type } => Self::AuthFailed {
                profile: profile.into(),
                message: format!("unsupported token type '{token_type}'"),
            },
            Error::Transport(_) => Self::ConnectionFailed { source: err },
            Error::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            Error::Tls(message) => Self::TlsError { message },
            Error::UnexpectedStatus {
                operation,
                status,
                body,
            } => Self::ApiError {
                operation: operation.into(),
                status,
                body,
            },
            Error::MalformedResponse {
                operation, message, ..
            } => Self::MalformedResponse {
                operation: operation.into(),
                message,
            },
            Error::NotFound { entity, identifier } => Self::NotFound {
                resource_type: entity.into(),
                list_command: list_command_for(entity).into(),
                identifier,
            },
        }
    }
}

impl From<vegadns_api::Error> for CliError {
    fn from(err: vegadns_api::Error) -> Self {
        Self::from_api(err, "")
    }
}

fn list_command_for(entity: &str) -> &'static str {
    match entity {
        "record" => "records list <domain-id>",
        _ => "domains list",
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile, secret } => {
                Self::NoCredentials { profile, secret }
            }
            ConfigError::ConflictingCredentials { profile } => {
                Self::ConflictingCredentials { profile }
            }
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            other @ ConfigError::Figment(_) => Self::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_exit_code_4() {
        let err = CliError::from_api(
            vegadns_api::Error::NotFound {
                entity: "auth zone",
                identifier: "foo.example.com".into(),
            },
            "default",
        );
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "auth zone 'foo.example.com' not found");
    }

    #[test]
    fn unauthorized_status_maps_to_auth_failure() {
        let err = CliError::from_api(
            vegadns_api::Error::UnexpectedStatus {
                operation: "list domains",
                status: 401,
                body: String::new(),
            },
            "prod",
        );
        assert!(
            matches!(err, CliError::AuthFailed { ref profile, ref message } if profile == "prod" && message == "HTTP 401")
        );
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn forbidden_status_keeps_api_message() {
        let err = CliError::from_api(
            vegadns_api::Error::UnexpectedStatus {
                operation: "delete record",
                status: 403,
                body: "{\"message\":\"forbidden\"}".into(),
            },
            "prod",
        );
        assert!(
            matches!(err, CliError::AuthFailed { ref message, .. } if message.contains("forbidden"))
        );
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn server_error_is_general() {
        let err = CliError::from_api(
            vegadns_api::Error::UnexpectedStatus {
                operation: "create record",
                status: 500,
                body: "boom".into(),
            },
            "prod",
        );
        assert_eq!(err.exit_code(), exit_code::GENERAL);
        assert_eq!(err.to_string(), "create record failed with HTTP 500");
    }

    #[test]
    fn config_conflict_is_usage_error() {
        let err = CliError::from(ConfigError::ConflictingCredentials {
            profile: "mixed".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
