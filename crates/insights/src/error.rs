//! CLI error types with miette diagnostics.
//!
//! Maps `insights_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use insights_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PARTIAL: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Insights service")]
    #[diagnostic(
        code(insights::connection_failed),
        help(
            "Check the base URL and that the service is reachable.\n\
             Requests time out after 90 seconds."
        )
    )]
    ConnectionFailed {
        #[source]
        source: insights_api::Error,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(insights::tls_error),
        help(
            "For a self-signed endpoint use --insecure (-k),\n\
             or set ca_cert in your profile."
        )
    )]
    Tls { message: String },

    // ── Service ──────────────────────────────────────────────────────
    #[error("Authentication rejected (HTTP {status})")]
    #[diagnostic(
        code(insights::auth_failed),
        help(
            "The API token is missing, expired, or lacks access.\n\
             Refresh it with: insights auth"
        )
    )]
    AuthFailed { status: u16 },

    #[error("Not found: {message}")]
    #[diagnostic(code(insights::not_found), help("Check the ID; `insights schools list` shows valid schools."))]
    NotFound { message: String },

    #[error("Service returned {message}")]
    #[diagnostic(code(insights::api_error))]
    Api {
        message: String,
        #[help]
        body: Option<String>,
    },

    #[error("Unexpected response from service: {message}")]
    #[diagnostic(code(insights::invalid_response))]
    InvalidResponse { message: String },

    // ── Bulk sync ────────────────────────────────────────────────────
    #[error("Sync incomplete: sent {expected} access points, service accounted for {accounted}")]
    #[diagnostic(
        code(insights::sync_incomplete),
        help(
            "Chunks already accepted are not rolled back.\n\
             Re-running the sync resends every record."
        )
    )]
    SyncIncomplete { expected: usize, accounted: usize },

    #[error("No access points to sync")]
    #[diagnostic(code(insights::sync_empty), help("The input file contained an empty array."))]
    NothingToSync,

    // ── Configuration ────────────────────────────────────────────────
    #[error("No configuration for profile '{profile}'")]
    #[diagnostic(
        code(insights::no_config),
        help(
            "Add a [profiles.{profile}] section to {path},\n\
             pass --base-url, or set BASEURL / API_TOKEN."
        )
    )]
    NoConfig { profile: String, path: String },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(insights::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(insights::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(insights::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::SyncIncomplete { .. } => exit_code::PARTIAL,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::NothingToSync => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── API error → CliError mapping ─────────────────────────────────────

impl From<insights_api::Error> for CliError {
    fn from(err: insights_api::Error) -> Self {
        use insights_api::Error as Api;

        match err {
            Api::Transport(_) => Self::ConnectionFailed { source: err },
            Api::Tls(message) => Self::Tls { message },
            Api::Status {
                status: status @ (401 | 403),
                ..
            } => Self::AuthFailed { status },
            Api::Status {
                status: 404,
                message,
                ..
            } => Self::NotFound { message },
            Api::Status { message, body, .. } => Self::Api {
                message,
                body: (!body.is_empty()).then_some(body),
            },
            Api::Deserialization { message, .. } => Self::InvalidResponse { message },
            Api::SyncIncomplete {
                expected,
                accounted,
            } => Self::SyncIncomplete {
                expected,
                accounted,
            },
            Api::NothingToSync => Self::NothingToSync,
            other => Self::Validation {
                field: "request".into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Api(api) => api.into(),
            ConfigError::NoProfile { profile } => Self::NoConfig {
                profile,
                path: insights_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
