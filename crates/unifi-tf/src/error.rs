//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code per failure class.

use miette::Diagnostic;
use thiserror::Error;

use unifi_tf_config::ConfigError;
use unifi_tf_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(unifi_tf::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Self-signed certificates need --insecure or --ca-cert.\n\
             Cause: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(unifi_tf::auth_failed),
        help("Verify --api-key, or --username and --password (UNIFI_API_KEY, UNIFI_USERNAME, UNIFI_PASSWORD).")
    )]
    AuthFailed { message: String },

    #[error("No credentials configured")]
    #[diagnostic(
        code(unifi_tf::no_credentials),
        help("Set UNIFI_API_KEY, or UNIFI_USERNAME and UNIFI_PASSWORD, or add them to {path}")
    )]
    NoCredentials { path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} '{key}' not found")]
    #[diagnostic(code(unifi_tf::not_found))]
    NotFound { resource: String, key: String },

    #[error("{resource} '{key}' already exists")]
    #[diagnostic(
        code(unifi_tf::conflict),
        help("Import it, or set \"allow_existing\": true in the plan to take it over.")
    )]
    Conflict { resource: String, key: String },

    #[error("'{address}' is not tracked in {path}")]
    #[diagnostic(code(unifi_tf::not_tracked), help("Run: unifi-tf show"))]
    NotTracked { address: String, path: String },

    #[error("Unknown resource type '{name}'")]
    #[diagnostic(code(unifi_tf::unknown_type), help("Run: unifi-tf kinds"))]
    UnknownType { name: String },

    #[error("{operation} is not supported for {resource}")]
    #[diagnostic(code(unifi_tf::unsupported))]
    Unsupported { operation: String, resource: String },

    // ── Controller ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(unifi_tf::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unifi_tf::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No controller URL configured")]
    #[diagnostic(
        code(unifi_tf::no_config),
        help("Pass --url, set UNIFI_URL, or add `url` to {path}")
    )]
    NoUrl { path: String },

    #[error(transparent)]
    #[diagnostic(code(unifi_tf::config))]
    Config(Box<ConfigError>),

    // ── State file ───────────────────────────────────────────────────
    #[error("State file {path} is unreadable: {reason}")]
    #[diagnostic(
        code(unifi_tf::state_file),
        help("Fix or move the file aside; it is rewritten on the next successful change.")
    )]
    StateFile { path: String, reason: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(unifi_tf::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("{operation} cancelled")]
    #[diagnostic(code(unifi_tf::cancelled))]
    Cancelled { operation: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(unifi_tf::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::NotTracked { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. }
            | Self::UnknownType { .. }
            | Self::NoUrl { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Cancelled { .. } => exit_code::CANCELLED,
            Self::Api { .. }
            | Self::Config(_)
            | Self::StateFile { .. }
            | Self::Io(_)
            | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::NotFound { resource, key } => Self::NotFound { resource, key },
            CoreError::KeyInUse { resource, key, .. } => Self::Conflict { resource, key },
            CoreError::Validation { resource, message } => Self::Validation {
                field: resource,
                reason: message,
            },
            CoreError::UnknownValue { attribute } => Self::Validation {
                field: attribute,
                reason: "value is not known yet".into(),
            },
            CoreError::Unsupported {
                operation,
                resource,
            } => Self::Unsupported {
                operation,
                resource,
            },
            CoreError::Cancelled { operation } => Self::Cancelled { operation },
            other @ (CoreError::Api { .. } | CoreError::State { .. } | CoreError::Config { .. }) => {
                Self::Api {
                    message: other.to_string(),
                }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingUrl { path } => Self::NoUrl { path },
            ConfigError::NoCredentials => Self::NoCredentials {
                path: unifi_tf_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other @ ConfigError::Figment(_) => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_exit_class() {
        let cases = [
            (CoreError::not_found("unifi_network", "IoT"), exit_code::NOT_FOUND),
            (
                CoreError::KeyInUse {
                    resource: "unifi_network".into(),
                    key: "IoT".into(),
                    message: "api.err.NameExists".into(),
                },
                exit_code::CONFLICT,
            ),
            (
                CoreError::Cancelled {
                    operation: "create".into(),
                },
                exit_code::CANCELLED,
            ),
            (
                CoreError::AuthenticationFailed {
                    message: "bad password".into(),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::State {
                    message: "expected an object".into(),
                },
                exit_code::GENERAL,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn missing_url_is_a_usage_error() {
        let err = CliError::from(ConfigError::MissingUrl {
            path: "/tmp/config.toml".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
