// ── Core error types ──
//
// The reconciliation error taxonomy. Consumers never see HTTP status codes
// or envelope parse failures directly: the `From<unifi_tf_api::Error>` impl
// sorts transport errors into not-found, key-in-use, auth, connection, or a
// generic API failure, and `with_context` stamps the operation, resource
// kind and key onto the ones that reach the user.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote object errors ─────────────────────────────────────────
    #[error("{resource} not found: {key}")]
    NotFound { resource: String, key: String },

    #[error("{resource} {key} already exists: {message}")]
    KeyInUse {
        resource: String,
        key: String,
        message: String,
    },

    // ── Local errors (never sent to the network) ─────────────────────
    #[error("Invalid {resource}: {message}")]
    Validation { resource: String, message: String },

    #[error("Attribute {attribute} is not known yet")]
    UnknownValue { attribute: String },

    #[error("Malformed resource state: {message}")]
    State { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{operation} is not supported for {resource}")]
    Unsupported { operation: String, resource: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("{operation} cancelled")]
    Cancelled { operation: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{operation} {resource} {key}: {message}")]
    Api {
        operation: String,
        resource: String,
        key: String,
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },
}

impl CoreError {
    /// Attach lifecycle context to an error that came back from the
    /// controller without it.
    ///
    /// Fills in empty `operation`/`resource`/`key` slots; anything already
    /// carrying context is returned unchanged.
    #[must_use]
    pub fn with_context(self, operation: &str, resource: &str, key: &str) -> Self {
        match self {
            Self::Api {
                operation: op,
                resource: res,
                key: k,
                message,
                status,
            } => Self::Api {
                operation: or_else(op, operation),
                resource: or_else(res, resource),
                key: or_else(k, key),
                message,
                status,
            },
            Self::NotFound { resource: res, key: k } => Self::NotFound {
                resource: or_else(res, resource),
                key: or_else(k, key),
            },
            Self::KeyInUse {
                resource: res,
                key: k,
                message,
            } => Self::KeyInUse {
                resource: or_else(res, resource),
                key: or_else(k, key),
                message,
            },
            Self::Cancelled { operation: op } => Self::Cancelled {
                operation: or_else(op, operation),
            },
            other => other,
        }
    }

    /// Build a `NotFound` for the given kind and key.
    pub fn not_found(resource: &str, key: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.to_owned(),
            key: key.into(),
        }
    }

    /// Build a `Validation` error for the given kind.
    pub fn validation(resource: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            resource: resource.to_owned(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_key_in_use(&self) -> bool {
        matches!(self, Self::KeyInUse { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

fn or_else(current: String, fallback: &str) -> String {
    if current.is_empty() {
        fallback.to_owned()
    } else {
        current
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<unifi_tf_api::Error> for CoreError {
    fn from(err: unifi_tf_api::Error) -> Self {
        if err.is_not_found() {
            return CoreError::NotFound {
                resource: String::new(),
                key: String::new(),
            };
        }
        if err.is_key_in_use() {
            return CoreError::KeyInUse {
                resource: String::new(),
                key: String::new(),
                message: err.to_string(),
            };
        }

        let transient = err.is_transient();
        match err {
            unifi_tf_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            unifi_tf_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            unifi_tf_api::Error::Transport(ref e) if transient => {
                CoreError::ConnectionFailed {
                    url: e
                        .url()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "<unknown>".into()),
                    reason: e.to_string(),
                }
            }
            unifi_tf_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            unifi_tf_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            other => CoreError::Api {
                operation: String::new(),
                resource: String::new(),
                key: String::new(),
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}
