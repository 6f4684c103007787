use thiserror::Error;

/// Legacy API message codes that mean "no such object".
const NOT_FOUND_CODES: &[&str] = &[
    "api.err.ObjectNotFound",
    "api.err.IdInvalid",
    "api.err.UnknownUser",
    "api.err.NoSiteContext",
];

/// Legacy API message codes that mean "the natural key is already taken".
const KEY_IN_USE_CODES: &[&str] = &[
    "api.err.MacUsed",
    "api.err.NameExists",
    "api.err.DuplicateName",
    "api.err.SiteNameUsed",
];

/// Failures talking to a controller.
///
/// `unifi-tf-core` folds these into its reconciliation errors; only the
/// classifiers below (`is_not_found`, `is_key_in_use`) drive behaviour.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The controller refused the login or the session ran out.
    #[error("controller rejected credentials: {message}")]
    Authentication { message: String },

    /// The API key contains bytes that cannot go in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    #[error("request to controller failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bad controller URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// CA bundle unreadable, or the HTTP client could not be built with it.
    #[error("TLS setup failed: {0}")]
    Tls(String),

    /// A failed status whose body was not a `{ meta, data }` envelope.
    #[error("controller answered HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Envelope ────────────────────────────────────────────────────
    /// `meta.rc` was not `ok`; `message` is `meta.msg`, usually an
    /// `api.err.*` code.
    #[error("controller error: {message}")]
    LegacyApi { message: String },

    /// An `ok` envelope with no object where one was expected.
    #[error("no object returned by {endpoint}")]
    EmptyResponse { endpoint: String },

    /// The body did not match the expected model. `body` keeps the raw text.
    #[error("could not decode controller response: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Session or key problems that a fresh login could fix.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::InvalidApiKey)
    }

    /// Failures that may clear up on their own: the controller was
    /// unreachable, slow, rate limiting, or erroring server-side.
    /// Nothing here retries; callers with a retry policy decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } | Self::EmptyResponse { .. } => true,
            Self::LegacyApi { message } => NOT_FOUND_CODES.contains(&message.as_str()),
            _ => false,
        }
    }

    /// Returns `true` if the controller rejected a create because the
    /// object's natural key (MAC, name) is already in use.
    pub fn is_key_in_use(&self) -> bool {
        match self {
            Self::LegacyApi { message } => KEY_IN_USE_CODES.contains(&message.as_str()),
            _ => false,
        }
    }

    /// Extract the legacy `api.err.*` code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::LegacyApi { message } if message.starts_with("api.err.") => Some(message),
            _ => None,
        }
    }

    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
