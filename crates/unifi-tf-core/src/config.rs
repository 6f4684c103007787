// ── Provider connection configuration ──
//
// Describes *how* to reach a controller. Built once by the caller (CLI,
// config crate) and shared read-only by every reconciler; core never
// reads config files or the environment itself.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// How to authenticate with a controller.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// API key, sent as `X-API-KEY` on every request.
    ApiKey(SecretString),
    /// Cookie session from a username/password login.
    Credentials {
        username: String,
        password: SecretString,
    },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for local controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for one provider session against one controller.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Controller URL (e.g., `https://192.168.1.1`).
    pub url: Url,
    /// Authentication method and credentials.
    pub auth: AuthCredentials,
    /// Site used when a resource does not name one.
    pub site: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    pub const DEFAULT_SITE: &'static str = "default";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            site: Self::DEFAULT_SITE.into(),
            tls: TlsVerification::default(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}
