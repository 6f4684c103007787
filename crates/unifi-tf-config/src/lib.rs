//! Provider configuration for unifi-tf.
//!
//! Layered loading (defaults, `config.toml`, `UNIFI_*` environment),
//! credential resolution, and translation to
//! `unifi_tf_core::ProviderConfig`. The CLI applies its flag overrides on
//! top of the loaded [`Config`] before converting it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use unifi_tf_core::{AuthCredentials, ProviderConfig, TlsVerification};

const ENV_PREFIX: &str = "UNIFI_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no controller URL configured (set `url` in {path} or UNIFI_URL)")]
    MissingUrl { path: String },

    #[error("no credentials configured (set an API key, or a username and password)")]
    NoCredentials,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Flat provider configuration, as read from TOML and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL (e.g., "https://192.168.1.1").
    pub url: Option<String>,

    /// Site used when a resource does not name one.
    #[serde(default = "default_site")]
    pub site: String,

    /// Username for session login.
    pub username: Option<String>,

    /// Password for session login (plaintext, prefer UNIFI_PASSWORD).
    pub password: Option<String>,

    /// API key (plaintext, prefer UNIFI_API_KEY).
    pub api_key: Option<String>,

    /// Accept self-signed certificates.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            site: default_site(),
            username: None,
            password: None,
            api_key: None,
            insecure: default_insecure(),
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

fn default_site() -> String {
    ProviderConfig::DEFAULT_SITE.into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    ProviderConfig::DEFAULT_TIMEOUT.as_secs()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unifi-tf", "unifi-tf").map_or_else(
        || PathBuf::from(".unifi-tf").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the platform config file and the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing files are skipped) and the environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

impl Config {
    /// An API key wins over session credentials when both are present.
    pub fn resolve_auth(&self) -> Result<AuthCredentials, ConfigError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Ok(AuthCredentials::ApiKey(SecretString::from(key.to_owned())));
        }

        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pw)) if !user.is_empty() => Ok(AuthCredentials::Credentials {
                username: user.to_owned(),
                password: SecretString::from(pw.to_owned()),
            }),
            (Some(_), None) => Err(ConfigError::Validation {
                field: "password".into(),
                reason: "a username was given without a password".into(),
            }),
            _ => Err(ConfigError::NoCredentials),
        }
    }

    /// Validate and build the [`ProviderConfig`] every reconciler shares.
    pub fn to_provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        let raw = self.url.as_deref().ok_or_else(|| ConfigError::MissingUrl {
            path: config_path().display().to_string(),
        })?;
        let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "url".into(),
                reason: format!("expected an http(s) URL, got {raw}"),
            });
        }

        if self.site.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "site".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let tls = if let Some(ref ca) = self.ca_cert {
            TlsVerification::CustomCa(ca.clone())
        } else if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(ProviderConfig {
            url,
            auth: self.resolve_auth()?,
            site: self.site.clone(),
            tls,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}
