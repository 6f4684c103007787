// Legacy API HTTP client
//
// One `reqwest::Client` per controller session, platform-aware URLs, and
// decoding of the `{ meta, data }` envelope. Object endpoints live in
// sibling modules as inherent methods and only ever go through `send`.

use std::sync::{PoisonError, RwLock};

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::Error;
use crate::legacy::models::LegacyResponse;
use crate::transport::TransportConfig;

const CSRF_HEADER: &str = "X-CSRF-Token";
const CSRF_ROTATED_HEADER: &str = "X-Updated-CSRF-Token";
const PREVIEW_CHARS: usize = 200;

/// Client for the controller's legacy REST API.
///
/// Not bound to a site: every site-scoped call names its site, since one
/// provider session manages objects across many sites.
pub struct LegacyClient {
    http: reqwest::Client,
    base_url: Url,
    platform: ControllerPlatform,
    /// UniFi OS rejects mutations through `/proxy/network` without it.
    /// Set at login, rotated by responses.
    csrf_token: RwLock<Option<String>>,
}

impl LegacyClient {
    /// Build a client for `base_url` (the controller root, without any
    /// `/proxy/network` prefix). A cookie jar is added when the transport
    /// has none, since session login needs one.
    pub fn new(
        base_url: Url,
        platform: ControllerPlatform,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let transport = match transport.cookie_jar {
            Some(_) => transport.clone(),
            None => transport.clone().with_cookie_jar(),
        };
        Ok(Self::with_client(transport.build_client()?, base_url, platform))
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, platform: ControllerPlatform) -> Self {
        Self {
            http,
            base_url,
            platform,
            csrf_token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn platform(&self) -> ControllerPlatform {
        self.platform
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── CSRF ─────────────────────────────────────────────────────────

    pub(crate) fn set_csrf_token(&self, token: String) {
        *self
            .csrf_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn csrf_token(&self) -> Option<String> {
        self.csrf_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn capture_csrf(&self, headers: &HeaderMap) {
        let token = [CSRF_ROTATED_HEADER, CSRF_HEADER]
            .into_iter()
            .find_map(|name| headers.get(name).and_then(|v| v.to_str().ok()));
        if let Some(token) = token {
            trace!("CSRF token updated");
            self.set_csrf_token(token.to_owned());
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}{prefix}/api/{path}`, where the prefix is `/proxy/network`
    /// on UniFi OS and empty on a classic controller.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let prefix = self.platform.legacy_prefix();
        Ok(Url::parse(&format!("{base}{prefix}/api/{path}"))?)
    }

    /// `{base}{prefix}/api/s/{site}/{path}`
    pub(crate) fn site_url(&self, site: &str, path: &str) -> Result<Url, Error> {
        self.api_url(&format!("s/{site}/{path}"))
    }

    // ── Requests ─────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        self.send(Method::GET, url, None::<&()>).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<Vec<T>, Error> {
        self.send(Method::POST, url, Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<Vec<T>, Error> {
        self.send(Method::PUT, url, Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        self.send(Method::DELETE, url, None::<&()>).await
    }

    /// Issue one request and decode the envelope. Mutations carry the
    /// CSRF token when one is held.
    async fn send<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!("{method} {url}");

        let mutating = method != Method::GET;
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if mutating {
            if let Some(token) = self.csrf_token() {
                request = request.header(CSRF_HEADER, token);
            }
        }

        let resp = request.send().await.map_err(Error::Transport)?;
        self.capture_csrf(resp.headers());
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        decode_envelope(status, &body)
    }
}

// ── Envelope decoding ────────────────────────────────────────────────

/// UniFi OS reports some failures as `{"error":{"code":N,"message":"..."}}`
/// with HTTP 200.
#[derive(serde::Deserialize)]
struct UnifiOsError {
    error: Option<UnifiOsErrorBody>,
}

#[derive(serde::Deserialize)]
struct UnifiOsErrorBody {
    code: u16,
    message: Option<String>,
}

fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}

fn envelope_error<T>(envelope: LegacyResponse<T>) -> Error {
    let rc = envelope.meta.rc;
    Error::LegacyApi {
        message: envelope.meta.msg.unwrap_or_else(|| format!("rc={rc}")),
    }
}

/// Turn a response into `data`, or the most specific error it carries.
///
/// Object errors (`api.err.MacUsed`, `api.err.ObjectNotFound`, ...) come
/// with a 4xx status and an envelope, so a failed status still tries the
/// envelope before falling back to `Error::Http`.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Vec<T>, Error> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: "session expired or invalid credentials".into(),
        });
    }

    if !status.is_success() {
        return Err(
            match serde_json::from_str::<LegacyResponse<serde_json::Value>>(body) {
                Ok(envelope) if envelope.meta.rc != "ok" => envelope_error(envelope),
                _ => Error::Http {
                    status: status.as_u16(),
                    message: preview(body),
                },
            },
        );
    }

    if let Ok(UnifiOsError { error: Some(err) }) = serde_json::from_str(body) {
        let message = err.message.unwrap_or_default();
        return Err(match err.code {
            401 => Error::Authentication { message },
            code => Error::Http {
                status: code,
                message,
            },
        });
    }

    let envelope: LegacyResponse<T> =
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(body)),
            body: body.to_owned(),
        })?;
    if envelope.meta.rc == "ok" {
        Ok(envelope.data)
    } else {
        Err(envelope_error(envelope))
    }
}
