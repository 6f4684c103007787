// Session login, logout and platform detection.
//
// Login stores a session cookie in the client's jar and, on UniFi OS, a
// CSRF token that every later mutation must echo back.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::transport::TransportConfig;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    remember: bool,
}

impl LegacyClient {
    /// Open a cookie session (`POST /api/auth/login` on UniFi OS,
    /// `POST /api/login` on a classic controller).
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.base_url().join(self.platform().login_path())?;
        debug!(%url, username, "logging in");

        let request = LoginRequest {
            username,
            password: password.expose_secret(),
            remember: true,
        };
        let resp = self
            .http()
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login rejected (HTTP {status}): {body}"),
            });
        }

        self.capture_csrf(resp.headers());
        debug!("session established");
        Ok(())
    }

    /// End the session. The controller answers even for expired sessions,
    /// so only transport failures are errors.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.base_url().join(self.platform().logout_path())?;
        debug!(%url, "logging out");

        self.http()
            .post(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Ok(())
    }

    /// Work out which login path the controller serves.
    ///
    /// Anything but a 404 on the UniFi OS login path means UniFi OS;
    /// otherwise the classic path must at least answer.
    pub async fn detect_platform(
        base_url: &Url,
        transport: &TransportConfig,
    ) -> Result<ControllerPlatform, Error> {
        let http = transport.build_client()?;

        let probe = |platform: ControllerPlatform| -> Result<Url, Error> {
            Ok(base_url.join(platform.login_path())?)
        };

        let unifi_os = probe(ControllerPlatform::UnifiOs)?;
        match http.get(unifi_os).send().await {
            Ok(resp) if resp.status() != reqwest::StatusCode::NOT_FOUND => {
                debug!("UniFi OS login path answered");
                return Ok(ControllerPlatform::UnifiOs);
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "UniFi OS probe failed"),
        }

        http.get(probe(ControllerPlatform::ClassicController)?)
            .send()
            .await
            .map_err(Error::Transport)?;
        debug!("classic controller login path answered");
        Ok(ControllerPlatform::ClassicController)
    }
}
