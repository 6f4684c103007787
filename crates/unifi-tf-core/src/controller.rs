// ── Controller API ──
//
// `ResourceApi` for every resource kind over a logged-in legacy client.
// Holds no state beyond the session: every call goes to the controller,
// and errors are sorted into the core taxonomy by `From<unifi_tf_api::Error>`.

use tracing::debug;

use unifi_tf_api::legacy::models::{
    ClientUser, Network, PortForward, SettingMgmt, Site, VpnClient, Wan, Wlan,
};
use unifi_tf_api::transport::{TlsMode, TransportConfig};
use unifi_tf_api::{ControllerPlatform, LegacyClient};

use crate::config::{AuthCredentials, ProviderConfig, TlsVerification};
use crate::error::CoreError;
use crate::kind::ResourceKind;
use crate::model::MacAddress;
use crate::resource_api::ResourceApi;
use crate::resources::setting_mgmt::SETTING_KEY;
use crate::resources::{
    ClientKind, NetworkKind, PortForwardKind, SettingMgmtKind, SiteKind, VpnClientKind, WanKind,
    WlanKind,
};

/// A session against one controller, shared by every reconciler.
pub struct ControllerApi {
    client: LegacyClient,
    session: bool,
}

impl ControllerApi {
    /// Detect the platform, build the HTTP client and authenticate.
    pub async fn connect(config: &ProviderConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);

        let platform = LegacyClient::detect_platform(&config.url, &transport).await?;
        debug!(?platform, "detected controller platform");

        let client = LegacyClient::new(config.url.clone(), platform, &transport)?;

        let session = match &config.auth {
            AuthCredentials::Credentials { username, password } => {
                client.login(username, password).await?;
                debug!("session authentication successful");
                true
            }
            AuthCredentials::ApiKey(_) => {
                debug!("using API key auth, skipping legacy login");
                false
            }
        };

        Ok(Self { client, session })
    }

    /// Wrap an already-configured client (API key or pre-authenticated).
    pub fn from_client(client: LegacyClient) -> Self {
        Self {
            client,
            session: false,
        }
    }

    pub fn client(&self) -> &LegacyClient {
        &self.client
    }

    pub fn platform(&self) -> ControllerPlatform {
        self.client.platform()
    }

    /// End the session if one was opened. Best-effort.
    pub async fn disconnect(&self) {
        if self.session {
            if let Err(e) = self.client.logout().await {
                debug!(error = %e, "logout failed");
            }
        }
    }
}

/// Build a [`TransportConfig`] from the provider configuration.
fn build_transport(config: &ProviderConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };

    let transport = TransportConfig {
        tls,
        timeout: config.timeout,
        cookie_jar: None,
        api_key: None,
    };

    match &config.auth {
        AuthCredentials::ApiKey(key) => TransportConfig {
            api_key: Some(key.clone()),
            ..transport
        },
        AuthCredentials::Credentials { .. } => transport.with_cookie_jar(),
    }
}

fn find_by_key<K: ResourceKind>(objects: Vec<K::Object>, key: &str) -> Result<K::Object, CoreError> {
    objects
        .into_iter()
        .find(|o| K::object_natural_key(o).as_deref() == Some(key))
        .ok_or_else(|| CoreError::not_found(K::TYPE_NAME, key))
}

// ── `rest/*` collections ─────────────────────────────────────────────

/// Kinds stored in a plain REST collection and keyed by name.
macro_rules! rest_resource_api {
    ($($kind:ty => $object:ty),* $(,)?) => {
        $(
            impl ResourceApi<$kind> for ControllerApi {
                async fn get(&self, site: &str, id: &str) -> Result<$object, CoreError> {
                    Ok(self.client.rest_get::<$object>(site, id).await?)
                }

                async fn get_by_natural_key(&self, site: &str, key: &str) -> Result<$object, CoreError> {
                    let all = self.client.rest_list::<$object>(site).await?;
                    find_by_key::<$kind>(all, key)
                }

                async fn create(&self, site: &str, object: &$object) -> Result<$object, CoreError> {
                    Ok(self.client.rest_create(site, object).await?)
                }

                async fn update(&self, site: &str, object: &$object) -> Result<$object, CoreError> {
                    Ok(self.client.rest_update(site, object).await?)
                }

                async fn delete(&self, site: &str, key: &str) -> Result<(), CoreError> {
                    Ok(self.client.rest_delete::<$object>(site, key).await?)
                }

                async fn list(&self, site: &str) -> Result<Vec<$object>, CoreError> {
                    Ok(self.client.rest_list::<$object>(site).await?)
                }
            }
        )*
    };
}

rest_resource_api!(
    NetworkKind => Network,
    WanKind => Wan,
    VpnClientKind => VpnClient,
    WlanKind => Wlan,
    PortForwardKind => PortForward,
);

// ── Clients ──────────────────────────────────────────────────────────

impl ResourceApi<ClientKind> for ControllerApi {
    async fn get(&self, site: &str, id: &str) -> Result<ClientUser, CoreError> {
        Ok(self.client.rest_get::<ClientUser>(site, id).await?)
    }

    async fn get_by_natural_key(&self, site: &str, key: &str) -> Result<ClientUser, CoreError> {
        let mac = MacAddress::new(key);
        Ok(self.client.get_user_by_mac(site, mac.as_str()).await?)
    }

    async fn create(&self, site: &str, object: &ClientUser) -> Result<ClientUser, CoreError> {
        Ok(self.client.rest_create(site, object).await?)
    }

    async fn update(&self, site: &str, object: &ClientUser) -> Result<ClientUser, CoreError> {
        Ok(self.client.rest_update(site, object).await?)
    }

    /// Forget by MAC.
    async fn delete(&self, site: &str, key: &str) -> Result<(), CoreError> {
        let mac = MacAddress::new(key);
        Ok(self.client.forget_user(site, mac.as_str()).await?)
    }

    async fn list(&self, site: &str) -> Result<Vec<ClientUser>, CoreError> {
        Ok(self.client.rest_list::<ClientUser>(site).await?)
    }
}

// ── Sites ────────────────────────────────────────────────────────────
//
// Sites are controller-scoped; the `site` argument is ignored.

impl ResourceApi<SiteKind> for ControllerApi {
    async fn get(&self, _site: &str, id: &str) -> Result<Site, CoreError> {
        self.client
            .list_sites()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found(SiteKind::TYPE_NAME, id))
    }

    async fn get_by_natural_key(&self, _site: &str, key: &str) -> Result<Site, CoreError> {
        self.client
            .list_sites()
            .await?
            .into_iter()
            .find(|s| SiteKind::matches_name(s, key))
            .ok_or_else(|| CoreError::not_found(SiteKind::TYPE_NAME, key))
    }

    async fn create(&self, _site: &str, object: &Site) -> Result<Site, CoreError> {
        Ok(self.client.create_site(&object.desc).await?)
    }

    async fn update(&self, _site: &str, object: &Site) -> Result<Site, CoreError> {
        Ok(self.client.update_site(&object.name, &object.desc).await?)
    }

    /// Refuses sites the controller marks undeletable (the default site).
    async fn delete(&self, _site: &str, key: &str) -> Result<(), CoreError> {
        let site = <Self as ResourceApi<SiteKind>>::get(self, "", key).await?;
        if site.attr_no_delete == Some(true) {
            return Err(CoreError::Unsupported {
                operation: format!("deleting site {}", site.name),
                resource: SiteKind::TYPE_NAME.to_owned(),
            });
        }
        Ok(self.client.delete_site(&site.id).await?)
    }

    async fn list(&self, _site: &str) -> Result<Vec<Site>, CoreError> {
        Ok(self.client.list_sites().await?)
    }
}

// ── Settings ─────────────────────────────────────────────────────────

impl ResourceApi<SettingMgmtKind> for ControllerApi {
    async fn get(&self, site: &str, id: &str) -> Result<SettingMgmt, CoreError> {
        let setting = self.client.get_setting_mgmt(site).await?;
        if !id.is_empty() && setting.id != id {
            return Err(CoreError::not_found(SettingMgmtKind::TYPE_NAME, id));
        }
        Ok(setting)
    }

    async fn get_by_natural_key(&self, site: &str, key: &str) -> Result<SettingMgmt, CoreError> {
        if key != SETTING_KEY {
            return Err(CoreError::not_found(SettingMgmtKind::TYPE_NAME, key));
        }
        Ok(self.client.get_setting_mgmt(site).await?)
    }

    async fn create(&self, _site: &str, _object: &SettingMgmt) -> Result<SettingMgmt, CoreError> {
        Err(CoreError::Unsupported {
            operation: "create".into(),
            resource: SettingMgmtKind::TYPE_NAME.into(),
        })
    }

    async fn update(&self, site: &str, object: &SettingMgmt) -> Result<SettingMgmt, CoreError> {
        Ok(self.client.update_setting_mgmt(site, object).await?)
    }

    async fn delete(&self, _site: &str, _key: &str) -> Result<(), CoreError> {
        Err(CoreError::Unsupported {
            operation: "delete".into(),
            resource: SettingMgmtKind::TYPE_NAME.into(),
        })
    }

    async fn list(&self, site: &str) -> Result<Vec<SettingMgmt>, CoreError> {
        Ok(vec![self.client.get_setting_mgmt(site).await?])
    }
}
