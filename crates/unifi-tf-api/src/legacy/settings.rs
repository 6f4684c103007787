// Legacy API site settings
//
// Settings are per-site singletons identified by `key`. They are read from
// `get/setting/{key}` and written back in full to `rest/setting/{key}/{id}`.

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::SettingMgmt;
use crate::legacy::rest::first;

impl LegacyClient {
    /// Fetch the management settings of a site.
    ///
    /// `GET /api/s/{site}/get/setting/mgmt`
    pub async fn get_setting_mgmt(&self, site: &str) -> Result<SettingMgmt, Error> {
        let url = self.site_url(site, "get/setting/mgmt")?;
        debug!(site, "reading mgmt settings");
        let data: Vec<SettingMgmt> = self.get(url).await?;
        data.into_iter()
            .find(|s| s.key.is_empty() || s.key == "mgmt")
            .ok_or_else(|| Error::EmptyResponse {
                endpoint: "get/setting/mgmt".into(),
            })
    }

    /// Write the management settings of a site.
    ///
    /// `PUT /api/s/{site}/rest/setting/mgmt/{id}`
    pub async fn update_setting_mgmt(
        &self,
        site: &str,
        setting: &SettingMgmt,
    ) -> Result<SettingMgmt, Error> {
        let path = format!("rest/setting/mgmt/{}", setting.id);
        let url = self.site_url(site, &path)?;
        debug!(site, "updating mgmt settings");
        let data: Vec<SettingMgmt> = self.put(url, setting).await?;
        first(data, &path)
    }
}
