// Legacy API site endpoints
//
// Site listing is controller-scoped (`/api/self/sites`); site mutations go
// through the site-manager command endpoint. `add-site` and `delete-site`
// are issued from the `default` site, `update-site` from the site itself.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::Site;
use crate::legacy::rest::first;

const MANAGER_SITE: &str = "default";

impl LegacyClient {
    /// List all sites visible to the authenticated user.
    ///
    /// `GET /api/self/sites` (controller-level, not site-scoped)
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.api_url("self/sites")?;
        debug!("listing sites");
        self.get(url).await
    }

    /// Create a site. The controller generates the short `name`.
    ///
    /// `POST /api/s/default/cmd/sitemgr` with `{"cmd": "add-site", "desc": ...}`
    pub async fn create_site(&self, desc: &str) -> Result<Site, Error> {
        let url = self.site_url(MANAGER_SITE, "cmd/sitemgr")?;
        debug!(desc, "creating site");
        let body = json!({ "cmd": "add-site", "desc": desc });
        let data: Vec<Site> = self.post(url, &body).await?;
        first(data, "cmd/sitemgr add-site")
    }

    /// Rename a site's description.
    ///
    /// `POST /api/s/{name}/cmd/sitemgr` with `{"cmd": "update-site", "desc": ...}`
    pub async fn update_site(&self, name: &str, desc: &str) -> Result<Site, Error> {
        let url = self.site_url(name, "cmd/sitemgr")?;
        debug!(name, desc, "updating site");
        let body = json!({ "cmd": "update-site", "desc": desc });
        let data: Vec<Site> = self.post(url, &body).await?;
        first(data, "cmd/sitemgr update-site")
    }

    /// Delete a site by `_id`.
    ///
    /// `POST /api/s/default/cmd/sitemgr` with `{"cmd": "delete-site", "site": id}`
    pub async fn delete_site(&self, id: &str) -> Result<(), Error> {
        let url = self.site_url(MANAGER_SITE, "cmd/sitemgr")?;
        debug!(id, "deleting site");
        let body = json!({ "cmd": "delete-site", "site": id });
        let _: Vec<serde_json::Value> = self.post(url, &body).await?;
        Ok(())
    }
}
