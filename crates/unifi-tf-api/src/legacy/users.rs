// Legacy API known-client (`user`) endpoints
//
// Clients are created and edited through `rest/user`, but the controller
// keys lookups and removal by MAC: `stat/user/{mac}` and the `forget-sta`
// station-manager command.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::ClientUser;
use crate::legacy::rest::{RestObject, first};

impl RestObject for ClientUser {
    const COLLECTION: &'static str = "rest/user";

    fn id(&self) -> &str {
        &self.id
    }
}

impl LegacyClient {
    /// Look up a known client by MAC address.
    ///
    /// `GET /api/s/{site}/stat/user/{mac}`
    pub async fn get_user_by_mac(&self, site: &str, mac: &str) -> Result<ClientUser, Error> {
        let path = format!("stat/user/{mac}");
        let url = self.site_url(site, &path)?;
        debug!(site, mac, "looking up client by MAC");
        let data: Vec<ClientUser> = self.get(url).await?;
        first(data, &path)
    }

    /// Forget a client: removes its history and any fixed-IP or name record.
    ///
    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "forget-sta", "macs": [mac]}`
    pub async fn forget_user(&self, site: &str, mac: &str) -> Result<(), Error> {
        let url = self.site_url(site, "cmd/stamgr")?;
        debug!(site, mac, "forgetting client");
        let body = json!({ "cmd": "forget-sta", "macs": [mac] });
        let _: Vec<serde_json::Value> = self.post(url, &body).await?;
        Ok(())
    }
}
