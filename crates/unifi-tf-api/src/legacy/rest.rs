// Generic `rest/{collection}` CRUD
//
// Most managed objects live under a uniform site-scoped collection:
// `GET/POST rest/{collection}` and `GET/PUT/DELETE rest/{collection}/{id}`.
// Each object type declares its collection once and gets the five verbs.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;

/// An object stored in a site-scoped `rest/` collection.
pub trait RestObject: Serialize + DeserializeOwned + Send + Sync {
    /// Collection path relative to the site, e.g. `rest/networkconf`.
    const COLLECTION: &'static str;

    /// Server-assigned `_id`; empty before creation.
    fn id(&self) -> &str;

    /// Whether an entry of the collection is this type.
    ///
    /// `networkconf` holds LANs, WANs and VPN clients side by side; each
    /// type narrows the collection by `purpose`.
    fn belongs(&self) -> bool {
        true
    }
}

impl LegacyClient {
    /// List every object of the collection that [`RestObject::belongs`].
    ///
    /// `GET /api/s/{site}/rest/{collection}`
    pub async fn rest_list<T: RestObject>(&self, site: &str) -> Result<Vec<T>, Error> {
        let url = self.site_url(site, T::COLLECTION)?;
        debug!(collection = T::COLLECTION, site, "listing objects");
        let all: Vec<T> = self.get(url).await?;
        Ok(all.into_iter().filter(T::belongs).collect())
    }

    /// Fetch one object by `_id`.
    ///
    /// `GET /api/s/{site}/rest/{collection}/{id}`
    ///
    /// An empty `data` array, or an entry of the wrong kind, is reported as
    /// [`Error::EmptyResponse`] so callers see it as "not found".
    pub async fn rest_get<T: RestObject>(&self, site: &str, id: &str) -> Result<T, Error> {
        let path = format!("{}/{id}", T::COLLECTION);
        let url = self.site_url(site, &path)?;
        let data: Vec<T> = self.get(url).await?;
        data.into_iter()
            .find(T::belongs)
            .ok_or(Error::EmptyResponse { endpoint: path })
    }

    /// Create an object; returns the controller's copy with `_id` filled in.
    ///
    /// `POST /api/s/{site}/rest/{collection}`
    pub async fn rest_create<T: RestObject>(&self, site: &str, object: &T) -> Result<T, Error> {
        let url = self.site_url(site, T::COLLECTION)?;
        debug!(collection = T::COLLECTION, site, "creating object");
        let data: Vec<T> = self.post(url, object).await?;
        first(data, T::COLLECTION)
    }

    /// Replace an object in full.
    ///
    /// `PUT /api/s/{site}/rest/{collection}/{id}`
    pub async fn rest_update<T: RestObject>(&self, site: &str, object: &T) -> Result<T, Error> {
        let path = format!("{}/{}", T::COLLECTION, object.id());
        let url = self.site_url(site, &path)?;
        debug!(collection = T::COLLECTION, site, id = object.id(), "updating object");
        let data: Vec<T> = self.put(url, object).await?;
        first(data, &path)
    }

    /// Delete an object by `_id`.
    ///
    /// `DELETE /api/s/{site}/rest/{collection}/{id}`
    pub async fn rest_delete<T: RestObject>(&self, site: &str, id: &str) -> Result<(), Error> {
        let path = format!("{}/{id}", T::COLLECTION);
        let url = self.site_url(site, &path)?;
        debug!(collection = T::COLLECTION, site, id, "deleting object");
        let _: Vec<serde_json::Value> = self.delete(url).await?;
        Ok(())
    }
}

/// Take the single object a write endpoint echoes back.
pub(crate) fn first<T>(data: Vec<T>, endpoint: &str) -> Result<T, Error> {
    data.into_iter().next().ok_or_else(|| Error::EmptyResponse {
        endpoint: endpoint.to_owned(),
    })
}
