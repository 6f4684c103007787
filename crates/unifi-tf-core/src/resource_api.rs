// ── Controller API seam ──
//
// What the reconciler needs from the controller for one resource kind.
// `ControllerApi` implements it over the legacy REST client; tests use
// in-memory fakes.

use std::future::Future;

use crate::error::CoreError;
use crate::kind::ResourceKind;

/// Per-kind remote operations, keyed by site.
///
/// Not-found must surface as [`CoreError::NotFound`] and a natural-key
/// collision on create as [`CoreError::KeyInUse`]; the reconciler branches
/// on both.
pub trait ResourceApi<K: ResourceKind>: Send + Sync {
    fn get(
        &self,
        site: &str,
        id: &str,
    ) -> impl Future<Output = Result<K::Object, CoreError>> + Send;

    /// Lookup by MAC, name or key, depending on the kind.
    fn get_by_natural_key(
        &self,
        site: &str,
        key: &str,
    ) -> impl Future<Output = Result<K::Object, CoreError>> + Send;

    fn create(
        &self,
        site: &str,
        object: &K::Object,
    ) -> impl Future<Output = Result<K::Object, CoreError>> + Send;

    /// Replace the object in full; `object` carries its id.
    fn update(
        &self,
        site: &str,
        object: &K::Object,
    ) -> impl Future<Output = Result<K::Object, CoreError>> + Send;

    /// Delete by id or natural key, per the kind's
    /// [`DeleteMode`](crate::kind::DeleteMode).
    fn delete(&self, site: &str, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list(&self, site: &str) -> impl Future<Output = Result<Vec<K::Object>, CoreError>> + Send;
}
