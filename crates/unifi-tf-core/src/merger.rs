// ── Resource merger ──
//
// Read-merge-update for any resource kind: fetch the remote object, lay the
// desired object over it under the kind's merge policy, and submit the
// result as a complete object. One read and one write per call; no caching,
// no retries.

use std::future::Future;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::CoreError;
use crate::kind::ResourceKind;
use crate::merge::{Merge, MergePolicy};

/// Generic read-merge-update driver for resource kind `K`.
pub struct ResourceMerger<K: ResourceKind> {
    policy: MergePolicy,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Default for ResourceMerger<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ResourceKind> Clone for ResourceMerger<K> {
    fn clone(&self) -> Self {
        Self::with_policy(self.policy.clone())
    }
}

impl<K: ResourceKind> ResourceMerger<K> {
    /// A merger using the kind's own policy.
    pub fn new() -> Self {
        Self::with_policy(K::merge_policy())
    }

    pub fn with_policy(policy: MergePolicy) -> Self {
        Self {
            policy,
            _kind: PhantomData,
        }
    }

    pub fn policy(&self) -> &MergePolicy {
        &self.policy
    }

    /// Merge `planned` over `existing`. Pure.
    ///
    /// A missing side yields the other one unchanged.
    pub fn merge_objects(
        &self,
        existing: Option<K::Object>,
        planned: Option<&K::Object>,
    ) -> Option<K::Object> {
        match (existing, planned) {
            (Some(mut existing), Some(planned)) => {
                existing.merge_with(planned, &self.policy);
                Some(existing)
            }
            (Some(existing), None) => Some(existing),
            (None, planned) => planned.cloned(),
        }
    }

    /// Fetch, merge and update.
    ///
    /// `get` errors (including not-found) propagate unchanged. Without a
    /// planned object there is nothing to write: the remote object is
    /// returned as-is and `update` is not called.
    pub async fn merge_for_update<G, GF, U, UF>(
        &self,
        site: &str,
        id: &str,
        planned: Option<&K::Object>,
        get: G,
        update: U,
    ) -> Result<K::Object, CoreError>
    where
        G: FnOnce(String, String) -> GF,
        GF: Future<Output = Result<K::Object, CoreError>>,
        U: FnOnce(String, K::Object) -> UF,
        UF: Future<Output = Result<K::Object, CoreError>>,
    {
        let existing = get(site.to_owned(), id.to_owned()).await?;

        let Some(planned) = planned else {
            debug!(resource = K::TYPE_NAME, site, id, "no planned object, skipping update");
            return Ok(existing);
        };

        let mut merged = existing;
        merged.merge_with(planned, &self.policy);

        debug!(resource = K::TYPE_NAME, site, id, "submitting merged object");
        update(site.to_owned(), merged).await
    }
}
