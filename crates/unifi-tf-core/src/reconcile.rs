// ── Reconciliation state machine ──
//
// Drives one resource instance through Create / Read / Update / Delete /
// Import against a `ResourceApi`, reading and writing the orchestrator's
// bags through a `StateStore`. Every controller call is raced against a
// cancellation token; state and identity are written only after the call
// succeeds, so a cancelled or failed operation leaves them untouched.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::CoreError;
use crate::import::ImportKey;
use crate::kind::{
    CreateMode, DeleteMode, Overlay, ReadMiss, ResourceIdentity, ResourceKind, TrackedModel,
};
use crate::merger::ResourceMerger;
use crate::model::Value;
use crate::resource_api::ResourceApi;
use crate::store::{AttributeBag, StateStore};

/// Result of a Read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The object exists; state was refreshed.
    Present,
    /// The object is gone; state was cleared.
    Removed,
}

/// Lifecycle driver for resource kind `K` over controller API `A`.
pub struct Reconciler<K: ResourceKind, A> {
    api: Arc<A>,
    default_site: String,
    merger: ResourceMerger<K>,
}

impl<K: ResourceKind, A> Clone for Reconciler<K, A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            default_site: self.default_site.clone(),
            merger: self.merger.clone(),
        }
    }
}

impl<K, A> Reconciler<K, A>
where
    K: ResourceKind,
    A: ResourceApi<K>,
{
    pub fn new(api: Arc<A>, default_site: impl Into<String>) -> Self {
        Self {
            api,
            default_site: default_site.into(),
            merger: ResourceMerger::new(),
        }
    }

    /// Replace the kind's default merger.
    #[must_use]
    pub fn with_merger(mut self, merger: ResourceMerger<K>) -> Self {
        self.merger = merger;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn default_site(&self) -> &str {
        &self.default_site
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Create the object described by the plan.
    ///
    /// Singletons are always absorbed. Otherwise a natural-key collision
    /// falls back to absorbing the existing object when `allow_existing`
    /// is set in config or plan.
    pub async fn create<S>(&self, store: &mut S, cancel: &CancellationToken) -> Result<(), CoreError>
    where
        S: StateStore + Send,
    {
        let plan: K::Model = required(store.plan(), "plan")?.get()?;
        let site = self.site_of(&plan);
        let desired = K::to_remote(&plan)?;
        let key = K::model_natural_key(&plan).unwrap_or_default();
        let absorb_allowed = store.config().is_some_and(|c| c.flag("allow_existing"))
            || plan.allow_existing();

        let span = info_span!("create", resource = K::TYPE_NAME, site = %site, key = %key);
        async {
            let remote = if K::capabilities().create == CreateMode::Singleton {
                debug!("singleton kind, absorbing existing object");
                self.absorb(&site, &key, &desired, cancel).await?
            } else {
                let mut fresh = desired.clone();
                match K::prepare_create(&mut fresh) {
                    Ok(()) => match guard("create", cancel, self.api.create(&site, &fresh)).await {
                        Ok(created) => created,
                        Err(e) if e.is_key_in_use() && absorb_allowed => {
                            warn!("natural key already in use, absorbing existing object");
                            self.absorb(&site, &key, &desired, cancel).await?
                        }
                        Err(e) => return Err(e.with_context("create", K::TYPE_NAME, &key)),
                    },
                    // An existing object needs none of what a new one lacks.
                    Err(invalid) if absorb_allowed => {
                        debug!(error = %invalid, "plan incomplete for a new object, absorbing");
                        match self.absorb(&site, &key, &desired, cancel).await {
                            Ok(absorbed) => absorbed,
                            Err(e) if e.is_not_found() => return Err(invalid),
                            Err(e) => return Err(e),
                        }
                    }
                    Err(invalid) => return Err(invalid),
                }
            };

            record::<K>(store, &remote, &plan, &site)?;
            info!(id = K::object_id(&remote), "created");
            Ok::<(), CoreError>(())
        }
        .instrument(span)
        .await
    }

    /// Take over an existing object by natural key: merge the desired
    /// object over it and update.
    async fn absorb(
        &self,
        site: &str,
        key: &str,
        desired: &K::Object,
        cancel: &CancellationToken,
    ) -> Result<K::Object, CoreError> {
        if key.is_empty() {
            return Err(CoreError::validation(
                K::TYPE_NAME,
                "cannot absorb an existing object without a natural key",
            ));
        }
        let api = &*self.api;
        let merge = self.merger.merge_for_update(
            site,
            key,
            Some(desired),
            |site, key| async move { api.get_by_natural_key(&site, &key).await },
            |site, merged| async move { api.update(&site, &merged).await },
        );
        guard("absorb", cancel, merge)
            .await
            .map_err(|e| e.with_context("absorb", K::TYPE_NAME, key))
    }

    // ── Read ─────────────────────────────────────────────────────────

    /// Refresh tracked state from the controller.
    ///
    /// A remote miss clears state (`Removed`), unless the kind reports
    /// misses as errors.
    pub async fn read<S>(
        &self,
        store: &mut S,
        cancel: &CancellationToken,
    ) -> Result<ReadOutcome, CoreError>
    where
        S: StateStore + Send,
    {
        let miss = K::capabilities().read_miss;
        self.read_tracked(store, miss, cancel).await
    }

    async fn read_tracked<S>(
        &self,
        store: &mut S,
        miss: ReadMiss,
        cancel: &CancellationToken,
    ) -> Result<ReadOutcome, CoreError>
    where
        S: StateStore + Send,
    {
        let prior: K::Model = required(store.state(), "state")?.get()?;
        let identity = store.identity().cloned().unwrap_or_default();
        let site = self.site_of(&prior);
        let id = known_non_empty(prior.id()).or_else(|| known_non_empty(&identity.id));
        let natural_key = K::model_natural_key(&prior).or_else(|| known_non_empty(&identity.natural_key));
        let key = id.clone().or_else(|| natural_key.clone()).unwrap_or_default();

        let span = info_span!("read", resource = K::TYPE_NAME, site = %site, key = %key);
        async {
            let fetched = self
                .fetch(&site, id.as_deref(), natural_key.as_deref(), cancel)
                .await;

            match fetched {
                Ok(remote) => {
                    record::<K>(store, &remote, &prior, &site)?;
                    debug!("state refreshed");
                    Ok(ReadOutcome::Present)
                }
                Err(e) if e.is_not_found() && miss == ReadMiss::Deregister => {
                    warn!("object no longer exists, removing from state");
                    store.clear_state();
                    Ok(ReadOutcome::Removed)
                }
                Err(e) => Err(e.with_context("read", K::TYPE_NAME, &key)),
            }
        }
        .instrument(span)
        .await
    }

    /// Fetch by id, or by natural key while the id is not yet known.
    async fn fetch(
        &self,
        site: &str,
        id: Option<&str>,
        natural_key: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<K::Object, CoreError> {
        match (id, natural_key) {
            (Some(id), _) => guard("read", cancel, self.api.get(site, id)).await,
            (None, Some(key)) => {
                debug!(key, "no id tracked, looking up by natural key");
                guard("read", cancel, self.api.get_by_natural_key(site, key)).await
            }
            (None, None) => Err(CoreError::validation(
                K::TYPE_NAME,
                "neither id nor natural key is known",
            )),
        }
    }

    // ── Update ───────────────────────────────────────────────────────

    /// Apply the plan to a tracked object.
    ///
    /// Known plan values win over prior state field by field; the result
    /// is merged over a fresh copy of the remote object and written back.
    pub async fn update<S>(&self, store: &mut S, cancel: &CancellationToken) -> Result<(), CoreError>
    where
        S: StateStore + Send,
    {
        let plan: K::Model = required(store.plan(), "plan")?.get()?;
        let prior: K::Model = required(store.state(), "state")?.get()?;
        let identity = store.identity().cloned().unwrap_or_default();
        let desired_model = plan.overlay(&prior);
        let site = self.site_of(&desired_model);
        let desired = K::to_remote(&desired_model)?;
        let natural_key = K::model_natural_key(&desired_model)
            .or_else(|| known_non_empty(&identity.natural_key));
        let known_id = known_non_empty(desired_model.id()).or_else(|| known_non_empty(&identity.id));

        let span = info_span!("update", resource = K::TYPE_NAME, site = %site);
        async {
            let id = match known_id {
                Some(id) => id,
                None => {
                    let key = natural_key.as_deref().unwrap_or_default();
                    let remote = self.fetch(&site, None, natural_key.as_deref(), cancel).await;
                    let remote = remote.map_err(|e| e.with_context("update", K::TYPE_NAME, key))?;
                    K::object_id(&remote).to_owned()
                }
            };

            let api = &*self.api;
            let merge = self.merger.merge_for_update(
                &site,
                &id,
                Some(&desired),
                |site, id| async move { api.get(&site, &id).await },
                |site, merged| async move { api.update(&site, &merged).await },
            );
            let updated = guard("update", cancel, merge)
                .await
                .map_err(|e| e.with_context("update", K::TYPE_NAME, &id))?;

            record::<K>(store, &updated, &desired_model, &site)?;
            info!(id = %id, "updated");
            Ok::<(), CoreError>(())
        }
        .instrument(span)
        .await
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Remove the object, or only disown it.
    ///
    /// Not-found is success. Kinds deleted by natural key resolve it from
    /// the id first when state does not carry it.
    pub async fn delete<S>(&self, store: &mut S, cancel: &CancellationToken) -> Result<(), CoreError>
    where
        S: StateStore + Send,
    {
        let Some(bag) = store.state() else {
            debug!(resource = K::TYPE_NAME, "nothing tracked, nothing to delete");
            return Ok(());
        };
        let prior: K::Model = bag.get()?;
        let identity = store.identity().cloned().unwrap_or_default();
        let site = self.site_of(&prior);
        let id = known_non_empty(prior.id()).or_else(|| known_non_empty(&identity.id));
        let natural_key = K::model_natural_key(&prior).or_else(|| known_non_empty(&identity.natural_key));
        let mode = K::capabilities().delete;

        let span = info_span!("delete", resource = K::TYPE_NAME, site = %site);
        async {
            if mode == DeleteMode::Disown || prior.skip_delete() {
                warn!("leaving remote object in place, removing from state only");
                store.clear_state();
                return Ok(());
            }

            let resolving = id.clone().or_else(|| natural_key.clone()).unwrap_or_default();
            let key = match self.delete_key(&site, mode, id, natural_key, cancel).await {
                Ok(key) => key,
                Err(e) if e.is_not_found() => {
                    debug!("object already gone");
                    store.clear_state();
                    return Ok(());
                }
                Err(e) => return Err(e.with_context("delete", K::TYPE_NAME, &resolving)),
            };

            match guard("delete", cancel, self.api.delete(&site, &key)).await {
                Ok(()) => info!(key = %key, "deleted"),
                Err(e) if e.is_not_found() => debug!(key = %key, "object already gone"),
                Err(e) => return Err(e.with_context("delete", K::TYPE_NAME, &key)),
            }
            store.clear_state();
            Ok::<(), CoreError>(())
        }
        .instrument(span)
        .await
    }

    /// The key `Delete` is called with, resolving it remotely if needed.
    async fn delete_key(
        &self,
        site: &str,
        mode: DeleteMode,
        id: Option<String>,
        natural_key: Option<String>,
        cancel: &CancellationToken,
    ) -> Result<String, CoreError> {
        match (mode, id, natural_key) {
            (DeleteMode::ByNaturalKey, _, Some(key)) | (DeleteMode::ById, Some(key), _) => Ok(key),
            (DeleteMode::ByNaturalKey, Some(id), None) => {
                debug!(id = %id, "resolving natural key before delete");
                let remote = guard("delete", cancel, self.api.get(site, &id)).await?;
                K::object_natural_key(&remote).ok_or_else(|| {
                    CoreError::validation(K::TYPE_NAME, format!("object {id} has no natural key"))
                })
            }
            (DeleteMode::ById, None, Some(key)) => {
                debug!(key = %key, "resolving id before delete");
                let remote = self.fetch(site, None, Some(&key), cancel).await?;
                Ok(K::object_id(&remote).to_owned())
            }
            _ => Err(CoreError::validation(
                K::TYPE_NAME,
                "neither id nor natural key is known",
            )),
        }
    }

    // ── Import ───────────────────────────────────────────────────────

    /// Start tracking an existing object named by an import identifier.
    ///
    /// The identifier is resolved to an id or natural key, written as a
    /// minimal state, and a Read fills in the rest. A miss is an error.
    pub async fn import<S>(
        &self,
        raw: &str,
        store: &mut S,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError>
    where
        S: StateStore + Send,
    {
        let target = K::parse_import(raw, &self.default_site)?;
        let searched = target.key.value().to_owned();
        let site = target.site.clone();

        let span = info_span!("import", resource = K::TYPE_NAME, site = %site, key = %searched);
        async {
            let identity = match target.key {
                ImportKey::Id(id) => ResourceIdentity::new(Some(id), None),
                ImportKey::NaturalKey(key) => ResourceIdentity::new(None, Some(key)),
                ImportKey::Name(name) => {
                    debug!("resolving name by listing");
                    let all = guard("import", cancel, self.api.list(&site))
                        .await
                        .map_err(|e| e.with_context("import", K::TYPE_NAME, &name))?;
                    let found = all
                        .into_iter()
                        .find(|o| K::matches_name(o, &name))
                        .ok_or_else(|| CoreError::not_found(K::TYPE_NAME, name.as_str()))?;
                    ResourceIdentity::new(
                        Some(K::object_id(&found).to_owned()),
                        K::object_natural_key(&found),
                    )
                }
            };

            let mut minimal = AttributeBag::new();
            if let Some(id) = identity.id.as_known() {
                minimal.set("id", serde_json::Value::String(id.clone()));
            }
            minimal.set("site", serde_json::Value::String(site.clone()));

            let mut staged = StagedStore::new(&mut *store, minimal, identity);
            self.read_tracked(&mut staged, ReadMiss::Error, cancel)
                .await
                .map_err(|e| match e {
                    CoreError::NotFound { .. } => CoreError::not_found(K::TYPE_NAME, searched.as_str()),
                    other => other.with_context("import", K::TYPE_NAME, &searched),
                })?;
            staged.commit();
            info!("imported");
            Ok::<(), CoreError>(())
        }
        .instrument(span)
        .await
    }

    fn site_of(&self, model: &K::Model) -> String {
        known_non_empty(model.site()).unwrap_or_else(|| self.default_site.clone())
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Race a controller call against cancellation.
async fn guard<T, F>(operation: &str, cancel: &CancellationToken, call: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CoreError::Cancelled {
            operation: operation.to_owned(),
        }),
        result = call => result,
    }
}

fn required<'a>(bag: Option<&'a AttributeBag>, which: &str) -> Result<&'a AttributeBag, CoreError> {
    bag.ok_or_else(|| CoreError::State {
        message: format!("no {which} available for this operation"),
    })
}

fn known_non_empty(value: &Value<String>) -> Option<String> {
    value.as_known().filter(|v| !v.is_empty()).cloned()
}

/// Write the model built from `remote` as state, and learn its identity.
fn record<K: ResourceKind>(
    store: &mut impl StateStore,
    remote: &K::Object,
    prior: &K::Model,
    site: &str,
) -> Result<(), CoreError> {
    let model = K::from_remote(remote, prior, site);
    store.set_state(AttributeBag::from_model(&model)?);
    let id = Some(K::object_id(remote).to_owned()).filter(|id| !id.is_empty());
    store.set_identity(ResourceIdentity::new(id, K::object_natural_key(remote)));
    Ok(())
}

/// Wraps a store during import: the minimal state lives here until the
/// Read succeeds, so a failed import leaves the real store untouched.
struct StagedStore<'a, S> {
    inner: &'a mut S,
    state: Option<AttributeBag>,
    identity: ResourceIdentity,
}

impl<'a, S: StateStore> StagedStore<'a, S> {
    fn new(inner: &'a mut S, state: AttributeBag, identity: ResourceIdentity) -> Self {
        Self {
            inner,
            state: Some(state),
            identity,
        }
    }

    fn commit(self) {
        match self.state {
            Some(state) => self.inner.set_state(state),
            None => self.inner.clear_state(),
        }
        self.inner.set_identity(self.identity);
    }
}

impl<S: StateStore> StateStore for StagedStore<'_, S> {
    fn plan(&self) -> Option<&AttributeBag> {
        self.inner.plan()
    }

    fn config(&self) -> Option<&AttributeBag> {
        self.inner.config()
    }

    fn state(&self) -> Option<&AttributeBag> {
        self.state.as_ref()
    }

    fn identity(&self) -> Option<&ResourceIdentity> {
        Some(&self.identity)
    }

    fn set_state(&mut self, state: AttributeBag) {
        self.state = Some(state);
    }

    fn clear_state(&mut self) {
        self.state = None;
    }

    fn set_identity(&mut self, identity: ResourceIdentity) {
        self.identity = identity;
    }
}
