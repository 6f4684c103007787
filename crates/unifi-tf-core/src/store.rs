// ── Declarative state store ──
//
// The reconciler's view of the orchestrator: tri-state attribute bags for
// plan, config and state, plus the tracked identity. Bags are JSON objects
// keyed by attribute name; models move in and out via serde.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::kind::ResourceIdentity;

/// A set of attribute values keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag(serde_json::Map<String, serde_json::Value>);

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the bag into a model.
    pub fn get<M: DeserializeOwned>(&self) -> Result<M, CoreError> {
        serde_json::from_value(serde_json::Value::Object(self.0.clone())).map_err(|e| {
            CoreError::State {
                message: e.to_string(),
            }
        })
    }

    /// Encode a model as a bag.
    pub fn from_model<M: Serialize>(model: &M) -> Result<Self, CoreError> {
        match serde_json::to_value(model) {
            Ok(serde_json::Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(CoreError::State {
                message: format!("model encoded as {other}, expected an object"),
            }),
            Err(e) => Err(CoreError::State {
                message: e.to_string(),
            }),
        }
    }

    /// Raw value of one attribute.
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// Whether `name` is a known `true`.
    pub fn flag(&self, name: &str) -> bool {
        self.attribute(name) == Some(&serde_json::Value::Bool(true))
    }

    pub fn set(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.0.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> serde_json::Map<String, serde_json::Value> {
        self.0
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for AttributeBag {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

/// Per-resource-instance access to the orchestrator's bags.
///
/// The reconciler reads plan, config, state and identity, and writes
/// state and identity.
pub trait StateStore {
    fn plan(&self) -> Option<&AttributeBag>;
    fn config(&self) -> Option<&AttributeBag>;
    fn state(&self) -> Option<&AttributeBag>;
    fn identity(&self) -> Option<&ResourceIdentity>;

    fn set_state(&mut self, state: AttributeBag);
    /// Drop the resource from tracked state (deregister).
    fn clear_state(&mut self);
    fn set_identity(&mut self, identity: ResourceIdentity);
}

/// In-memory [`StateStore`], for one lifecycle call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    pub plan: Option<AttributeBag>,
    pub config: Option<AttributeBag>,
    pub state: Option<AttributeBag>,
    pub identity: Option<ResourceIdentity>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `plan` as both plan and config, as the orchestrator does when
    /// config carries no extra information.
    pub fn with_plan(mut self, plan: AttributeBag) -> Self {
        self.config = Some(plan.clone());
        self.plan = Some(plan);
        self
    }

    pub fn with_config(mut self, config: AttributeBag) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_state(mut self, state: AttributeBag) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_identity(mut self, identity: ResourceIdentity) -> Self {
        self.identity = Some(identity);
        self
    }
}

impl StateStore for MemoryStore {
    fn plan(&self) -> Option<&AttributeBag> {
        self.plan.as_ref()
    }

    fn config(&self) -> Option<&AttributeBag> {
        self.config.as_ref()
    }

    fn state(&self) -> Option<&AttributeBag> {
        self.state.as_ref()
    }

    fn identity(&self) -> Option<&ResourceIdentity> {
        self.identity.as_ref()
    }

    fn set_state(&mut self, state: AttributeBag) {
        self.state = Some(state);
    }

    fn clear_state(&mut self) {
        self.state = None;
    }

    fn set_identity(&mut self, identity: ResourceIdentity) {
        self.identity = Some(identity);
    }
}
