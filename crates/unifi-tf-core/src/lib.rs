// unifi-tf-core: Merge and reconciliation engine for declarative UniFi resources.
//
// Sits between an orchestrator's plan/state bags and the controller API:
// tri-state attribute values, the field merge policy, the read-merge-update
// merger, and the Create/Read/Update/Delete/Import state machine, plus the
// catalogue of resource kinds and the controller-backed `ResourceApi`.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod import;
pub mod kind;
pub mod merge;
pub mod merger;
pub mod model;
pub mod reconcile;
pub mod resource_api;
pub mod resources;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ProviderConfig, TlsVerification};
pub use controller::ControllerApi;
pub use error::CoreError;
pub use import::{ImportKey, ImportTarget};
pub use kind::{
    Capabilities, CreateMode, DeleteMode, Overlay, ReadMiss, ResourceIdentity, ResourceKind,
    TrackedModel,
};
pub use merge::{DEFAULT_SKIP_FIELDS, Merge, MergeField, MergePolicy};
pub use merger::ResourceMerger;
pub use model::{MacAddress, Value};
pub use reconcile::{ReadOutcome, Reconciler};
pub use resource_api::ResourceApi;
pub use resources::ResourceType;
pub use store::{AttributeBag, MemoryStore, StateStore};
