// ── Resource kind seam ──
//
// A resource kind ties together a declarative model, a remote wire object,
// the merge policy between them, and the adapter functions that translate
// one into the other. The reconciler and merger are generic over it.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::import::{self, ImportTarget};
use crate::merge::{Merge, MergePolicy};
use crate::model::Value;

// ── Capabilities ─────────────────────────────────────────────────────

/// How a kind comes into existence on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateMode {
    /// A normal `Create` call.
    #[default]
    Post,
    /// The object always exists; "create" absorbs it.
    Singleton,
}

/// How a kind is removed from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// `Delete` keyed by the primary id.
    #[default]
    ById,
    /// `Delete` keyed by the natural key (resolved from the id if needed).
    ByNaturalKey,
    /// Never deleted remotely; only dropped from tracked state.
    Disown,
}

/// What a Read does when the object is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMiss {
    /// Treat the object as deleted remotely and clear tracked state.
    #[default]
    Deregister,
    /// Report the miss as an error.
    Error,
}

/// Lifecycle behaviour that differs between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub create: CreateMode,
    pub delete: DeleteMode,
    pub read_miss: ReadMiss,
}

// ── Identity ─────────────────────────────────────────────────────────

/// Secondary key pair tracked next to state, so import and refresh can
/// find an object by whichever half is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceIdentity {
    pub id: Value<String>,
    pub natural_key: Value<String>,
}

impl ResourceIdentity {
    pub fn new(id: Option<String>, natural_key: Option<String>) -> Self {
        Self {
            id: Value::from_option(id),
            natural_key: Value::from_option(natural_key),
        }
    }
}

// ── Model traits ─────────────────────────────────────────────────────

/// Fields every declarative model carries.
pub trait TrackedModel {
    /// Server-assigned id (computed).
    fn id(&self) -> &Value<String>;

    /// Site the object lives in; null means the provider's default.
    fn site(&self) -> &Value<String>;

    /// Whether Create may take over an object that already holds the
    /// natural key.
    fn allow_existing(&self) -> bool {
        false
    }

    /// Whether Delete should leave the remote object in place.
    fn skip_delete(&self) -> bool {
        false
    }
}

/// Field-level update precedence between a new plan and prior state.
pub trait Overlay {
    /// Known values of `self` win; every other field takes `prior`'s.
    #[must_use]
    fn overlay(&self, prior: &Self) -> Self;
}

/// Implement [`Overlay`] for a model whose fields are all [`Value`]s.
#[macro_export]
macro_rules! overlay_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::kind::Overlay for $ty {
            fn overlay(&self, prior: &Self) -> Self {
                Self {
                    $($field: self.$field.clone().or_prior(&prior.$field),)*
                }
            }
        }
    };
}

// ── ResourceKind ─────────────────────────────────────────────────────

/// One declarative resource type exposed by the provider.
pub trait ResourceKind: Send + Sync + 'static {
    /// Resource type name, e.g. `unifi_network`.
    const TYPE_NAME: &'static str;

    /// Declarative model (plan / state shape).
    type Model: TrackedModel
        + Overlay
        + Serialize
        + DeserializeOwned
        + Clone
        + Default
        + Debug
        + Send
        + Sync;

    /// Controller wire object.
    type Object: Merge + Clone + Default + Debug + Send + Sync;

    fn capabilities() -> Capabilities {
        Capabilities::default()
    }

    fn merge_policy() -> MergePolicy {
        MergePolicy::default()
    }

    /// Server-assigned id; empty before creation.
    fn object_id(object: &Self::Object) -> &str;

    /// Natural key of a remote object (name, normalized MAC, ...).
    fn object_natural_key(object: &Self::Object) -> Option<String>;

    /// Natural key the model asks for, if known.
    fn model_natural_key(model: &Self::Model) -> Option<String>;

    /// Build the wire object for a Create or as the overlay of an Update.
    fn to_remote(model: &Self::Model) -> Result<Self::Object, CoreError>;

    /// Fill fields the controller requires of a brand-new object when the
    /// plan left them empty, and reject what it would refuse.
    ///
    /// Runs only before a plain Create. An absorbed object keeps whatever
    /// the plan did not set, so defaults must never reach `to_remote`.
    fn prepare_create(object: &mut Self::Object) -> Result<(), CoreError> {
        let _ = object;
        Ok(())
    }

    /// Populate the model from a remote object. `prior` supplies values the
    /// controller never returns (write-only secrets, config-only flags).
    fn from_remote(object: &Self::Object, prior: &Self::Model, site: &str) -> Self::Model;

    /// Whether `object` answers to `name` during import-by-name.
    fn matches_name(object: &Self::Object, name: &str) -> bool {
        Self::object_natural_key(object).is_some_and(|k| k == name)
    }

    /// Parse an import identifier for this kind.
    fn parse_import(raw: &str, default_site: &str) -> Result<ImportTarget, CoreError> {
        import::parse(Self::TYPE_NAME, raw, default_site)
    }
}
