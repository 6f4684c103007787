// ── Import identifiers ──
//
// Accepted forms, tried in order:
//
//   name=<value>     explicit name lookup
//   <site>:<id>      exactly two colon-separated parts; the second is an id
//   24 lowercase hex an object id in the default site
//   MAC-shaped       a natural key (normalized)
//   anything else    a name, resolved by listing and filtering

use crate::error::CoreError;
use crate::model::{MacAddress, is_object_id};

const NAME_PREFIX: &str = "name=";

/// What an import identifier points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKey {
    Id(String),
    NaturalKey(String),
    Name(String),
}

impl ImportKey {
    /// The searched value, for diagnostics.
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v) | Self::NaturalKey(v) | Self::Name(v) => v,
        }
    }
}

/// A parsed import identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub site: String,
    pub key: ImportKey,
}

impl ImportTarget {
    pub fn new(site: impl Into<String>, key: ImportKey) -> Self {
        Self {
            site: site.into(),
            key,
        }
    }
}

/// Parse `raw` for a resource of type `resource`.
pub fn parse(resource: &str, raw: &str, default_site: &str) -> Result<ImportTarget, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::validation(resource, "import identifier is empty"));
    }

    if let Some(name) = raw.strip_prefix(NAME_PREFIX) {
        if name.is_empty() {
            return Err(CoreError::validation(
                resource,
                "import identifier `name=` needs a value",
            ));
        }
        return Ok(ImportTarget::new(default_site, ImportKey::Name(name.to_owned())));
    }

    let parts: Vec<&str> = raw.split(':').collect();
    if let [site, id] = parts.as_slice() {
        if site.is_empty() || id.is_empty() {
            return Err(CoreError::validation(
                resource,
                format!("import identifier {raw:?} must look like <site>:<id>"),
            ));
        }
        return Ok(ImportTarget::new(*site, ImportKey::Id((*id).to_owned())));
    }

    if is_object_id(raw) {
        return Ok(ImportTarget::new(default_site, ImportKey::Id(raw.to_owned())));
    }

    if let Some(mac) = MacAddress::parse(raw) {
        return Ok(ImportTarget::new(
            default_site,
            ImportKey::NaturalKey(mac.to_string()),
        ));
    }

    Ok(ImportTarget::new(default_site, ImportKey::Name(raw.to_owned())))
}
