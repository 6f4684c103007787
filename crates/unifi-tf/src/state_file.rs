// ── State file ──
//
// The CLI's declarative state store: one JSON document holding every
// tracked resource by address. Entries keep insertion order so diffs of
// the file stay readable. Writes go to a temp file in the same directory
// and are renamed over the original.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use unifi_tf_core::{AttributeBag, MemoryStore, ResourceIdentity};

use crate::error::CliError;

pub const FORMAT_VERSION: u32 = 1;

/// One tracked resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub state: AttributeBag,
    #[serde(default)]
    pub identity: ResourceIdentity,
    pub updated_at: DateTime<Utc>,
}

impl TrackedResource {
    /// A store carrying this resource's state and identity.
    pub fn to_store(&self) -> MemoryStore {
        MemoryStore::new()
            .with_state(self.state.clone())
            .with_identity(self.identity.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    #[serde(default)]
    pub resources: IndexMap<String, TrackedResource>,
    #[serde(skip)]
    path: PathBuf,
}

impl StateFile {
    /// Load `path`; a missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no state file, starting empty");
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(e.into()),
        };

        let mut file: Self = serde_json::from_str(&contents).map_err(|e| CliError::StateFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if file.version != FORMAT_VERSION {
            return Err(CliError::StateFile {
                path: path.display().to_string(),
                reason: format!(
                    "format version {} is not supported (expected {FORMAT_VERSION})",
                    file.version
                ),
            });
        }
        file.path = path.to_path_buf();
        Ok(file)
    }

    fn empty(path: &Path) -> Self {
        Self {
            version: FORMAT_VERSION,
            resources: IndexMap::new(),
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, address: &str) -> Option<&TrackedResource> {
        self.resources.get(address)
    }

    /// Look up `address`, failing when it is not tracked.
    pub fn require(&self, address: &str) -> Result<&TrackedResource, CliError> {
        self.get(address).ok_or_else(|| CliError::NotTracked {
            address: address.to_owned(),
            path: self.path.display().to_string(),
        })
    }

    /// Write a store's outcome back: state present means upsert, absent
    /// means the resource is no longer tracked.
    ///
    /// Returns whether the address is still tracked.
    pub fn record(&mut self, address: &str, resource_type: &str, store: MemoryStore) -> bool {
        match store.state {
            Some(state) => {
                let identity = store.identity.unwrap_or_default();
                self.resources.insert(
                    address.to_owned(),
                    TrackedResource {
                        resource_type: resource_type.to_owned(),
                        state,
                        identity,
                        updated_at: Utc::now(),
                    },
                );
                true
            }
            None => {
                self.resources.shift_remove(address);
                false
            }
        }
    }

    /// Persist atomically next to the target path.
    pub fn save(&self) -> Result<(), CliError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let json = serde_json::to_string_pretty(self)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| CliError::Io(e.error))?;

        debug!(path = %self.path.display(), resources = self.resources.len(), "state saved");
        Ok(())
    }
}
