// ── Identifier shapes ──
//
// Controller object ids are 24-char lowercase hex (MongoDB ObjectIds);
// client natural keys are MAC addresses. Import parsing and adapters both
// need to recognize and normalize these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const OBJECT_ID_LEN: usize = 24;

/// Whether `raw` has the exact shape of a controller object id.
pub fn is_object_id(raw: &str) -> bool {
    raw.len() == OBJECT_ID_LEN
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    /// Accepts colon-separated or dash-separated hex.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_lowercase().replace('-', ":");
        Self(normalized)
    }

    /// Parse only if `raw` is six hex pairs joined by `:` or `-`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::is_mac_shaped(raw).then(|| Self::new(raw))
    }

    /// Six two-digit hex groups with a single, consistent separator.
    pub fn is_mac_shaped(raw: &str) -> bool {
        let Some(sep) = raw.chars().find(|c| *c == ':' || *c == '-') else {
            return false;
        };
        let groups: Vec<&str> = raw.split(sep).collect();
        groups.len() == 6
            && groups
                .iter()
                .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
