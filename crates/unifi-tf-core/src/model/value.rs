// ── Tri-state attribute value ──
//
// Every declarative attribute is null (not configured), unknown (to be
// computed during apply) or known. The distinction matters: an unknown
// plan value defers to prior state, a null one clears nothing and is
// never sent. Reading either as a concrete value is an error.
//
// JSON form: `null` for Null, `{"unknown": true}` for Unknown, the bare
// value for Known.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A null / unknown / known attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value<T> {
    #[default]
    Null,
    Unknown,
    Known(T),
}

impl<T> Value<T> {
    pub fn known(value: T) -> Self {
        Self::Known(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The concrete value, if known.
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    /// Read the concrete value, failing on null or unknown.
    pub fn require(&self, attribute: &str) -> Result<&T, CoreError> {
        self.as_known().ok_or_else(|| CoreError::UnknownValue {
            attribute: attribute.to_owned(),
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Self::Known(v) => Value::Known(f(v)),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// `None` becomes Null.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Known)
    }
}

impl<T: Clone> Value<T> {
    /// Field-level update precedence: a known value wins, anything else
    /// falls back to the prior tracked value.
    #[must_use]
    pub fn or_prior(self, prior: &Self) -> Self {
        match self {
            Self::Known(_) => self,
            Self::Null | Self::Unknown => prior.clone(),
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Self::Known(value.to_owned())
    }
}

// ── Serde ────────────────────────────────────────────────────────────

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Unknown => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("unknown", &true)?;
                map.end()
            }
            Self::Known(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Self::Null);
        }
        if is_unknown_marker(&raw) {
            return Ok(Self::Unknown);
        }
        serde_json::from_value(raw)
            .map(Self::Known)
            .map_err(D::Error::custom)
    }
}

fn is_unknown_marker(raw: &serde_json::Value) -> bool {
    raw.as_object()
        .is_some_and(|m| m.len() == 1 && m.get("unknown") == Some(&serde_json::Value::Bool(true)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_forms() {
        assert_eq!(serde_json::to_value(Value::<i64>::Null).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(Value::<i64>::Unknown).unwrap(),
            json!({ "unknown": true })
        );
        assert_eq!(serde_json::to_value(Value::known(7_i64)).unwrap(), json!(7));

        let v: Value<Vec<String>> = serde_json::from_value(json!({ "unknown": true })).unwrap();
        assert!(v.is_unknown());
        let v: Value<String> = serde_json::from_value(json!(null)).unwrap();
        assert!(v.is_null());
        let v: Value<String> = serde_json::from_value(json!("lan")).unwrap();
        assert_eq!(v.as_known().map(String::as_str), Some("lan"));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let res: Result<Value<i64>, _> = serde_json::from_value(json!("ten"));
        assert!(res.is_err());
    }

    #[test]
    fn require_guards_null_and_unknown() {
        assert!(Value::<String>::Null.require("name").is_err());
        assert!(matches!(
            Value::<String>::Unknown.require("name"),
            Err(CoreError::UnknownValue { attribute }) if attribute == "name"
        ));
        assert_eq!(Value::known(1_i64).require("vlan").unwrap(), &1);
    }

    #[test]
    fn or_prior_precedence() {
        let prior = Value::known("old".to_owned());
        assert_eq!(
            Value::known("new".to_owned()).or_prior(&prior),
            Value::known("new".to_owned())
        );
        assert_eq!(Value::Unknown.or_prior(&prior), prior);
        assert_eq!(Value::Null.or_prior(&prior), prior);
        assert_eq!(Value::<String>::Null.or_prior(&Value::Null), Value::Null);
    }
}
