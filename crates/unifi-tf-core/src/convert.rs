// ── Adapter helpers ──
//
// Shared conversions between declarative `Value`s and wire fields. Reading
// from the controller maps "empty" to null (empty string, zero, empty
// list) so the next merge round treats it as unset. Writing to the
// controller maps null and unknown to "empty".

use crate::model::Value;

// ── Remote → model ──────────────────────────────────────────────────

/// Empty string becomes null.
pub fn string(raw: &str) -> Value<String> {
    if raw.is_empty() {
        Value::Null
    } else {
        Value::Known(raw.to_owned())
    }
}

/// Missing or zero becomes null.
pub fn int(raw: Option<i64>) -> Value<i64> {
    match raw {
        Some(0) | None => Value::Null,
        Some(n) => Value::Known(n),
    }
}

/// Missing becomes null; zero is kept.
pub fn int_zero_ok(raw: Option<i64>) -> Value<i64> {
    Value::from_option(raw)
}

pub fn flag(raw: Option<bool>) -> Value<bool> {
    Value::from_option(raw)
}

/// Empty list becomes null.
pub fn list<T: Clone>(raw: &[T]) -> Value<Vec<T>> {
    if raw.is_empty() {
        Value::Null
    } else {
        Value::Known(raw.to_vec())
    }
}

/// Write-only attributes are never read back; keep what the model had.
pub fn write_only(prior: &Value<String>) -> Value<String> {
    prior.clone()
}

// ── Model → remote ──────────────────────────────────────────────────

/// Known string, or empty.
pub fn wire_string(value: &Value<String>) -> String {
    value.as_known().cloned().unwrap_or_default()
}

/// Known scalar, or `None`.
pub fn wire_opt<T: Clone>(value: &Value<T>) -> Option<T> {
    value.as_known().cloned()
}

/// Known list, or empty.
pub fn wire_list<T: Clone>(value: &Value<Vec<T>>) -> Vec<T> {
    value.as_known().cloned().unwrap_or_default()
}

/// Known `true`.
pub fn is_set(value: &Value<bool>) -> bool {
    value.as_known().copied().unwrap_or(false)
}
