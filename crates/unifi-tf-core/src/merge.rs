// ── Field merge policy ──
//
// Combines a remote object (destination) with a desired object (source)
// field by field. Per-kind rules:
//
//   string          source wins if non-empty
//   bool            source always wins
//   integer/float   source wins if non-zero, or if the field is zero-meaningful
//   collections     source wins if non-empty
//   Option<T>       None leaves the destination alone; Some recurses
//   nested struct   recurse with the same policy
//   anything else   source wins if it is not the type's default
//
// Struct merges are generated per type by `merge_fields!`, so there is no
// runtime type inspection and no mismatch to fail on. Fields named in the
// policy's skip list keep the destination value verbatim.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{BuildHasher, Hash};

/// Server-owned fields that no merge may overwrite.
pub const DEFAULT_SKIP_FIELDS: &[&str] = &[
    "id",
    "site_id",
    "attr_hidden",
    "attr_hidden_id",
    "attr_no_delete",
    "attr_no_edit",
    "external_id",
    "revision",
    "created_at",
    "updated_at",
];

/// Which fields a merge must leave alone, and which accept zero.
///
/// Field names compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePolicy {
    skip: Vec<String>,
    zero_meaningful: Vec<String>,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP_FIELDS.iter().map(|&f| f.to_owned()).collect(),
            zero_meaningful: Vec::new(),
        }
    }
}

impl MergePolicy {
    /// The default skip list, no zero-meaningful fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// No skip list at all. Every field is mergeable.
    pub fn permissive() -> Self {
        Self {
            skip: Vec::new(),
            zero_meaningful: Vec::new(),
        }
    }

    /// Never merge `field`.
    pub fn skip(mut self, field: impl Into<String>) -> Self {
        self.skip.push(field.into());
        self
    }

    /// Let a zero source value override `field`.
    pub fn zero_meaningful(mut self, field: impl Into<String>) -> Self {
        self.zero_meaningful.push(field.into());
        self
    }

    pub fn skips(&self, field: &str) -> bool {
        self.skip.iter().any(|f| f.eq_ignore_ascii_case(field))
    }

    pub fn is_zero_meaningful(&self, field: &str) -> bool {
        self.zero_meaningful
            .iter()
            .any(|f| f.eq_ignore_ascii_case(field))
    }

    pub fn skip_fields(&self) -> impl Iterator<Item = &str> {
        self.skip.iter().map(String::as_str)
    }

    pub fn zero_meaningful_fields(&self) -> impl Iterator<Item = &str> {
        self.zero_meaningful.iter().map(String::as_str)
    }
}

// ── Traits ───────────────────────────────────────────────────────────

/// Merge rule for one field of a given type.
pub trait MergeField {
    /// Overlay `source` onto `self`. `zero_meaningful` is the policy's
    /// verdict for the field being merged; only numeric rules read it.
    fn merge_field(&mut self, source: &Self, zero_meaningful: bool, policy: &MergePolicy);
}

/// A whole object that can be merged under a [`MergePolicy`].
///
/// Implemented with [`merge_fields!`](crate::merge_fields).
pub trait Merge {
    fn merge_with(&mut self, source: &Self, policy: &MergePolicy);

    /// Merge into a copy of `self`, leaving `self` untouched.
    #[must_use]
    fn merged(&self, source: &Self, policy: &MergePolicy) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.merge_with(source, policy);
        out
    }
}

/// Implement [`Merge`] (and [`MergeField`], for nesting) for a struct by
/// listing every one of its fields.
///
/// The list is checked for exhaustiveness at compile time: adding a field
/// to the struct without adding it here is a build error.
///
/// ```ignore
/// merge_fields!(Network { id, site_id, name, vlan, extra });
/// ```
#[macro_export]
macro_rules! merge_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::merge::Merge for $ty {
            fn merge_with(&mut self, source: &Self, policy: &$crate::merge::MergePolicy) {
                let Self { $($field: _),* } = source;
                $(
                    if !policy.skips(stringify!($field)) {
                        $crate::merge::MergeField::merge_field(
                            &mut self.$field,
                            &source.$field,
                            policy.is_zero_meaningful(stringify!($field)),
                            policy,
                        );
                    }
                )*
            }
        }

        impl $crate::merge::MergeField for $ty {
            fn merge_field(
                &mut self,
                source: &Self,
                _zero_meaningful: bool,
                policy: &$crate::merge::MergePolicy,
            ) {
                $crate::merge::Merge::merge_with(self, source, policy);
            }
        }
    };
}

/// Implement [`MergeField`] with the fallback rule: the source wins unless
/// it equals `Default::default()`. For enums and other leaf types.
#[macro_export]
macro_rules! merge_non_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::merge::MergeField for $ty {
                fn merge_field(
                    &mut self,
                    source: &Self,
                    _zero_meaningful: bool,
                    _policy: &$crate::merge::MergePolicy,
                ) {
                    if *source != <$ty as ::core::default::Default>::default() {
                        self.clone_from(source);
                    }
                }
            }
        )*
    };
}

// ── Scalars ──────────────────────────────────────────────────────────

impl MergeField for String {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        if !source.is_empty() {
            self.clone_from(source);
        }
    }
}

impl MergeField for bool {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        *self = *source;
    }
}

macro_rules! merge_integer {
    ($($ty:ty),*) => {
        $(
            impl MergeField for $ty {
                fn merge_field(&mut self, source: &Self, zero_meaningful: bool, _: &MergePolicy) {
                    if zero_meaningful || *source != 0 {
                        *self = *source;
                    }
                }
            }
        )*
    };
}

merge_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

macro_rules! merge_float {
    ($($ty:ty),*) => {
        $(
            impl MergeField for $ty {
                #[allow(clippy::float_cmp)]
                fn merge_field(&mut self, source: &Self, zero_meaningful: bool, _: &MergePolicy) {
                    if zero_meaningful || *source != 0.0 {
                        *self = *source;
                    }
                }
            }
        )*
    };
}

merge_float!(f32, f64);

merge_non_default!(char);

// ── Optional ─────────────────────────────────────────────────────────

impl<T: MergeField + Default> MergeField for Option<T> {
    fn merge_field(&mut self, source: &Self, zero_meaningful: bool, policy: &MergePolicy) {
        if let Some(src) = source {
            self.get_or_insert_with(T::default)
                .merge_field(src, zero_meaningful, policy);
        }
    }
}

// ── Collections ──────────────────────────────────────────────────────

impl<T: Clone> MergeField for Vec<T> {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        if !source.is_empty() {
            self.clone_from(source);
        }
    }
}

impl<T: Clone + Ord> MergeField for BTreeSet<T> {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        if !source.is_empty() {
            self.clone_from(source);
        }
    }
}

impl<K: Clone + Ord, V: Clone> MergeField for BTreeMap<K, V> {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        if !source.is_empty() {
            self.clone_from(source);
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone, S: BuildHasher + Clone> MergeField for HashMap<K, V, S> {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        if !source.is_empty() {
            self.clone_from(source);
        }
    }
}

impl MergeField for serde_json::Map<String, serde_json::Value> {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        if !source.is_empty() {
            self.clone_from(source);
        }
    }
}

impl MergeField for serde_json::Value {
    fn merge_field(&mut self, source: &Self, _: bool, _: &MergePolicy) {
        if !source.is_null() {
            self.clone_from(source);
        }
    }
}
