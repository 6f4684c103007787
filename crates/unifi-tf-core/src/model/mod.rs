// ── Model layer ──
//
// Declarative-side building blocks shared by every resource kind: the
// tri-state attribute value and identifier shapes.

pub mod ids;
pub mod value;

pub use ids::{MacAddress, is_object_id};
pub use value::Value;
