//! Dynamic response-field selection.
//!
//! List and detail endpoints accept `?include_fields=` and
//! `?exclude_fields=` (comma-separated field names). The effective field
//! set is:
//!
//! ```text
//! effective = (include.is_empty() ? base : base ∩ include) − exclude
//! ```
//!
//! Exclusion always applies after inclusion. Names that do not exist on
//! the payload are silently ignored.

use std::collections::BTreeSet;

use serde_json::Value;

/// Caller-supplied include/exclude field sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

impl FieldSelection {
    /// Parse from the raw query-parameter strings. `None` or an empty
    /// string means "no restriction" for that knob.
    pub fn from_params(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: parse_list(include),
            exclude: parse_list(exclude),
        }
    }

    /// True when the selection changes nothing.
    pub fn is_noop(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Whether `field` survives the selection.
    pub fn retains(&self, field: &str) -> bool {
        if !self.include.is_empty() && !self.include.contains(field) {
            return false;
        }
        !self.exclude.contains(field)
    }

    /// Prune the top-level keys of a JSON object in place.
    ///
    /// Non-object values (arrays are handled element-wise by [`shape`])
    /// are left untouched.
    pub fn apply(&self, value: &mut Value) {
        if self.is_noop() {
            return;
        }
        if let Value::Object(map) = value {
            map.retain(|key, _| self.retains(key));
        }
    }
}

/// Shape a serialized payload: objects are pruned directly, arrays have
/// each element pruned.
pub fn shape(mut value: Value, selection: &FieldSelection) -> Value {
    match &mut value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                selection.apply(item);
            }
        }
        _ => selection.apply(&mut value),
    }
    value
}

fn parse_list(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
