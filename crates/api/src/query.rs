//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use kinoteka_core::fields::FieldSelection;
use serde::Deserialize;

/// Field-selection parameters (`?include_fields=&exclude_fields=`).
///
/// Accepted by every catalog list and detail endpoint. Values are
/// comma-separated field names; exclusion applies after inclusion and
/// unknown names are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct FieldParams {
    pub include_fields: Option<String>,
    pub exclude_fields: Option<String>,
}

impl FieldParams {
    /// Parse into the domain-level [`FieldSelection`].
    pub fn selection(&self) -> FieldSelection {
        FieldSelection::from_params(self.include_fields.as_deref(), self.exclude_fields.as_deref())
    }
}
