//! Sort-key parsing shared by the repositories.
//!
//! A sort parameter is a bare key for ascending order or a `-`-prefixed
//! key for descending (`?sort=-rate`). Keys are mapped through a
//! per-query allow-list of `(external key, SQL expression)` pairs, so the
//! resulting ORDER BY clause only ever contains known expressions.
//! Unknown keys fall back to the default ordering.

/// Resolve a raw sort parameter into an ORDER BY clause body.
pub fn order_clause(raw: Option<&str>, allowed: &[(&str, &str)], default: &str) -> String {
    let Some(raw) = raw else {
        return default.to_string();
    };
    let (key, direction) = match raw.strip_prefix('-') {
        Some(stripped) => (stripped, "DESC"),
        None => (raw, "ASC"),
    };
    for (name, expr) in allowed {
        if *name == key {
            return format!("{expr} {direction}");
        }
    }
    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[(&str, &str)] = &[("title", "m.title"), ("rate", "rate")];

    #[test]
    fn test_ascending_by_default() {
        assert_eq!(order_clause(Some("title"), ALLOWED, "m.id"), "m.title ASC");
    }

    #[test]
    fn test_minus_prefix_descends() {
        assert_eq!(order_clause(Some("-rate"), ALLOWED, "m.id"), "rate DESC");
    }

    #[test]
    fn test_unknown_key_falls_back_to_default() {
        assert_eq!(order_clause(Some("password"), ALLOWED, "m.id"), "m.id");
        assert_eq!(order_clause(Some("-drop table"), ALLOWED, "m.id"), "m.id");
    }

    #[test]
    fn test_missing_parameter_uses_default() {
        assert_eq!(order_clause(None, ALLOWED, "rate DESC"), "rate DESC");
    }
}
