//! Bilingual field resolution for remote records.
//!
//! Backend records carry optional Tamil twins of their display fields,
//! keyed by an `_tamil` suffix (`title` / `title_tamil`). Every screen used
//! to re-derive the fallback ternary inline; this crate is the single place
//! that rule lives so it cannot drift between screens.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Suffix convention for the Tamil twin of a field.
const TAMIL_SUFFIX: &str = "_tamil";

/// Display locale for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (base fields)
    En,
    /// Tamil (twin fields, falling back to base)
    Ta,
}

impl Locale {
    /// Language tag for this locale ("en" / "ta").
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ta => "ta",
        }
    }

    /// Parse a language tag. Unknown tags resolve to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "ta" => Locale::Ta,
            _ => Locale::En,
        }
    }
}

/// Resolve a display value from `record` for the given field and locale.
///
/// Rules:
/// - `Ta`: the `_tamil` twin when present and non-empty, else the base
///   field, else the empty string.
/// - `En`: the base field, else the empty string. The twin is never used
///   as a fallback for English.
///
/// Non-string JSON values (numbers, objects, null) count as absent. Never
/// panics, never yields a placeholder value.
pub fn resolve(record: &Value, field: &str, locale: Locale) -> String {
    if locale == Locale::Ta {
        let twin = format!("{}{}", field, TAMIL_SUFFIX);
        if let Some(value) = non_empty_str(record, &twin) {
            return value.to_string();
        }
    }
    non_empty_str(record, field)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Resolve several fields and join the non-empty results with `separator`.
///
/// Used for composite display lines such as address parts.
pub fn resolve_join(record: &Value, fields: &[&str], locale: Locale, separator: &str) -> String {
    fields
        .iter()
        .map(|field| resolve(record, field, locale))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn non_empty_str<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_only_resolves_for_both_locales() {
        let record = json!({ "title": "Paddy procurement" });

        assert_eq!(resolve(&record, "title", Locale::En), "Paddy procurement");
        assert_eq!(resolve(&record, "title", Locale::Ta), "Paddy procurement");
    }

    #[test]
    fn test_twin_used_for_tamil_only() {
        let record = json!({
            "title": "Paddy procurement",
            "title_tamil": "நெல் கொள்முதல்"
        });

        assert_eq!(resolve(&record, "title", Locale::Ta), "நெல் கொள்முதல்");
        assert_eq!(resolve(&record, "title", Locale::En), "Paddy procurement");
    }

    #[test]
    fn test_both_absent_yields_empty() {
        let record = json!({ "other": "x" });

        assert_eq!(resolve(&record, "title", Locale::En), "");
        assert_eq!(resolve(&record, "title", Locale::Ta), "");
    }

    #[test]
    fn test_empty_twin_falls_back_to_base() {
        let record = json!({ "title": "Base", "title_tamil": "" });

        assert_eq!(resolve(&record, "title", Locale::Ta), "Base");
    }

    #[test]
    fn test_non_string_values_count_as_absent() {
        let record = json!({ "title": 42, "title_tamil": null });

        assert_eq!(resolve(&record, "title", Locale::Ta), "");
        assert_eq!(resolve(&record, "title", Locale::En), "");
    }

    #[test]
    fn test_resolve_join_filters_empty_parts() {
        let record = json!({
            "village": "Kovilpatti",
            "village_tamil": "கோவில்பட்டி",
            "district": "Thoothukudi"
        });

        assert_eq!(
            resolve_join(&record, &["village", "taluk", "district"], Locale::En, ", "),
            "Kovilpatti, Thoothukudi"
        );
        assert_eq!(
            resolve_join(&record, &["village", "district"], Locale::Ta, ", "),
            "கோவில்பட்டி, Thoothukudi"
        );
    }

    #[test]
    fn test_resolve_join_all_empty() {
        let record = json!({});
        assert_eq!(resolve_join(&record, &["a", "b"], Locale::En, ", "), "");
    }

    #[test]
    fn test_locale_tags() {
        assert_eq!(Locale::from_tag("ta"), Locale::Ta);
        assert_eq!(Locale::from_tag("TA"), Locale::Ta);
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert_eq!(Locale::Ta.as_str(), "ta");
    }
}
