//! Country name normalization
//!
//! Free-text country names from the collection are normalized into keys
//! matching the world boundaries GeoJSON feature names. A small alias table
//! covers the usual short forms; unmatched keys pass through normalized.

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::genres::collapse_non_alphanumeric;

lazy_static! {
    static ref COUNTRY_ALIASES: HashMap<&'static str, &'static str> = [
        ("usa", "united states of america"),
        ("us", "united states of america"),
        ("uk", "united kingdom"),
        ("uae", "united arab emirates"),
        ("russia", "russian federation"),
        ("czechia", "czech republic"),
        ("south korea", "korea republic of"),
        ("north korea", "korea democratic peoples republic of"),
    ]
    .into_iter()
    .collect();
}

/// Normalize a country name into its aggregation key
///
/// Lowercase, `&` -> " and ", collapse non-alphanumeric runs to single
/// spaces, trim, then exact alias substitution. Empty input yields an empty
/// string, which country aggregates treat as "no country".
pub fn normalize_country_key(value: &str) -> String {
    let normalized = collapse_non_alphanumeric(&value.to_lowercase().replace('&', " and "));
    if normalized.is_empty() {
        return normalized;
    }
    match COUNTRY_ALIASES.get(normalized.as_str()) {
        Some(alias) => (*alias).to_string(),
        None => normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_substitution() {
        assert_eq!(normalize_country_key("USA"), "united states of america");
        assert_eq!(normalize_country_key(" Usa "), "united states of america");
        assert_eq!(normalize_country_key("UK"), "united kingdom");
        assert_eq!(normalize_country_key("South Korea"), "korea republic of");
        assert_eq!(normalize_country_key("Russia"), "russian federation");
    }

    #[test]
    fn test_passthrough_when_unaliased() {
        assert_eq!(normalize_country_key("Japan"), "japan");
        assert_eq!(normalize_country_key("Trinidad & Tobago"), "trinidad and tobago");
    }

    #[test]
    fn test_garbage_normalizes_without_error() {
        // non-ASCII letters fall out with the punctuation
        assert_eq!(normalize_country_key("Ürümqi???"), "r mqi");
        assert_eq!(normalize_country_key(""), "");
        assert_eq!(normalize_country_key("???"), "");
    }
}
