use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Locale every entity starts with until a request says otherwise.
pub const DEFAULT_LOCALE: &str = "en";

/// A field stored as one text per locale code.
///
/// Locale codes are opaque: no case folding or region-subtag handling happens
/// here. Persisted as a JSON object (`{"en": "...", "fr": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedField(BTreeMap<String, String>);

impl LocalizedField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text for `locale`, or `""` when that locale was never written.
    pub fn get(&self, locale: &str) -> &str {
        self.0.get(locale).map(String::as_str).unwrap_or("")
    }

    /// Write `value` under `locale`, leaving every other locale untouched.
    pub fn set(&mut self, locale: &str, value: impl Into<String>) {
        self.0.insert(locale.to_string(), value.into());
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.0.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LocalizedField {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(locale, text)| (locale.to_string(), text.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_same_locale() {
        let mut field = LocalizedField::new();
        field.set("fr", "Bonjour");
        assert_eq!(field.get("fr"), "Bonjour");
    }

    #[test]
    fn missing_locale_reads_empty_without_inserting() {
        let field = LocalizedField::from([("en", "Hello")]);
        assert_eq!(field.get("de"), "");
        assert!(!field.contains("de"));
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn locales_are_isolated() {
        let mut field = LocalizedField::new();
        field.set("en", "Hello");
        assert_eq!(field.get("fr"), "");
        assert_eq!(field.get("en"), "Hello");

        field.set("fr", "Salut");
        field.set("fr", "Bonjour");
        assert_eq!(field.get("en"), "Hello");
        assert_eq!(field.get("fr"), "Bonjour");
    }

    #[test]
    fn empty_value_is_stored_but_reads_like_absent() {
        let mut field = LocalizedField::new();
        field.set("en", "");
        assert_eq!(field.get("en"), "");
        assert!(field.contains("en"));
        assert!(!field.contains("fr"));
    }

    #[test]
    fn locale_codes_are_not_normalized() {
        let mut field = LocalizedField::new();
        field.set("en-GB", "Colour");
        assert_eq!(field.get("en-gb"), "");
        assert_eq!(field.get("en"), "");
        assert_eq!(field.get("en-GB"), "Colour");
    }

    #[test]
    fn serializes_as_plain_object() {
        let field = LocalizedField::from([("fr", "Bonjour"), ("en", "Hello")]);
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"en":"Hello","fr":"Bonjour"}"#);

        let back: LocalizedField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
        assert_eq!(back.locales().collect::<Vec<_>>(), vec!["en", "fr"]);
    }
}
