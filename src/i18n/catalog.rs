//! Translation catalog: per-locale key → text maps with a soft-failure lookup.
//!
//! Message files are JSON objects, one per locale (`en.json`, `nl.json`, ...).
//! Nested objects flatten to dotted keys, so `{"nav": {"home": "Home"}}`
//! provides `nav.home`. A key missing for the active locale resolves to the key
//! itself, which keeps untranslated text visible instead of breaking a page.

use crate::i18n::{Locale, SiteStrings, SupportedLocales};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read message file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in message file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("message file {path} must contain a JSON object")]
    NotAnObject { path: PathBuf },
}

#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    messages: HashMap<Locale, HashMap<String, String>>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with the built-in site chrome strings.
    pub fn builtin(locales: &SupportedLocales) -> Self {
        let mut catalog = Self::new();
        for locale in locales.iter() {
            for (key, text) in SiteStrings::for_locale(locale).entries() {
                catalog.insert(locale, key, text);
            }
        }
        catalog
    }

    /// Built-in strings overlaid with `<code>.json` files from `dir`.
    ///
    /// A supported locale without a file keeps only its built-in strings.
    ///
    /// # Arguments
    /// * `dir` - Directory holding one message file per locale (e.g., `nl.json`)
    /// * `locales` - The enabled locales; files for other codes are ignored
    ///
    /// # Errors
    /// Fails with a [`CatalogError`] when a present file cannot be read, is not
    /// valid JSON, or is not a JSON object.
    pub fn load_dir(dir: &Path, locales: &SupportedLocales) -> Result<Self, CatalogError> {
        let mut catalog = Self::builtin(locales);
        for locale in locales.iter() {
            let path = dir.join(format!("{}.json", locale.code()));
            if !path.exists() {
                warn!("No message file for '{}' at {}", locale, path.display());
                continue;
            }

            let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value = serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
                path: path.clone(),
                source,
            })?;
            if !value.is_object() {
                return Err(CatalogError::NotAnObject { path });
            }

            let added = catalog.merge_json(locale, &value);
            info!("Loaded {} messages for '{}' from {}", added, locale, path.display());
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, text: impl Into<String>) {
        self.messages
            .entry(locale)
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Merge a JSON object into `locale`, flattening nested objects to dotted
    /// keys. Strings, numbers and booleans become text; arrays and nulls are
    /// skipped. Returns the number of entries written.
    pub fn merge_json(&mut self, locale: Locale, value: &Value) -> usize {
        let mut flat = Vec::new();
        flatten("", value, &mut flat);
        let count = flat.len();
        for (key, text) in flat {
            self.insert(locale, key, text);
        }
        count
    }

    /// Exact lookup with no fallback.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.messages
            .get(&locale)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Text for `key` in `locale`, or the key itself when it is missing.
    pub fn translate(&self, locale: Locale, key: &str) -> String {
        match self.lookup(locale, key) {
            Some(text) => text.to_string(),
            None => {
                debug!("Missing translation for '{}' in '{}'", key, locale);
                key.to_string()
            }
        }
    }

    /// All entries for `locale` (empty when the locale has none).
    pub fn messages_for(&self, locale: Locale) -> HashMap<String, String> {
        self.messages.get(&locale).cloned().unwrap_or_default()
    }

    /// Number of entries for `locale`.
    pub fn len(&self, locale: Locale) -> usize {
        self.messages.get(&locale).map_or(0, HashMap::len)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&join(key), child, out);
            }
        }
        Value::String(text) if !prefix.is_empty() => out.push((prefix.to_string(), text.clone())),
        Value::Number(n) if !prefix.is_empty() => out.push((prefix.to_string(), n.to_string())),
        Value::Bool(b) if !prefix.is_empty() => out.push((prefix.to_string(), b.to_string())),
        _ => debug!("Skipping non-text message value at '{}'", prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    // ==================== Lookup Tests ====================

    #[test]
    fn test_builtin_has_chrome_strings() {
        let catalog = TranslationCatalog::builtin(&SupportedLocales::default());
        assert_eq!(catalog.translate(Locale::DUTCH, "nav.cranes"), "Torenkranen");
        assert_eq!(catalog.translate(Locale::GERMAN, "nav.home"), "Startseite");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let catalog = TranslationCatalog::builtin(&SupportedLocales::default());
        for locale in SupportedLocales::default().iter() {
            assert_eq!(catalog.translate(locale, "nonexistent.key"), "nonexistent.key");
        }
    }

    #[test]
    fn test_no_cross_locale_fallback() {
        let mut catalog = TranslationCatalog::new();
        catalog.insert(Locale::ENGLISH, "hero.title", "Tower cranes for sale");
        assert_eq!(catalog.translate(Locale::DUTCH, "hero.title"), "hero.title");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = TranslationCatalog::new();
        assert_eq!(catalog.lookup(Locale::ENGLISH, "nav.home"), None);
        assert_eq!(catalog.len(Locale::ENGLISH), 0);
        assert!(catalog.messages_for(Locale::ENGLISH).is_empty());
    }

    // ==================== merge_json Tests ====================

    #[test]
    fn test_merge_json_flattens_nested_objects() {
        let mut catalog = TranslationCatalog::new();
        let added = catalog.merge_json(
            Locale::DUTCH,
            &json!({"hero": {"title": "Torenkranen te koop", "cta": {"primary": "Offerte"}}}),
        );
        assert_eq!(added, 2);
        assert_eq!(catalog.lookup(Locale::DUTCH, "hero.title"), Some("Torenkranen te koop"));
        assert_eq!(catalog.lookup(Locale::DUTCH, "hero.cta.primary"), Some("Offerte"));
    }

    #[test]
    fn test_merge_json_stringifies_scalars_and_skips_others() {
        let mut catalog = TranslationCatalog::new();
        let added = catalog.merge_json(
            Locale::GERMAN,
            &json!({"specs": {"max_load": 12, "available": true, "list": [1, 2], "none": null}}),
        );
        assert_eq!(added, 2);
        assert_eq!(catalog.lookup(Locale::GERMAN, "specs.max_load"), Some("12"));
        assert_eq!(catalog.lookup(Locale::GERMAN, "specs.available"), Some("true"));
        assert_eq!(catalog.lookup(Locale::GERMAN, "specs.list"), None);
    }

    #[test]
    fn test_merge_json_overrides_builtin() {
        let mut catalog = TranslationCatalog::builtin(&SupportedLocales::default());
        catalog.merge_json(Locale::ENGLISH, &json!({"nav": {"home": "Start"}}));
        assert_eq!(catalog.translate(Locale::ENGLISH, "nav.home"), "Start");
    }

    // ==================== load_dir Tests ====================

    #[test]
    fn test_load_dir_reads_locale_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("nl.json"), r#"{"faq": {"title": "Vragen"}}"#).unwrap();

        let catalog = TranslationCatalog::load_dir(dir.path(), &SupportedLocales::default())
            .expect("load should succeed");
        assert_eq!(catalog.translate(Locale::DUTCH, "faq.title"), "Vragen");
        // locales without a file keep the built-in strings
        assert_eq!(catalog.translate(Locale::GERMAN, "nav.contact"), "Kontakt");
    }

    #[test]
    fn test_load_dir_invalid_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("de.json"), "{ not json").unwrap();

        let err = TranslationCatalog::load_dir(dir.path(), &SupportedLocales::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_load_dir_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("en.json"), r#"["a", "b"]"#).unwrap();

        let err = TranslationCatalog::load_dir(dir.path(), &SupportedLocales::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject { .. }));
    }
}
