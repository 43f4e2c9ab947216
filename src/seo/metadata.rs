//! Metadata canonicalizer: canonical URL and hreflang alternates per page.
//!
//! The canonical URL always carries an explicit locale segment, including for
//! the default locale. The default locale's alternate (and `x-default`) omit
//! the prefix, because the site serves default-locale content both at `/en/...`
//! and at the bare `/...` path.

use crate::config::SiteOrigin;
use crate::i18n::{parse_path, prefixed, Locale, SupportedLocales};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// hreflang key for crawlers that match no declared locale.
pub const X_DEFAULT: &str = "x-default";

/// Page metadata: caller-owned fields plus the computed `alternates` block.
///
/// Serializes flat, so `{"title": "Home", "alternates": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternates: Option<Alternates>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternates {
    pub canonical: String,

    /// Locale code (plus `x-default`) → absolute URL.
    pub languages: BTreeMap<String, String>,
}

/// Canonicalizer bound to one deployment's origin and locale set.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    origin: SiteOrigin,
    locales: SupportedLocales,
}

impl Canonicalizer {
    pub fn new(origin: SiteOrigin, locales: SupportedLocales) -> Self {
        Self { origin, locales }
    }

    /// The site origin every generated URL starts with.
    pub fn origin(&self) -> &SiteOrigin {
        &self.origin
    }

    /// The enabled locales, default first.
    pub fn locales(&self) -> &SupportedLocales {
        &self.locales
    }

    /// Run [`generate_metadata`] with this deployment's origin and locales.
    ///
    /// # Arguments
    /// * `base` - Caller metadata; everything except `alternates` passes through
    /// * `path` - The request path, with or without a locale prefix
    ///
    /// # Returns
    /// `base` with freshly computed `alternates`.
    pub fn generate(&self, base: MetadataRecord, path: &str) -> MetadataRecord {
        generate_metadata(base, path, &self.origin, &self.locales)
    }
}

/// Extend `base` with a canonical URL and a full set of locale alternates.
///
/// Every field of `base` passes through untouched except `alternates`, which
/// is replaced. Never fails: `origin` and `locales` are validated at
/// construction and any path string parses.
pub fn generate_metadata(
    base: MetadataRecord,
    path: &str,
    origin: &SiteOrigin,
    locales: &SupportedLocales,
) -> MetadataRecord {
    let parsed = parse_path(path, locales);
    let effective = parsed.locale.unwrap_or_else(|| locales.default_locale());
    let canonical = canonical_url(origin, effective, &parsed.path_without_locale);

    let mut languages = BTreeMap::new();
    for locale in locales.iter() {
        languages.insert(
            locale.code().to_string(),
            alternate_url(origin, locale, &parsed.path_without_locale, locales),
        );
    }
    languages.insert(
        X_DEFAULT.to_string(),
        unprefixed_url(origin, &parsed.path_without_locale),
    );

    MetadataRecord {
        fields: base.fields,
        alternates: Some(Alternates {
            canonical,
            languages,
        }),
    }
}

/// `origin/{locale}{path}`; the bare locale root when `path_without_locale` is `/`.
pub fn canonical_url(origin: &SiteOrigin, locale: Locale, path_without_locale: &str) -> String {
    let url = format!("{}{}", origin, prefixed(locale, path_without_locale));
    trim_trailing_slash(url)
}

/// hreflang target for `locale`: unprefixed for the default locale, prefixed otherwise.
pub fn alternate_url(
    origin: &SiteOrigin,
    locale: Locale,
    path_without_locale: &str,
    locales: &SupportedLocales,
) -> String {
    if locales.is_default(locale) {
        unprefixed_url(origin, path_without_locale)
    } else {
        canonical_url(origin, locale, path_without_locale)
    }
}

fn unprefixed_url(origin: &SiteOrigin, path_without_locale: &str) -> String {
    if path_without_locale == "/" {
        origin.to_string()
    } else {
        trim_trailing_slash(format!("{}{}", origin, path_without_locale))
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn origin() -> SiteOrigin {
        SiteOrigin::parse("https://example.com").unwrap()
    }

    fn generate(path: &str) -> Alternates {
        generate_metadata(
            MetadataRecord::new().with_field("title", "Home"),
            path,
            &origin(),
            &SupportedLocales::default(),
        )
        .alternates
        .expect("alternates are always set")
    }

    // ==================== Canonical Tests ====================

    #[test]
    fn test_about_page_scenario() {
        let alternates = generate("/en/about");
        assert_eq!(alternates.canonical, "https://example.com/en/about");
        assert_eq!(alternates.languages["en"], "https://example.com/about");
        assert_eq!(alternates.languages["nl"], "https://example.com/nl/about");
        assert_eq!(alternates.languages["de"], "https://example.com/de/about");
        assert_eq!(alternates.languages["x-default"], "https://example.com/about");
        assert_eq!(alternates.languages.len(), 4);
    }

    #[test]
    fn test_unprefixed_path_canonical_uses_default_locale() {
        let alternates = generate("/about");
        assert_eq!(alternates.canonical, "https://example.com/en/about");
    }

    #[test]
    fn test_non_default_locale_canonical() {
        let alternates = generate("/de/kontakt/");
        assert_eq!(alternates.canonical, "https://example.com/de/kontakt");
        assert_eq!(alternates.languages["en"], "https://example.com/kontakt");
    }

    #[test]
    fn test_root_path() {
        let alternates = generate("/");
        assert_eq!(alternates.canonical, "https://example.com/en");
        assert_eq!(alternates.languages["en"], "https://example.com");
        assert_eq!(alternates.languages["nl"], "https://example.com/nl");
        assert_eq!(alternates.languages["x-default"], "https://example.com");
    }

    #[test]
    fn test_bare_locale_root() {
        let alternates = generate("/nl");
        assert_eq!(alternates.canonical, "https://example.com/nl");
        assert_eq!(alternates.languages["de"], "https://example.com/de");
    }

    #[test]
    fn test_unknown_prefix_stays_in_content_path() {
        let alternates = generate("/fr/about");
        assert_eq!(alternates.canonical, "https://example.com/en/fr/about");
        assert_eq!(alternates.languages["nl"], "https://example.com/nl/fr/about");
    }

    #[test]
    fn test_malformed_path_is_root() {
        let alternates = generate("\u{7}garbage");
        assert_eq!(alternates.canonical, "https://example.com/en");
    }

    #[test]
    fn test_dot_segments_never_reach_alternates() {
        let alternates = generate("/nl/../de/x");
        assert_eq!(alternates.canonical, "https://example.com/en");
        assert_eq!(alternates.languages["en"], "https://example.com");
        assert_eq!(alternates.languages["de"], "https://example.com/de");
    }

    #[test]
    fn test_illegal_characters_never_reach_alternates() {
        let alternates = generate("/de/a b\"<c>");
        assert_eq!(alternates.canonical, "https://example.com/en");
        assert_eq!(alternates, generate("/"));
    }

    // ==================== Default Locale Tests ====================

    #[test]
    fn test_default_prefix_and_unprefixed_share_alternates() {
        assert_eq!(
            generate("/en/services/rental").languages,
            generate("/services/rental").languages
        );
    }

    #[test]
    fn test_x_default_matches_default_alternate() {
        for path in ["/", "/nl/faq", "/blog/post-1"] {
            let alternates = generate(path);
            assert_eq!(alternates.languages["x-default"], alternates.languages["en"]);
        }
    }

    #[test]
    fn test_custom_default_locale() {
        let locales = SupportedLocales::new(["nl", "en"]).unwrap();
        let alternates = generate_metadata(MetadataRecord::new(), "/about", &origin(), &locales)
            .alternates
            .unwrap();
        assert_eq!(alternates.canonical, "https://example.com/nl/about");
        assert_eq!(alternates.languages["nl"], "https://example.com/about");
        assert_eq!(alternates.languages["en"], "https://example.com/en/about");
        assert!(!alternates.languages.contains_key("de"));
    }

    // ==================== Merge Tests ====================

    #[test]
    fn test_base_fields_pass_through() {
        let base = MetadataRecord::new()
            .with_field("title", "Tower cranes")
            .with_field("robots", json!({"index": true}));
        let result = generate_metadata(base, "/nl", &origin(), &SupportedLocales::default());
        assert_eq!(result.title(), Some("Tower cranes"));
        assert_eq!(result.fields["robots"], json!({"index": true}));
    }

    #[test]
    fn test_caller_alternates_are_overwritten() {
        let base = MetadataRecord {
            fields: Map::new(),
            alternates: Some(Alternates {
                canonical: "https://stale.example/x".to_string(),
                languages: BTreeMap::new(),
            }),
        };
        let result = generate_metadata(base, "/de", &origin(), &SupportedLocales::default());
        assert_eq!(
            result.alternates.unwrap().canonical,
            "https://example.com/de"
        );
    }

    #[test]
    fn test_idempotent_on_canonical_path() {
        let first = generate("/nl/cranes/");
        let path = first.canonical.strip_prefix("https://example.com").unwrap();
        assert_eq!(generate(path).canonical, first.canonical);
    }

    #[test]
    fn test_serializes_flat() {
        let record = generate_metadata(
            MetadataRecord::new().with_field("title", "Home"),
            "/",
            &origin(),
            &SupportedLocales::default(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["title"], "Home");
        assert_eq!(value["alternates"]["canonical"], "https://example.com/en");
        assert_eq!(value["alternates"]["languages"]["x-default"], "https://example.com");
    }

    #[test]
    fn test_deserializes_alternates_separately() {
        let record: MetadataRecord = serde_json::from_value(json!({
            "title": "FAQ",
            "alternates": {"canonical": "https://example.com/en/faq", "languages": {}}
        }))
        .unwrap();
        assert_eq!(record.title(), Some("FAQ"));
        assert!(!record.fields.contains_key("alternates"));
        assert!(record.alternates.is_some());
    }

    #[test]
    fn test_canonicalizer_wrapper() {
        let canonicalizer = Canonicalizer::new(origin(), SupportedLocales::default());
        let result = canonicalizer.generate(MetadataRecord::new(), "/de/blog");
        assert_eq!(result.alternates.unwrap().canonical, "https://example.com/de/blog");
        assert_eq!(canonicalizer.origin().as_str(), "https://example.com");
        assert_eq!(canonicalizer.locales().len(), 3);
    }
}
