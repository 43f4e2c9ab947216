//! Locale registry: the catalog of locales the site knows how to serve, and
//! the ordered subset a deployment actually enables.
//!
//! The catalog is static. A deployment picks an ordered, non-empty subset via
//! configuration; the first entry of that subset is the default locale. The
//! set is built once at startup and never changes afterwards.

use crate::config::ConfigError;
use crate::i18n::Locale;
use serde::Serialize;

/// Static description of a locale the site can serve.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LocaleConfig {
    /// ISO 639-1 code, also used as the URL prefix (e.g. "nl")
    pub code: &'static str,

    /// English name of the language (e.g. "Dutch")
    pub name: &'static str,

    /// Native name of the language (e.g. "Nederlands")
    pub native_name: &'static str,

    /// Open Graph locale form (e.g. "nl_NL")
    pub og_locale: &'static str,
}

pub(crate) const ENGLISH: LocaleConfig = LocaleConfig {
    code: "en",
    name: "English",
    native_name: "English",
    og_locale: "en_GB",
};

pub(crate) const DUTCH: LocaleConfig = LocaleConfig {
    code: "nl",
    name: "Dutch",
    native_name: "Nederlands",
    og_locale: "nl_NL",
};

pub(crate) const GERMAN: LocaleConfig = LocaleConfig {
    code: "de",
    name: "German",
    native_name: "Deutsch",
    og_locale: "de_DE",
};

pub(crate) static KNOWN_LOCALES: [LocaleConfig; 3] = [ENGLISH, DUTCH, GERMAN];

/// Ordered, non-empty, duplicate-free set of locales enabled for a deployment.
///
/// The first locale is the default: it serves unprefixed paths and backs the
/// `x-default` hreflang entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLocales {
    locales: Vec<Locale>,
}

impl SupportedLocales {
    /// Build the set from locale codes, in priority order.
    ///
    /// # Errors
    /// Fails with a [`ConfigError`] when the list is empty, names a code
    /// outside the catalog, or repeats a code.
    pub fn new<I, S>(codes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locales: Vec<Locale> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            let locale = Locale::from_code(code)
                .ok_or_else(|| ConfigError::UnknownLocale(code.to_string()))?;
            if locales.contains(&locale) {
                return Err(ConfigError::DuplicateLocale(code.to_string()));
            }
            locales.push(locale);
        }

        if locales.is_empty() {
            return Err(ConfigError::EmptyLocales);
        }

        Ok(Self { locales })
    }

    /// Parse a comma-separated list such as `"en, nl, de"`.
    pub fn parse_list(raw: &str) -> Result<Self, ConfigError> {
        Self::new(raw.split(',').map(str::trim).filter(|code| !code.is_empty()))
    }

    /// The deployment's default locale (first configured entry).
    pub fn default_locale(&self) -> Locale {
        self.locales[0]
    }

    /// Look up an enabled locale by its exact code.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 code as it appears in a URL or cookie (e.g., "nl")
    ///
    /// # Returns
    /// * `Some(Locale)` if the code names an enabled locale
    /// * `None` for unknown, disabled, or differently cased codes
    pub fn get(&self, code: &str) -> Option<Locale> {
        self.locales.iter().copied().find(|locale| locale.code() == code)
    }

    /// Whether `locale` is enabled for this deployment.
    pub fn contains(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }

    /// Whether `locale` is the deployment's default (first configured) locale.
    pub fn is_default(&self, locale: Locale) -> bool {
        self.default_locale() == locale
    }

    /// Iterate over the enabled locales.
    ///
    /// # Returns
    /// The locales in configured order, default first.
    pub fn iter(&self) -> impl Iterator<Item = Locale> + '_ {
        self.locales.iter().copied()
    }

    /// Number of enabled locales.
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Never true for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl Default for SupportedLocales {
    /// English, Dutch and German, with English as default.
    fn default() -> Self {
        Self {
            locales: vec![Locale::ENGLISH, Locale::DUTCH, Locale::GERMAN],
        }
    }
}
