//! Locale type: a validated reference into the static locale catalog.

use crate::config::ConfigError;
use crate::i18n::registry::{self, LocaleConfig, KNOWN_LOCALES};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A locale the site knows how to serve.
///
/// Only constructible from the static catalog, so every `Locale` carries its
/// full configuration. Whether it is *enabled* for a deployment is a separate
/// question answered by [`SupportedLocales`](crate::i18n::SupportedLocales).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    config: &'static LocaleConfig,
}

impl Locale {
    pub const ENGLISH: Locale = Locale {
        config: &registry::ENGLISH,
    };

    pub const DUTCH: Locale = Locale {
        config: &registry::DUTCH,
    };

    pub const GERMAN: Locale = Locale {
        config: &registry::GERMAN,
    };

    /// Look up a locale by its exact (lowercase) code.
    ///
    /// Returns `None` for anything outside the catalog, including differently
    /// cased codes such as `"NL"`.
    pub fn from_code(code: &str) -> Option<Locale> {
        KNOWN_LOCALES
            .iter()
            .find(|config| config.code == code)
            .map(|config| Locale { config })
    }

    /// ISO 639-1 code, also the URL prefix segment.
    pub fn code(&self) -> &'static str {
        self.config.code
    }

    /// The full static configuration behind this locale.
    pub fn config(&self) -> &'static LocaleConfig {
        self.config
    }

    /// English name of the language (e.g., "Dutch").
    pub fn name(&self) -> &'static str {
        self.config.name
    }

    /// Name of the language in the language itself (e.g., "Deutsch"), as shown
    /// in the language switcher.
    pub fn native_name(&self) -> &'static str {
        self.config.native_name
    }

    /// Open Graph `og:locale` form (e.g., "nl_NL").
    pub fn og_locale(&self) -> &'static str {
        self.config.og_locale
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s).ok_or_else(|| ConfigError::UnknownLocale(s.to_string()))
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
