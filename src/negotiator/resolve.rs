//! Pure locale priority resolution, with no storage or browser access.

use crate::i18n::{
    best_match, cookie_value, parse_accept_language, parse_path, Locale, SupportedLocales,
};
use serde::Serialize;
use std::fmt;

/// Where the winning locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    UrlPrefix,
    Cookie,
    LocalStorage,
    BrowserLanguage,
    Default,
}

impl fmt::Display for LocaleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocaleSource::UrlPrefix => "url_prefix",
            LocaleSource::Cookie => "cookie",
            LocaleSource::LocalStorage => "local_storage",
            LocaleSource::BrowserLanguage => "browser_language",
            LocaleSource::Default => "default",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub locale: Locale,
    pub source: LocaleSource,
}

/// Everything the priority chain looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveInputs<'a> {
    pub path: &'a str,
    pub cookie: Option<&'a str>,
    pub local_storage: Option<&'a str>,
    pub browser_languages: &'a [String],
}

/// Resolve the active locale: URL prefix → cookie → local storage → browser
/// languages → default. Stored values that are not enabled locales are skipped.
pub fn resolve_locale(inputs: &ResolveInputs<'_>, locales: &SupportedLocales) -> Resolution {
    let stored = |value: Option<&str>| value.and_then(|v| locales.get(v.trim()));

    let (locale, source) = if let Some(locale) = parse_path(inputs.path, locales).locale {
        (locale, LocaleSource::UrlPrefix)
    } else if let Some(locale) = stored(inputs.cookie) {
        (locale, LocaleSource::Cookie)
    } else if let Some(locale) = stored(inputs.local_storage) {
        (locale, LocaleSource::LocalStorage)
    } else if let Some(locale) = best_match(inputs.browser_languages, locales) {
        (locale, LocaleSource::BrowserLanguage)
    } else {
        (locales.default_locale(), LocaleSource::Default)
    };

    Resolution { locale, source }
}

/// Server-side resolution from request headers. There is no local storage on
/// the server, so the chain is URL prefix → cookie → `Accept-Language` → default.
pub fn resolve_request_locale(
    path: &str,
    cookie_header: Option<&str>,
    accept_language: Option<&str>,
    cookie_name: &str,
    locales: &SupportedLocales,
) -> Resolution {
    let browser_languages = accept_language
        .map(parse_accept_language)
        .unwrap_or_default();
    let inputs = ResolveInputs {
        path,
        cookie: cookie_header.and_then(|header| cookie_value(header, cookie_name)),
        local_storage: None,
        browser_languages: &browser_languages,
    };
    resolve_locale(&inputs, locales)
}
