use crate::i18n::SupportedLocales;
use anyhow::{Context, Result};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Deployment configuration problems. All of these are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one supported locale must be configured")]
    EmptyLocales,

    #[error("unknown locale code: '{0}'")]
    UnknownLocale(String),

    #[error("locale '{0}' is listed more than once")]
    DuplicateLocale(String),

    #[error("invalid site origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: &'static str },

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

static ORIGIN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Absolute site origin: scheme, host and optional port, never a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteOrigin(String);

impl SiteOrigin {
    pub fn parse(raw: &str) -> std::result::Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let invalid = |reason| ConfigError::InvalidOrigin {
            origin: raw.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("origin is empty"));
        }

        let without_slash = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let regex = ORIGIN_REGEX.get_or_init(|| {
            Regex::new(r"^https?://[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?(?::[0-9]{1,5})?$")
                .expect("origin pattern is valid")
        });

        if !without_slash.starts_with("http://") && !without_slash.starts_with("https://") {
            return Err(invalid("scheme must be http or https"));
        }
        if !regex.is_match(without_slash) {
            return Err(invalid("expected scheme://host[:port] with no path, query or fragment"));
        }

        Ok(Self(without_slash.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_origin: SiteOrigin,
    pub supported_locales: SupportedLocales,

    // Persistence shadows
    pub locale_cookie_name: String,
    pub locale_storage_key: String,
    pub locale_cookie_max_age_days: u32,

    // Translations
    pub messages_dir: Option<PathBuf>,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let site_origin = std::env::var("SITE_ORIGIN").context("SITE_ORIGIN not set")?;
        let locales =
            std::env::var("SUPPORTED_LOCALES").unwrap_or_else(|_| "en,nl,de".to_string());

        Ok(Self {
            // Site
            site_origin: SiteOrigin::parse(&site_origin)?,
            supported_locales: SupportedLocales::parse_list(&locales)
                .context("SUPPORTED_LOCALES is invalid")?,

            // Persistence shadows
            locale_cookie_name: cookie_name(
                std::env::var("LOCALE_COOKIE_NAME")
                    .unwrap_or_else(|_| "preferred_locale".to_string()),
            )?,
            locale_storage_key: std::env::var("LOCALE_STORAGE_KEY")
                .unwrap_or_else(|_| "preferred-locale".to_string()),
            locale_cookie_max_age_days: std::env::var("LOCALE_COOKIE_MAX_AGE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(365),

            // Translations
            messages_dir: std::env::var("MESSAGES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

/// Cookie names are RFC 6265 tokens: no separators, whitespace or controls.
fn cookie_name(name: String) -> std::result::Result<String, ConfigError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c));
    if valid {
        Ok(name)
    } else {
        Err(ConfigError::InvalidValue {
            name: "LOCALE_COOKIE_NAME",
            value: name,
        })
    }
}
