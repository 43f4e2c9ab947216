//! Internationalization (i18n) module for the English/Dutch/German site.
//!
//! # Architecture
//!
//! - `registry`: Static locale catalog and the per-deployment `SupportedLocales` set
//! - `locale`: Validated `Locale` type
//! - `path`: Path-segment parser shared by the canonicalizer and the negotiator
//! - `accept`: `Accept-Language` and cookie header helpers
//! - `strings`: Built-in site chrome strings
//! - `catalog`: Per-locale translation lookup with soft failure
//!
//! # Example
//!
//! ```rust
//! use crane_site_i18n::i18n::{parse_path, Locale, SupportedLocales};
//!
//! let locales = SupportedLocales::default();
//! let parsed = parse_path("/nl/torenkranen", &locales);
//! assert_eq!(parsed.locale, Some(Locale::DUTCH));
//! assert_eq!(parsed.path_without_locale, "/torenkranen");
//! ```

mod accept;
mod catalog;
mod locale;
mod path;
mod registry;
mod strings;

pub use accept::{best_match, cookie_value, locale_set_cookie, parse_accept_language};
pub use catalog::{CatalogError, TranslationCatalog};
pub use locale::Locale;
pub use path::{localized_path, parse_path, ParsedPath};
pub(crate) use path::prefixed;
pub use registry::{LocaleConfig, SupportedLocales};
pub use strings::SiteStrings;
