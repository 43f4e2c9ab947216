//! Path-segment parser: splits an origin-relative path into segments and
//! recognizes a leading locale prefix.
//!
//! Both the metadata canonicalizer (server side) and the locale negotiator
//! (client side) read the URL through this module and nothing else.

use crate::i18n::{Locale, SupportedLocales};

/// Result of parsing a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// Non-empty segments of the whole path, locale segment included.
    pub segments: Vec<String>,

    /// The locale named by the first segment, when it is a supported locale.
    pub locale: Option<Locale>,

    /// The path with any locale prefix removed; `/` for the root.
    pub path_without_locale: String,
}

impl ParsedPath {
    pub fn has_locale_prefix(&self) -> bool {
        self.locale.is_some()
    }

    /// Segments after the locale prefix.
    pub fn content_segments(&self) -> &[String] {
        let skip = usize::from(self.has_locale_prefix());
        &self.segments[skip..]
    }

    fn root() -> Self {
        Self {
            segments: Vec::new(),
            locale: None,
            path_without_locale: "/".to_string(),
        }
    }
}

/// Parse `path` against the enabled locales.
///
/// Never fails. Query strings and fragments are ignored, repeated and trailing
/// slashes collapse, and a missing leading slash is tolerated. Input that is
/// not a plain RFC 3986 path (characters outside `pchar`, a bad `%` escape,
/// a `.` or `..` segment, an embedded `scheme://`) parses as the root. A first
/// segment that is not an enabled locale stays part of the content path.
pub fn parse_path(path: &str, locales: &SupportedLocales) -> ParsedPath {
    let path = strip_query_and_fragment(path);
    if is_malformed(path) {
        return ParsedPath::root();
    }

    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    let locale = segments.first().and_then(|first| locales.get(first));
    let skip = usize::from(locale.is_some());
    let path_without_locale = join_segments(&segments[skip..]);

    ParsedPath {
        segments,
        locale,
        path_without_locale,
    }
}

/// The equivalent of `path` under `locale`, always with an explicit prefix.
///
/// Any existing locale prefix is replaced: `/nl/cranes` with `de` becomes
/// `/de/cranes`, and `/` becomes `/de`.
pub fn localized_path(path: &str, locale: Locale, locales: &SupportedLocales) -> String {
    let parsed = parse_path(path, locales);
    prefixed(locale, &parsed.path_without_locale)
}

/// `/{locale}` followed by `path_without_locale` unless that is the root.
pub(crate) fn prefixed(locale: Locale, path_without_locale: &str) -> String {
    if path_without_locale == "/" {
        format!("/{}", locale.code())
    } else {
        format!("/{}{}", locale.code(), path_without_locale)
    }
}

fn strip_query_and_fragment(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn is_malformed(path: &str) -> bool {
    path.contains("://") || !is_path_text(path) || path.split('/').any(is_dot_segment)
}

/// Only `/` and RFC 3986 `pchar` bytes, with every `%` starting a hex escape.
fn is_path_text(path: &str) -> bool {
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escaped = bytes
                    .get(i + 1..i + 3)
                    .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
                if !escaped {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@/".contains(&b) => i += 1,
            _ => return false,
        }
    }
    true
}

/// `.` and `..`, including their percent-encoded spellings.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn join_segments(segments: &[String]) -> String {
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
