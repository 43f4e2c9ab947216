//! Browser language and cookie header helpers.

use crate::i18n::{Locale, SupportedLocales};

/// Parse an `Accept-Language` header into language tags, most preferred first.
///
/// Entries keep their header order when q-values tie. `q=0` entries and the
/// `*` wildcard are dropped. A q-value that does not parse, is not finite, or
/// falls outside `0..=1` is malformed and counts as `1.0`.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut entries: Vec<(&str, f64)> = Vec::new();
    for part in header.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let mut pieces = part.split(';');
        let lang = pieces.next().unwrap_or("").trim();
        let mut q = 1.0_f64;
        for piece in pieces {
            if let Some(val) = piece.trim().strip_prefix("q=") {
                if let Some(v) = parse_q(val) {
                    q = v;
                }
            }
        }
        if lang.is_empty() || lang == "*" || q <= 0.0 {
            continue;
        }
        entries.push((lang, q));
    }

    // sort_by is stable, so equal weights keep header order
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.into_iter().map(|(lang, _)| lang.to_string()).collect()
}

fn parse_q(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite() && (0.0..=1.0).contains(q))
}

/// First browser language that an enabled locale serves.
///
/// Matching ignores case and region: `nl-BE` and `NL` both select `nl`.
pub fn best_match<S: AsRef<str>>(languages: &[S], locales: &SupportedLocales) -> Option<Locale> {
    languages.iter().find_map(|lang| {
        let lang = lang.as_ref().trim().to_ascii_lowercase();
        let primary = lang.split(['-', '_']).next().unwrap_or("");
        locales.get(primary)
    })
}

/// Value of cookie `name` in a `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k.trim() == name).then(|| v.trim().trim_matches('"'))
    })
}

/// `Set-Cookie` header value persisting the locale preference site-wide.
pub fn locale_set_cookie(name: &str, locale: Locale, max_age_days: u32) -> String {
    let max_age = u64::from(max_age_days) * 24 * 60 * 60;
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name,
        locale.code(),
        max_age
    )
}
