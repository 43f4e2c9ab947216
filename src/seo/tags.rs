use crate::i18n::SupportedLocales;
use crate::seo::{MetadataRecord, X_DEFAULT};
use serde::Serialize;
use std::fmt;

/// One `<link>` element for the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTag {
    pub rel: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
    pub href: String,
}

/// Link tags for a generated record: canonical first, then one alternate per
/// locale in configured order, then `x-default`.
///
/// Records without `alternates` produce no tags.
pub fn link_tags(record: &MetadataRecord, locales: &SupportedLocales) -> Vec<LinkTag> {
    let Some(alternates) = &record.alternates else {
        return Vec::new();
    };

    let mut tags = vec![LinkTag {
        rel: "canonical",
        hreflang: None,
        href: alternates.canonical.clone(),
    }];

    let codes = locales.iter().map(|locale| locale.code()).chain([X_DEFAULT]);
    for code in codes {
        if let Some(href) = alternates.languages.get(code) {
            tags.push(LinkTag {
                rel: "alternate",
                hreflang: Some(code.to_string()),
                href: href.clone(),
            });
        }
    }
    tags
}

impl fmt::Display for LinkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<link rel=\"{}\"", self.rel)?;
        if let Some(hreflang) = &self.hreflang {
            write!(f, " hreflang=\"{}\"", escape_attr(hreflang))?;
        }
        write!(f, " href=\"{}\" />", escape_attr(&self.href))
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
