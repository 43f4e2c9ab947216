use crate::i18n::Locale;

/// Built-in site chrome strings for one locale.
///
/// These cover navigation and the locale switcher, so a page renders its frame
/// even when no message files are deployed. Page content comes from message
/// files loaded into the [`TranslationCatalog`](crate::i18n::TranslationCatalog).
#[derive(Debug, Clone)]
pub struct SiteStrings {
    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_cranes: &'static str,
    pub nav_services: &'static str,
    pub nav_blog: &'static str,
    pub nav_faq: &'static str,
    pub nav_contact: &'static str,

    // ==================== Locale Switcher ====================
    /// Accessible label on the switcher button
    pub switcher_label: &'static str,

    // ==================== Footer ====================
    /// Placeholders: {year}
    pub footer_rights: &'static str,
}

impl SiteStrings {
    /// The built-in strings for `locale`.
    pub fn for_locale(locale: Locale) -> &'static SiteStrings {
        match locale.code() {
            "nl" => &DUTCH_STRINGS,
            "de" => &GERMAN_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }

    /// Flattened `(key, text)` pairs as stored in the catalog.
    pub fn entries(&self) -> [(&'static str, &'static str); 8] {
        [
            ("nav.home", self.nav_home),
            ("nav.cranes", self.nav_cranes),
            ("nav.services", self.nav_services),
            ("nav.blog", self.nav_blog),
            ("nav.faq", self.nav_faq),
            ("nav.contact", self.nav_contact),
            ("switcher.label", self.switcher_label),
            ("footer.rights", self.footer_rights),
        ]
    }
}

pub const ENGLISH_STRINGS: SiteStrings = SiteStrings {
    nav_home: "Home",
    nav_cranes: "Tower cranes",
    nav_services: "Services",
    nav_blog: "Blog",
    nav_faq: "FAQ",
    nav_contact: "Contact",
    switcher_label: "Choose language",
    footer_rights: "© {year} All rights reserved.",
};

pub const DUTCH_STRINGS: SiteStrings = SiteStrings {
    nav_home: "Home",
    nav_cranes: "Torenkranen",
    nav_services: "Diensten",
    nav_blog: "Blog",
    nav_faq: "Veelgestelde vragen",
    nav_contact: "Contact",
    switcher_label: "Kies taal",
    footer_rights: "© {year} Alle rechten voorbehouden.",
};

pub const GERMAN_STRINGS: SiteStrings = SiteStrings {
    nav_home: "Startseite",
    nav_cranes: "Turmdrehkrane",
    nav_services: "Leistungen",
    nav_blog: "Blog",
    nav_faq: "Häufige Fragen",
    nav_contact: "Kontakt",
    switcher_label: "Sprache wählen",
    footer_rights: "© {year} Alle Rechte vorbehalten.",
};
