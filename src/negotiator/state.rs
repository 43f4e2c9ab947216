//! Stateful locale negotiator: the client's single source of truth for the
//! active locale.
//!
//! The negotiator is built once by the application shell and lives for the
//! page's lifetime. It starts `Uninitialized`; `initialize` runs the priority
//! chain once and writes the winner back to both persistence shadows. After
//! that, reads come from memory only. The only later transition is an explicit
//! `set_locale`, which persists first and then performs a full navigation so
//! the next server render already uses the new locale.

use crate::config::Config;
use crate::i18n::{localized_path, Locale, SupportedLocales, TranslationCatalog};
use crate::negotiator::resolve::{resolve_locale, ResolveInputs};
use crate::negotiator::storage::{Navigator, PreferenceStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiatorError {
    #[error("locale negotiator used before initialization")]
    NotInitialized,

    #[error("locale '{0}' is not enabled for this site")]
    Unsupported(Locale),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiatorState {
    Uninitialized,
    Synchronized(Locale),
}

/// Names of the two persistence shadows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceKeys {
    pub cookie_name: String,
    pub storage_key: String,
}

impl Default for PersistenceKeys {
    fn default() -> Self {
        Self {
            cookie_name: "preferred_locale".to_string(),
            storage_key: "preferred-locale".to_string(),
        }
    }
}

impl From<&Config> for PersistenceKeys {
    fn from(config: &Config) -> Self {
        Self {
            cookie_name: config.locale_cookie_name.clone(),
            storage_key: config.locale_storage_key.clone(),
        }
    }
}

pub struct LocaleNegotiator<C, L, N> {
    locales: SupportedLocales,
    catalog: Arc<TranslationCatalog>,
    keys: PersistenceKeys,
    cookies: C,
    local_storage: L,
    navigator: N,
    state: NegotiatorState,
    current_path: String,
}

impl<C, L, N> LocaleNegotiator<C, L, N>
where
    C: PreferenceStore,
    L: PreferenceStore,
    N: Navigator,
{
    pub fn new(
        locales: SupportedLocales,
        catalog: Arc<TranslationCatalog>,
        keys: PersistenceKeys,
        cookies: C,
        local_storage: L,
        navigator: N,
    ) -> Self {
        Self {
            locales,
            catalog,
            keys,
            cookies,
            local_storage,
            navigator,
            state: NegotiatorState::Uninitialized,
            current_path: "/".to_string(),
        }
    }

    pub fn state(&self) -> NegotiatorState {
        self.state
    }

    /// The active locale; the default locale until initialized.
    pub fn current_locale(&self) -> Locale {
        match self.state {
            NegotiatorState::Synchronized(locale) => locale,
            NegotiatorState::Uninitialized => self.locales.default_locale(),
        }
    }

    /// Run the priority chain for the page at `path` and persist the winner.
    ///
    /// Only the first call resolves; later calls return the in-memory locale
    /// without touching storage.
    ///
    /// # Arguments
    /// * `path` - The URL path of the current page
    /// * `browser_languages` - The browser's preferred languages, most preferred first
    ///
    /// # Returns
    /// The locale now active, also written to both shadows.
    pub fn initialize(&mut self, path: &str, browser_languages: &[String]) -> Locale {
        if let NegotiatorState::Synchronized(locale) = self.state {
            return locale;
        }

        let cookie = read_best_effort(&self.cookies, &self.keys.cookie_name, "cookie");
        let local = read_best_effort(&self.local_storage, &self.keys.storage_key, "local storage");
        let inputs = ResolveInputs {
            path,
            cookie: cookie.as_deref(),
            local_storage: local.as_deref(),
            browser_languages,
        };
        let resolution = resolve_locale(&inputs, &self.locales);
        debug!(
            "Resolved locale '{}' from {} for {}",
            resolution.locale, resolution.source, path
        );

        self.persist(resolution.locale);
        self.state = NegotiatorState::Synchronized(resolution.locale);
        self.current_path = path.to_string();
        resolution.locale
    }

    /// Switch to `locale`: persist to both shadows, then navigate to the
    /// equivalent path under the new locale.
    ///
    /// Selecting the already-active locale is a no-op. Storage failures are
    /// logged and do not stop the switch.
    ///
    /// # Errors
    /// * [`NegotiatorError::NotInitialized`] before [`initialize`](Self::initialize)
    /// * [`NegotiatorError::Unsupported`] for a locale this site does not enable
    pub fn set_locale(&mut self, locale: Locale) -> Result<(), NegotiatorError> {
        let NegotiatorState::Synchronized(current) = self.state else {
            return Err(NegotiatorError::NotInitialized);
        };
        if !self.locales.contains(locale) {
            return Err(NegotiatorError::Unsupported(locale));
        }
        if current == locale {
            return Ok(());
        }

        self.persist(locale);
        self.state = NegotiatorState::Synchronized(locale);

        let target = localized_path(&self.current_path, locale, &self.locales);
        info!("Switching locale {} -> {}, navigating to {}", current, locale, target);
        self.current_path.clone_from(&target);
        self.navigator.navigate(&target);
        Ok(())
    }

    /// Text for `key` in the active locale, or `key` itself when missing.
    pub fn translate(&self, key: &str) -> String {
        self.catalog.translate(self.current_locale(), key)
    }

    /// Path the negotiator last initialized at or navigated to.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    fn persist(&mut self, locale: Locale) {
        if let Err(e) = self.cookies.write(&self.keys.cookie_name, locale.code()) {
            warn!("Failed to persist locale cookie: {}", e);
        }
        if let Err(e) = self.local_storage.write(&self.keys.storage_key, locale.code()) {
            warn!("Failed to persist locale to local storage: {}", e);
        }
    }
}

fn read_best_effort<S: PreferenceStore>(store: &S, key: &str, label: &str) -> Option<String> {
    match store.read(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring {} preference: {}", label, e);
            None
        }
    }
}
