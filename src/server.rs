//! HTTP surface consumed by the page-rendering layer.

use crate::config::Config;
use crate::i18n::{locale_set_cookie, parse_path, LocaleConfig, TranslationCatalog};
use crate::negotiator::{resolve_request_locale, Resolution};
use crate::seo::{link_tags, Canonicalizer, LinkTag, MetadataRecord};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub struct AppState {
    pub canonicalizer: Canonicalizer,
    pub catalog: Arc<TranslationCatalog>,
    pub cookie_name: String,
    pub cookie_max_age_days: u32,
}

impl AppState {
    pub fn from_config(config: &Config, catalog: Arc<TranslationCatalog>) -> Self {
        Self {
            canonicalizer: Canonicalizer::new(
                config.site_origin.clone(),
                config.supported_locales.clone(),
            ),
            catalog,
            cookie_name: config.locale_cookie_name.clone(),
            cookie_max_age_days: config.locale_cookie_max_age_days,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/metadata", get(metadata))
        .route("/api/locale", get(locale))
        .route("/api/locales", get(locales))
        .route("/api/messages/:locale", get(messages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
pub struct MetadataQuery {
    pub path: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Generated metadata plus what a renderer needs for the `<head>`: the link
/// tags and the Open Graph locale of this page and of its translations.
#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    #[serde(flatten)]
    pub metadata: MetadataRecord,
    pub links: Vec<LinkTag>,
    pub og_locale: &'static str,
    pub og_locale_alternates: Vec<&'static str>,
}

async fn metadata(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MetadataQuery>,
) -> Json<MetadataResponse> {
    let mut base = MetadataRecord::new();
    if let Some(title) = query.title {
        base = base.with_field("title", title);
    }
    if let Some(description) = query.description {
        base = base.with_field("description", description);
    }

    let path = query.path.as_deref().unwrap_or("/");
    let locales = state.canonicalizer.locales();
    let page_locale = parse_path(path, locales)
        .locale
        .unwrap_or_else(|| locales.default_locale());

    let metadata = state.canonicalizer.generate(base, path);
    let links = link_tags(&metadata, locales);
    Json(MetadataResponse {
        metadata,
        links,
        og_locale: page_locale.og_locale(),
        og_locale_alternates: locales
            .iter()
            .filter(|locale| *locale != page_locale)
            .map(|locale| locale.og_locale())
            .collect(),
    })
}

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    pub path: Option<String>,
}

async fn locale(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let header_str =
        |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
    let path = query.path.as_deref().unwrap_or("/");

    let resolution: Resolution = resolve_request_locale(
        path,
        header_str(header::COOKIE),
        header_str(header::ACCEPT_LANGUAGE),
        &state.cookie_name,
        state.canonicalizer.locales(),
    );
    debug!(
        "Request locale for {}: {} ({})",
        path, resolution.locale, resolution.source
    );

    let cookie = locale_set_cookie(
        &state.cookie_name,
        resolution.locale,
        state.cookie_max_age_days,
    );
    ([(header::SET_COOKIE, cookie)], Json(resolution))
}

/// One entry of the language switcher.
#[derive(Debug, Serialize)]
pub struct LocaleEntry {
    #[serde(flatten)]
    pub config: &'static LocaleConfig,
    pub default: bool,
}

async fn locales(State(state): State<Arc<AppState>>) -> Json<Vec<LocaleEntry>> {
    let locales = state.canonicalizer.locales();
    Json(
        locales
            .iter()
            .map(|locale| LocaleEntry {
                config: locale.config(),
                default: locales.is_default(locale),
            })
            .collect(),
    )
}

async fn messages(State(state): State<Arc<AppState>>, Path(code): Path<String>) -> Response {
    match state.canonicalizer.locales().get(&code) {
        Some(locale) => Json(state.catalog.messages_for(locale)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unsupported locale '{}'", code) })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteOrigin;
    use crate::i18n::SupportedLocales;

    fn state() -> Arc<AppState> {
        let locales = SupportedLocales::default();
        Arc::new(AppState {
            canonicalizer: Canonicalizer::new(
                SiteOrigin::parse("https://example.com").unwrap(),
                locales.clone(),
            ),
            catalog: Arc::new(TranslationCatalog::builtin(&locales)),
            cookie_name: "preferred_locale".to_string(),
            cookie_max_age_days: 365,
        })
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "OK");
    }

    #[tokio::test]
    async fn test_metadata_handler() {
        let Json(response) = metadata(
            State(state()),
            Query(MetadataQuery {
                path: Some("/nl/over-ons".to_string()),
                title: Some("Over ons".to_string()),
                description: None,
            }),
        )
        .await;

        assert_eq!(response.metadata.title(), Some("Over ons"));
        let alternates = response.metadata.alternates.unwrap();
        assert_eq!(alternates.canonical, "https://example.com/nl/over-ons");
        assert_eq!(response.links.len(), 5);
        assert_eq!(response.og_locale, "nl_NL");
        assert_eq!(response.og_locale_alternates, vec!["en_GB", "de_DE"]);
    }

    #[tokio::test]
    async fn test_metadata_handler_defaults_to_root() {
        let Json(response) = metadata(
            State(state()),
            Query(MetadataQuery {
                path: None,
                title: None,
                description: None,
            }),
        )
        .await;

        assert!(response.metadata.fields.is_empty());
        assert_eq!(
            response.metadata.alternates.unwrap().canonical,
            "https://example.com/en"
        );
        assert_eq!(response.og_locale, "en_GB");
    }

    #[tokio::test]
    async fn test_locales_lists_switcher_entries_in_order() {
        let Json(entries) = locales(State(state())).await;
        let codes: Vec<_> = entries.iter().map(|e| e.config.code).collect();
        assert_eq!(codes, vec!["en", "nl", "de"]);
        assert!(entries[0].default);
        assert!(!entries[2].default);
        assert_eq!(entries[2].config.native_name, "Deutsch");

        let json = serde_json::to_value(&entries[1]).unwrap();
        assert_eq!(json["code"], "nl");
        assert_eq!(json["og_locale"], "nl_NL");
        assert_eq!(json["default"], false);
    }

    #[tokio::test]
    async fn test_messages_unknown_locale() {
        let response = messages(State(state()), Path("fr".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_messages_known_locale() {
        let response = messages(State(state()), Path("de".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
