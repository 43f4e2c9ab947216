use anyhow::{Context, Result};
use crane_site_i18n::config::Config;
use crane_site_i18n::i18n::TranslationCatalog;
use crane_site_i18n::server::{self, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("crane_site_i18n=info".parse()?),
        )
        .init();

    // Configuration errors are fatal here, never per request
    let config = Config::from_env()?;
    let locales = &config.supported_locales;
    info!(
        "Serving {} locales ({}), default '{}', origin {}",
        locales.len(),
        locales.iter().map(|l| l.code()).collect::<Vec<_>>().join(", "),
        locales.default_locale(),
        config.site_origin
    );

    let catalog = match &config.messages_dir {
        Some(dir) => TranslationCatalog::load_dir(dir, locales)
            .with_context(|| format!("Failed to load messages from {}", dir.display()))?,
        None => {
            info!("MESSAGES_DIR not set, using built-in strings only");
            TranslationCatalog::builtin(locales)
        }
    };

    let state = Arc::new(AppState::from_config(&config, Arc::new(catalog)));
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
