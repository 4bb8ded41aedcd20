use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass_api::catalog::builtin_catalog;
use compass_api::config::{AiProviderKind, Config};
use compass_api::guidance::GuidanceOrchestrator;
use compass_api::llm_client::{AnthropicProvider, GenerativeTextProvider, OpenAiProvider};
use compass_api::market::{AdzunaJobSearch, JobSearchProvider, MarketAugmenter};
use compass_api::matching::WeightedCareerScorer;
use compass_api::recommendation::RecommendationEngine;
use compass_api::routes::build_router;
use compass_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("compass_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Arc::new(builtin_catalog());
    info!("Career catalog loaded: {} careers", catalog.len());

    let provider = build_text_provider(&config);
    let guidance = GuidanceOrchestrator::new(provider, Arc::clone(&catalog), config.ai_timeout);

    let market = MarketAugmenter::new(build_job_search(&config), config.market_timeout);

    // Weighted scorer by default; any CareerScorer can be swapped in here.
    let engine = RecommendationEngine::new(catalog, Arc::new(WeightedCareerScorer), guidance, market);

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the generative-text provider once. A missing key disables AI guidance.
fn build_text_provider(config: &Config) -> Option<Arc<dyn GenerativeTextProvider>> {
    let Some(key) = config.ai_api_key() else {
        if config.ai_provider != AiProviderKind::Disabled {
            warn!(
                "AI_PROVIDER={:?} but no API key is set; using templated guidance",
                config.ai_provider
            );
        } else {
            info!("AI guidance disabled; using templated guidance");
        }
        return None;
    };

    let provider: Arc<dyn GenerativeTextProvider> = match config.ai_provider {
        AiProviderKind::Anthropic => Arc::new(AnthropicProvider::new(key.to_string(), config.ai_timeout)),
        AiProviderKind::OpenAi => Arc::new(OpenAiProvider::new(key.to_string(), config.ai_timeout)),
        AiProviderKind::Disabled => return None,
    };
    info!(
        "AI guidance via {} (timeout {:?})",
        provider.name(),
        config.ai_timeout
    );
    Some(provider)
}

fn build_job_search(config: &Config) -> Option<Arc<dyn JobSearchProvider>> {
    let Some((app_id, app_key)) = config.adzuna_credentials() else {
        if config.job_market_enabled {
            warn!("JOB_MARKET_ENABLED is set but Adzuna credentials are missing; skipping local data");
        }
        return None;
    };

    info!("Local job market data via Adzuna ({})", config.adzuna_country);
    Some(Arc::new(AdzunaJobSearch::new(
        app_id.to_string(),
        app_key.to_string(),
        config.adzuna_country.clone(),
        config.market_timeout,
    )))
}
