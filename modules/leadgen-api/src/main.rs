use std::sync::Arc;

use ai_client::{Gemini, GenerationSettings};
use anyhow::Result;
use apollo_client::ApolloClient;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use browserless_client::BrowserlessClient;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use leadgen_common::{Config, KeyValueStore, Lead, MemoryStore, OutreachMessage};
use leadgen_outreach::OutreachGenerator;
use leadgen_scout::scrape::{ApolloListingScraper, PageRenderer, YellowPagesScraper};
use leadgen_scout::{LeadRetriever, RetrievalSettings};

mod rest;

pub struct AppState {
    pub config: Config,
    pub retriever: LeadRetriever,
    /// `None` when no Gemini key is configured.
    pub outreach: Option<OutreachGenerator>,
    pub leads: Arc<dyn KeyValueStore<Lead>>,
    pub messages: Arc<dyn KeyValueStore<OutreachMessage>>,
}

impl AppState {
    /// Wire production collaborators from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let renderer: Arc<dyn PageRenderer> = Arc::new(BrowserlessClient::new(
            &config.browserless_url,
            config.browserless_token.as_deref(),
            config.request_timeout,
        )?);

        let settings = RetrievalSettings {
            page_delay: config.scraping_delay,
            ..RetrievalSettings::default()
        };

        let directory = Arc::new(YellowPagesScraper::new(renderer.clone()));
        let listing = Arc::new(ApolloListingScraper::new(renderer));

        let retriever = match config.apollo_api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                let apollo = ApolloClient::new(key.to_string(), config.request_timeout)?
                    .with_base_url(&config.apollo_api_url);
                LeadRetriever::builder()
                    .structured(Arc::new(apollo))
                    .directory(directory)
                    .listing(listing)
                    .settings(settings)
                    .build()
            }
            None => {
                warn!("APOLLO_API_KEY not set, structured search disabled");
                LeadRetriever::builder()
                    .directory(directory)
                    .listing(listing)
                    .settings(settings)
                    .build()
            }
        };

        let outreach = config.gemini_api_key.as_deref().filter(|k| !k.is_empty()).map(|key| {
            let gemini = Gemini::new(key, config.gemini_model.clone())
                .with_settings(GenerationSettings {
                    temperature: config.ai_temperature,
                    top_p: config.ai_top_p,
                    top_k: config.ai_top_k,
                    max_output_tokens: config.ai_max_tokens_per_request,
                })
                .with_timeout(config.request_timeout);
            OutreachGenerator::new(Arc::new(gemini))
                .with_quality_threshold(config.message_quality_threshold)
        });

        Ok(Self {
            config,
            retriever,
            outreach,
            leads: Arc::new(MemoryStore::new()),
            messages: Arc::new(MemoryStore::new()),
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let api = Router::new()
        // Lead retrieval
        .route("/search-leads", post(rest::search_leads))
        .route("/scrape-leads-apollo", post(rest::scrape_leads_apollo))
        .route("/scrape-leads-yellowpages", post(rest::scrape_leads_yellowpages))
        .route("/search-leads-hybrid", post(rest::search_leads_hybrid))
        // Stored leads
        .route("/leads", get(rest::list_leads))
        .route("/leads/{id}", get(rest::get_lead))
        .route("/export-leads", post(rest::export_leads))
        .route("/health", get(rest::health))
        // Outreach
        .route("/outreach/generate", post(rest::outreach::generate))
        .route("/outreach/generate-bulk", post(rest::outreach::generate_bulk))
        .route(
            "/outreach/message/{id}/analysis",
            get(rest::outreach::analyze_message),
        )
        .route("/outreach/templates", get(rest::outreach::templates));

    Router::new()
        .route(
            "/",
            get(|| async {
                Json(serde_json::json!({
                    "message": "B2B Lead Generator API",
                    "status": "Running",
                }))
            }),
        )
        .nest("/api", api)
        .with_state(state)
        // CORS: configured origins with credentials, so methods and headers
        // mirror the request instead of using wildcards
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("leadgen=info".parse()?))
        .init();

    let config = Config::from_env()?;
    let addr = format!("{}:{}", config.api_host, config.api_port);

    let state = Arc::new(AppState::from_config(config)?);
    let app = build_router(state);

    info!("Lead generator API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
