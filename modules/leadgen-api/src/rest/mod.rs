pub mod outreach;


use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Local;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use leadgen_common::export::{export_filename, leads_to_csv};
use leadgen_common::{HealthResponse, Lead, LeadGenError, SearchRequest, SearchResponse};
use leadgen_scout::{HybridOptions, ScrapeSource};

use crate::AppState;

// --- Errors ---

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Map a domain error, prefixing its cause with `context`.
    pub fn with_context(err: LeadGenError, context: &str) -> Self {
        let status = status_for(&err);
        Self::new(status, format!("{context}: {}", cause(&err)))
    }
}

impl From<LeadGenError> for ApiError {
    fn from(err: LeadGenError) -> Self {
        Self::new(status_for(&err), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "Request failed");
        }
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

fn status_for(err: &LeadGenError) -> StatusCode {
    match err {
        LeadGenError::NotFound(_) => StatusCode::NOT_FOUND,
        LeadGenError::Validation(_) | LeadGenError::Export(_) => StatusCode::BAD_REQUEST,
        LeadGenError::FeatureDisabled(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The underlying message, without the source-name wrapper.
fn cause(err: &LeadGenError) -> String {
    match err {
        LeadGenError::SourceFailed { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

// --- Query structs ---

#[derive(Deserialize)]
pub struct ScrapeQuery {
    max_pages: Option<u32>,
}

#[derive(Deserialize)]
pub struct HybridQuery {
    use_scraping: Option<bool>,
    scrape_source: Option<String>,
    max_scrape_pages: Option<u32>,
}

// --- Helpers ---

/// Client-supplied ids that are not UUIDs can never match a stored entry.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Resolve a raw lead id against the store; malformed ids are a miss.
pub(crate) async fn stored_lead(state: &AppState, raw: &str) -> Option<Lead> {
    match parse_id(raw) {
        Some(id) => state.leads.get(&id).await,
        None => None,
    }
}

/// Keep every returned lead so outreach calls can resolve it by id.
async fn remember(state: &AppState, response: &SearchResponse) {
    for lead in &response.leads {
        state.leads.put(lead.id, lead.clone()).await;
    }
}

// --- Handlers ---

pub async fn search_leads(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = state
        .retriever
        .search_structured(&request.industry, &request.location)
        .await
        .map_err(|e| match e {
            LeadGenError::SourceUnavailable(_) => ApiError::from(e),
            other => ApiError::with_context(other, "Error searching leads"),
        })?;

    remember(&state, &response).await;
    Ok(Json(response))
}

pub async fn scrape_leads_apollo(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScrapeQuery>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = state
        .retriever
        .scrape(
            ScrapeSource::ApolloListing,
            &request.industry,
            &request.location,
            params.max_pages.unwrap_or(2),
        )
        .await
        .map_err(|e| ApiError::with_context(e, "Error scraping Apollo leads"))?;

    remember(&state, &response).await;
    Ok(Json(response))
}

pub async fn scrape_leads_yellowpages(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = state
        .retriever
        .scrape(
            ScrapeSource::YellowPages,
            &request.industry,
            &request.location,
            1,
        )
        .await
        .map_err(|e| ApiError::with_context(e, "Error Scraping Yellow Pages Leads"))?;

    remember(&state, &response).await;
    Ok(Json(response))
}

pub async fn search_leads_hybrid(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HybridQuery>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let options = HybridOptions {
        use_scraping: params.use_scraping.unwrap_or(false),
        scrape_source: params
            .scrape_source
            .as_deref()
            .map(ScrapeSource::from_query)
            .unwrap_or_default(),
        max_pages: params.max_scrape_pages.unwrap_or(1),
    };

    let response = state
        .retriever
        .hybrid(&request.industry, &request.location, options)
        .await?;

    info!(
        industry = %request.industry,
        location = %request.location,
        total = response.total,
        "Hybrid search completed"
    );
    remember(&state, &response).await;
    Ok(Json(response))
}

pub async fn list_leads(State(state): State<Arc<AppState>>) -> Json<Vec<Lead>> {
    Json(state.leads.values().await)
}

pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, ApiError> {
    stored_lead(&state, &id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Lead Not Found"))
}

pub async fn export_leads(Json(leads): Json<Vec<Lead>>) -> Result<Response, ApiError> {
    let csv = leads_to_csv(&leads)?;
    let filename = export_filename(Local::now());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        csv,
    )
        .into_response())
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let apollo_api = if state.config.is_apollo_configured() {
        "configured"
    } else {
        "not configured"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        apollo_api: apollo_api.to_string(),
        timestamp: Local::now().to_rfc3339(),
    })
}
