use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use leadgen_common::{
    BulkOutreachRequest, BulkOutreachResponse, LeadGenError, MessageQualityAnalysis,
    OutreachRequest, OutreachResponse,
};
use leadgen_outreach::{summarize, OutreachGenerator};

use super::{parse_id, stored_lead, ApiError};
use crate::AppState;

#[derive(Deserialize)]
pub struct GenerateQuery {
    lead_id: Option<String>,
}

/// The generator, if outreach is enabled and a model key is configured.
fn generator(state: &AppState) -> Result<&OutreachGenerator, ApiError> {
    if !state.config.enable_ai_outreach {
        return Err(LeadGenError::FeatureDisabled("AI outreach generation".to_string()).into());
    }
    state.outreach.as_ref().ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Gemini API Key Not Configured. Please Set GEMINI_API_KEY Environment Variable.",
        )
    })
}

fn with_configured_defaults(state: &AppState, request: OutreachRequest) -> OutreachRequest {
    request.with_defaults(
        state.config.default_message_tone,
        state.config.default_personalization_level,
    )
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenerateQuery>,
    Json(request): Json<OutreachRequest>,
) -> Result<Json<OutreachResponse>, ApiError> {
    let generator = generator(&state)?;

    let stored = match params.lead_id.as_deref() {
        Some(id) => stored_lead(&state, id).await,
        None => None,
    };
    let lead = stored
        .or_else(|| request.lead.clone())
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Lead Not Found or Not Provided"))?;

    let request = with_configured_defaults(&state, request);
    let mut message = generator
        .generate(&lead, &request)
        .await
        .map_err(|e| ApiError::with_context(e, "Failed to Generate Outreach Message"))?;

    let message_id = Uuid::new_v4();
    message.id = Some(message_id);

    let mut analysis = None;
    if state.config.enable_message_analysis {
        match generator.analyze_quality(&message, message_id).await {
            Ok(result) => {
                message.quality_score = Some(result.overall_score);
                analysis = Some(result);
            }
            Err(e) => warn!(%message_id, error = %e, "Failed to analyze message quality"),
        }
    }

    state.messages.put(message_id, message.clone()).await;
    info!(%message_id, lead_id = %lead.id, "Outreach message stored");

    Ok(Json(OutreachResponse {
        message,
        analysis,
        success: true,
        error: None,
    }))
}

pub async fn generate_bulk(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkOutreachRequest>,
) -> Result<Json<BulkOutreachResponse>, ApiError> {
    let generator = generator(&state)?;
    if !state.config.enable_bulk_generation {
        return Err(LeadGenError::FeatureDisabled("Bulk generation".to_string()).into());
    }

    let max = state.config.max_bulk_messages;
    if request.lead_ids.len() > max {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!(
                "Too Many Leads: {} Requested, Maximum is {max}",
                request.lead_ids.len()
            ),
        ));
    }

    let mut leads = Vec::with_capacity(request.lead_ids.len());
    let mut lookup_errors = Vec::new();
    for id in &request.lead_ids {
        match stored_lead(&state, id).await {
            Some(lead) => leads.push(lead),
            None => lookup_errors.push(format!("Lead {id} Not Found")),
        }
    }

    if leads.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "No Valid Leads Found"));
    }

    let outreach_request = with_configured_defaults(&state, request.outreach_request);
    let mut outcomes = generator.generate_bulk(&leads, &outreach_request).await;

    for outcome in &mut outcomes {
        let message = outcome.message_mut();
        let id = Uuid::new_v4();
        message.id = Some(id);
        state.messages.put(id, message.clone()).await;
    }

    Ok(Json(summarize(outcomes, lookup_errors)))
}

pub async fn analyze_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> Result<Json<MessageQualityAnalysis>, ApiError> {
    let generator = generator(&state)?;
    if !state.config.enable_message_analysis {
        return Err(LeadGenError::FeatureDisabled("Message analysis".to_string()).into());
    }

    let not_found = || ApiError::new(StatusCode::NOT_FOUND, "Message Not Found");
    let message_id = parse_id(&message_id).ok_or_else(not_found)?;
    let message = state
        .messages
        .get(&message_id)
        .await
        .ok_or_else(not_found)?;

    let analysis = generator
        .analyze_quality(&message, message_id)
        .await
        .map_err(|e| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to Analyze Message: {e}"),
            )
        })?;

    Ok(Json(analysis))
}

pub async fn templates() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "templates": {
            "cold_email": {
                "professional": {
                    "description": "Formal business email approach",
                    "best_for": ["Enterprise clients", "C-level executives", "Formal industries"],
                    "sample_subject": "Partnership Opportunity with [Company Name]"
                },
                "friendly": {
                    "description": "Warm, approachable email style",
                    "best_for": ["SMBs", "Startups", "Creative industries"],
                    "sample_subject": "Love what [Company Name] is doing!"
                }
            },
            "linkedin_message": {
                "casual": {
                    "description": "Conversational LinkedIn approach",
                    "best_for": ["Tech professionals", "Startups", "Modern companies"],
                    "character_limit": 300
                },
                "professional": {
                    "description": "Professional LinkedIn connection",
                    "best_for": ["Traditional industries", "Senior executives"],
                    "character_limit": 300
                }
            },
            "cold_call_script": {
                "friendly": {
                    "description": "Warm, consultative call approach",
                    "best_for": ["Consultative sales", "Relationship building"],
                    "duration": "2-3 minutes"
                }
            }
        },
        "personalization_tips": [
            "Research recent company news or achievements",
            "Reference specific industry challenges",
            "Mention mutual connections when available",
            "Use company-specific terminology",
            "Reference their website or recent content"
        ]
    }))
}
