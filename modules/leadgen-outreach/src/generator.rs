use std::sync::Arc;

use ai_client::TextGenerator;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use leadgen_common::{Lead, LeadGenError, MessageQualityAnalysis, OutreachMessage, OutreachRequest};

use crate::bulk::BulkOutcome;
use crate::fallback::fallback_message;
use crate::parse::{default_analysis, parse_generated_message, parse_quality_analysis};
use crate::prompt::{analysis_prompt, outreach_prompt};

/// Drafts and reviews outreach messages through a text model.
#[derive(Clone)]
pub struct OutreachGenerator {
    model: Arc<dyn TextGenerator>,
    quality_threshold: f64,
}

impl OutreachGenerator {
    pub fn new(model: Arc<dyn TextGenerator>) -> Self {
        Self {
            model,
            quality_threshold: 7.0,
        }
    }

    /// Overall scores below this are logged as low quality.
    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    /// Draft one message. The returned message has no id yet.
    pub async fn generate(
        &self,
        lead: &Lead,
        request: &OutreachRequest,
    ) -> Result<OutreachMessage, LeadGenError> {
        let prompt = outreach_prompt(lead, request);

        let text = self.model.generate(&prompt).await.map_err(|e| {
            warn!(
                lead_id = %lead.id,
                provider = self.model.name(),
                error = %e,
                "Outreach generation failed"
            );
            LeadGenError::Generation(format!("AI message generation failed: {e:#}"))
        })?;

        let draft = parse_generated_message(&text);

        info!(lead_id = %lead.id, message_type = %request.message_type, "Outreach message drafted");

        Ok(OutreachMessage {
            id: None,
            lead_id: lead.id,
            subject: draft
                .subject
                .filter(|s| !s.trim().is_empty())
                .or_else(|| Some(format!("Partnership Opportunity with {}", lead.company))),
            message: draft.message,
            tone: request.tone(),
            message_type: request.message_type,
            personalization_level: request.personalization_level(),
            generated_at: Some(Utc::now()),
            quality_score: None,
            key_personalization_points: draft.key_personalization_points,
        })
    }

    /// Draft messages for each lead in order, one model call at a time.
    /// A failed draft becomes the fallback template; the batch continues.
    pub async fn generate_bulk(&self, leads: &[Lead], request: &OutreachRequest) -> Vec<BulkOutcome> {
        let mut outcomes = Vec::with_capacity(leads.len());

        for lead in leads {
            let outcome = match self.generate(lead, request).await {
                Ok(message) => BulkOutcome::Generated(message),
                Err(e) => BulkOutcome::Fallback {
                    message: fallback_message(lead, request),
                    error: e.to_string(),
                },
            };
            outcomes.push(outcome);
        }

        let generated = outcomes.iter().filter(|o| o.is_generated()).count();
        info!(
            total = outcomes.len(),
            generated,
            fallbacks = outcomes.len() - generated,
            "Bulk outreach generation finished"
        );
        outcomes
    }

    /// Review a stored message. An unreachable model yields stock scores;
    /// a reply that is not a valid analysis is a `Validation` error.
    pub async fn analyze_quality(
        &self,
        message: &OutreachMessage,
        message_id: Uuid,
    ) -> Result<MessageQualityAnalysis, LeadGenError> {
        let text = match self.model.generate(&analysis_prompt(message)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(%message_id, error = %e, "Quality analysis failed, using default scores");
                return Ok(default_analysis(message_id));
            }
        };

        let analysis = parse_quality_analysis(&text, message_id)?;
        if analysis.overall_score < self.quality_threshold {
            warn!(
                %message_id,
                overall_score = analysis.overall_score,
                threshold = self.quality_threshold,
                "Message scored below quality threshold"
            );
        }
        Ok(analysis)
    }
}
