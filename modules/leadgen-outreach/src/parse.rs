// Structured data from free-text model output.
//
// Drafts: take the first balanced `{...}` region and parse it. No region,
// or a region that is not a usable message, means the whole response is
// the message body. Drafting never fails at this step.
//
// Analyses: the same region must parse with every score present and in
// range, otherwise the analysis is rejected.

use ai_client::{extract_json_object, strip_code_blocks};
use serde::Deserialize;
use uuid::Uuid;

use leadgen_common::{LeadGenError, MessageQualityAnalysis};

pub const FALLBACK_SUBJECT: &str = "Partnership Opportunity";
pub const FALLBACK_CALL_TO_ACTION: &str = "Let's connect";
pub const FALLBACK_TONE_SCORE: f64 = 8.0;

/// A drafted message as the model described it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedMessage {
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub key_personalization_points: Vec<String>,
    #[serde(default)]
    pub call_to_action: Option<String>,
    #[serde(default)]
    pub tone_score: Option<f64>,
}

impl GeneratedMessage {
    /// Treat the entire response as the message body.
    pub fn raw(text: &str) -> Self {
        Self {
            subject: Some(FALLBACK_SUBJECT.to_string()),
            message: text.to_string(),
            key_personalization_points: Vec::new(),
            call_to_action: Some(FALLBACK_CALL_TO_ACTION.to_string()),
            tone_score: Some(FALLBACK_TONE_SCORE),
        }
    }
}

pub fn parse_generated_message(text: &str) -> GeneratedMessage {
    let Some(region) = extract_json_object(text) else {
        return GeneratedMessage::raw(text);
    };

    match serde_json::from_str::<GeneratedMessage>(region) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "Draft JSON did not parse, using raw text");
            GeneratedMessage::raw(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    overall_score: f64,
    personalization_score: f64,
    clarity_score: f64,
    engagement_score: f64,
    call_to_action_score: f64,
    #[serde(default)]
    feedback: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
}

pub fn parse_quality_analysis(
    text: &str,
    message_id: Uuid,
) -> Result<MessageQualityAnalysis, LeadGenError> {
    let region = extract_json_object(strip_code_blocks(text)).ok_or_else(|| {
        LeadGenError::Validation("quality analysis response contained no JSON object".to_string())
    })?;

    let payload: AnalysisPayload = serde_json::from_str(region)
        .map_err(|e| LeadGenError::Validation(format!("quality analysis did not parse: {e}")))?;

    MessageQualityAnalysis {
        message_id,
        overall_score: payload.overall_score,
        personalization_score: payload.personalization_score,
        clarity_score: payload.clarity_score,
        engagement_score: payload.engagement_score,
        call_to_action_score: payload.call_to_action_score,
        feedback: payload.feedback,
        strengths: payload.strengths,
        improvements: payload.improvements,
    }
    .validate()
}

/// Scores used when the model could not be reached for an analysis.
pub fn default_analysis(message_id: Uuid) -> MessageQualityAnalysis {
    MessageQualityAnalysis {
        message_id,
        overall_score: 7.5,
        personalization_score: 7.0,
        clarity_score: 7.5,
        engagement_score: 7.0,
        call_to_action_score: 7.5,
        feedback: vec!["Message generated successfully".to_string()],
        strengths: vec!["Clear messaging".to_string()],
        improvements: vec!["Could be more personalized".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_embedded_in_prose_is_extracted() {
        let text = r#"Sure! Here's the draft:
{"subject": "Quick idea for Acme", "message": "Hi Jane, {not a brace issue}", "key_personalization_points": ["Austin", "Healthcare"], "tone_score": 9.1}
Let me know if you want changes."#;

        let parsed = parse_generated_message(text);
        assert_eq!(parsed.subject.as_deref(), Some("Quick idea for Acme"));
        assert_eq!(parsed.message, "Hi Jane, {not a brace issue}");
        assert_eq!(parsed.key_personalization_points, vec!["Austin", "Healthcare"]);
        assert_eq!(parsed.call_to_action, None);
    }

    #[test]
    fn no_json_wraps_raw_text() {
        let parsed = parse_generated_message("Hi Jane, let's talk.");
        assert_eq!(parsed, GeneratedMessage::raw("Hi Jane, let's talk."));
        assert_eq!(parsed.subject.as_deref(), Some(FALLBACK_SUBJECT));
        assert_eq!(parsed.tone_score, Some(8.0));
    }

    #[test]
    fn malformed_json_wraps_raw_text() {
        let text = r#"{"subject": "x", "message": }"#;
        assert_eq!(parse_generated_message(text).message, text);
    }

    #[test]
    fn json_without_message_wraps_raw_text() {
        let text = r#"{"subject": "Only a subject"}"#;
        let parsed = parse_generated_message(text);
        assert_eq!(parsed.message, text);
        assert_eq!(parsed.subject.as_deref(), Some(FALLBACK_SUBJECT));
    }

    #[test]
    fn analysis_parses_from_fenced_block() {
        let id = Uuid::new_v4();
        let text = "```json\n{\"overall_score\": 8.5, \"personalization_score\": 7, \"clarity_score\": 9, \"engagement_score\": 8, \"call_to_action_score\": 8.5, \"strengths\": [\"Concise\"]}\n```";

        let analysis = parse_quality_analysis(text, id).unwrap();
        assert_eq!(analysis.message_id, id);
        assert_eq!(analysis.overall_score, 8.5);
        assert_eq!(analysis.personalization_score, 7.0);
        assert_eq!(analysis.strengths, vec!["Concise"]);
        assert!(analysis.feedback.is_empty());
    }

    #[test]
    fn analysis_rejects_missing_or_out_of_range_scores() {
        let id = Uuid::new_v4();
        assert!(matches!(
            parse_quality_analysis("Looks great to me!", id),
            Err(LeadGenError::Validation(_))
        ));
        assert!(matches!(
            parse_quality_analysis(r#"{"overall_score": 8}"#, id),
            Err(LeadGenError::Validation(_))
        ));
        let out_of_range = r#"{"overall_score": 12, "personalization_score": 7, "clarity_score": 9, "engagement_score": 8, "call_to_action_score": 8}"#;
        assert!(matches!(
            parse_quality_analysis(out_of_range, id),
            Err(LeadGenError::Validation(_))
        ));
    }

    #[test]
    fn default_analysis_is_in_range() {
        let analysis = default_analysis(Uuid::new_v4()).validate().unwrap();
        assert_eq!(analysis.overall_score, 7.5);
        assert_eq!(analysis.feedback, vec!["Message generated successfully"]);
    }
}
