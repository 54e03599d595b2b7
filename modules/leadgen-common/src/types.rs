use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LeadGenError;

// --- Sentinels ---

/// Placeholder for a URL field the source did not provide.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder employee count when the source reports none.
pub const UNKNOWN_EMPLOYEES: &str = "Unknown";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const CONTACT_NOT_AVAILABLE: &str = "Contact Not Available";

// --- Lead ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// Canonical company + contact record. Only the normalizer creates these;
/// leads posted back by clients (for export or outreach) round-trip the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub employees: String,
    pub priority: Priority,
    #[serde(default)]
    pub outreach_angle: String,
    /// `YYYY-MM-DD` of normalization.
    #[serde(default)]
    pub last_updated: String,
}

// --- Search ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub industry: String,
    pub location: String,
}

/// Aggregate result of every retrieval mode: leads in retrieval order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub leads: Vec<Lead>,
    pub total: usize,
}

impl SearchResponse {
    pub fn new(leads: Vec<Lead>) -> Self {
        let total = leads.len();
        Self { leads, total }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub apollo_api: String,
    pub timestamp: String,
}

// --- Outreach enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    ColdEmail,
    LinkedinMessage,
    ColdCallScript,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::ColdEmail => write!(f, "cold_email"),
            MessageType::LinkedinMessage => write!(f, "linkedin_message"),
            MessageType::ColdCallScript => write!(f, "cold_call_script"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Casual,
    Urgent,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Professional => write!(f, "professional"),
            Tone::Friendly => write!(f, "friendly"),
            Tone::Casual => write!(f, "casual"),
            Tone::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Tone {
    type Err = LeadGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "friendly" => Ok(Tone::Friendly),
            "casual" => Ok(Tone::Casual),
            "urgent" => Ok(Tone::Urgent),
            other => Err(LeadGenError::Config(format!("unknown tone: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalizationLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for PersonalizationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonalizationLevel::Low => write!(f, "low"),
            PersonalizationLevel::Medium => write!(f, "medium"),
            PersonalizationLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for PersonalizationLevel {
    type Err = LeadGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(PersonalizationLevel::Low),
            "medium" => Ok(PersonalizationLevel::Medium),
            "high" => Ok(PersonalizationLevel::High),
            other => Err(LeadGenError::Config(format!(
                "unknown personalization level: {other}"
            ))),
        }
    }
}

// --- Outreach requests ---

fn default_target_role() -> Option<String> {
    Some("Decision Maker".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachRequest {
    pub message_type: MessageType,
    /// Unset means the server's configured default.
    #[serde(default)]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub personalization_level: Option<PersonalizationLevel>,
    #[serde(default = "default_target_role")]
    pub target_role: Option<String>,
    #[serde(default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub value_proposition: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub additional_context: Option<String>,
    /// Inline lead, used when no stored lead id is given.
    #[serde(default)]
    pub lead: Option<Lead>,
}

impl OutreachRequest {
    pub fn new(message_type: MessageType) -> Self {
        Self {
            message_type,
            tone: None,
            personalization_level: None,
            target_role: default_target_role(),
            company_description: None,
            value_proposition: None,
            sender_name: None,
            additional_context: None,
            lead: None,
        }
    }

    /// Fill an unset tone and personalization level.
    pub fn with_defaults(mut self, tone: Tone, level: PersonalizationLevel) -> Self {
        self.tone.get_or_insert(tone);
        self.personalization_level.get_or_insert(level);
        self
    }

    pub fn tone(&self) -> Tone {
        self.tone.unwrap_or_default()
    }

    pub fn personalization_level(&self) -> PersonalizationLevel {
        self.personalization_level.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOutreachRequest {
    /// Raw ids as sent by the client; ids that do not resolve are reported
    /// per entry instead of failing the request.
    pub lead_ids: Vec<String>,
    pub outreach_request: OutreachRequest,
}

// --- Outreach messages ---

/// A drafted message for one lead. References the lead by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachMessage {
    /// Assigned after generation, right before the message is stored.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub lead_id: Uuid,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    pub tone: Tone,
    pub message_type: MessageType,
    pub personalization_level: PersonalizationLevel,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub key_personalization_points: Vec<String>,
}

/// Scores are each in `[0, 10]`. Recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageQualityAnalysis {
    pub message_id: Uuid,
    pub overall_score: f64,
    pub personalization_score: f64,
    pub clarity_score: f64,
    pub engagement_score: f64,
    pub call_to_action_score: f64,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

impl MessageQualityAnalysis {
    /// Reject any score outside `[0, 10]` (or NaN).
    pub fn validate(self) -> Result<Self, LeadGenError> {
        let scores = [
            ("overall_score", self.overall_score),
            ("personalization_score", self.personalization_score),
            ("clarity_score", self.clarity_score),
            ("engagement_score", self.engagement_score),
            ("call_to_action_score", self.call_to_action_score),
        ];
        for (name, value) in scores {
            if !(0.0..=10.0).contains(&value) {
                return Err(LeadGenError::Validation(format!(
                    "{name} must be between 0 and 10, got {value}"
                )));
            }
        }
        Ok(self)
    }
}

// --- Outreach responses ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachResponse {
    pub message: OutreachMessage,
    pub analysis: Option<MessageQualityAnalysis>,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOutreachResponse {
    pub messages: Vec<OutreachMessage>,
    pub success_count: usize,
    pub failed_count: usize,
    pub total_count: usize,
    pub errors: Vec<String>,
    pub success: bool,
}
