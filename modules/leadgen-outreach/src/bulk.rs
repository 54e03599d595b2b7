use leadgen_common::{BulkOutreachResponse, OutreachMessage};

/// Per-lead result of bulk generation. A failed draft still yields a
/// message: the deterministic fallback template.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOutcome {
    Generated(OutreachMessage),
    Fallback { message: OutreachMessage, error: String },
}

impl BulkOutcome {
    pub fn message_mut(&mut self) -> &mut OutreachMessage {
        match self {
            BulkOutcome::Generated(message) | BulkOutcome::Fallback { message, .. } => message,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, BulkOutcome::Generated(_))
    }
}

/// Fold outcomes into the response body. `lookup_errors` are lead ids that
/// could not be resolved before generation; generation failures are
/// appended after them.
pub fn summarize(outcomes: Vec<BulkOutcome>, lookup_errors: Vec<String>) -> BulkOutreachResponse {
    let total_count = outcomes.len();
    let success_count = outcomes.iter().filter(|o| o.is_generated()).count();

    let mut errors = lookup_errors;
    let mut messages = Vec::with_capacity(total_count);
    for outcome in outcomes {
        match outcome {
            BulkOutcome::Generated(message) => messages.push(message),
            BulkOutcome::Fallback { message, error } => {
                errors.push(format!("Lead {}: {error}", message.lead_id));
                messages.push(message);
            }
        }
    }

    BulkOutreachResponse {
        messages,
        success_count,
        failed_count: total_count - success_count,
        total_count,
        errors,
        success: true,
    }
}
