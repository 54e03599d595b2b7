use chrono::Utc;

use leadgen_common::{
    Lead, MessageType, OutreachMessage, OutreachRequest, CONTACT_NOT_AVAILABLE, NOT_AVAILABLE,
};

/// Deterministic template used when drafting fails for a lead.
pub fn fallback_message(lead: &Lead, request: &OutreachRequest) -> OutreachMessage {
    let name = greeting_name(&lead.contact);
    let value = request.value_proposition.as_deref();
    let company = &lead.company;
    let industry = &lead.industry;

    let (subject, message) = match request.message_type {
        MessageType::ColdEmail => (
            format!("Partnership Opportunity with {company}"),
            format!(
                "Hi {name},\n\n\
                 I hope this email finds you well. I came across {company} and was impressed by your work in the {industry} industry.\n\n\
                 {value}\n\n\
                 I'd love to explore how we might be able to support {company}'s goals. Would you be open to a brief conversation?\n\n\
                 Best regards,\n\
                 {sender}",
                value = value.unwrap_or(
                    "Our company specializes in helping businesses like yours achieve better results."
                ),
                sender = request.sender_name.as_deref().unwrap_or("Your Sales Team"),
            ),
        ),
        MessageType::LinkedinMessage => (
            format!("Connection with {company}"),
            format!(
                "Hi {name},\n\n\
                 I noticed your work at {company} in {industry}. {value}\n\n\
                 Would love to connect and share some insights that might be valuable for {company}.\n\n\
                 Best,\n\
                 {sender}",
                value = value.unwrap_or("We help companies in your industry achieve better results."),
                sender = request.sender_name.as_deref().unwrap_or("Your Name"),
            ),
        ),
        MessageType::ColdCallScript => (
            format!("Call Script for {company}"),
            format!(
                "Opening: Hi, this is [Your Name] from [Your Company]. I'm calling because I noticed {company} is doing great work in {industry}.\n\n\
                 Value Prop: {value}\n\n\
                 Question: I'd love to learn more about {company}'s current challenges in this area. Do you have a few minutes to chat?\n\n\
                 Close: If not now, when would be a better time to connect?",
                value = value
                    .unwrap_or("We help companies like yours improve their results and efficiency."),
            ),
        ),
    };

    OutreachMessage {
        id: None,
        lead_id: lead.id,
        subject: Some(subject),
        message,
        tone: request.tone(),
        message_type: request.message_type,
        personalization_level: request.personalization_level(),
        generated_at: Some(Utc::now()),
        quality_score: None,
        key_personalization_points: Vec::new(),
    }
}

/// First word of the contact when it looks like a person's name,
/// otherwise "there".
fn greeting_name(contact: &str) -> &str {
    let contact = contact.trim();
    if contact.is_empty()
        || contact == NOT_AVAILABLE
        || contact == CONTACT_NOT_AVAILABLE
        || contact.starts_with("Phone:")
    {
        return "there";
    }

    match contact.split_whitespace().next() {
        Some(word) if word.chars().next().is_some_and(char::is_alphabetic) => word,
        _ => "there",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgen_common::{PersonalizationLevel, Priority, Tone};
    use uuid::Uuid;

    fn lead(contact: &str) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            company: "Globex".into(),
            industry: "Manufacturing".into(),
            location: "Springfield, OR".into(),
            website: None,
            linkedin_url: None,
            contact: contact.into(),
            employees: "500".into(),
            priority: Priority::High,
            outreach_angle: "Operational efficiency improvements".into(),
            last_updated: "2024-05-01".into(),
        }
    }

    #[test]
    fn cold_email_uses_defaults_and_first_name() {
        let request = OutreachRequest::new(MessageType::ColdEmail);
        let message = fallback_message(&lead("Hank Scorpio (hank@globex.test)"), &request);

        assert_eq!(message.subject.as_deref(), Some("Partnership Opportunity with Globex"));
        assert!(message.message.starts_with("Hi Hank,"));
        assert!(message.message.contains("your work in the Manufacturing industry"));
        assert!(message.message.contains("Our company specializes in helping businesses"));
        assert!(message.message.ends_with("Your Sales Team"));
        assert_eq!(message.tone, Tone::Professional);
        assert_eq!(message.personalization_level, PersonalizationLevel::Medium);
        assert!(message.id.is_none());
    }

    #[test]
    fn linkedin_uses_sender_and_value_proposition() {
        let mut request = OutreachRequest::new(MessageType::LinkedinMessage);
        request.sender_name = Some("Marge".into());
        request.value_proposition = Some("We automate line audits.".into());

        let message = fallback_message(&lead(CONTACT_NOT_AVAILABLE), &request);
        assert_eq!(message.subject.as_deref(), Some("Connection with Globex"));
        assert!(message.message.starts_with("Hi there,"));
        assert!(message.message.contains("in Manufacturing. We automate line audits."));
        assert!(message.message.ends_with("Marge"));
    }

    #[test]
    fn call_script_mentions_company() {
        let request = OutreachRequest::new(MessageType::ColdCallScript);
        let message = fallback_message(&lead("Phone: 555-0100"), &request);
        assert_eq!(message.subject.as_deref(), Some("Call Script for Globex"));
        assert!(message.message.starts_with("Opening: Hi, this is [Your Name]"));
        assert!(message.message.contains("learn more about Globex's current challenges"));
    }

    #[test]
    fn greeting_skips_sentinels_and_phone_numbers() {
        assert_eq!(greeting_name("Jane Doe"), "Jane");
        assert_eq!(greeting_name("N/A"), "there");
        assert_eq!(greeting_name(CONTACT_NOT_AVAILABLE), "there");
        assert_eq!(greeting_name("Phone: 555-0100"), "there");
        assert_eq!(greeting_name("555-0100"), "there");
        assert_eq!(greeting_name(""), "there");
    }
}
