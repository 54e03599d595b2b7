use leadgen_common::{
    Lead, MessageType, OutreachMessage, OutreachRequest, PersonalizationLevel, Tone, NOT_AVAILABLE,
};

/// Build the drafting prompt for one lead.
pub fn outreach_prompt(lead: &Lead, request: &OutreachRequest) -> String {
    let mut prompt = format!(
        r#"You are an expert B2B sales copywriter. Generate a personalized outreach message based on the following information:

LEAD INFORMATION:
- Company: {company}
- Industry: {industry}
- Location: {location}
- Website: {website}
- LinkedIn: {linkedin}
- Contact: {contact}
- Employees: {employees}
- Priority: {priority}
- Suggested Outreach Angle: {angle}

MESSAGE REQUIREMENTS:
- Type: {message_type}
- Tone: {tone}
- Personalization Level: {level}
- Target Role: {role}
- Company Description: {description}
- Value Proposition: {value}
"#,
        company = lead.company,
        industry = lead.industry,
        location = lead.location,
        website = lead.website.as_deref().unwrap_or(NOT_AVAILABLE),
        linkedin = lead.linkedin_url.as_deref().unwrap_or(NOT_AVAILABLE),
        contact = lead.contact,
        employees = lead.employees,
        priority = lead.priority,
        angle = lead.outreach_angle,
        message_type = request.message_type,
        tone = request.tone(),
        level = request.personalization_level(),
        role = request.target_role.as_deref().unwrap_or("Decision Maker"),
        description = request.company_description.as_deref().unwrap_or("Our company"),
        value = request
            .value_proposition
            .as_deref()
            .unwrap_or("We help businesses grow"),
    );

    prompt.push_str(type_requirements(request.message_type));
    prompt.push_str(&format!("\nTONE INSTRUCTIONS: {}\n", tone_instruction(request.tone())));
    prompt.push_str(personalization_instructions(request.personalization_level()));

    if let Some(context) = request.additional_context.as_deref().filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("\nADDITIONAL CONTEXT:\n{context}\n"));
    }

    prompt.push_str(OUTPUT_FORMAT);
    prompt
}

/// Build the quality-review prompt for a drafted message.
pub fn analysis_prompt(message: &OutreachMessage) -> String {
    format!(
        r#"Analyze the following outreach message and provide a quality score and feedback:

MESSAGE TYPE: {message_type}
TONE: {tone}
SUBJECT: {subject}
MESSAGE: {body}

Provide analysis in JSON format, every score between 0 and 10:
{{
    "overall_score": 8.5,
    "personalization_score": 7.0,
    "clarity_score": 9.0,
    "engagement_score": 8.0,
    "call_to_action_score": 8.5,
    "feedback": ["Suggestion 1", "Suggestion 2"],
    "strengths": ["Strength 1", "Strength 2"],
    "improvements": ["Improvement 1", "Improvement 2"]
}}
"#,
        message_type = message.message_type,
        tone = message.tone,
        subject = message.subject.as_deref().unwrap_or("None"),
        body = message.message,
    )
}

fn type_requirements(message_type: MessageType) -> &'static str {
    match message_type {
        MessageType::ColdEmail => {
            r#"
EMAIL SPECIFIC REQUIREMENTS:
- Create both a compelling subject line and email body
- Keep email between 100-150 words
- Include a clear call-to-action
- Make it mobile-friendly
- Avoid spam trigger words
"#
        }
        MessageType::LinkedinMessage => {
            r#"
LINKEDIN SPECIFIC REQUIREMENTS:
- Keep message under 300 characters for initial connection
- Reference something specific from their LinkedIn profile or company
- Be conversational and professional
- Include a soft call-to-action
"#
        }
        MessageType::ColdCallScript => {
            r#"
COLD CALL SCRIPT REQUIREMENTS:
- Create an opening, value proposition, and closing
- Include handling common objections
- Keep it conversational and natural
- Provide timing cues and pauses
- Maximum 2-minute script
"#
        }
    }
}

fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "Use formal business language, be respectful and corporate",
        Tone::Friendly => "Use warm, approachable language while maintaining professionalism",
        Tone::Casual => "Use conversational tone, be relatable but still business-focused",
        Tone::Urgent => {
            "Create sense of urgency without being pushy, emphasize time-sensitive opportunities"
        }
    }
}

fn personalization_instructions(level: PersonalizationLevel) -> &'static str {
    match level {
        PersonalizationLevel::High => {
            r#"
HIGH PERSONALIZATION:
- Research and reference specific company achievements, recent news, or industry challenges
- Mention specific pain points relevant to their industry
- Use company-specific terminology
- Reference mutual connections or shared experiences if applicable
"#
        }
        PersonalizationLevel::Medium => {
            r#"
MEDIUM PERSONALIZATION:
- Use industry-specific language and challenges
- Reference general company information
- Mention location or company size relevance
"#
        }
        PersonalizationLevel::Low => {
            r#"
LOW PERSONALIZATION:
- Use general business language
- Keep references broad but relevant
- Focus on universal business challenges
"#
        }
    }
}

const OUTPUT_FORMAT: &str = r#"
OUTPUT FORMAT:
Return your response as a JSON object with the following structure:
{
    "subject": "Subject line (for emails only)",
    "message": "The complete outreach message",
    "key_personalization_points": ["point1", "point2", "point3"],
    "call_to_action": "The specific CTA used",
    "tone_score": 9.5
}

Make sure the message is highly engaging, personalized, and likely to get a response.
"#;
