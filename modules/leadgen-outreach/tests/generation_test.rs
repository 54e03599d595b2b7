//! Generation chain tests: scripted model → OutreachGenerator → messages.

use std::sync::Arc;

use leadgen_common::{LeadGenError, MessageType, OutreachRequest, Tone};
use leadgen_outreach::testing::{lead, ScriptedGenerator};
use leadgen_outreach::{summarize, BulkOutcome, OutreachGenerator};
use uuid::Uuid;

const DRAFT: &str = r#"Here you go:
```json
{"subject": "Faster checkout for Acme", "message": "Hi Pat, ...", "key_personalization_points": ["Portland retail"], "call_to_action": "15 minutes Thursday?", "tone_score": 9.0}
```"#;

const ANALYSIS: &str = r#"{"overall_score": 6.0, "personalization_score": 5.5, "clarity_score": 8.0, "engagement_score": 6.0, "call_to_action_score": 7.0, "feedback": ["Mention a recent store opening"]}"#;

#[tokio::test]
async fn drafted_message_carries_parsed_fields() {
    let model = Arc::new(ScriptedGenerator::new().reply(DRAFT));
    let generator = OutreachGenerator::new(model.clone());
    let acme = lead("Acme");

    let mut request = OutreachRequest::new(MessageType::ColdEmail);
    request.tone = Some(Tone::Friendly);

    let message = generator.generate(&acme, &request).await.unwrap();

    assert_eq!(message.lead_id, acme.id);
    assert!(message.id.is_none());
    assert_eq!(message.subject.as_deref(), Some("Faster checkout for Acme"));
    assert_eq!(message.message, "Hi Pat, ...");
    assert_eq!(message.key_personalization_points, vec!["Portland retail"]);
    assert_eq!(message.tone, Tone::Friendly);
    assert!(message.generated_at.is_some());

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Company: Acme"));
}

#[tokio::test]
async fn missing_subject_defaults_to_company_partnership() {
    let model = Arc::new(ScriptedGenerator::new().reply(r#"{"message": "Hello"}"#));
    let generator = OutreachGenerator::new(model);

    let message = generator
        .generate(&lead("Initech"), &OutreachRequest::new(MessageType::LinkedinMessage))
        .await
        .unwrap();

    assert_eq!(
        message.subject.as_deref(),
        Some("Partnership Opportunity with Initech")
    );
}

#[tokio::test]
async fn model_failure_is_a_generation_error() {
    let generator = OutreachGenerator::new(Arc::new(ScriptedGenerator::new().fail("quota")));

    let err = generator
        .generate(&lead("Acme"), &OutreachRequest::new(MessageType::ColdEmail))
        .await
        .unwrap_err();

    assert!(matches!(err, LeadGenError::Generation(ref m) if m.contains("quota")));
}

#[tokio::test]
async fn bulk_failure_on_second_lead_uses_fallback_and_continues() {
    let model = Arc::new(
        ScriptedGenerator::new()
            .reply(DRAFT)
            .fail("model overloaded")
            .reply(r#"{"subject": "Hi", "message": "Third"}"#),
    );
    let generator = OutreachGenerator::new(model.clone());
    let leads = vec![lead("Acme"), lead("Globex"), lead("Initech")];
    let request = OutreachRequest::new(MessageType::ColdEmail);

    let outcomes = generator.generate_bulk(&leads, &request).await;

    assert_eq!(model.prompts().len(), 3);
    assert!(outcomes[0].is_generated());
    assert!(outcomes[2].is_generated());
    match &outcomes[1] {
        BulkOutcome::Fallback { message, error } => {
            assert_eq!(message.lead_id, leads[1].id);
            assert_eq!(
                message.subject.as_deref(),
                Some("Partnership Opportunity with Globex")
            );
            assert!(message.message.contains("I came across Globex"));
            assert!(error.contains("model overloaded"));
        }
        other => panic!("expected fallback for lead #2, got {other:?}"),
    }

    let response = summarize(outcomes, Vec::new());
    assert_eq!(response.total_count, 3);
    assert_eq!(response.success_count, 2);
    assert_eq!(response.failed_count, 1);
    assert_eq!(response.errors.len(), 1);
}

#[tokio::test]
async fn analysis_parses_model_scores() {
    let generator = OutreachGenerator::new(Arc::new(
        ScriptedGenerator::new().reply(DRAFT).reply(ANALYSIS),
    ))
    .with_quality_threshold(7.0);
    let message = generator
        .generate(&lead("Acme"), &OutreachRequest::new(MessageType::ColdEmail))
        .await
        .unwrap();
    let id = Uuid::new_v4();

    let analysis = generator.analyze_quality(&message, id).await.unwrap();

    assert_eq!(analysis.message_id, id);
    assert_eq!(analysis.overall_score, 6.0);
    assert_eq!(analysis.feedback, vec!["Mention a recent store opening"]);
}

#[tokio::test]
async fn analysis_model_failure_returns_default_scores() {
    let generator = OutreachGenerator::new(Arc::new(
        ScriptedGenerator::new().reply(DRAFT).fail("timeout"),
    ));
    let message = generator
        .generate(&lead("Acme"), &OutreachRequest::new(MessageType::ColdEmail))
        .await
        .unwrap();

    let analysis = generator.analyze_quality(&message, Uuid::new_v4()).await.unwrap();
    assert_eq!(analysis.overall_score, 7.5);
    assert_eq!(analysis.strengths, vec!["Clear messaging"]);
}

#[tokio::test]
async fn analysis_with_unusable_reply_is_rejected() {
    let generator = OutreachGenerator::new(Arc::new(
        ScriptedGenerator::new().reply(DRAFT).reply("Pretty good overall."),
    ));
    let message = generator
        .generate(&lead("Acme"), &OutreachRequest::new(MessageType::ColdEmail))
        .await
        .unwrap();

    let err = generator
        .analyze_quality(&message, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, LeadGenError::Validation(_)));
}
