// Test doubles for outreach generation.
//
// - ScriptedGenerator (TextGenerator): replays queued replies and failures
//   in order, recording every prompt it receives
// - lead(): a fully populated Lead fixture

use std::collections::VecDeque;
use std::sync::Mutex;

use ai_client::TextGenerator;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use leadgen_common::{Lead, Priority};

/// Queue-backed text model. Builder pattern: `.reply()`, `.fail()`.
/// Calls past the end of the script fail.
#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(text.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Err(message.to_string()));
        self
    }

    fn push(&self, entry: std::result::Result<String, String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("ScriptedGenerator: script exhausted")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn lead(company: &str) -> Lead {
    Lead {
        id: Uuid::new_v4(),
        company: company.to_string(),
        industry: "Retail".to_string(),
        location: "Portland, OR".to_string(),
        website: Some(format!("https://{}.test", company.to_lowercase())),
        linkedin_url: Some("N/A".to_string()),
        contact: "Pat Lee (pat@example.test)".to_string(),
        employees: "80".to_string(),
        priority: Priority::Medium,
        outreach_angle: "Customer experience enhancement".to_string(),
        last_updated: "2024-05-01".to_string(),
    }
}
