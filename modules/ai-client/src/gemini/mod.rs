mod client;
mod types;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::traits::TextGenerator;
use crate::util::truncate_to_char_boundary;

use self::client::GeminiClient;
use self::types::{GenerateContentRequest, GenerationConfig};

/// Sampling parameters forwarded as `generationConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 4096,
        }
    }
}

impl From<GenerationSettings> for GenerationConfig {
    fn from(s: GenerationSettings) -> Self {
        Self {
            temperature: Some(s.temperature),
            top_p: Some(s.top_p),
            top_k: Some(s.top_k),
            max_output_tokens: Some(s.max_output_tokens),
        }
    }
}

// =============================================================================
// Gemini Provider
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    model: String,
    settings: GenerationSettings,
    timeout: Duration,
    base_url: Option<String>,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            settings: GenerationSettings::default(),
            timeout: Duration::from_secs(30),
            base_url: None,
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow!("GEMINI_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    fn client(&self) -> Result<GeminiClient> {
        let client = GeminiClient::new(&self.api_key, self.timeout)?;
        Ok(match self.base_url {
            Some(ref url) => client.with_base_url(url),
            None => client,
        })
    }
}

#[async_trait]
impl TextGenerator for Gemini {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(
            model = %self.model,
            prompt_preview = truncate_to_char_boundary(prompt, 120),
            "Generating text"
        );

        let request = GenerateContentRequest::new(prompt, self.settings.into());
        let response = self
            .client()?
            .generate_content(&self.model, &request)
            .await
            .context("Gemini generation failed")?;

        response
            .text()
            .ok_or_else(|| anyhow!("No text in Gemini response"))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
