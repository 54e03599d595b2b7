use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::types::{PersonalizationLevel, Tone};

pub const APOLLO_API_URL: &str = "https://api.apollo.io/v1";
pub const MAX_PAGE_SIZE: u32 = 50;
/// Upper bound on pages for a single-source listing scrape.
pub const MAX_SCRAPE_PAGES: u32 = 5;
/// Upper bound on pages when scraping as a hybrid fallback.
pub const MAX_FALLBACK_PAGES: u32 = 3;
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Structured source
    pub apollo_api_key: Option<String>,
    pub apollo_api_url: String,

    // AI / text generation
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub ai_max_tokens_per_request: u32,
    pub ai_temperature: f32,
    pub ai_top_p: f32,
    pub ai_top_k: u32,

    // Outreach
    pub default_message_tone: Tone,
    pub default_personalization_level: PersonalizationLevel,
    pub max_bulk_messages: usize,
    pub message_quality_threshold: f64,

    // Feature flags
    pub enable_ai_outreach: bool,
    pub enable_message_analysis: bool,
    pub enable_bulk_generation: bool,

    // Scraping
    pub browserless_url: String,
    pub browserless_token: Option<String>,
    pub scraping_delay: Duration,
    pub request_timeout: Duration,

    // Web server
    pub allowed_origins: Vec<String>,
    pub api_host: String,
    pub api_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apollo_api_key: None,
            apollo_api_url: APOLLO_API_URL.to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            ai_max_tokens_per_request: 4096,
            ai_temperature: 0.7,
            ai_top_p: 0.9,
            ai_top_k: 40,
            default_message_tone: Tone::Professional,
            default_personalization_level: PersonalizationLevel::Medium,
            max_bulk_messages: 50,
            message_quality_threshold: 7.0,
            enable_ai_outreach: true,
            enable_message_analysis: true,
            enable_bulk_generation: true,
            browserless_url: "http://localhost:3000".to_string(),
            browserless_token: None,
            scraping_delay: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(30),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    /// Unset variables fall back to defaults; malformed numbers are an error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            apollo_api_key: optional_env("APOLLO_API_KEY"),
            apollo_api_url: env::var("APOLLO_API_URL").unwrap_or(defaults.apollo_api_url),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            ai_max_tokens_per_request: parsed_env(
                "AI_MAX_TOKENS_PER_REQUEST",
                defaults.ai_max_tokens_per_request,
            )?,
            ai_temperature: parsed_env("AI_TEMPERATURE", defaults.ai_temperature)?,
            ai_top_p: parsed_env("AI_TOP_P", defaults.ai_top_p)?,
            ai_top_k: parsed_env("AI_TOP_K", defaults.ai_top_k)?,
            default_message_tone: parsed_env("DEFAULT_MESSAGE_TONE", defaults.default_message_tone)?,
            default_personalization_level: parsed_env(
                "DEFAULT_PERSONALIZATION_LEVEL",
                defaults.default_personalization_level,
            )?,
            max_bulk_messages: parsed_env("MAX_BULK_MESSAGES", defaults.max_bulk_messages)?,
            message_quality_threshold: parsed_env(
                "MESSAGE_QUALITY_THRESHOLD",
                defaults.message_quality_threshold,
            )?,
            enable_ai_outreach: flag_env("ENABLE_AI_OUTREACH"),
            enable_message_analysis: flag_env("ENABLE_MESSAGE_ANALYSIS"),
            enable_bulk_generation: flag_env("ENABLE_BULK_GENERATION"),
            browserless_url: env::var("BROWSERLESS_URL").unwrap_or(defaults.browserless_url),
            browserless_token: optional_env("BROWSERLESS_TOKEN"),
            scraping_delay: Duration::from_millis(parsed_env("SCRAPING_DELAY_MS", 1000u64)?),
            request_timeout: Duration::from_secs(parsed_env("REQUEST_TIMEOUT_SECS", 30u64)?),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.allowed_origins),
            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: parsed_env("API_PORT", defaults.api_port)?,
        };

        config.log_keys();
        Ok(config)
    }

    pub fn is_apollo_configured(&self) -> bool {
        self.apollo_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn is_gemini_configured(&self) -> bool {
        self.gemini_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Outreach generation needs both the feature flag and a model key.
    pub fn can_generate_outreach(&self) -> bool {
        self.enable_ai_outreach && self.is_gemini_configured()
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let head: String = val.chars().take(5).collect();
            format!("{head}...({} chars)", val.len())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => preview(v),
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  APOLLO_API_KEY: {}", preview_opt(&self.apollo_api_key));
        tracing::info!("  GEMINI_API_KEY: {}", preview_opt(&self.gemini_api_key));
        tracing::info!("  GEMINI_MODEL: {}", self.gemini_model);
        tracing::info!("  BROWSERLESS_URL: {}", self.browserless_url);
        tracing::info!("  BROWSERLESS_TOKEN: {}", preview_opt(&self.browserless_token));
        tracing::info!(
            ai_outreach = self.enable_ai_outreach,
            message_analysis = self.enable_message_analysis,
            bulk_generation = self.enable_bulk_generation,
            "  Feature flags"
        );
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn flag_env(key: &str) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(true)
}

fn parsed_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
