pub mod error;

pub use error::{BrowserlessError, Result};

use std::time::Duration;

use serde::Serialize;

/// Options for a single `/content` render.
#[derive(Debug, Clone, Default)]
pub struct ContentRequest {
    url: String,
    wait_for_selector: Option<(String, Duration)>,
    user_agent: Option<String>,
}

impl ContentRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Block until `selector` is attached to the DOM, failing after `timeout`.
    pub fn wait_for_selector(mut self, selector: impl Into<String>, timeout: Duration) -> Self {
        self.wait_for_selector = Some((selector.into(), timeout));
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn body(&self) -> ContentBody<'_> {
        ContentBody {
            url: &self.url,
            goto_options: GotoOptions {
                wait_until: "domcontentloaded",
            },
            wait_for_selector: self
                .wait_for_selector
                .as_ref()
                .map(|(selector, timeout)| WaitForSelector {
                    selector,
                    timeout: timeout.as_millis() as u64,
                }),
            set_extra_http_headers: self
                .user_agent
                .as_deref()
                .map(|ua| serde_json::json!({ "User-Agent": ua })),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentBody<'a> {
    url: &'a str,
    goto_options: GotoOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    wait_for_selector: Option<WaitForSelector<'a>>,
    #[serde(rename = "setExtraHTTPHeaders", skip_serializing_if = "Option::is_none")]
    set_extra_http_headers: Option<serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GotoOptions {
    wait_until: &'static str,
}

#[derive(Serialize)]
struct WaitForSelector<'a> {
    selector: &'a str,
    timeout: u64,
}

pub struct BrowserlessClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrowserlessClient {
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    /// Fetch fully-rendered HTML content for a URL via Browserless /content endpoint.
    pub async fn content(&self, request: &ContentRequest) -> Result<String> {
        let parsed = url::Url::parse(request.url())
            .map_err(|e| BrowserlessError::InvalidUrl(format!("{}: {e}", request.url())))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(BrowserlessError::InvalidUrl(format!(
                "only http/https URLs are allowed, got: {}",
                parsed.scheme()
            )));
        }

        let mut endpoint = format!("{}/content", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }

        tracing::debug!(url = request.url(), "Rendering page via Browserless");

        let resp = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&request.body())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BrowserlessError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}
