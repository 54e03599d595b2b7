pub mod error;
pub mod types;

pub use error::{ApolloError, Result};
pub use types::{Organization, OrganizationSearch, Person, PrimaryPhone, SearchResponse};

use std::time::Duration;

const BASE_URL: &str = "https://api.apollo.io/v1";

pub struct ApolloClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ApolloClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Run a single organization search page.
    pub async fn search_organizations(&self, search: &OrganizationSearch) -> Result<SearchResponse> {
        if self.api_key.is_empty() {
            return Err(ApolloError::NotConfigured);
        }

        let url = format!("{}/organizations/search", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Cache-Control", "no-cache")
            .header("Content-Type", "application/json")
            .header("X-Api-Key", &self.api_key)
            .json(search)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApolloError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let response: SearchResponse = serde_json::from_str(&body)?;
        Ok(response)
    }

    /// Search companies by industry keyword and location.
    pub async fn search_companies(
        &self,
        industry: &str,
        location: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse> {
        tracing::info!(industry, location, page, per_page, "Searching Apollo organizations");

        let search = OrganizationSearch::new(industry, location, page, per_page);
        let response = self.search_organizations(&search).await?;

        tracing::info!(
            organizations = response.organizations.len(),
            people = response.people.len(),
            "Apollo search completed"
        );
        Ok(response)
    }
}
