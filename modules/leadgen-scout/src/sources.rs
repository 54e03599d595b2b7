// Collaborator seams for the orchestrator. Production impls wrap the
// Apollo client and the Browserless-backed scrapers; tests use the mocks
// in `testing`.

use anyhow::Result;
use async_trait::async_trait;

use apollo_client::{ApolloClient, ApolloError, SearchResponse};

/// A row scraped from a business directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryRow {
    pub company: String,
    pub contact_phone: String,
    pub location: String,
    pub website: String,
    pub domain: String,
    pub industry: String,
}

/// A row scraped from a public company listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub company: String,
    pub industry: String,
    pub location: String,
    pub website: String,
    pub linkedin_url: String,
}

#[async_trait]
pub trait StructuredSource: Send + Sync {
    /// Fetch the first page of organizations (and their people).
    async fn search(
        &self,
        industry: &str,
        location: &str,
        page_size: u32,
    ) -> std::result::Result<SearchResponse, ApolloError>;

    fn name(&self) -> &str;
}

#[async_trait]
impl StructuredSource for ApolloClient {
    async fn search(
        &self,
        industry: &str,
        location: &str,
        page_size: u32,
    ) -> std::result::Result<SearchResponse, ApolloError> {
        self.search_companies(industry, location, 1, page_size).await
    }

    fn name(&self) -> &str {
        "apollo"
    }
}

#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Scrape one results page. Errors abort the whole scrape.
    async fn scrape(&self, industry: &str, location: &str) -> Result<Vec<DirectoryRow>>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Scrape a single 1-based page. Unparseable cards are skipped, not fatal.
    async fn scrape_page(&self, industry: &str, location: &str, page: u32)
        -> Result<Vec<ListingRow>>;

    fn name(&self) -> &str;
}
