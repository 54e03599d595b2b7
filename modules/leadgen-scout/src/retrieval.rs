// Retrieval orchestration: single structured search, single scrape, and
// hybrid (structured first, scrape on failure).
//
// Each source is attempted at most once per call. Leads keep retrieval
// order; nothing is sorted or deduplicated.

use std::sync::Arc;
use std::time::Duration;

use apollo_client::ApolloError;
use leadgen_common::config::{MAX_FALLBACK_PAGES, MAX_PAGE_SIZE, MAX_SCRAPE_PAGES};
use leadgen_common::{Lead, LeadGenError, SearchResponse};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

use crate::adapters::{apply_directory_phone, directory_record, listing_record, structured_records};
use crate::normalizer::normalize;
use crate::paging::{clamp_pages, PageSchedule};
use crate::scrape::ScrapeSource;
use crate::sources::{DirectorySource, ListingSource, StructuredSource};

pub const APOLLO_NOT_CONFIGURED: &str =
    "Apollo API Key Not Configured. Please Set APOLLO_API_KEY Environment Variable.";
pub const HYBRID_NOTHING_ENABLED: &str =
    "Apollo API Not Configured & Scraping Disabled. Please Set APOLLO_API_KEY or Enable Scraping.";
pub const HYBRID_NOTHING_FOUND: &str = "Both API and Scraping Returned No Leads";

#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    /// Organizations requested from the structured source.
    pub page_size: u32,
    pub max_scrape_pages: u32,
    pub max_fallback_pages: u32,
    /// Pause between consecutive listing pages.
    pub page_delay: Duration,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            max_scrape_pages: MAX_SCRAPE_PAGES,
            max_fallback_pages: MAX_FALLBACK_PAGES,
            page_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridOptions {
    /// Fall back to scraping when the structured source is missing or fails.
    pub use_scraping: bool,
    pub scrape_source: ScrapeSource,
    pub max_pages: u32,
}

impl Default for HybridOptions {
    fn default() -> Self {
        Self {
            use_scraping: false,
            scrape_source: ScrapeSource::YellowPages,
            max_pages: 1,
        }
    }
}

/// Leads collected by a scrape. `error` is set only when the scrape
/// produced no usable page at all.
struct ScrapeOutcome {
    leads: Vec<Lead>,
    error: Option<anyhow::Error>,
}

#[derive(Clone, TypedBuilder)]
pub struct LeadRetriever {
    /// `None` when no structured-source credentials are configured.
    #[builder(default, setter(strip_option))]
    structured: Option<Arc<dyn StructuredSource>>,
    directory: Arc<dyn DirectorySource>,
    listing: Arc<dyn ListingSource>,
    #[builder(default)]
    settings: RetrievalSettings,
}

impl LeadRetriever {
    /// Single structured-source mode.
    pub async fn search_structured(
        &self,
        industry: &str,
        location: &str,
    ) -> Result<SearchResponse, LeadGenError> {
        let leads = self.try_structured(industry, location).await?;
        Ok(SearchResponse::new(leads))
    }

    /// Single scrape-source mode. Fails when the directory render fails or
    /// when every listing page failed.
    pub async fn scrape(
        &self,
        source: ScrapeSource,
        industry: &str,
        location: &str,
        max_pages: u32,
    ) -> Result<SearchResponse, LeadGenError> {
        let pages = clamp_pages(max_pages, self.settings.max_scrape_pages);
        let outcome = self.run_scrape(source, industry, location, pages).await;

        match outcome.error {
            Some(e) => Err(LeadGenError::source_failed(source.to_string(), format!("{e:#}"))),
            None => Ok(SearchResponse::new(outcome.leads)),
        }
    }

    /// Structured source first; on absence or failure, optionally one
    /// scrape source. Fails only when nothing produced any leads.
    pub async fn hybrid(
        &self,
        industry: &str,
        location: &str,
        options: HybridOptions,
    ) -> Result<SearchResponse, LeadGenError> {
        let mut leads = Vec::new();
        let mut structured_ok = false;

        if self.structured.is_some() {
            match self.try_structured(industry, location).await {
                Ok(found) => {
                    leads = found;
                    structured_ok = true;
                }
                Err(e) => warn!(industry, location, error = %e, "Structured search failed"),
            }
        }

        if !structured_ok && options.use_scraping {
            let pages = clamp_pages(options.max_pages, self.settings.max_fallback_pages);
            info!(
                industry,
                location,
                source = %options.scrape_source,
                pages,
                "Falling back to scraping"
            );

            let outcome = self
                .run_scrape(options.scrape_source, industry, location, pages)
                .await;
            leads.extend(outcome.leads);

            if let Some(e) = outcome.error {
                return Err(LeadGenError::NoLeads(format!(
                    "Both API and Scraping Failed: {e:#}"
                )));
            }
        }

        if leads.is_empty() && !structured_ok {
            let message = if options.use_scraping {
                HYBRID_NOTHING_FOUND
            } else {
                HYBRID_NOTHING_ENABLED
            };
            return Err(LeadGenError::NoLeads(message.to_string()));
        }

        Ok(SearchResponse::new(leads))
    }

    async fn try_structured(&self, industry: &str, location: &str) -> Result<Vec<Lead>, LeadGenError> {
        let Some(source) = &self.structured else {
            return Err(LeadGenError::SourceUnavailable(APOLLO_NOT_CONFIGURED.to_string()));
        };

        let response = match source.search(industry, location, self.settings.page_size).await {
            Ok(response) => response,
            Err(ApolloError::NotConfigured) => {
                return Err(LeadGenError::SourceUnavailable(APOLLO_NOT_CONFIGURED.to_string()))
            }
            Err(e) => return Err(LeadGenError::source_failed(source.name(), e)),
        };

        let leads: Vec<Lead> = structured_records(&response).iter().map(normalize).collect();
        info!(
            industry,
            location,
            source = source.name(),
            count = leads.len(),
            "Structured search produced leads"
        );
        Ok(leads)
    }

    async fn run_scrape(
        &self,
        source: ScrapeSource,
        industry: &str,
        location: &str,
        pages: u32,
    ) -> ScrapeOutcome {
        match source {
            ScrapeSource::YellowPages => self.scrape_directory(industry, location).await,
            ScrapeSource::ApolloListing => self.scrape_listing(industry, location, pages).await,
        }
    }

    async fn scrape_directory(&self, industry: &str, location: &str) -> ScrapeOutcome {
        match self.directory.scrape(industry, location).await {
            Ok(rows) => {
                let leads = rows
                    .iter()
                    .map(|row| {
                        let mut lead = normalize(&directory_record(row));
                        apply_directory_phone(&mut lead, row);
                        lead
                    })
                    .collect();
                ScrapeOutcome { leads, error: None }
            }
            Err(e) => {
                warn!(source = self.directory.name(), error = %e, "Directory scrape failed");
                ScrapeOutcome {
                    leads: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// Walks every page; a failed page is logged and skipped. The scrape
    /// only counts as failed when no page succeeded.
    async fn scrape_listing(&self, industry: &str, location: &str, pages: u32) -> ScrapeOutcome {
        let mut schedule = PageSchedule::new(pages, self.settings.page_delay);
        let mut leads = Vec::new();
        let mut pages_ok = 0u32;
        let mut last_error = None;

        while let Some(page) = schedule.next_page().await {
            match self.listing.scrape_page(industry, location, page).await {
                Ok(rows) => {
                    pages_ok += 1;
                    leads.extend(rows.iter().map(|row| normalize(&listing_record(row))));
                }
                Err(e) => {
                    warn!(source = self.listing.name(), page, error = %e, "Listing page failed, skipping");
                    last_error = Some(e.context(format!("page {page}")));
                }
            }
        }

        info!(
            industry,
            location,
            pages,
            pages_ok,
            count = leads.len(),
            "Listing scrape finished"
        );

        let error = if pages_ok == 0 { last_error } else { None };
        ScrapeOutcome { leads, error }
    }
}
