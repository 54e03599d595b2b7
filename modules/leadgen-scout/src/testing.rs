// Test mocks for lead retrieval.
//
// One mock per collaborator seam:
// - MockStructuredSource (StructuredSource): fixed response or fixed error
// - MockDirectoryScraper (DirectorySource): fixed rows or fixed error
// - MockListingScraper (ListingSource): page number → rows, optional failing page
// - StaticRenderer (PageRenderer): canned HTML, records requested URLs
//
// Plus fixture constructors for organizations, people and scraped rows.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use apollo_client::{ApolloError, Organization, Person, PrimaryPhone, SearchResponse};
use browserless_client::ContentRequest;

use crate::retrieval::{LeadRetriever, RetrievalSettings};
use crate::scrape::PageRenderer;
use crate::sources::{DirectoryRow, DirectorySource, ListingRow, ListingSource, StructuredSource};

// ---------------------------------------------------------------------------
// MockStructuredSource
// ---------------------------------------------------------------------------

enum StructuredBehavior {
    Respond(SearchResponse),
    Fail { status: u16, message: String },
    NotConfigured,
}

pub struct MockStructuredSource {
    behavior: StructuredBehavior,
    calls: AtomicUsize,
}

impl MockStructuredSource {
    pub fn returning(response: SearchResponse) -> Self {
        Self::with(StructuredBehavior::Respond(response))
    }

    /// Fails like an HTTP error from the API.
    pub fn failing(status: u16, message: &str) -> Self {
        Self::with(StructuredBehavior::Fail {
            status,
            message: message.to_string(),
        })
    }

    pub fn not_configured() -> Self {
        Self::with(StructuredBehavior::NotConfigured)
    }

    fn with(behavior: StructuredBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StructuredSource for MockStructuredSource {
    async fn search(
        &self,
        _industry: &str,
        _location: &str,
        _page_size: u32,
    ) -> std::result::Result<SearchResponse, ApolloError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StructuredBehavior::Respond(response) => Ok(response.clone()),
            StructuredBehavior::Fail { status, message } => Err(ApolloError::Api {
                status: *status,
                message: message.clone(),
            }),
            StructuredBehavior::NotConfigured => Err(ApolloError::NotConfigured),
        }
    }

    fn name(&self) -> &str {
        "mock-structured"
    }
}

// ---------------------------------------------------------------------------
// MockDirectoryScraper
// ---------------------------------------------------------------------------

pub struct MockDirectoryScraper {
    result: std::result::Result<Vec<DirectoryRow>, String>,
    calls: AtomicUsize,
}

impl MockDirectoryScraper {
    pub fn returning(rows: Vec<DirectoryRow>) -> Self {
        Self {
            result: Ok(rows),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectorySource for MockDirectoryScraper {
    async fn scrape(&self, _industry: &str, _location: &str) -> Result<Vec<DirectoryRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(|m| anyhow!(m))
    }

    fn name(&self) -> &str {
        "mock-directory"
    }
}

// ---------------------------------------------------------------------------
// MockListingScraper
// ---------------------------------------------------------------------------

/// Page-keyed listing scraper. Unregistered pages return no rows.
/// Builder pattern: `.on_page()`, `.fail_on()`.
#[derive(Default)]
pub struct MockListingScraper {
    pages: HashMap<u32, Vec<ListingRow>>,
    failures: HashMap<u32, String>,
    requested: Mutex<Vec<u32>>,
}

impl MockListingScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(mut self, page: u32, rows: Vec<ListingRow>) -> Self {
        self.pages.insert(page, rows);
        self
    }

    pub fn fail_on(mut self, page: u32, message: &str) -> Self {
        self.failures.insert(page, message.to_string());
        self
    }

    /// Pages requested so far, in call order.
    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ListingSource for MockListingScraper {
    async fn scrape_page(
        &self,
        _industry: &str,
        _location: &str,
        page: u32,
    ) -> Result<Vec<ListingRow>> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(page);
        }
        if let Some(message) = self.failures.get(&page) {
            return Err(anyhow!("{message}"));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock-listing"
    }
}

// ---------------------------------------------------------------------------
// StaticRenderer
// ---------------------------------------------------------------------------

/// Returns the same HTML for every request, or fails every request.
pub struct StaticRenderer {
    html: Option<String>,
    urls: Mutex<Vec<String>>,
}

impl StaticRenderer {
    pub fn new(html: &str) -> Self {
        Self {
            html: Some(html.to_string()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            html: None,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageRenderer for StaticRenderer {
    async fn render(&self, request: &ContentRequest) -> Result<String> {
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(request.url().to_string());
        }
        self.html
            .clone()
            .ok_or_else(|| anyhow!("StaticRenderer: render failed for {}", request.url()))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn organization(id: &str, name: &str, employees: u64) -> Organization {
    Organization {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        industry: Some("Information Technology".to_string()),
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
        website_url: Some(format!("https://{}.test", name.to_lowercase())),
        linkedin_url: None,
        estimated_num_employees: Some(employees),
        primary_phone: None,
    }
}

pub fn with_phone(org: Organization, number: &str) -> Organization {
    Organization {
        primary_phone: Some(PrimaryPhone {
            number: Some(number.to_string()),
        }),
        ..org
    }
}

pub fn person(org_id: &str, name: &str, email: &str) -> Person {
    Person {
        id: None,
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        title: Some("CEO".to_string()),
        organization_id: Some(org_id.to_string()),
    }
}

pub fn directory_row(company: &str, phone: &str) -> DirectoryRow {
    DirectoryRow {
        company: company.to_string(),
        contact_phone: phone.to_string(),
        location: "100 Main St Austin, TX 78701".to_string(),
        website: format!("https://{}.test", company.to_lowercase().replace(' ', "")),
        domain: format!("{}.test", company.to_lowercase().replace(' ', "")),
        industry: "Dentists".to_string(),
    }
}

pub fn listing_row(company: &str) -> ListingRow {
    ListingRow {
        company: company.to_string(),
        industry: "Software".to_string(),
        location: "Denver, CO".to_string(),
        website: "N/A".to_string(),
        linkedin_url: "N/A".to_string(),
    }
}

/// Settings with no inter-page delay.
pub fn instant_settings() -> RetrievalSettings {
    RetrievalSettings {
        page_delay: Duration::ZERO,
        ..RetrievalSettings::default()
    }
}

/// A retriever over the given mocks with zero page delay.
pub fn retriever(
    structured: Option<Arc<dyn StructuredSource>>,
    directory: Arc<dyn DirectorySource>,
    listing: Arc<dyn ListingSource>,
) -> LeadRetriever {
    match structured {
        Some(structured) => LeadRetriever::builder()
            .structured(structured)
            .directory(directory)
            .listing(listing)
            .settings(instant_settings())
            .build(),
        None => LeadRetriever::builder()
            .directory(directory)
            .listing(listing)
            .settings(instant_settings())
            .build(),
    }
}
