use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, info};
use url::Url;

use browserless_client::ContentRequest;
use leadgen_common::{NOT_AVAILABLE, UNKNOWN_COMPANY, USER_AGENT};

use super::{first_attr, first_text, selector, PageRenderer};
use crate::sources::{ListingRow, ListingSource};

const SEARCH_URL: &str = "https://app.apollo.io/companies/search";
const CARD_SELECTOR: &str = r#"[data-testid="company-card"], .company-item"#;
const CARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Scrapes Apollo's public company listing, one page per call.
pub struct ApolloListingScraper {
    renderer: Arc<dyn PageRenderer>,
}

impl ApolloListingScraper {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self { renderer }
    }

    pub fn page_url(industry: &str, location: &str, page: u32) -> Result<Url> {
        let page = page.to_string();
        Url::parse_with_params(
            SEARCH_URL,
            &[
                ("q", industry),
                ("location", location),
                ("page", page.as_str()),
            ],
        )
        .context("Failed to build Apollo listing URL")
    }
}

#[async_trait]
impl ListingSource for ApolloListingScraper {
    async fn scrape_page(
        &self,
        industry: &str,
        location: &str,
        page: u32,
    ) -> Result<Vec<ListingRow>> {
        let url = Self::page_url(industry, location, page)?;
        let request = ContentRequest::new(url.as_str())
            .wait_for_selector(CARD_SELECTOR, CARD_TIMEOUT)
            .user_agent(USER_AGENT);

        let html = self
            .renderer
            .render(&request)
            .await
            .with_context(|| format!("Failed to render Apollo listing page {page}"))?;

        let rows = parse_listing_page(&html, industry)?;
        info!(industry, location, page, count = rows.len(), "Scraped Apollo listing page");
        Ok(rows)
    }

    fn name(&self) -> &str {
        "apollo-listing"
    }
}

pub fn parse_listing_page(html: &str, industry: &str) -> Result<Vec<ListingRow>> {
    let card_sel = selector(CARD_SELECTOR)?;
    let name_sel = selector(r#"h3, h4, .company-name, [data-testid="company-name"]"#)?;
    let industry_sel = selector(r#".industry, [data-testid="industry"]"#)?;
    let location_sel = selector(r#".location, [data-testid="location"]"#)?;
    let website_sel = selector(r#"a[href*="http"], .website-link"#)?;
    let linkedin_sel = selector(r#"a[href*="linkedin.com"]"#)?;

    let document = Html::parse_document(html);
    let mut rows = Vec::new();

    for card in document.select(&card_sel) {
        if card.text().all(|t| t.trim().is_empty()) {
            debug!("Skipping empty company card");
            continue;
        }

        rows.push(ListingRow {
            company: first_text(&card, &name_sel).unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            industry: first_text(&card, &industry_sel).unwrap_or_else(|| industry.to_string()),
            location: first_text(&card, &location_sel).unwrap_or_else(|| "Unknown".to_string()),
            website: first_attr(&card, &website_sel, "href")
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            linkedin_url: first_attr(&card, &linkedin_sel, "href")
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        });
    }

    Ok(rows)
}
