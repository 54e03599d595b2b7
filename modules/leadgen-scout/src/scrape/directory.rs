use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::Html;
use tracing::{info, warn};
use url::Url;

use browserless_client::ContentRequest;
use leadgen_common::NOT_AVAILABLE;

use super::{first_attr, first_text, selector, PageRenderer};
use crate::sources::{DirectoryRow, DirectorySource};

const SEARCH_URL: &str = "https://www.yellowpages.com/search";
const RESULTS_SELECTOR: &str = ".search-results.organic";
const RESULTS_TIMEOUT: Duration = Duration::from_secs(12);

/// Scrapes the first YellowPages results page for an industry/location.
pub struct YellowPagesScraper {
    renderer: Arc<dyn PageRenderer>,
}

impl YellowPagesScraper {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self { renderer }
    }

    pub fn search_url(industry: &str, location: &str) -> Result<Url> {
        Url::parse_with_params(
            SEARCH_URL,
            &[
                ("search_terms", industry),
                ("geo_location_terms", location),
            ],
        )
        .context("Failed to build YellowPages search URL")
    }
}

#[async_trait]
impl DirectorySource for YellowPagesScraper {
    async fn scrape(&self, industry: &str, location: &str) -> Result<Vec<DirectoryRow>> {
        let url = Self::search_url(industry, location)?;
        let request =
            ContentRequest::new(url.as_str()).wait_for_selector(RESULTS_SELECTOR, RESULTS_TIMEOUT);

        let html = self
            .renderer
            .render(&request)
            .await
            .with_context(|| format!("Failed to render {url}"))?;

        let rows = parse_directory_page(&html, industry)?;
        info!(industry, location, count = rows.len(), "Scraped YellowPages results");
        Ok(rows)
    }

    fn name(&self) -> &str {
        "yellowpages"
    }
}

/// Extract one row per `.v-card` that links to a company website.
/// Cards without a website link are skipped.
pub fn parse_directory_page(html: &str, industry: &str) -> Result<Vec<DirectoryRow>> {
    let card_sel = selector(".v-card")?;
    let website_sel = selector(".links a.track-visit-website")?;
    let name_sel = selector(".business-name span")?;
    let phone_sel = selector(".phones")?;
    let street_sel = selector(".street-address")?;
    let locality_sel = selector(".locality")?;

    let document = Html::parse_document(html);
    let mut rows = Vec::new();

    for card in document.select(&card_sel) {
        let Some(website) = first_attr(&card, &website_sel, "href") else {
            continue;
        };

        let or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let street = or_na(first_text(&card, &street_sel));
        let locality = or_na(first_text(&card, &locality_sel));

        let domain = match Url::parse(&website) {
            Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
            Err(e) => {
                warn!(website = %website, error = %e, "Unparseable website link");
                String::new()
            }
        };

        rows.push(DirectoryRow {
            company: or_na(first_text(&card, &name_sel)),
            contact_phone: or_na(first_text(&card, &phone_sel)),
            location: format!("{street} {locality}").trim().to_string(),
            website,
            domain,
            industry: industry.to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="search-results organic">
          <div class="v-card">
            <a class="business-name" href="/austin-tx/acme"><span>Acme Dental</span></a>
            <div class="phones phone primary">(512) 555-0100</div>
            <div class="street-address">100 Congress Ave</div>
            <div class="locality">Austin, TX 78701</div>
            <div class="links"><a class="track-visit-website" href="https://www.acmedental.test/">Website</a></div>
          </div>
          <div class="v-card">
            <a class="business-name"><span>No Website Co</span></a>
            <div class="phones">(512) 555-0199</div>
          </div>
          <div class="v-card">
            <div class="links"><a class="track-visit-website" href="http://bare.test">Website</a></div>
          </div>
        </div>
    "#;

    #[test]
    fn parses_cards_with_websites_only() {
        let rows = parse_directory_page(PAGE, "Dentists").unwrap();
        assert_eq!(rows.len(), 2);

        let acme = &rows[0];
        assert_eq!(acme.company, "Acme Dental");
        assert_eq!(acme.contact_phone, "(512) 555-0100");
        assert_eq!(acme.location, "100 Congress Ave Austin, TX 78701");
        assert_eq!(acme.website, "https://www.acmedental.test/");
        assert_eq!(acme.domain, "www.acmedental.test");
        assert_eq!(acme.industry, "Dentists");
    }

    #[test]
    fn missing_card_fields_become_sentinels() {
        let rows = parse_directory_page(PAGE, "Dentists").unwrap();
        let bare = &rows[1];
        assert_eq!(bare.company, NOT_AVAILABLE);
        assert_eq!(bare.contact_phone, NOT_AVAILABLE);
        assert_eq!(bare.location, "N/A N/A");
        assert_eq!(bare.domain, "bare.test");
    }

    #[test]
    fn search_url_encodes_query_terms() {
        let url = YellowPagesScraper::search_url("dental clinics", "Austin, TX").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.yellowpages.com/search?search_terms=dental+clinics&geo_location_terms=Austin%2C+TX"
        );
    }
}
