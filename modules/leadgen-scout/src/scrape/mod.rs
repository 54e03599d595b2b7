pub mod directory;
pub mod listing;

pub use directory::{parse_directory_page, YellowPagesScraper};
pub use listing::{parse_listing_page, ApolloListingScraper};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Selector};

use browserless_client::{BrowserlessClient, ContentRequest};

/// Turns a URL into rendered HTML.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, request: &ContentRequest) -> Result<String>;
}

#[async_trait]
impl PageRenderer for BrowserlessClient {
    async fn render(&self, request: &ContentRequest) -> Result<String> {
        Ok(self.content(request).await?)
    }
}

/// Which scraper the hybrid fallback (or a single scrape) should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrapeSource {
    #[default]
    YellowPages,
    ApolloListing,
}

impl ScrapeSource {
    /// `"apollo"` (any case) selects the listing scraper; everything else
    /// falls back to the directory.
    pub fn from_query(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("apollo") {
            ScrapeSource::ApolloListing
        } else {
            ScrapeSource::YellowPages
        }
    }
}

impl std::fmt::Display for ScrapeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeSource::YellowPages => write!(f, "yellowpages"),
            ScrapeSource::ApolloListing => write!(f, "apollo"),
        }
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e:?}"))
}

/// Whitespace-collapsed text of the first match under `scope`.
pub(crate) fn first_text(scope: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(|el| {
        el.text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    })
    .filter(|text| !text.is_empty())
}

pub(crate) fn first_attr(scope: &ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .find_map(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_source_from_query() {
        assert_eq!(ScrapeSource::from_query("Apollo"), ScrapeSource::ApolloListing);
        assert_eq!(ScrapeSource::from_query("yellowpages"), ScrapeSource::YellowPages);
        assert_eq!(ScrapeSource::from_query("bing"), ScrapeSource::YellowPages);
    }

    #[test]
    fn first_text_collapses_whitespace() {
        let html = scraper::Html::parse_fragment("<div><p>  Acme \n  Corp </p></div>");
        let root = html.root_element();
        let p = selector("p").unwrap();
        assert_eq!(first_text(&root, &p).as_deref(), Some("Acme Corp"));
        assert!(first_text(&root, &selector("span").unwrap()).is_none());
    }
}
