//! Orchestrator chain tests: MOCK sources → LeadRetriever → SearchResponse.
//!
//! No network. Every collaborator is a mock from `leadgen_scout::testing`.

use std::sync::Arc;
use std::time::Duration;

use apollo_client::SearchResponse as ApolloResponse;
use leadgen_common::{LeadGenError, Priority, CONTACT_NOT_AVAILABLE};
use leadgen_scout::retrieval::{HYBRID_NOTHING_ENABLED, HYBRID_NOTHING_FOUND};
use leadgen_scout::scrape::{ApolloListingScraper, YellowPagesScraper};
use leadgen_scout::testing::*;
use leadgen_scout::{HybridOptions, LeadRetriever, RetrievalSettings, ScrapeSource};

fn apollo_page() -> ApolloResponse {
    ApolloResponse {
        organizations: vec![
            with_phone(organization("o1", "Acme", 250), "555-0100"),
            organization("o2", "Globex", 75),
            organization("o3", "Initech", 10),
        ],
        people: vec![
            person("o2", "Hank Scorpio", "hank@globex.test"),
            person("o2", "Frank Grimes", "frank@globex.test"),
        ],
    }
}

fn fallback(use_scraping: bool, source: ScrapeSource, max_pages: u32) -> HybridOptions {
    HybridOptions {
        use_scraping,
        scrape_source: source,
        max_pages,
    }
}

// ---------------------------------------------------------------------------
// Single structured mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn structured_search_normalizes_in_source_order() {
    let retriever = retriever(
        Some(Arc::new(MockStructuredSource::returning(apollo_page()))),
        Arc::new(MockDirectoryScraper::returning(vec![])),
        Arc::new(MockListingScraper::new()),
    );

    let response = retriever.search_structured("software", "Austin, TX").await.unwrap();

    assert_eq!(response.total, 3);
    let companies: Vec<&str> = response.leads.iter().map(|l| l.company.as_str()).collect();
    assert_eq!(companies, vec!["Acme", "Globex", "Initech"]);

    assert_eq!(response.leads[0].contact, "555-0100");
    assert_eq!(response.leads[0].priority, Priority::High);
    assert_eq!(response.leads[1].contact, "Hank Scorpio (hank@globex.test)");
    assert_eq!(response.leads[1].priority, Priority::Medium);
    assert_eq!(response.leads[2].contact, CONTACT_NOT_AVAILABLE);
    assert_eq!(response.leads[2].outreach_angle, "Digital transformation solutions");
}

#[tokio::test]
async fn structured_search_without_source_is_unavailable() {
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![])),
        Arc::new(MockListingScraper::new()),
    );

    let err = retriever.search_structured("software", "Austin").await.unwrap_err();
    assert!(matches!(err, LeadGenError::SourceUnavailable(_)));
}

#[tokio::test]
async fn structured_search_failure_carries_cause() {
    let retriever = retriever(
        Some(Arc::new(MockStructuredSource::failing(422, "bad location"))),
        Arc::new(MockDirectoryScraper::returning(vec![])),
        Arc::new(MockListingScraper::new()),
    );

    match retriever.search_structured("software", "Nowhere").await {
        Err(LeadGenError::SourceFailed { message, .. }) => {
            assert!(message.contains("422"), "got {message}");
            assert!(message.contains("bad location"), "got {message}");
        }
        other => panic!("expected SourceFailed, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Single scrape mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn directory_scrape_applies_phone_override() {
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![
            directory_row("Smile Dental", "(512) 555-0100"),
            directory_row("Quiet Dental", "N/A"),
        ])),
        Arc::new(MockListingScraper::new()),
    );

    let response = retriever
        .scrape(ScrapeSource::YellowPages, "Dentists", "Austin, TX", 1)
        .await
        .unwrap();

    assert_eq!(response.total, 2);
    assert_eq!(response.leads[0].contact, "Phone: (512) 555-0100");
    assert_eq!(response.leads[1].contact, CONTACT_NOT_AVAILABLE);
    assert_eq!(response.leads[0].employees, "Unknown");
    assert_eq!(response.leads[0].priority, Priority::Low);
}

#[tokio::test]
async fn listing_scrape_walks_pages_in_order_and_clamps() {
    let listing = Arc::new(
        MockListingScraper::new()
            .on_page(1, vec![listing_row("Alpha"), listing_row("Beta")])
            .on_page(2, vec![listing_row("Gamma")]),
    );
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![])),
        listing.clone(),
    );

    let response = retriever
        .scrape(ScrapeSource::ApolloListing, "Software", "Denver, CO", 99)
        .await
        .unwrap();

    assert_eq!(listing.requested(), vec![1, 2, 3, 4, 5]);
    let companies: Vec<&str> = response.leads.iter().map(|l| l.company.as_str()).collect();
    assert_eq!(companies, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn listing_scrape_skips_failed_page_and_keeps_the_rest() {
    let listing = Arc::new(
        MockListingScraper::new()
            .on_page(1, vec![listing_row("Alpha")])
            .fail_on(2, "selector timeout")
            .on_page(3, vec![listing_row("Gamma")]),
    );
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![])),
        listing.clone(),
    );

    let response = retriever
        .scrape(ScrapeSource::ApolloListing, "Software", "Denver", 3)
        .await
        .unwrap();

    assert_eq!(listing.requested(), vec![1, 2, 3]);
    let companies: Vec<&str> = response.leads.iter().map(|l| l.company.as_str()).collect();
    assert_eq!(companies, vec!["Alpha", "Gamma"]);
}

#[tokio::test]
async fn listing_scrape_with_every_page_failing_fails_single_mode() {
    let listing = Arc::new(
        MockListingScraper::new()
            .fail_on(1, "selector timeout")
            .fail_on(2, "blocked"),
    );
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![])),
        listing.clone(),
    );

    let err = retriever
        .scrape(ScrapeSource::ApolloListing, "Software", "Denver", 2)
        .await
        .unwrap_err();

    assert!(matches!(err, LeadGenError::SourceFailed { .. }));
    assert!(err.to_string().contains("blocked"));
    assert_eq!(listing.requested(), vec![1, 2]);
}

// ---------------------------------------------------------------------------
// Hybrid mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hybrid_falls_back_to_scrape_when_structured_raises() {
    let structured = Arc::new(MockStructuredSource::failing(500, "upstream down"));
    let retriever = retriever(
        Some(structured.clone()),
        Arc::new(MockDirectoryScraper::returning(vec![
            directory_row("One", "111"),
            directory_row("Two", "222"),
            directory_row("Three", "333"),
        ])),
        Arc::new(MockListingScraper::new()),
    );

    let response = retriever
        .hybrid(
            "Dentists",
            "Austin, TX",
            fallback(true, ScrapeSource::YellowPages, 1),
        )
        .await
        .unwrap();

    assert_eq!(response.total, 3);
    assert_eq!(structured.calls(), 1);
    assert_eq!(response.leads[2].contact, "Phone: 333");
}

#[tokio::test]
async fn hybrid_without_fallback_raises_aggregate_failure() {
    let directory = Arc::new(MockDirectoryScraper::returning(vec![directory_row("One", "111")]));
    let retriever = retriever(
        Some(Arc::new(MockStructuredSource::failing(500, "upstream down"))),
        directory.clone(),
        Arc::new(MockListingScraper::new()),
    );

    let err = retriever
        .hybrid("Dentists", "Austin", HybridOptions::default())
        .await
        .unwrap_err();

    match err {
        LeadGenError::NoLeads(message) => assert_eq!(message, HYBRID_NOTHING_ENABLED),
        other => panic!("expected NoLeads, got {other:?}"),
    }
    assert_eq!(directory.calls(), 0);
}

#[tokio::test]
async fn hybrid_prefers_structured_and_skips_scraping() {
    let directory = Arc::new(MockDirectoryScraper::returning(vec![directory_row("One", "111")]));
    let retriever = retriever(
        Some(Arc::new(MockStructuredSource::returning(apollo_page()))),
        directory.clone(),
        Arc::new(MockListingScraper::new()),
    );

    let response = retriever
        .hybrid("software", "Austin", fallback(true, ScrapeSource::YellowPages, 1))
        .await
        .unwrap();

    assert_eq!(response.total, 3);
    assert_eq!(directory.calls(), 0);
}

#[tokio::test]
async fn hybrid_empty_structured_result_is_still_success() {
    let retriever = retriever(
        Some(Arc::new(MockStructuredSource::returning(ApolloResponse::default()))),
        Arc::new(MockDirectoryScraper::returning(vec![])),
        Arc::new(MockListingScraper::new()),
    );

    let response = retriever
        .hybrid("software", "Austin", HybridOptions::default())
        .await
        .unwrap();
    assert_eq!(response.total, 0);
}

#[tokio::test]
async fn hybrid_unconfigured_structured_source_uses_fallback() {
    let retriever = retriever(
        Some(Arc::new(MockStructuredSource::not_configured())),
        Arc::new(MockDirectoryScraper::returning(vec![directory_row("One", "111")])),
        Arc::new(MockListingScraper::new()),
    );

    let response = retriever
        .hybrid("Dentists", "Austin", fallback(true, ScrapeSource::YellowPages, 1))
        .await
        .unwrap();
    assert_eq!(response.total, 1);
}

#[tokio::test]
async fn hybrid_keeps_listing_results_around_a_failed_page() {
    let listing = Arc::new(
        MockListingScraper::new()
            .on_page(1, vec![listing_row("Alpha"), listing_row("Beta")])
            .fail_on(2, "blocked"),
    );
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![])),
        listing.clone(),
    );

    let response = retriever
        .hybrid("Software", "Denver", fallback(true, ScrapeSource::ApolloListing, 3))
        .await
        .unwrap();

    assert_eq!(response.total, 2);
    assert_eq!(listing.requested(), vec![1, 2, 3]);
}

#[tokio::test]
async fn hybrid_fallback_pages_are_clamped_to_three() {
    let listing = Arc::new(MockListingScraper::new().on_page(1, vec![listing_row("Alpha")]));
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![])),
        listing.clone(),
    );

    retriever
        .hybrid("Software", "Denver", fallback(true, ScrapeSource::ApolloListing, 10))
        .await
        .unwrap();

    assert_eq!(listing.requested(), vec![1, 2, 3]);
}

#[tokio::test]
async fn hybrid_both_failing_reports_scrape_cause() {
    let retriever = retriever(
        Some(Arc::new(MockStructuredSource::failing(500, "upstream down"))),
        Arc::new(MockDirectoryScraper::failing("render timeout")),
        Arc::new(MockListingScraper::new()),
    );

    let err = retriever
        .hybrid("Dentists", "Austin", fallback(true, ScrapeSource::YellowPages, 1))
        .await
        .unwrap_err();

    match err {
        LeadGenError::NoLeads(message) => {
            assert!(message.starts_with("Both API and Scraping Failed:"), "got {message}");
            assert!(message.contains("render timeout"), "got {message}");
        }
        other => panic!("expected NoLeads, got {other:?}"),
    }
}

#[tokio::test]
async fn hybrid_fallback_with_no_rows_reports_nothing_found() {
    let retriever = retriever(
        None,
        Arc::new(MockDirectoryScraper::returning(vec![])),
        Arc::new(MockListingScraper::new()),
    );

    let err = retriever
        .hybrid("Dentists", "Austin", fallback(true, ScrapeSource::YellowPages, 1))
        .await
        .unwrap_err();

    match err {
        LeadGenError::NoLeads(message) => assert_eq!(message, HYBRID_NOTHING_FOUND),
        other => panic!("expected NoLeads, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Real scrapers over canned HTML
// ---------------------------------------------------------------------------

const YELLOWPAGES_HTML: &str = r#"
    <div class="search-results organic">
      <div class="v-card">
        <a class="business-name"><span>Bright Smiles</span></a>
        <div class="phones">(512) 555-0142</div>
        <div class="street-address">200 Lamar Blvd</div>
        <div class="locality">Austin, TX</div>
        <div class="links"><a class="track-visit-website" href="https://brightsmiles.test">Website</a></div>
      </div>
    </div>
"#;

#[tokio::test]
async fn yellowpages_scraper_feeds_the_orchestrator() {
    let renderer = Arc::new(StaticRenderer::new(YELLOWPAGES_HTML));
    let retriever = LeadRetriever::builder()
        .directory(Arc::new(YellowPagesScraper::new(renderer.clone())))
        .listing(Arc::new(ApolloListingScraper::new(renderer.clone())))
        .settings(instant_settings())
        .build();

    let response = retriever
        .scrape(ScrapeSource::YellowPages, "Dentists", "Austin, TX", 1)
        .await
        .unwrap();

    assert_eq!(response.total, 1);
    let lead = &response.leads[0];
    assert_eq!(lead.company, "Bright Smiles");
    assert_eq!(lead.contact, "Phone: (512) 555-0142");
    assert_eq!(lead.location, "200 Lamar Blvd Austin, TX");
    assert_eq!(lead.website.as_deref(), Some("https://brightsmiles.test"));
    assert_eq!(renderer.urls().len(), 1);
    assert!(renderer.urls()[0].starts_with("https://www.yellowpages.com/search?"));
}

#[tokio::test]
async fn render_failure_fails_directory_scrape() {
    let renderer = Arc::new(StaticRenderer::failing());
    let retriever = LeadRetriever::builder()
        .directory(Arc::new(YellowPagesScraper::new(renderer.clone())))
        .listing(Arc::new(ApolloListingScraper::new(renderer)))
        .settings(instant_settings())
        .build();

    let err = retriever
        .scrape(ScrapeSource::YellowPages, "Dentists", "Austin", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, LeadGenError::SourceFailed { .. }));
}

#[tokio::test(start_paused = true)]
async fn listing_pages_are_paced_by_configured_delay() {
    let listing = Arc::new(MockListingScraper::new());
    let retriever = LeadRetriever::builder()
        .directory(Arc::new(MockDirectoryScraper::returning(vec![])))
        .listing(listing.clone())
        .settings(RetrievalSettings {
            page_delay: Duration::from_millis(500),
            ..RetrievalSettings::default()
        })
        .build();

    let start = tokio::time::Instant::now();
    retriever
        .scrape(ScrapeSource::ApolloListing, "Software", "Denver", 3)
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::from_millis(1000));
    assert_eq!(listing.requested(), vec![1, 2, 3]);
}
