// tests/providers_fixtures.rs
mod common;

use common::query;
use job_scout::ingest::providers::{IndeedProvider, LinkedInProvider};
use job_scout::{JobSource, ListingSource, Scorer};

const INDEED_HTML: &str = include_str!("fixtures/indeed_search.html");
const LINKEDIN_HTML: &str = include_str!("fixtures/linkedin_search.html");

#[tokio::test]
async fn indeed_fixture_yields_complete_cards_only() {
    let provider = IndeedProvider::from_fixture_str(INDEED_HTML);
    let items = provider
        .search(&query("Engineering Manager"))
        .await
        .expect("indeed parse ok");

    assert_eq!(items.len(), 2, "card without company should be skipped");

    let first = &items[0];
    assert_eq!(first.source, JobSource::Indeed);
    assert_eq!(first.title, "Engineering Manager, Platform");
    assert_eq!(first.company, "Brightpath Learning");
    assert_eq!(first.location, "Remote");
    assert_eq!(first.identifier, "indeed_a1b2c3d4e5");
    assert_eq!(first.url, "https://www.indeed.com/viewjob?jk=a1b2c3d4e5");
    assert!(first.description.starts_with("Lead a team of 8 engineers"));
    assert!(first.description.contains("EdTech roadmap"));
    assert_eq!(first.match_score, 0, "providers do not score");

    let second = &items[1];
    assert_eq!(second.company, "Orbital Health & Co");
    assert_eq!(second.location, "Winter Springs, FL", "falls back to searched location");
    assert_eq!(second.identifier, "indeed_f6g7h8");
}

#[tokio::test]
async fn linkedin_fixture_extracts_ids_from_links() {
    let provider = LinkedInProvider::from_fixture_str(LINKEDIN_HTML);
    let items = provider
        .search(&query("Engineering Manager"))
        .await
        .expect("linkedin parse ok");

    assert_eq!(items.len(), 2, "card without link should be skipped");

    assert_eq!(items[0].title, "Senior Engineering Manager");
    assert_eq!(items[0].company, "Northwind");
    assert_eq!(items[0].location, "Orlando, FL");
    assert_eq!(items[0].identifier, "linkedin_3812345678");
    assert!(items[0].url.contains("refId=abc&trackingId=def"));
    assert!(items[0].description.is_empty());

    assert_eq!(items[1].identifier, "linkedin_3899990001");
    assert_eq!(items[1].location, "Winter Springs, FL");
}

#[tokio::test]
async fn result_count_is_limited_per_call() {
    let provider = IndeedProvider::from_fixture_str(INDEED_HTML).with_max_results(1);
    let items = provider.search(&query("Engineering Manager")).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn page_without_cards_is_empty_not_error() {
    let provider = LinkedInProvider::from_fixture_str("<html><body>blocked</body></html>");
    let items = provider.search(&query("Engineering Manager")).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn escaped_markup_in_listing_text_survives_to_scoring() {
    let html = r#"<html><body>
      <div class="job_seen_beacon">
        <h2 class="jobTitle"><a data-jk="esc01" href="/rc/clk?jk=esc01">Engineering Lead &lt;React&gt; Platform</a></h2>
        <span data-testid="company-name">AT&amp;amp;T Labs</span>
        <div data-testid="text-location">Remote</div>
        <div class="job-snippet">Stack: &lt;TypeScript&gt; and Node.js; pay 5 &lt; x, AT&amp;amp;T</div>
      </div>
    </body></html>"#;
    let provider = IndeedProvider::from_fixture_str(html);
    let items = provider.search(&query("Engineering Lead")).await.unwrap();

    assert_eq!(items.len(), 1);
    let p = &items[0];
    assert_eq!(p.title, "Engineering Lead <React> Platform");
    assert_eq!(p.company, "AT&amp;T Labs");
    assert_eq!(p.description, "Stack: <TypeScript> and Node.js; pay 5 < x, AT&amp;T");

    // React + TypeScript + Node.js (10 each) + "lead" (3).
    let score = Scorer::default().score(&p.title, &p.description);
    assert_eq!(score, 33);
}
