use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use gleaner_web::engines::duckduckgo;
use gleaner_web::{SearchHarvester, WebConfig, WebError};

use crate::helpers::{page_with_description, page_with_paragraph, results_page, MockTransport};

const SEARCH_ENDPOINT: &str = "https://search.test/html/";

fn config(keep_count: usize) -> WebConfig {
    WebConfig {
        search_endpoint: SEARCH_ENDPOINT.to_owned(),
        keep_count,
        ..Default::default()
    }
}

fn search(query: &str) -> String {
    duckduckgo::search_url(SEARCH_ENDPOINT, query).expect("search url")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

#[tokio::test]
async fn early_exit_keeps_first_completions_in_completion_order() {
    let links = [
        "https://first.acme.edu/",
        "https://second.acme.edu/",
        "https://third.acme.edu/",
    ];
    let transport = MockTransport::new()
        .route(&search("acme"), 200, &results_page(&links))
        .route_delayed(
            links[0],
            200,
            &page_with_paragraph("first"),
            Duration::from_millis(600),
        )
        .route_delayed(
            links[1],
            200,
            &page_with_paragraph("second"),
            Duration::from_millis(50),
        )
        .route_delayed(
            links[2],
            200,
            &page_with_paragraph("third"),
            Duration::from_millis(150),
        );
    let harvester = SearchHarvester::new(Arc::new(transport), config(2));

    let started = Instant::now();
    let text = harvester.harvest_at("acme", today()).await.expect("harvest");

    assert_eq!(text, "second\nthird");
    assert!(
        started.elapsed() < Duration::from_millis(500),
        "harvester waited {:?} for a fetch past the quota",
        started.elapsed()
    );
}

#[tokio::test]
async fn stale_pages_are_dropped_and_undated_pages_kept() {
    let links = [
        "https://old.acme.edu/",
        "https://recent.acme.edu/",
        "https://undated.acme.edu/",
    ];
    let transport = MockTransport::new()
        .route(&search("acme"), 200, &results_page(&links))
        .route(
            links[0],
            200,
            "<html><body><p>Old news</p><span>Posted 2001-01-01</span></body></html>",
        )
        .route_delayed(
            links[1],
            200,
            "<html><body><p>Recent news</p><span>Posted 2025-05-01</span></body></html>",
            Duration::from_millis(20),
        )
        .route_delayed(
            links[2],
            200,
            &page_with_description("Timeless"),
            Duration::from_millis(120),
        );
    let harvester = SearchHarvester::new(Arc::new(transport), config(8));

    let text = harvester.harvest_at("acme", today()).await.expect("harvest");

    assert_eq!(text, "Recent news\nTimeless");
}

#[tokio::test]
async fn date_exactly_at_window_edge_is_kept() {
    let link = "https://edge.acme.edu/";
    let transport = MockTransport::new()
        .route(&search("acme"), 200, &results_page(&[link]))
        .route(
            link,
            200,
            "<html><body><p>Edge</p>2024-06-01</body></html>",
        );
    let harvester = SearchHarvester::new(Arc::new(transport), config(8));

    let text = harvester.harvest_at("acme", today()).await.expect("harvest");

    assert_eq!(text, "Edge");
}

#[tokio::test]
async fn hosts_outside_allowlist_are_never_fetched() {
    let links = ["https://acme.io/", "https://www.acme.org/"];
    let transport = Arc::new(
        MockTransport::new()
            .route(&search("acme"), 200, &results_page(&links))
            .route(links[0], 200, &page_with_paragraph("filtered"))
            .route(links[1], 200, &page_with_paragraph("kept")),
    );
    let harvester = SearchHarvester::new(transport.clone(), config(8));

    let text = harvester.harvest_at("acme", today()).await.expect("harvest");

    assert_eq!(text, "kept");
    assert_eq!(transport.get_count(links[0]), 0);
}

#[tokio::test]
async fn failing_candidates_are_skipped() {
    let links = [
        "https://gone.acme.edu/",
        "https://down.acme.edu/",
        "https://empty.acme.edu/",
        "https://ok.acme.edu/",
    ];
    let transport = MockTransport::new()
        .route(&search("acme"), 200, &results_page(&links))
        .route(links[0], 404, &page_with_paragraph("not found page"))
        .route(links[2], 200, "<html><body></body></html>")
        .route_delayed(
            links[3],
            200,
            &page_with_paragraph("ok"),
            Duration::from_millis(20),
        );
    let harvester = SearchHarvester::new(Arc::new(transport), config(8));

    let text = harvester.harvest_at("acme", today()).await.expect("harvest");

    assert_eq!(text, "ok");
}

#[tokio::test]
async fn no_qualifying_results_is_empty() {
    let transport = MockTransport::new().route(&search("acme"), 200, &results_page(&[]));
    let harvester = SearchHarvester::new(Arc::new(transport), config(8));

    let text = harvester.harvest_at("acme", today()).await.expect("harvest");

    assert_eq!(text, "");
}

#[tokio::test]
async fn results_page_error_status_is_reported() {
    let transport = MockTransport::new().route(&search("acme"), 503, "");
    let harvester = SearchHarvester::new(Arc::new(transport), config(8));

    let err = harvester.harvest_at("acme", today()).await.unwrap_err();

    assert!(matches!(err, WebError::Status(503)));
}

#[tokio::test]
async fn unreachable_results_page_is_reported() {
    let harvester = SearchHarvester::new(Arc::new(MockTransport::new()), config(8));

    let err = harvester.harvest_at("acme", today()).await.unwrap_err();

    assert!(matches!(err, WebError::Http(_)));
}

#[tokio::test]
async fn page_fetches_in_flight_never_exceed_search_pool_size() {
    let links: Vec<String> = (0..20)
        .map(|i| format!("https://site{i}.acme.edu/"))
        .collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    let mut transport =
        MockTransport::new().route(&search("acme"), 200, &results_page(&link_refs));
    for (i, link) in links.iter().enumerate() {
        transport = transport.route_delayed(
            link,
            200,
            &page_with_paragraph(&format!("page {i}")),
            Duration::from_millis(50),
        );
    }
    let transport = Arc::new(transport);
    let harvester = SearchHarvester::new(
        transport.clone(),
        WebConfig {
            search_pool_size: 3,
            ..config(20)
        },
    );

    let text = harvester.harvest_at("acme", today()).await.expect("harvest");

    assert_eq!(text.lines().count(), 20);
    assert_eq!(transport.peak_in_flight(), 3);
}
