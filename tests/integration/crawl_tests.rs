//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive full digs
//! through a direct (non-proxied) session provider.

use onion_digger::config::{Config, CrawlerConfig};
use onion_digger::output::{generate_summary, save_pages, write_records_json};
use onion_digger::{Digger, TorSessionProvider};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn direct_provider() -> TorSessionProvider {
    TorSessionProvider::without_proxy(Duration::from_secs(10), Duration::from_secs(5))
}

fn crawler_config(max_pages: usize, max_threads: usize) -> CrawlerConfig {
    CrawlerConfig {
        max_pages,
        max_threads,
        max_depth: 3,
        resolve_relative_links: false,
    }
}

fn html_with_links(title: &str, links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!("<li><a href=\"{}\">{}</a></li>\n", l, l))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><ul>\n{}</ul></body></html>",
        title, anchors
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html"),
        )
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_dig_follows_keyword_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_with_links(
            "seed",
            &[
                format!("{}/market/1", base),
                format!("{}/market/2", base),
                format!("{}/about", base),
            ],
        ),
    )
    .await;
    mount_page(
        &server,
        "/market/1",
        html_with_links("one", &[format!("{}/market/3", base)]),
    )
    .await;
    mount_page(&server, "/market/2", html_with_links("two", &[])).await;
    mount_page(&server, "/market/3", html_with_links("three", &[])).await;
    mount_page(&server, "/about", html_with_links("about", &[])).await;

    let digger = Digger::new(direct_provider(), crawler_config(10, 4));
    digger.dig(&format!("{}/", base), "market").await;

    let mut urls: Vec<String> = digger.records().iter().map(|r| r.url().to_string()).collect();
    urls.sort();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base),
            format!("{}/market/1", base),
            format!("{}/market/2", base),
            format!("{}/market/3", base),
        ]
    );

    assert!(!requested_paths(&server).await.contains(&"/about".to_string()));

    let seed = digger
        .records()
        .into_iter()
        .find(|r| r.id() == 0)
        .expect("seed record");
    assert_eq!(seed.url(), format!("{}/", base));
    assert_eq!(seed.links().len(), 3);
    assert_eq!(seed.header("Content-Type"), Some("text/html"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mirrored_content_recorded_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_with_links(
            "seed",
            &[format!("{}/mirror/a", base), format!("{}/mirror/b", base)],
        ),
    )
    .await;
    let mirrored = html_with_links("mirrored", &[]);
    mount_page(&server, "/mirror/a", mirrored.clone()).await;
    mount_page(&server, "/mirror/b", mirrored).await;

    let digger = Digger::new(direct_provider(), crawler_config(10, 4));
    digger.dig(&format!("{}/", base), "mirror").await;

    assert_eq!(digger.pages_crawled(), 2);
    assert_eq!(digger.records().len(), 2);
    assert_eq!(digger.tally().duplicates, 1);
}

#[tokio::test]
async fn test_redirect_wrapper_fetches_target() {
    let server = MockServer::start().await;
    let base = server.uri();

    let target = format!("{}/landing/kw", base);
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    let wrapper = format!("{}/r?redirect_url={}", base, encoded);

    mount_page(&server, "/", html_with_links("seed", &[wrapper])).await;
    mount_page(&server, "/landing/kw", html_with_links("landing", &[])).await;
    Mock::given(method("GET"))
        .and(path("/r"))
        .respond_with(ResponseTemplate::new(200).set_body_string("wrapper page"))
        .expect(0)
        .mount(&server)
        .await;

    let digger = Digger::new(direct_provider(), crawler_config(10, 2));
    digger.dig(&format!("{}/", base), "kw").await;

    assert!(digger.records().iter().any(|r| r.url() == target));
    assert_eq!(digger.pages_crawled(), 2);
}

#[tokio::test]
async fn test_missing_seed_terminates_without_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let digger = Digger::new(direct_provider(), crawler_config(10, 8));

    tokio::time::timeout(
        Duration::from_secs(30),
        digger.dig(&format!("{}/gone", server.uri()), "anything"),
    )
    .await
    .expect("dig did not terminate");

    assert!(digger.records().is_empty());
    assert_eq!(digger.tally().fetch_failures, 1);
    assert_eq!(digger.frontier_len(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_page_budget_caps_large_site() {
    let server = MockServer::start().await;
    let base = server.uri();

    let children: Vec<String> = (0..20).map(|i| format!("{}/item/{}", base, i)).collect();
    mount_page(&server, "/", html_with_links("seed", &children)).await;
    for i in 0..20 {
        mount_page(
            &server,
            &format!("/item/{}", i),
            html_with_links(&format!("item {}", i), &[]),
        )
        .await;
    }

    let digger = Digger::new(direct_provider(), crawler_config(3, 8));
    digger.dig(&format!("{}/", base), "item").await;

    assert_eq!(digger.pages_crawled(), 3);
    assert_eq!(digger.records().len(), 3);
}

#[tokio::test]
async fn test_search_digs_from_results_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "lantern"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_with_links(
            "results",
            &[format!("{}/shop/lantern", base), format!("{}/shop/other", base)],
        )))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/shop/lantern", html_with_links("lantern", &[])).await;

    let mut config = Config::default();
    config.crawler = crawler_config(10, 2);
    config.search.engine_url_template = Some(format!("{}/search?q=", base));
    let digger = Digger::from_config(direct_provider(), &config);

    digger.search("lantern").await.unwrap();

    assert_eq!(digger.pages_crawled(), 2);
    assert!(!requested_paths(&server).await.contains(&"/shop/other".to_string()));
    assert_eq!(
        digger.run_info().start_site,
        Some(format!("{}/search?q=lantern", base))
    );
}

#[tokio::test]
async fn test_outputs_after_dig() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_with_links("seed", &[format!("{}/docs/a", base)]),
    )
    .await;
    mount_page(&server, "/docs/a", html_with_links("a", &[])).await;

    let digger = Digger::new(direct_provider(), crawler_config(10, 2));
    digger.dig(&format!("{}/", base), "docs").await;

    let out = TempDir::new().unwrap();
    let records = digger.records();

    let pages = save_pages(&records, &out.path().join("pages")).unwrap();
    assert_eq!(pages.len(), 2);
    let seed_html = std::fs::read_to_string(out.path().join("pages").join("0.html")).unwrap();
    assert!(seed_html.contains("<title>seed</title>"));

    let json_path = out.path().join("records.json");
    write_records_json(&records, &json_path).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 2);
    assert_eq!(exported[0]["url"], format!("{}/", base));

    let summary = generate_summary(&digger, Some("abc123".to_string()));
    assert_eq!(summary.stats.total_pages, 2);
    assert_eq!(summary.stats.unique_hosts, 1);
    assert_eq!(summary.keyword.as_deref(), Some("docs"));
    assert!(summary.started_at.is_some());
    assert!(summary.finished_at.is_some());
}
