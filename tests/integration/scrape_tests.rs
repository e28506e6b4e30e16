//! End-to-end scrape tests against a mock HTTP server

use page_harvest::config::Config;
use page_harvest::scrape::{scrape, NoopObserver, Scraper};
use page_harvest::storage::{LocalStorage, OutputLayout};
use page_harvest::HarvestError;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `body` as the HTML page at `/`
async fn mount_page(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Serves `bytes` as an image at `p`
async fn mount_image(server: &MockServer, p: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(p))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(bytes.to_vec())
                .insert_header("content-type", "image/png"),
        )
        .mount(server)
        .await;
}

/// Creates a scraper writing under `root` on the real filesystem
fn scraper_in(root: &Path) -> Scraper {
    Scraper::new(&Config::default(), Arc::new(LocalStorage::new()))
        .with_layout(OutputLayout::under(root))
        .with_observer(Arc::new(NoopObserver))
}

fn page_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse mock server URL")
}

#[tokio::test]
async fn test_end_to_end_text_and_image() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<html><body><p>Hi</p><img src="/a.png"></body></html>"#,
    )
    .await;
    mount_image(&server, "/a.png", b"\x89PNG\r\n\x1a\nfake").await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let report = scraper_in(root.path())
        .scrape(&page_url(&server))
        .await
        .expect("Scrape failed");

    assert_eq!(report.images_saved(), 1);

    let text = std::fs::read_to_string(root.path().join("text/main_page.txt"))
        .expect("Text file missing");
    assert_eq!(text, "Hi");

    let image = std::fs::read(root.path().join("images/a.png")).expect("Image missing");
    assert_eq!(image, b"\x89PNG\r\n\x1a\nfake");
}

#[tokio::test]
async fn test_partial_failure_keeps_successful_images() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<html><body>
            <h1>Gallery</h1>
            <img src="/img/first.png">
            <img src="/img/broken.png">
            <img src="/img/third.png">
        </body></html>"#,
    )
    .await;
    mount_image(&server, "/img/first.png", b"first").await;
    mount_image(&server, "/img/third.png", b"third").await;
    Mock::given(method("GET"))
        .and(path("/img/broken.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let report = scraper_in(root.path())
        .scrape(&page_url(&server))
        .await
        .expect("Image failures must not fail the scrape");

    assert_eq!(report.images_saved(), 2);
    assert_eq!(report.images_failed(), 1);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].url().path(), "/img/broken.png");

    assert!(root.path().join("text/main_page.txt").exists());
    assert_eq!(
        std::fs::read(root.path().join("images/first.png")).unwrap(),
        b"first"
    );
    assert_eq!(
        std::fs::read(root.path().join("images/third.png")).unwrap(),
        b"third"
    );
    assert!(!root.path().join("images/broken.png").exists());
}

#[tokio::test]
async fn test_unreachable_image_host_is_isolated() {
    let server = MockServer::start().await;

    // Grab a free port and release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_port = listener.local_addr().unwrap().port();
    drop(listener);

    mount_page(
        &server,
        &format!(
            r#"<p>Mixed</p><img src="http://127.0.0.1:{dead_port}/gone.jpg"><img src="/ok.jpg">"#
        ),
    )
    .await;
    mount_image(&server, "/ok.jpg", b"ok").await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let report = scraper_in(root.path())
        .scrape(&page_url(&server))
        .await
        .expect("Scrape failed");

    assert_eq!(report.images_saved(), 1);
    let failure = report.failures().next().expect("Expected one failure");
    assert!(matches!(
        failure.error(),
        Some(HarvestError::Network { .. })
    ));
    assert!(root.path().join("images/ok.jpg").exists());
}

#[tokio::test]
async fn test_page_http_500_is_fatal_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let url = page_url(&server);
    let err = scraper_in(root.path())
        .scrape(&url)
        .await
        .expect_err("A 500 on the page must be fatal");

    match err {
        HarvestError::Http { url: failed, status } => {
            assert_eq!(status, 500);
            assert_eq!(failed, url.to_string());
        }
        other => panic!("Expected HttpError, got {other:?}"),
    }

    let leftovers: Vec<_> = std::fs::read_dir(root.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "Nothing should be written on failure");
}

#[tokio::test]
async fn test_repeated_scrape_is_idempotent() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<html><head><title>Same</title></head><body>
            <p>Stable content</p><img src="logo.png"><img src="banner.jpg">
        </body></html>"#,
    )
    .await;
    mount_image(&server, "/logo.png", b"logo-bytes").await;
    mount_image(&server, "/banner.jpg", b"banner-bytes").await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let scraper = scraper_in(root.path());
    let url = page_url(&server);

    scraper.scrape(&url).await.expect("First scrape failed");
    let text_first = std::fs::read(root.path().join("text/main_page.txt")).unwrap();
    let logo_first = std::fs::read(root.path().join("images/logo.png")).unwrap();

    scraper.scrape(&url).await.expect("Second scrape failed");
    let text_second = std::fs::read(root.path().join("text/main_page.txt")).unwrap();
    let logo_second = std::fs::read(root.path().join("images/logo.png")).unwrap();

    assert_eq!(text_first, text_second);
    assert_eq!(logo_first, logo_second);
    assert_eq!(text_second, b"Same\nStable content");

    let image_count = std::fs::read_dir(root.path().join("images")).unwrap().count();
    assert_eq!(image_count, 2, "Re-running must not accumulate files");
}

#[tokio::test]
async fn test_colliding_file_names_keep_one_file() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<img src="/left/logo.png"><img src="/right/logo.png">"#,
    )
    .await;
    mount_image(&server, "/left/logo.png", b"left").await;
    mount_image(&server, "/right/logo.png", b"right").await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let report = scraper_in(root.path())
        .scrape(&page_url(&server))
        .await
        .expect("Scrape failed");

    assert_eq!(report.images_saved(), 2);

    // Last writer wins; either payload is acceptable
    let saved = std::fs::read(root.path().join("images/logo.png")).unwrap();
    assert!(saved == b"left" || saved == b"right");
    let image_count = std::fs::read_dir(root.path().join("images")).unwrap().count();
    assert_eq!(image_count, 1);
}

#[tokio::test]
async fn test_images_download_concurrently() {
    const IMAGES: usize = 10;
    const DELAY: Duration = Duration::from_millis(300);

    let server = MockServer::start().await;
    let page: String = (0..IMAGES)
        .map(|i| format!(r#"<img src="/slow{}.png">"#, i))
        .collect();
    mount_page(&server, &page).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/slow\d+\.png$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"slow".to_vec())
                .set_delay(DELAY),
        )
        .expect(IMAGES as u64)
        .mount(&server)
        .await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let start = Instant::now();
    let report = scraper_in(root.path())
        .scrape(&page_url(&server))
        .await
        .expect("Scrape failed");
    let elapsed = start.elapsed();

    assert_eq!(report.images_saved(), IMAGES);
    // Sequential downloads would need IMAGES * DELAY = 3s
    assert!(
        elapsed < Duration::from_secs(2),
        "Downloads should overlap, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_scrape_from_config() {
    let server = MockServer::start().await;
    mount_page(&server, r#"<p>Configured</p><img src="c.gif">"#).await;
    mount_image(&server, "/c.gif", b"GIF89a").await;

    let root = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.target.base_url = format!("{}/", server.uri());
    config.output.text_dir = root.path().join("t");
    config.output.image_dir = root.path().join("i");

    let report = scrape(&config).await.expect("Scrape failed");

    assert_eq!(report.text_path, root.path().join("t/main_page.txt"));
    assert_eq!(
        std::fs::read_to_string(root.path().join("t/main_page.txt")).unwrap(),
        "Configured"
    );
    assert_eq!(std::fs::read(root.path().join("i/c.gif")).unwrap(), b"GIF89a");
}
