//! Integration tests for the fetch pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run whole
//! batches through the coordinator, writing into temporary directories.

use std::path::{Path, PathBuf};
use std::time::Duration;
use sumi_fetch::config::Config;
use sumi_fetch::crawler::{Coordinator, RunSummary};
use sumi_fetch::url::page_filename;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_WITH_LINKS: &str = r##"<html>
  <body>
  <a href="#hello">I am a link </a>
  <a href="#hello">I am another  link </a>
  <a href="#hello">I am a third link </a>
  <ul>
  <li>1</li>
  <li><a> I am the last link </a></li>
  </ul>
  <img src="/img/logo.png">
  </body>
  </html>"##;

/// Creates a test configuration writing into `dir`
fn create_test_config(dir: &Path, metadata: bool, assets: bool) -> Config {
    let mut config = Config::default();
    config.fetch.extract_metadata = metadata;
    config.fetch.fetch_assets = assets;
    config.fetch.request_timeout_secs = 2;
    config.output.directory = dir.display().to_string();
    config
}

/// Mounts a GET mock serving `body` as HTML at `route`
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Where the coordinator writes the page fetched from `url`
fn saved_path(dir: &TempDir, url: &str) -> PathBuf {
    let url = url::Url::parse(url).expect("Failed to parse URL");
    dir.path().join(page_filename(&url))
}

async fn run(config: Config, inputs: &[String]) -> (RunSummary, String) {
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let (summary, out) = tokio::time::timeout(
        Duration::from_secs(30),
        coordinator.run_with_output(inputs, Vec::new()),
    )
    .await
    .expect("Run did not terminate")
    .expect("Run failed");
    (summary, String::from_utf8(out).expect("Output is not UTF-8"))
}

#[tokio::test]
async fn test_three_valid_and_one_malformed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/one", r#"<a href="/x">x</a>"#).await;
    mount_page(&mock_server, "/two", r#"<img src="a.png"><img src="b.png">"#).await;
    mount_page(&mock_server, "/three", PAGE_WITH_LINKS).await;

    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        format!("{}/one", base_url),
        "http://bad host/".to_string(),
        format!("{}/two", base_url),
        format!("{}/three", base_url),
    ];

    let (summary, out) = run(create_test_config(dir.path(), true, false), &inputs).await;

    assert_eq!(
        summary,
        RunSummary {
            dispatched: 3,
            rejected: 1,
            succeeded: 3,
            failed: 0,
            reported: 3,
        }
    );

    assert_eq!(out.matches("-------------------------").count(), 3);
    assert_eq!(out.matches("Calling: 127.0.0.1").count(), 3);
    assert_eq!(out.lines().filter(|l| l.starts_with("Took: ")).count(), 3);

    // Completion order is not input order, so only check the record set
    let mut records: Vec<_> = out
        .split("-------------------------\n")
        .filter(|block| !block.is_empty())
        .map(|block| {
            let lines: Vec<_> = block.lines().collect();
            (lines[1].to_string(), lines[2].to_string())
        })
        .collect();
    records.sort();
    assert_eq!(
        records,
        vec![
            ("Links: 0".to_string(), "Images: 2".to_string()),
            ("Links: 1".to_string(), "Images: 0".to_string()),
            ("Links: 4".to_string(), "Images: 1".to_string()),
        ]
    );

    for route in ["/one", "/two", "/three"] {
        assert!(saved_path(&dir, &format!("{}{}", base_url, route)).exists());
    }
}

#[tokio::test]
async fn test_failed_target_is_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/ok", PAGE_WITH_LINKS).await;

    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        "http://127.0.0.1:9/unreachable".to_string(),
        format!("{}/ok", base_url),
    ];

    let (summary, out) = run(create_test_config(dir.path(), true, false), &inputs).await;

    assert_eq!(summary.dispatched, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reported, 1);
    assert_eq!(out.matches("Calling: ").count(), 1);
    assert!(!saved_path(&dir, "http://127.0.0.1:9/unreachable").exists());
}

#[tokio::test]
async fn test_timeout_fails_only_slow_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<a>late</a>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fast", "<a>on time</a>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(dir.path(), true, false);
    config.fetch.request_timeout_secs = 1;

    let inputs = vec![format!("{}/slow", base_url), format!("{}/fast", base_url)];
    let (summary, out) = run(config, &inputs).await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reported, 1);
    assert!(out.contains("Links: 1"));
}

#[tokio::test]
async fn test_saved_body_matches_fetched_body() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/page", PAGE_WITH_LINKS).await;

    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![format!("{}/page", base_url)];
    let (summary, out) = run(create_test_config(dir.path(), true, false), &inputs).await;

    assert_eq!(summary.reported, 1);
    assert!(out.contains("Links: 4"));
    assert!(out.contains("Images: 1"));

    let saved = std::fs::read(saved_path(&dir, &inputs[0])).expect("Body was not saved");
    assert_eq!(saved, PAGE_WITH_LINKS.as_bytes());
}

#[tokio::test]
async fn test_without_metadata_nothing_is_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/", PAGE_WITH_LINKS).await;

    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![format!("{}/", base_url)];
    let (summary, out) = run(create_test_config(dir.path(), false, false), &inputs).await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.reported, 0);
    assert!(out.is_empty());
    assert!(saved_path(&dir, &inputs[0]).exists());
}

#[tokio::test]
async fn test_non_utf8_body_is_saved_and_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let body = vec![0xffu8, 0xfe, 0x00, b'<', b'a', b'>'];

    Mock::given(method("GET"))
        .and(path("/binary"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![format!("{}/binary", base_url)];
    let (summary, out) = run(create_test_config(dir.path(), true, false), &inputs).await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.reported, 1);
    assert!(out.contains("Links: 1"));
    assert!(out.contains("Images: 0"));
    assert_eq!(std::fs::read(saved_path(&dir, &inputs[0])).unwrap(), body);
}

#[tokio::test]
async fn test_windows_1252_page_is_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let body = b"<html><body><p>caf\xe9</p><a href=\"/x\">x</a><img src=\"a.png\"></body></html>".to_vec();

    Mock::given(method("GET"))
        .and(path("/latin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.clone())
                .insert_header("content-type", "text/html; charset=windows-1252"),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![format!("{}/latin", base_url)];
    let (summary, out) = run(create_test_config(dir.path(), true, false), &inputs).await;

    assert_eq!(summary.reported, 1);
    assert!(out.contains("Links: 1"));
    assert!(out.contains("Images: 1"));
    assert_eq!(std::fs::read(saved_path(&dir, &inputs[0])).unwrap(), body);
}

#[tokio::test]
async fn test_write_failure_is_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/blocked/page", PAGE_WITH_LINKS).await;
    mount_page(&mock_server, "/ok", "<a>fine</a>").await;

    let dir = tempfile::tempdir().unwrap();
    let blocked_url = format!("{}/blocked/page", base_url);

    // A plain file where the blocked page's directory has to go
    let blocker = saved_path(&dir, &blocked_url)
        .parent()
        .expect("Page file has a parent")
        .to_path_buf();
    std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
    std::fs::write(&blocker, b"not a directory").unwrap();

    let inputs = vec![blocked_url.clone(), format!("{}/ok", base_url)];
    let (summary, out) = run(create_test_config(dir.path(), true, false), &inputs).await;

    assert_eq!(summary.dispatched, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reported, 1);
    assert_eq!(out.matches("Calling: ").count(), 1);
    assert!(out.contains("Links: 1"));
    assert!(!out.contains("Links: 4"));
    assert!(!saved_path(&dir, &blocked_url).exists());
    assert!(saved_path(&dir, &format!("{}/ok", base_url)).exists());
}

#[tokio::test]
async fn test_assets_are_downloaded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let page = r#"<html><body>
        <img src="/img/logo.png">
        <img src="http://127.0.0.1:9/broken.png">
        <img src="photos/cat.jpg?size=large">
        <img alt="no source">
    </body></html>"#;
    mount_page(&mock_server, "/gallery/index", page).await;

    Mock::given(method("GET"))
        .and(path("/img/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PNGDATA".to_vec()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photos/cat.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"JPGDATA".to_vec()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![format!("{}/gallery/index", base_url)];
    let (summary, out) = run(create_test_config(dir.path(), true, true), &inputs).await;

    // The broken asset does not fail the page
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.reported, 1);
    assert!(out.contains("Images: 4"));

    assert_eq!(
        std::fs::read(dir.path().join("img/logo.png")).unwrap(),
        b"PNGDATA"
    );
    assert_eq!(
        std::fs::read(dir.path().join("photos/cat.jpg")).unwrap(),
        b"JPGDATA"
    );
    assert!(!dir.path().join("127.0.0.1:9/broken.png").exists());
}

#[tokio::test]
async fn test_many_targets_with_small_buffer() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<a>1</a><a>2</a>"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(dir.path(), true, false);
    config.fetch.result_buffer = 1;

    let inputs: Vec<_> = (0..40).map(|i| format!("{}/page{}", base_url, i)).collect();
    let (summary, out) = run(config, &inputs).await;

    assert_eq!(summary.dispatched, 40);
    assert_eq!(summary.succeeded, 40);
    assert_eq!(summary.reported, 40);
    assert_eq!(out.matches("Links: 2").count(), 40);
}
