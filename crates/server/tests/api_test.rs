//! End-to-end tests for the HTTP boundary.
//!
//! The real router is served on a loopback port and backed by an in-memory
//! page source, then exercised with reqwest.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use catalog::{FetchError, Movie, MoviesPage, PageNumber, PageSource};
use pipeline::EngineConfig;
use reqwest::StatusCode;
use server::{AppState, DirectorsResponse, ErrorResponse, router};

struct FakeCatalog {
    healthy: AtomicBool,
    pages: HashMap<PageNumber, MoviesPage>,
    fetches: AtomicUsize,
}

impl FakeCatalog {
    fn new(pages: Vec<Vec<&str>>) -> Self {
        let total_pages = pages.len() as u32;
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, directors)| {
                let page = i as PageNumber + 1;
                let movies = directors.into_iter().map(Movie::with_director).collect();
                (page, MoviesPage::new(page, total_pages, movies))
            })
            .collect();

        Self {
            healthy: AtomicBool::new(true),
            pages,
            fetches: AtomicUsize::new(0),
        }
    }

    fn unhealthy(self) -> Self {
        self.healthy.store(false, Ordering::SeqCst);
        self
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FakeCatalog {
    async fn fetch_page(&self, page: PageNumber) -> Result<MoviesPage, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| FetchError::status(page, 500))
    }

    async fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

/// Serve the router for `catalog` and return its base URL.
async fn spawn_app(catalog: Arc<FakeCatalog>) -> String {
    let state = AppState::new(catalog, EngineConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Same router the binary serves, without the Ctrl-C handling
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn get(url: String) -> reqwest::Response {
    reqwest::get(url).await.unwrap()
}

#[tokio::test]
async fn test_returns_directors_above_threshold() {
    let catalog = Arc::new(FakeCatalog::new(vec![
        vec!["Martin Scorsese", "Woody Allen"],
        vec!["Martin Scorsese", "Martin Scorsese", "  "],
    ]));
    let base = spawn_app(catalog.clone()).await;

    let response = get(format!("{}/api/directors?threshold=2", base)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: DirectorsResponse = response.json().await.unwrap();
    assert_eq!(body.directors, vec!["Martin Scorsese"]);
    assert_eq!(catalog.fetches(), 2);
}

#[tokio::test]
async fn test_empty_result_is_an_empty_array() {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A", "B"]]));
    let base = spawn_app(catalog).await;

    let response = get(format!("{}/api/directors?threshold=10", base)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "directors": [] }));
}

#[tokio::test]
async fn test_threshold_with_whitespace_is_accepted() {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A", "A", "B"]]));
    let base = spawn_app(catalog).await;

    let response = get(format!("{}/api/directors?threshold=%201%20", base)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: DirectorsResponse = response.json().await.unwrap();
    assert_eq!(body.directors, vec!["A"]);
}

async fn assert_bad_request(query: &str, expected_message: &str) {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A"]]));
    let base = spawn_app(catalog.clone()).await;

    let response = get(format!("{}/api/directors{}", base, query)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {:?}", query);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.status, 400);
    assert_eq!(body.error, "Bad Request");
    assert_eq!(body.message, expected_message);
    assert_eq!(body.path, "/api/directors");
    assert!(!body.timestamp.is_empty());
    // Validation happens before the catalog is touched
    assert_eq!(catalog.fetches(), 0);
}

#[tokio::test]
async fn test_missing_threshold() {
    assert_bad_request("", "Missing required parameter 'threshold'").await;
    assert_bad_request("?other=1", "Missing required parameter 'threshold'").await;
}

#[tokio::test]
async fn test_blank_threshold() {
    assert_bad_request("?threshold=", "Parameter 'threshold' cannot be empty or blank").await;
}

#[tokio::test]
async fn test_non_numeric_threshold() {
    assert_bad_request(
        "?threshold=abc",
        "Invalid value for parameter 'threshold': 'abc' must be a valid number",
    )
    .await;
}

#[tokio::test]
async fn test_negative_threshold() {
    assert_bad_request("?threshold=-1", "Threshold must be a non-negative integer").await;
}

#[tokio::test]
async fn test_unhealthy_upstream_is_503() {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A", "A"]]).unhealthy());
    let base = spawn_app(catalog.clone()).await;

    let response = get(format!("{}/api/directors?threshold=0", base)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.status, 503);
    assert_eq!(body.error, "Service Unavailable");
    assert_eq!(
        body.message,
        "The movies service is currently unavailable. Please try again later."
    );
    // The engine never ran
    assert_eq!(catalog.fetches(), 0);
}

#[tokio::test]
async fn test_validation_runs_before_health_gate() {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A"]]).unhealthy());
    let base = spawn_app(catalog).await;

    let response = get(format!("{}/api/directors?threshold=-5", base)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A"]]));
    let base = spawn_app(catalog).await;

    let response = get(format!("{}/api/actors", base)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.status, 404);
    assert_eq!(body.error, "Not Found");
    assert_eq!(body.path, "/api/actors");
}

#[tokio::test]
async fn test_negative_zero_threshold_is_zero() {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A", "B", "B"]]));
    let base = spawn_app(catalog).await;

    let response = get(format!("{}/api/directors?threshold=-0", base)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: DirectorsResponse = response.json().await.unwrap();
    assert_eq!(body.directors, vec!["A", "B"]);
}

#[tokio::test]
async fn test_wrong_method_uses_error_envelope() {
    let catalog = Arc::new(FakeCatalog::new(vec![vec!["A"]]));
    let base = spawn_app(catalog.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/directors?threshold=1", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.status, 405);
    assert_eq!(body.error, "Method Not Allowed");
    assert_eq!(body.message, "Request method is not supported for this path.");
    assert_eq!(body.path, "/api/directors");
    assert_eq!(catalog.fetches(), 0);
}
