//! Functional tests for the repository search service

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use data_gateway::{
    api::routes::create_router as gateway_router,
    config::{FetcherConfig, RelayConfig},
    fetcher::{routes::create_router, RepositorySearch},
    upstream::HttpUpstream,
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn repo(name: &str, stars: u32) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "html_url": format!("https://github.com/example/{name}"),
        "stargazers_count": stars,
    })
}

async fn mount_page(server: &MockServer, page: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("page", page))
        .and(query_param("per_page", "100"))
        .and(header("user-agent", "Rust reqwest"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

fn config_for(server: &MockServer, pages: u32) -> FetcherConfig {
    FetcherConfig {
        search_url: format!("{}/search/repositories?q=nvim+plugin", server.uri()),
        pages,
        ..FetcherConfig::default()
    }
}

#[tokio::test]
async fn test_pages_merged_and_sorted_by_stars() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(json!({
            "items": [repo("popular", 50), repo("tiny", 5)]
        })),
    )
    .await;
    mount_page(
        &server,
        "2",
        ResponseTemplate::new(200).set_body_json(json!({ "items": [repo("middle", 20)] })),
    )
    .await;

    let search = RepositorySearch::new(&config_for(&server, 2)).unwrap();
    let repos = search.fetch_repositories().await.unwrap();

    let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["tiny", "middle", "popular"]);
}

#[tokio::test]
async fn test_failed_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(json!({ "items": [repo("kept", 1)] })),
    )
    .await;
    mount_page(&server, "2", ResponseTemplate::new(403)).await;
    mount_page(
        &server,
        "3",
        ResponseTemplate::new(200).set_body_json(json!({ "items": [] })),
    )
    .await;
    mount_page(
        &server,
        "4",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let search = RepositorySearch::new(&config_for(&server, 4)).unwrap();
    let repos = search.fetch_repositories().await.unwrap();

    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "kept");
}

#[tokio::test]
async fn test_all_pages_failing_yields_empty_list() {
    let server = MockServer::start().await;
    mount_page(&server, "1", ResponseTemplate::new(500)).await;
    mount_page(&server, "2", ResponseTemplate::new(403)).await;

    let search = RepositorySearch::new(&config_for(&server, 2)).unwrap();
    let repos = search.fetch_repositories().await.unwrap();

    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_data_route_serves_json_without_star_counts() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(json!({
            "items": [repo("b", 2), repo("a", 1)]
        })),
    )
    .await;

    let search = RepositorySearch::new(&config_for(&server, 1)).unwrap();
    let app = create_router(Arc::new(search));

    let response = app
        .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "name": "a",
                "description": "a description",
                "html_url": "https://github.com/example/a",
            },
            {
                "name": "b",
                "description": "b description",
                "html_url": "https://github.com/example/b",
            },
        ])
    );
}

#[tokio::test]
async fn test_data_route_serves_empty_array_when_search_fails() {
    let server = MockServer::start().await;
    mount_page(&server, "1", ResponseTemplate::new(502)).await;

    let search = RepositorySearch::new(&config_for(&server, 1)).unwrap();
    let app = create_router(Arc::new(search));

    let response = app
        .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"[]");
}

#[tokio::test]
async fn test_gateway_relays_empty_array_when_search_fails() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&github)
        .await;

    let search = RepositorySearch::new(&config_for(&github, 4)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, create_router(Arc::new(search))).await;
    });

    let upstream = HttpUpstream::new(format!("http://{}/data", addr)).unwrap();
    let state = AppState::new(Arc::new(upstream), RelayConfig::default().header().unwrap());
    let gateway = gateway_router(Arc::new(state));

    let response = gateway
        .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content"], "application/json");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"[]");
}

#[tokio::test]
async fn test_other_paths_not_served() {
    let server = MockServer::start().await;
    let search = RepositorySearch::new(&config_for(&server, 1)).unwrap();
    let app = create_router(Arc::new(search));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
