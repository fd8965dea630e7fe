//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: project YAML → integration request →
//! stored dataReturn → hosted object API and generated types

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use objectkit::cli::{router, ServerConfig};
use objectkit::http::HttpClientConfig;
use objectkit::infer::DEFAULT_MAX_DEPTH;
use objectkit::project::{load_project_from_str, ProjectFormat, ProjectStore};
use objectkit::Resolver;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUBLIC_BASE: &str = "http://objects.test";

fn shop_yaml(api_base: &str) -> String {
    format!(
        r"
name: shop
dataInfo:
  settings:
    currency: EUR
    open: true
  weather:
    apiUrl: {api_base}/weather
    JSONPath: $.current.temp
    x-api-key: secret
"
    )
}

fn app(store: ProjectStore) -> Router {
    let resolver = Resolver::with_config(HttpClientConfig::default()).unwrap();
    router(
        store,
        resolver,
        ServerConfig {
            port: 0,
            public_base_url: PUBLIC_BASE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        },
    )
}

fn shop_store(api_base: &str) -> ProjectStore {
    let project = load_project_from_str(&shop_yaml(api_base), ProjectFormat::Yaml).unwrap();
    ProjectStore::from_projects([project])
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Hosted Object API
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = app(ProjectStore::new());
    let (status, body) = call(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_plain_object_is_served_as_is() {
    let app = app(shop_store("https://api.example.com"));
    let (status, body) = call(&app, "GET", "/api/shop/settings", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"currency": "EUR", "open": true}));
}

#[tokio::test]
async fn test_unknown_object_is_not_found() {
    let app = app(shop_store("https://api.example.com"));

    let (status, body) = call(&app, "GET", "/api/shop/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Object 'nope' not found in project 'shop'");

    let (status, _) = call(&app, "GET", "/api/nope/settings", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_try_integration_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {"temp": 18.5, "wind": 3}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app(shop_store(&mock_server.uri()));

    // Never tried yet
    let (status, body) = call(&app, "GET", "/api/shop/weather", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = call(&app, "POST", "/projects/shop/objects/weather/try", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"key": "weather", "success": true, "value": 18.5})
    );

    let (_, body) = call(&app, "GET", "/api/shop/weather", None).await;
    assert_eq!(body, json!(18.5));

    let (status, body) = call(
        &app,
        "GET",
        "/projects/shop/objects/weather/types?language=typescript",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"language": "typescript", "source": "export type Weather = number;\n"})
    );
}

#[tokio::test]
async fn test_failed_try_is_served_as_error_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "down"})))
        .mount(&mock_server)
        .await;

    let app = app(shop_store(&mock_server.uri()));

    let (status, body) = call(&app, "POST", "/projects/shop/objects/weather/try", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["success"], false);
    assert_eq!(body["data"]["error"]["kind"], "http");
    assert_eq!(body["data"]["error"]["status"], 503);

    let (_, body) = call(&app, "GET", "/api/shop/weather", None).await;
    assert_eq!(
        body,
        json!({"error": {
            "kind": "http",
            "status": 503,
            "status_text": "Service Unavailable",
            "body": {"message": "down"}
        }})
    );
}

#[tokio::test]
async fn test_try_plain_object_is_rejected() {
    let app = app(shop_store("https://api.example.com"));
    let (status, body) = call(&app, "POST", "/projects/shop/objects/settings/try", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// ============================================================================
// Project Routes
// ============================================================================

#[tokio::test]
async fn test_list_projects() {
    let app = app(shop_store("https://api.example.com"));
    let (status, body) = call(&app, "GET", "/projects", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["projects"],
        json!([{"name": "shop", "objects": 2}])
    );
}

#[tokio::test]
async fn test_get_project_lists_api_urls() {
    let app = app(shop_store("https://api.example.com"));
    let (status, body) = call(&app, "GET", "/projects/shop", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["objects"],
        json!([
            {"key": "settings", "kind": "plain", "apiUrl": "http://objects.test/api/shop/settings"},
            {"key": "weather", "kind": "integration", "apiUrl": "http://objects.test/api/shop/weather"}
        ])
    );
    assert_eq!(body["data"]["dataInfo"]["weather"]["x-api-key"], "secret");
}

#[tokio::test]
async fn test_object_types_in_every_language() {
    let app = app(shop_store("https://api.example.com"));
    let (status, body) = call(&app, "GET", "/projects/shop/objects/settings/types", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["typescript"],
        "export interface Settings {\n  currency: string;\n  open: boolean;\n}\n"
    );
    assert_eq!(
        body["data"]["python"],
        "from typing import TypedDict\n\nclass Settings(TypedDict):\n    currency: str\n    open: bool\n"
    );
    assert!(body["data"]["java"]
        .as_str()
        .unwrap()
        .contains("public class Settings {"));
}

// ============================================================================
// Type Generation
// ============================================================================

#[tokio::test]
async fn test_post_types_wrapped_value() {
    let app = app(ProjectStore::new());
    let request = json!({
        "value": {"user": {"name": "Ada", "my-key": 1}},
        "language": "python"
    });
    let (status, body) = call(&app, "POST", "/types", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["source"],
        "from typing import TypedDict\n\nclass User(TypedDict):\n    name: str\n    my_key: float\n"
    );
}

#[tokio::test]
async fn test_post_types_named_root() {
    let app = app(ProjectStore::new());
    let request = json!({
        "value": [{"id": 1}],
        "root_name": "orders",
        "language": "typescript"
    });
    let (status, body) = call(&app, "POST", "/types", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["source"],
        "export type Orders = OrdersItem[];\n\nexport interface OrdersItem {\n  id: number;\n}\n"
    );
}

#[tokio::test]
async fn test_post_types_depth_limit() {
    let resolver = Resolver::with_config(HttpClientConfig::default()).unwrap();
    let app = router(
        ProjectStore::new(),
        resolver,
        ServerConfig {
            port: 0,
            public_base_url: PUBLIC_BASE.to_string(),
            max_depth: 2,
        },
    );
    let request = json!({"value": {"a": {"b": {"c": {"d": 1}}}}});
    let (status, body) = call(&app, "POST", "/types", Some(request)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}
