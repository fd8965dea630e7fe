//! Project tests

use super::*;
use crate::codegen::CodeGenerator;
use crate::error::Error;
use crate::http::{HttpClientConfig, RawResponse};
use crate::integration::{Fetcher, IntegrationError, Resolver};
use serde_json::json;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shop(api_base: &str) -> Project {
    Project::new("shop")
        .with_object("settings", json!({"currency": "EUR", "open": true}))
        .with_object(
            "weather",
            json!({
                "apiUrl": format!("{api_base}/weather"),
                "JSONPath": "$.current.temp",
                "x-api-key": "secret"
            }),
        )
}

// ============================================================================
// Project
// ============================================================================

#[test]
fn test_classify_objects() {
    let project = shop("https://api.example.com");

    assert_eq!(project.kind("settings").unwrap(), ObjectKind::Plain);
    assert_eq!(project.kind("weather").unwrap(), ObjectKind::Integration);
    assert_eq!(project.integration_keys(), vec!["weather".to_string()]);
    assert!(matches!(
        project.kind("nope"),
        Err(Error::ObjectNotFound { .. })
    ));
}

#[test]
fn test_api_value() {
    let mut project = shop("https://api.example.com");

    assert_eq!(
        project.api_value("settings").unwrap(),
        json!({"currency": "EUR", "open": true})
    );
    assert_eq!(project.api_value("weather").unwrap(), json!(null));

    project.data_info["weather"]["dataReturn"] = json!(21.5);
    assert_eq!(project.api_value("weather").unwrap(), json!(21.5));
}

#[test]
fn test_code_samples_describe_served_value() {
    let project = shop("https://api.example.com");
    let samples = project
        .code_samples("settings", &CodeGenerator::new())
        .unwrap();

    assert!(samples
        .typescript
        .contains("export interface Settings {\n  currency: string;\n  open: boolean;\n}"));
    assert!(samples.python.contains("class Settings(TypedDict):"));
    assert!(samples.java.contains("private String currency;"));
}

#[test]
fn test_api_url() {
    assert_eq!(
        api_url("https://objects.example.com", "shop", "settings").unwrap(),
        "https://objects.example.com/api/shop/settings"
    );
    assert_eq!(
        api_url("https://objects.example.com/base/", "shop", "my key").unwrap(),
        "https://objects.example.com/base/api/shop/my%20key"
    );
    assert!(api_url("not a url", "shop", "x").is_err());
}

#[test]
fn test_project_serde_uses_data_info_key() {
    let project = Project::new("p").with_object("a", json!(1));
    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(value, json!({"name": "p", "dataInfo": {"a": 1}}));
}

// ============================================================================
// Loader
// ============================================================================

#[test]
fn test_load_project_yaml_defaults_name_to_stem() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("blog.yaml");
    fs::write(
        &file,
        r"
dataInfo:
  author:
    name: Ada
    posts: 3
  feed:
    apiUrl: https://api.example.com/feed
    JSONPath: $.items
    Authorization: Bearer t
",
    )
    .unwrap();

    let project = load_project(&file).unwrap();

    assert_eq!(project.name, "blog");
    assert_eq!(project.data_info["author"], json!({"name": "Ada", "posts": 3}));
    assert_eq!(project.kind("feed").unwrap(), ObjectKind::Integration);
}

#[test]
fn test_load_project_json_keeps_name() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("file.json");
    fs::write(&file, r#"{"name": "store", "dataInfo": {"b": 1, "a": 2}}"#).unwrap();

    let project = load_project(&file).unwrap();

    assert_eq!(project.name, "store");
    let keys: Vec<_> = project.data_info.keys().cloned().collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn test_load_project_errors() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        load_project(dir.path().join("missing.yaml")),
        Err(Error::FileNotFound { .. })
    ));

    let txt = dir.path().join("notes.txt");
    fs::write(&txt, "x").unwrap();
    assert!(matches!(load_project(&txt), Err(Error::Config { .. })));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{").unwrap();
    assert!(matches!(load_project(&bad), Err(Error::Config { .. })));
}

#[test]
fn test_load_projects_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.yaml"), "dataInfo: {}\n").unwrap();
    fs::write(dir.path().join("a.json"), r#"{"dataInfo": {}}"#).unwrap();
    fs::write(dir.path().join("README.md"), "ignored").unwrap();

    let projects = load_projects_dir(dir.path()).unwrap();
    let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_load_projects_dir_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.yaml"), "name: same\n").unwrap();
    fs::write(dir.path().join("two.yaml"), "name: same\n").unwrap();

    assert!(load_projects_dir(dir.path()).is_err());
}

// ============================================================================
// Store
// ============================================================================

#[tokio::test]
async fn test_store_lookups() {
    let store = ProjectStore::from_projects([shop("https://api.example.com")]);

    assert_eq!(store.names().await, vec!["shop".to_string()]);
    assert_eq!(
        store.api_value("shop", "settings").await.unwrap()["currency"],
        "EUR"
    );
    assert!(store.get("nope").await.unwrap_err().is_not_found());
    assert!(store
        .api_value("shop", "nope")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_store_try_object_writes_data_return() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {"temp": 18.5}
        })))
        .mount(&mock_server)
        .await;

    let store = ProjectStore::from_projects([shop(&mock_server.uri())]);
    let resolver = Resolver::with_config(HttpClientConfig::default()).unwrap();

    let outcome = store.try_object(&resolver, "shop", "weather").await.unwrap();

    assert_eq!(outcome.result, Ok(json!(18.5)));
    assert_eq!(
        outcome.to_json(),
        json!({"key": "weather", "success": true, "value": 18.5})
    );
    assert_eq!(store.api_value("shop", "weather").await.unwrap(), json!(18.5));

    let stored = store.get("shop").await.unwrap();
    assert_eq!(stored.data_info["weather"]["x-api-key"], "secret");
}

#[tokio::test]
async fn test_store_try_object_failure_is_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad key"})))
        .mount(&mock_server)
        .await;

    let store = ProjectStore::from_projects([shop(&mock_server.uri())]);
    let resolver = Resolver::with_config(HttpClientConfig::default()).unwrap();

    let outcome = store.try_object(&resolver, "shop", "weather").await.unwrap();
    let err = outcome.result.clone().unwrap_err();

    assert_eq!(
        err,
        IntegrationError::http(401, "Unauthorized", Some(json!({"error": "bad key"})))
    );
    assert_eq!(outcome.to_json()["success"], false);
    assert_eq!(
        store.api_value("shop", "weather").await.unwrap(),
        err.to_data_return()
    );
}

#[tokio::test]
async fn test_store_try_plain_object_is_rejected() {
    let store = ProjectStore::from_projects([shop("https://api.example.com")]);
    let resolver = Resolver::with_config(HttpClientConfig::default()).unwrap();

    assert!(matches!(
        store.try_object(&resolver, "shop", "settings").await,
        Err(Error::NotAnIntegration { .. })
    ));
    assert!(matches!(
        store.try_object(&resolver, "nope", "weather").await,
        Err(Error::ProjectNotFound { .. })
    ));
}

#[tokio::test]
async fn test_store_try_project() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"current": {"temp": 3}})))
        .mount(&mock_server)
        .await;

    let project = shop(&mock_server.uri()).with_object(
        "broken",
        json!({"apiUrl": format!("{}/weather", mock_server.uri()), "JSONPath": "$.nope"}),
    );
    let store = ProjectStore::from_projects([project]);
    let resolver = Resolver::with_config(HttpClientConfig::default()).unwrap();

    let outcomes = store.try_project(&resolver, "shop").await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].key, "weather");
    assert_eq!(outcomes[0].result, Ok(json!(3)));
    assert_eq!(outcomes[1].key, "broken");
    assert!(matches!(
        outcomes[1].result,
        Err(IntegrationError::Extraction { .. })
    ));
}

/// First call answers slowly with "first", later calls answer at once with "second"
struct RacingFetcher {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Fetcher for RacingFetcher {
    async fn fetch(
        &self,
        _url: &str,
        _headers: &[(String, String)],
    ) -> Result<RawResponse, IntegrationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = if call == 0 {
            tokio::time::sleep(Duration::from_millis(200)).await;
            r#"{"current": {"temp": "first"}}"#
        } else {
            r#"{"current": {"temp": "second"}}"#
        };
        Ok(RawResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
        })
    }
}

#[tokio::test]
async fn test_concurrent_tries_are_last_write_wins() {
    let store = ProjectStore::from_projects([shop("https://api.example.com")]);
    let resolver = Resolver::new(Arc::new(RacingFetcher {
        calls: AtomicUsize::new(0),
    }));

    let (slow, fast) = tokio::join!(
        store.try_object(&resolver, "shop", "weather"),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.try_object(&resolver, "shop", "weather").await
        }
    );

    // The first invocation finishes last, so its result is what remains stored.
    assert_eq!(slow.unwrap().result, Ok(json!("first")));
    assert_eq!(fast.unwrap().result, Ok(json!("second")));
    assert_eq!(
        store.api_value("shop", "weather").await.unwrap(),
        json!("first")
    );
}
