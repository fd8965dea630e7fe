//! HTTP server mode: hosted object API plus project management routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::codegen::{CodeGenerator, CodeSamples};
use crate::error::{Error, Result};
use crate::infer::TypeInferrer;
use crate::integration::Resolver;
use crate::project::{api_url, ObjectKind, ProjectStore};
use crate::types::TargetLanguage;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Base URL generated API URLs start with
    pub public_base_url: String,
    /// Maximum nesting depth accepted by type generation
    pub max_depth: usize,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: ServerConfig,
    store: ProjectStore,
    resolver: Resolver,
    generator: CodeGenerator,
}

/// Query string for the types endpoint
#[derive(Debug, Deserialize)]
struct TypesQuery {
    /// Single language to render; all three when omitted
    #[serde(default)]
    language: Option<TargetLanguage>,
}

/// Request body for `POST /types`
#[derive(Debug, Deserialize)]
struct TypesRequest {
    /// Value to describe
    value: Value,
    /// Root type name; without it `value` must be a `{ rootKey: value }` wrapper
    #[serde(default)]
    root_name: Option<String>,
    /// Single language to render; all three when omitted
    #[serde(default)]
    language: Option<TargetLanguage>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Build the router over a project store
pub fn router(store: ProjectStore, resolver: Resolver, config: ServerConfig) -> Router {
    let generator =
        CodeGenerator::with_inferrer(TypeInferrer::new().with_max_depth(config.max_depth));
    let state = AppState {
        config,
        store,
        resolver,
        generator,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/projects", get(list_projects))
        .route("/projects/:name", get(get_project))
        .route("/projects/:name/objects/:key/types", get(object_types))
        .route("/projects/:name/objects/:key/try", post(try_object))
        .route("/types", post(generate_types))
        .route("/api/:project/:key", get(serve_object))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, store: ProjectStore, resolver: Resolver) -> Result<()> {
    let port = config.port;
    let app = router(store, resolver, config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Map a library error onto a status code and envelope
fn error_response(e: &Error) -> Response {
    let status = match e {
        Error::ProjectNotFound { .. } | Error::ObjectNotFound { .. } => StatusCode::NOT_FOUND,
        Error::NotAnIntegration { .. } => StatusCode::BAD_REQUEST,
        Error::DepthExceeded { .. } | Error::Config { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::<()>::error(e.to_string()))).into_response()
}

/// Render samples, optionally narrowed to one language
fn samples_response(samples: &CodeSamples, language: Option<TargetLanguage>) -> Value {
    match language {
        Some(language) => json!({
            "language": language,
            "source": samples.get(language),
        }),
        None => json!(samples),
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// List loaded projects
async fn list_projects(State(state): State<Arc<AppState>>) -> Response {
    let mut projects = Vec::new();
    for name in state.store.names().await {
        let objects = match state.store.get(&name).await {
            Ok(project) => project.data_info.len(),
            Err(_) => continue,
        };
        projects.push(json!({ "name": name, "objects": objects }));
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({ "projects": projects }))),
    )
        .into_response()
}

/// Describe one project: its objects, their kinds and API URLs
async fn get_project(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    let project = match state.store.get(&name).await {
        Ok(project) => project,
        Err(e) => return error_response(&e),
    };

    let mut objects = Vec::with_capacity(project.data_info.len());
    for (key, value) in &project.data_info {
        let url = match api_url(&state.config.public_base_url, &project.name, key) {
            Ok(url) => url,
            Err(e) => return error_response(&e),
        };
        objects.push(json!({
            "key": key,
            "kind": ObjectKind::classify(value),
            "apiUrl": url,
        }));
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({
            "name": project.name,
            "objects": objects,
            "dataInfo": project.data_info,
        }))),
    )
        .into_response()
}

/// Public object API: the value hosted at `/api/:project/:key`
async fn serve_object(
    State(state): State<Arc<AppState>>,
    Path((project, key)): Path<(String, String)>,
) -> Response {
    match state.store.api_value(&project, &key).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Type declarations describing the value an object serves
async fn object_types(
    State(state): State<Arc<AppState>>,
    Path((name, key)): Path<(String, String)>,
    Query(query): Query<TypesQuery>,
) -> Response {
    let samples = match state.store.get(&name).await {
        Ok(project) => project.code_samples(&key, &state.generator),
        Err(e) => Err(e),
    };

    match samples {
        Ok(samples) => (
            StatusCode::OK,
            Json(ApiResponse::success(samples_response(&samples, query.language))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Type declarations for an arbitrary value
async fn generate_types(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TypesRequest>,
) -> Response {
    let samples = match request.root_name.as_deref() {
        Some(root_name) => state
            .generator
            .render_named_samples(&request.value, root_name),
        None => state.generator.render_samples(&request.value),
    };

    match samples {
        Ok(samples) => (
            StatusCode::OK,
            Json(ApiResponse::success(samples_response(&samples, request.language))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Run one integration object and store its new `dataReturn`
async fn try_object(
    State(state): State<Arc<AppState>>,
    Path((name, key)): Path<(String, String)>,
) -> Response {
    match state.store.try_object(&state.resolver, &name, &key).await {
        Ok(outcome) => (StatusCode::OK, Json(ApiResponse::success(outcome.to_json()))).into_response(),
        Err(e) => error_response(&e),
    }
}
