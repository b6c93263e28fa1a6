//! HTTP server mode for REST access to the transformation stage

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::TransformConfig;
use crate::database::ExecutionEngine;
use crate::error::{Error, Result};
use crate::partition::PartitionKeyDeriver;
use crate::router::{BatchOutcome, FailureKind, TableRouter};
use crate::routing::RoutingTable;
use crate::types::FirehoseBatch;

/// App state shared across handlers
pub struct AppState {
    deriver: PartitionKeyDeriver,
    router: TableRouter,
}

impl AppState {
    /// Build the state from config and an engine
    pub fn new(config: &TransformConfig, engine: Arc<dyn ExecutionEngine>) -> Self {
        Self {
            deriver: PartitionKeyDeriver::with_encoding(config.partition.clone(), config.encoding),
            router: TableRouter::with_encoding(engine, config.routing.clone(), config.encoding),
        }
    }
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

    fn failure(data: T, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(msg.into()),
        }
    }
}

/// Build the HTTP router
pub fn app(state: Arc<AppState>) -> Router {
    // Build CORS layer - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/routes", get(list_routes))
        .route("/partition", post(partition))
        .route("/route", post(route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve(
    config: &TransformConfig,
    engine: Arc<dyn ExecutionEngine>,
    port: u16,
) -> Result<()> {
    let state = Arc::new(AppState::new(config, engine));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app(state))
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// List the routing table
async fn list_routes() -> impl IntoResponse {
    let routes: Vec<_> = RoutingTable::new()
        .entries()
        .map(|(suffix, table)| json!({ "suffix": suffix, "table": table }))
        .collect();

    Json(ApiResponse::success(json!({ "routes": routes })))
}

/// Rewrite destination prefixes of a batch
async fn partition(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<FirehoseBatch>,
) -> impl IntoResponse {
    Json(state.deriver.process_batch(batch))
}

/// Submit a batch's records as inserts
async fn route(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<FirehoseBatch>,
) -> impl IntoResponse {
    let outcome = state.router.process_batch(&batch).await;

    if outcome.is_success() {
        return (StatusCode::OK, Json(ApiResponse::success(outcome))).into_response();
    }

    let status = failure_status(&outcome);
    let message = outcome.error.clone().unwrap_or_default();
    (status, Json(ApiResponse::failure(outcome, message))).into_response()
}

/// HTTP status for a failed outcome
fn failure_status(outcome: &BatchOutcome) -> StatusCode {
    match outcome.failure {
        Some(FailureKind::UnknownStream) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Decode | FailureKind::InvalidPayload) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(FailureKind::Execution) => StatusCode::BAD_GATEWAY,
        Some(FailureKind::Internal) | None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
