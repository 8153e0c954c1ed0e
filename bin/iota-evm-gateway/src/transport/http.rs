//! JSON-over-HTTP transport for networked AI clients, built on the
//! workspace's existing `axum` stack (grounded on the teacher's REST API
//! module). Forwards into the same shared [`Dispatcher`] the stdio
//! transport uses (§6.6).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gateway_tools::Dispatcher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct GatewayApi {
    dispatcher: Arc<Dispatcher>,
}

impl GatewayApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn routes(self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/tools", get(list_tools))
            .route("/tools/:name", post(call_tool))
            .route("/resources/read", post(read_resource))
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", service: "iota-evm-gateway" })
}

#[derive(Debug, Serialize)]
struct ToolListResponse {
    tools: Vec<String>,
}

async fn list_tools(State(api): State<GatewayApi>) -> Json<ToolListResponse> {
    Json(ToolListResponse { tools: api.dispatcher.tool_names().into_iter().map(str::to_string).collect() })
}

async fn call_tool(Path(name): Path<String>, State(api): State<GatewayApi>, Json(args): Json<Value>) -> Response {
    let result = api.dispatcher.invoke_tool(&name, args).await;
    let status = if result.is_error { StatusCode::UNPROCESSABLE_ENTITY } else { StatusCode::OK };
    (status, Json(result)).into_response()
}

#[derive(Debug, Deserialize)]
struct ReadResourceRequest {
    uri: String,
}

async fn read_resource(State(api): State<GatewayApi>, Json(req): Json<ReadResourceRequest>) -> Response {
    let result = api.dispatcher.read_resource(&req.uri).await;
    (StatusCode::OK, Json(result)).into_response()
}
