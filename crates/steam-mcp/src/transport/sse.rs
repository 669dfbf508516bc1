//! HTTP transport — `POST /mcp` with optional bearer auth, plus `/health`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Json as AxumJson, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::protocol::ProtocolHandler;
use crate::types::{JsonRpcError, JsonRpcMessage, McpError, McpResult, RequestId};

/// Shared state for all routes.
pub struct ServerState {
    pub token: Option<String>,
    pub handler: ProtocolHandler,
}

/// HTTP transport for web-based MCP clients.
pub struct SseTransport {
    state: Arc<ServerState>,
}

impl SseTransport {
    pub fn new(handler: ProtocolHandler, token: Option<String>) -> Self {
        Self {
            state: Arc::new(ServerState { token, handler }),
        }
    }

    pub fn router(&self) -> Router {
        let state = self.state.clone();
        Router::new()
            .route("/mcp", post(handle_request))
            .layer(middleware::from_fn_with_state(state.clone(), auth_layer))
            .route("/health", get(handle_health))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind `addr` and serve until the process exits.
    pub async fn run(&self, addr: &str) -> McpResult<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP transport listening on {addr}");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| McpError::Transport(e.to_string()))
    }
}

fn error_response(status: StatusCode, err: McpError) -> Response {
    let body = JsonRpcError::new(RequestId::Null, err.code(), err.to_string()).to_value();
    (status, AxumJson(body)).into_response()
}

/// Checks the bearer token if one is configured. `/health` bypasses this layer.
async fn auth_layer(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: middleware::Next,
) -> Response {
    if let Some(expected) = &state.token {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected);

        if !authorized {
            return error_response(StatusCode::UNAUTHORIZED, McpError::Unauthorized);
        }
    }

    next.run(request).await
}

async fn handle_request(
    State(state): State<Arc<ServerState>>,
    AxumJson(body): AxumJson<serde_json::Value>,
) -> Response {
    let msg: JsonRpcMessage = match serde_json::from_value(body) {
        Ok(msg) => msg,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, McpError::ParseError(e.to_string()))
        }
    };

    match state.handler.handle_message(msg).await {
        Some(response) => AxumJson(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn handle_health() -> AxumJson<serde_json::Value> {
    AxumJson(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
