//! Request dispatcher — receives JSON-RPC messages, routes to handlers.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::Value;
use steam_community::SteamService;

use crate::tools::ToolRegistry;
use crate::types::*;

use super::negotiation::NegotiatedCapabilities;
use super::validator::validate_request;

/// Dispatches incoming JSON-RPC messages against one [`SteamService`].
pub struct ProtocolHandler {
    service: Arc<SteamService>,
    capabilities: Arc<Mutex<NegotiatedCapabilities>>,
}

impl ProtocolHandler {
    pub fn new(service: Arc<SteamService>) -> Self {
        Self {
            service,
            capabilities: Arc::new(Mutex::new(NegotiatedCapabilities::default())),
        }
    }

    /// Whether the client has sent `initialized`.
    pub async fn is_initialized(&self) -> bool {
        self.capabilities.lock().await.initialized
    }

    /// Handle one message. Returns the response to send, if any.
    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(req) => Some(self.handle_request(req).await),
            JsonRpcMessage::Notification(notif) => {
                self.handle_notification(notif).await;
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        if let Err(e) = validate_request(&request) {
            return e.to_json_rpc_error(request.id).to_value();
        }

        let id = request.id.clone();
        match self.dispatch_request(&request).await {
            Ok(value) => serde_json::to_value(JsonRpcResponse::new(id, value)).unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Request {} ({}) failed: {e}", request.id, request.method);
                e.to_json_rpc_error(id).to_value()
            }
        }
    }

    async fn dispatch_request(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params.clone()).await,
            "shutdown" => {
                tracing::info!("Shutdown requested");
                Ok(Value::Object(serde_json::Map::new()))
            }
            "ping" => Ok(Value::Object(serde_json::Map::new())),

            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params.clone()).await,

            _ => Err(McpError::MethodNotFound(request.method.clone())),
        }
    }

    async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "initialized" | "notifications/initialized" => {
                self.capabilities.lock().await.mark_initialized();
            }
            "notifications/cancelled" | "$/cancelRequest" => {
                let params = notification
                    .params
                    .and_then(|p| serde_json::from_value::<CancelledParams>(p).ok());
                match params {
                    Some(p) => tracing::info!("Client cancelled request {}", p.request_id),
                    None => tracing::info!("Received cancellation notification"),
                }
            }
            _ => {
                tracing::debug!("Unknown notification: {}", notification.method);
            }
        }
    }

    async fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        let init_params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::InvalidParams(e.to_string()))?
            .ok_or_else(|| McpError::InvalidParams("Initialize params required".to_string()))?;

        let result = self.capabilities.lock().await.negotiate(init_params);
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        let result = ToolListResult {
            tools: ToolRegistry::list_tools(),
            next_cursor: None,
        };
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let call_params: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::InvalidParams(e.to_string()))?
            .ok_or_else(|| McpError::InvalidParams("Tool call params required".to_string()))?;

        tracing::info!("Calling tool {}", call_params.name);
        let result =
            ToolRegistry::call(&call_params.name, call_params.arguments, &self.service).await?;

        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }
}
