//! Error types and JSON-RPC error codes for the MCP server.

use steam_community::SteamError;

use super::message::{JsonRpcError, RequestId};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Server-specific error codes.
pub mod mcp_error_codes {
    pub const TOOL_NOT_FOUND: i32 = -32803;
    /// The storefront could not be reached or answered with an error.
    pub const UPSTREAM_ERROR: i32 = -32850;
    /// Missing or invalid bearer token on the HTTP transport.
    pub const UNAUTHORIZED: i32 = -32900;
}

#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unauthorized")]
    Unauthorized,
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) | McpError::Json(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) | McpError::Transport(_) | McpError::Io(_) => {
                INTERNAL_ERROR
            }
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::Upstream(_) => UPSTREAM_ERROR,
            McpError::Unauthorized => UNAUTHORIZED,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError::new(id, self.code(), self.to_string())
    }
}

impl From<SteamError> for McpError {
    fn from(e: SteamError) -> Self {
        match e {
            SteamError::InvalidInput(msg) => McpError::InvalidParams(msg),
            other => McpError::Upstream(other.to_string()),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;
