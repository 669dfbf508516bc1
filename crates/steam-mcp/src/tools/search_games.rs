//! Tool: search_steam_games — free-text game search.

use serde::Deserialize;
use serde_json::{json, Value};
use steam_community::SteamService;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

pub const NAME: &str = "search_steam_games";

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: Some("Search Steam games by name".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search keywords" }
            },
            "required": ["query"]
        }),
    }
}

pub async fn execute(args: Value, service: &SteamService) -> McpResult<ToolCallResult> {
    let params: SearchParams = parse_args(args)?;
    if params.query.trim().is_empty() {
        return Err(McpError::InvalidParams("query must not be empty".to_string()));
    }

    match service.search_games(&params.query).await {
        Ok(games) => Ok(ToolCallResult::json(&games)),
        Err(e) => {
            tracing::error!("Search \"{}\" failed: {e}", params.query);
            Ok(ToolCallResult::error(e))
        }
    }
}
