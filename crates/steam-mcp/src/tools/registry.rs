//! Tool registration and dispatch.

use serde_json::Value;
use steam_community::SteamService;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{game_details, game_reviews, search_games};

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            game_reviews::definition(),
            search_games::definition(),
            game_details::definition(),
        ]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        service: &SteamService,
    ) -> McpResult<ToolCallResult> {
        if !Self::list_tools().iter().any(|t| t.name == name) {
            return Err(McpError::ToolNotFound(name.to_string()));
        }

        let Some(args) = arguments.filter(|a| !a.is_null()) else {
            return Ok(ToolCallResult::error("Missing arguments"));
        };

        match name {
            game_reviews::NAME => game_reviews::execute(args, service).await,
            search_games::NAME => search_games::execute(args, service).await,
            game_details::NAME => game_details::execute(args, service).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}
