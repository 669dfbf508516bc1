//! Tool: get_steam_game_details — hub page summary for one app.

use serde::Deserialize;
use serde_json::{json, Value};
use steam_community::{validate_app_id, SteamService};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::{parse_args, AppIdArg};

pub const NAME: &str = "get_steam_game_details";

#[derive(Debug, Deserialize)]
struct DetailsParams {
    #[serde(rename = "appId", alias = "app_id")]
    app_id: AppIdArg,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: Some(
            "Get name, description, price, tags, and release date of a Steam game".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "appId": { "type": "string", "description": "Steam App ID" }
            },
            "required": ["appId"]
        }),
    }
}

pub async fn execute(args: Value, service: &SteamService) -> McpResult<ToolCallResult> {
    let params: DetailsParams = parse_args(args)?;
    let app_id = params.app_id.into_string();
    validate_app_id(&app_id)?;

    match service.game_details(&app_id).await {
        Ok(details) => Ok(ToolCallResult::json(&details)),
        Err(e) => {
            tracing::error!("Details for app {app_id} failed: {e}");
            Ok(ToolCallResult::error(e))
        }
    }
}
