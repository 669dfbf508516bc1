//! Tool: get_steam_reviews — one page of user reviews.

use serde::Deserialize;
use serde_json::{json, Value};
use steam_community::{
    PurchaseType, ReviewFilter, ReviewLanguage, ReviewOptions, ReviewType, SteamService,
    DEFAULT_REVIEWS_PER_PAGE, MAX_REVIEWS_PER_PAGE,
};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::{parse_args, whole_number, AppIdArg};

pub const NAME: &str = "get_steam_reviews";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsParams {
    #[serde(alias = "app_id")]
    app_id: AppIdArg,
    #[serde(default)]
    language: Option<ReviewLanguage>,
    #[serde(default)]
    filter: Option<ReviewFilter>,
    #[serde(default, alias = "review_type")]
    review_type: Option<ReviewType>,
    #[serde(default, alias = "purchase_type")]
    purchase_type: Option<PurchaseType>,
    #[serde(default, alias = "num_per_page", deserialize_with = "whole_number")]
    num_per_page: Option<u32>,
    #[serde(default, deserialize_with = "whole_number")]
    offset: Option<u32>,
}

impl ReviewsParams {
    fn into_options(self) -> ReviewOptions {
        ReviewOptions {
            app_id: self.app_id.into_string(),
            language: self.language.unwrap_or_default(),
            filter: self.filter.unwrap_or_default(),
            review_type: self.review_type.unwrap_or_default(),
            purchase_type: self.purchase_type.unwrap_or_default(),
            // 0 means "not given", same as omitting it.
            num_per_page: self
                .num_per_page
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_REVIEWS_PER_PAGE),
            offset: self.offset.unwrap_or(0),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: Some("Get user reviews of a Steam game".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "appId": { "type": "string", "description": "Steam App ID" },
                "language": {
                    "type": "string",
                    "description": "Review language (default: schinese)",
                    "enum": ReviewLanguage::ALL
                },
                "filter": {
                    "type": "string",
                    "description": "Review ordering (default: all)",
                    "enum": ReviewFilter::ALL
                },
                "reviewType": {
                    "type": "string",
                    "description": "Recommendation filter (default: all)",
                    "enum": ReviewType::ALL
                },
                "purchaseType": {
                    "type": "string",
                    "description": "Purchase source filter (default: all)",
                    "enum": PurchaseType::ALL
                },
                "numPerPage": {
                    "type": "number",
                    "description": "Reviews per page (default: 10)",
                    "minimum": 1,
                    "maximum": MAX_REVIEWS_PER_PAGE
                },
                "offset": {
                    "type": "number",
                    "description": "Review offset (default: 0)",
                    "minimum": 0
                }
            },
            "required": ["appId"]
        }),
    }
}

pub async fn execute(args: Value, service: &SteamService) -> McpResult<ToolCallResult> {
    let params: ReviewsParams = parse_args(args)?;
    let options = params.into_options();
    options.validate()?;

    let page = service.game_reviews(&options).await;
    Ok(ToolCallResult::json(&page))
}
