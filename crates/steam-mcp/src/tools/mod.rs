//! MCP tool implementations.

pub mod game_details;
pub mod game_reviews;
pub mod registry;
pub mod search_games;

pub use registry::ToolRegistry;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::types::{McpError, McpResult};

/// App ids arrive as either `"570"` or `570`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum AppIdArg {
    Text(String),
    Number(u64),
}

impl AppIdArg {
    pub(crate) fn into_string(self) -> String {
        match self {
            AppIdArg::Text(s) => s.trim().to_string(),
            AppIdArg::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> McpResult<T> {
    serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))
}

/// Optional count that may arrive as `10` or `10.0`. Anything that is not a
/// whole number in `u32` range is rejected.
pub(crate) fn whole_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let whole = match n.as_u64() {
        Some(v) => Some(v),
        None => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64),
    };
    whole
        .and_then(|v| u32::try_from(v).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative whole number, got {n}")))
}
