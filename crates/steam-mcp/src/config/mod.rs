//! Configuration loading and resolution.
//!
//! Each setting resolves as: explicit CLI value, then environment
//! variable, then built-in default.

use std::str::FromStr;
use std::time::Duration;

use steam_community::ClientConfig;

pub const ENV_BASE_URL: &str = "STEAM_COMMUNITY_URL";
pub const ENV_TIMEOUT_SECS: &str = "STEAM_MCP_TIMEOUT_SECS";
pub const ENV_RETRIES: &str = "STEAM_MCP_RETRIES";
pub const ENV_TOKEN: &str = "STEAM_MCP_TOKEN";

/// Values given on the command line, if any.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

fn from_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring unparseable {key}={raw}");
            None
        }
    }
}

fn pick<T>(explicit: Option<T>, env: Option<T>, default: T) -> T {
    explicit.or(env).unwrap_or(default)
}

/// Resolve the storefront client settings.
pub fn resolve_client_config(overrides: &ConfigOverrides) -> ClientConfig {
    let defaults = ClientConfig::default();

    let base_url = pick(
        overrides.base_url.clone(),
        from_env(ENV_BASE_URL),
        defaults.base_url.clone(),
    );
    let timeout_secs = pick(
        overrides.timeout_secs,
        from_env(ENV_TIMEOUT_SECS),
        defaults.timeout.as_secs(),
    );
    let max_attempts = pick(overrides.retries, from_env(ENV_RETRIES), defaults.max_attempts);

    ClientConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        timeout: Duration::from_secs(timeout_secs.max(1)),
        max_attempts: max_attempts.max(1),
        ..defaults
    }
}

/// Bearer token for the HTTP transport: CLI flag, then environment.
pub fn resolve_token(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| std::env::var(ENV_TOKEN).ok())
        .filter(|t| !t.is_empty())
}
