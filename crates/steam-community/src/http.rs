//! Async HTTP client wrapping reqwest.
//!
//! Sends browser-like page requests with a per-request timeout and a
//! fixed number of attempts. Any transport error or status >= 400 counts
//! as a failed attempt; the delay before retry grows linearly.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use url::Url;

use crate::query::DEFAULT_BASE_URL;
use crate::types::{SteamError, SteamResult};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                  AppleWebKit/537.36 (KHTML, like Gecko) \
                                  Chrome/120.0.0.0 Safari/537.36";

/// Settings for talking to the storefront.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the community site, without trailing path.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Delay unit between attempts; attempt `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            retry_backoff: Duration::from_secs(2),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client used by [`crate::SteamService`].
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> SteamResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            max_attempts: config.max_attempts.max(1),
            retry_backoff: config.retry_backoff,
        })
    }

    /// GET `url` and return the body text, retrying failed attempts.
    pub async fn get_text(&self, url: &Url) -> SteamResult<String> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            tracing::debug!("GET {url} (attempt {attempt}/{})", self.max_attempts);

            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!(
                        "Request failed (attempt {attempt}/{}): {e}",
                        self.max_attempts
                    );
                    if attempt >= self.max_attempts {
                        return Err(e);
                    }
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
            }
        }
    }

    async fn get_once(&self, url: &Url) -> SteamResult<String> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(SteamError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(resp.text().await?)
    }
}
