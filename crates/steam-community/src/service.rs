//! High-level operations: search, details, reviews.

use crate::extract;
use crate::http::{ClientConfig, HttpClient};
use crate::query;
use crate::types::{Game, GameDetails, ReviewOptions, ReviewPage, SteamResult};

/// Read-only adapter over the Steam Community site.
#[derive(Clone)]
pub struct SteamService {
    client: HttpClient,
    base_url: String,
}

impl SteamService {
    pub fn new(config: ClientConfig) -> SteamResult<Self> {
        let client = HttpClient::new(&config)?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search games by free text, most relevant first.
    pub async fn search_games(&self, query: &str) -> SteamResult<Vec<Game>> {
        let url = query::search_url(&self.base_url, query)?;
        let html = self.client.get_text(&url).await?;
        let games = extract::parse_search_results(&html);
        tracing::info!("Search \"{}\" returned {} games", query.trim(), games.len());
        Ok(games)
    }

    /// Name, snippet, price, tags, and release date for one app.
    pub async fn game_details(&self, app_id: &str) -> SteamResult<GameDetails> {
        let url = query::details_url(&self.base_url, app_id)?;
        let html = self.client.get_text(&url).await?;
        Ok(extract::parse_game_details(&html, app_id, url.as_str()))
    }

    /// One page of reviews. Failures come back inside the envelope.
    pub async fn game_reviews(&self, options: &ReviewOptions) -> ReviewPage {
        match self.fetch_reviews(options).await {
            Ok(page) => {
                tracing::info!(
                    "Fetched {} reviews for app {} (total {})",
                    page.reviews.len(),
                    options.app_id,
                    page.total_count
                );
                page
            }
            Err(e) => {
                tracing::error!("Failed to fetch reviews for app {}: {e}", options.app_id);
                ReviewPage::failure(e.to_string())
            }
        }
    }

    async fn fetch_reviews(&self, options: &ReviewOptions) -> SteamResult<ReviewPage> {
        let url = query::reviews_url(&self.base_url, options)?;
        let html = self.client.get_text(&url).await?;
        Ok(extract::parse_review_page(
            &html,
            options.offset,
            options.num_per_page,
        ))
    }
}
