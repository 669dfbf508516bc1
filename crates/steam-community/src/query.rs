//! URL construction for the Steam Community endpoints.

use url::Url;

use crate::types::{validate_app_id, ReviewOptions, SteamError, SteamResult};

pub const DEFAULT_BASE_URL: &str = "https://steamcommunity.com";

/// Category id the search page uses for "games".
const GAMES_CATEGORY: &str = "998";

fn endpoint(base_url: &str, path: &str) -> SteamResult<Url> {
    let base = base_url.trim_end_matches('/');
    Ok(Url::parse(&format!("{base}{path}"))?)
}

/// `/search/` URL for a free-text game query.
pub fn search_url(base_url: &str, query: &str) -> SteamResult<Url> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SteamError::InvalidInput("query must not be empty".to_string()));
    }

    let mut url = endpoint(base_url, "/search/")?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("category1", GAMES_CATEGORY)
        .append_pair("supportedlang", "schinese")
        .append_pair("inlibrary", "0")
        .append_pair("sort_by", "Relevance");
    Ok(url)
}

/// Community hub page for one app.
pub fn details_url(base_url: &str, app_id: &str) -> SteamResult<Url> {
    validate_app_id(app_id)?;
    endpoint(base_url, &format!("/app/{app_id}"))
}

/// One page of reviews for `options.app_id`.
pub fn reviews_url(base_url: &str, options: &ReviewOptions) -> SteamResult<Url> {
    options.validate()?;

    let mut url = endpoint(base_url, &format!("/app/{}/reviews/", options.app_id))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("l", options.language.as_str())
            .append_pair("filter", options.filter.as_str())
            .append_pair("review_type", options.review_type.as_str())
            .append_pair("purchase_type", options.purchase_type.as_str())
            .append_pair("num_per_page", &options.num_per_page.to_string());
        if options.offset > 0 {
            pairs.append_pair("offset", &options.offset.to_string());
        }
    }
    Ok(url)
}
