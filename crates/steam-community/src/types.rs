//! Core records returned by the Steam Community adapter.

use serde::{Deserialize, Serialize};

/// Largest page size the reviews endpoint accepts.
pub const MAX_REVIEWS_PER_PAGE: u32 = 50;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_REVIEWS_PER_PAGE: u32 = 10;

/// A single hit from the game search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    pub app_id: String,
    pub url: String,
}

/// Summary fields scraped from a game's community hub page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    pub app_id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub tags: Vec<String>,
    pub release_date: String,
    pub url: String,
}

/// Recommendation attached to a review card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Positive,
    Negative,
    Mixed,
}

/// One user review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author: String,
    pub author_id: String,
    pub review: String,
    pub rating: Rating,
    pub helpful_count: u64,
    pub unhelpful_count: u64,
    pub date: String,
    pub language: String,
    /// Hours on record at review time.
    pub playtime: f64,
    pub is_early_access: bool,
}

/// Review language filter understood by the reviews endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewLanguage {
    #[default]
    Schinese,
    Tchinese,
    English,
    Japanese,
    Korean,
}

impl ReviewLanguage {
    pub const ALL: [&'static str; 5] = ["schinese", "tchinese", "english", "japanese", "korean"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewLanguage::Schinese => "schinese",
            ReviewLanguage::Tchinese => "tchinese",
            ReviewLanguage::English => "english",
            ReviewLanguage::Japanese => "japanese",
            ReviewLanguage::Korean => "korean",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFilter {
    #[default]
    All,
    Recent,
    Updated,
}

impl ReviewFilter {
    pub const ALL: [&'static str; 3] = ["all", "recent", "updated"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewFilter::All => "all",
            ReviewFilter::Recent => "recent",
            ReviewFilter::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    #[default]
    All,
    Positive,
    Negative,
}

impl ReviewType {
    pub const ALL: [&'static str; 3] = ["all", "positive", "negative"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::All => "all",
            ReviewType::Positive => "positive",
            ReviewType::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    #[default]
    All,
    NonSteamPurchase,
    Steam,
}

impl PurchaseType {
    pub const ALL: [&'static str; 3] = ["all", "non_steam_purchase", "steam"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::All => "all",
            PurchaseType::NonSteamPurchase => "non_steam_purchase",
            PurchaseType::Steam => "steam",
        }
    }
}

/// Query for one page of reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOptions {
    pub app_id: String,
    #[serde(default)]
    pub language: ReviewLanguage,
    #[serde(default)]
    pub filter: ReviewFilter,
    #[serde(default)]
    pub review_type: ReviewType,
    #[serde(default)]
    pub purchase_type: PurchaseType,
    #[serde(default = "default_num_per_page")]
    pub num_per_page: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_num_per_page() -> u32 {
    DEFAULT_REVIEWS_PER_PAGE
}

impl ReviewOptions {
    /// Options for `app_id` with every other field at its default.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            language: ReviewLanguage::default(),
            filter: ReviewFilter::default(),
            review_type: ReviewType::default(),
            purchase_type: PurchaseType::default(),
            num_per_page: DEFAULT_REVIEWS_PER_PAGE,
            offset: 0,
        }
    }

    pub fn validate(&self) -> SteamResult<()> {
        validate_app_id(&self.app_id)?;
        if self.num_per_page == 0 || self.num_per_page > MAX_REVIEWS_PER_PAGE {
            return Err(SteamError::InvalidInput(format!(
                "numPerPage must be between 1 and {MAX_REVIEWS_PER_PAGE}, got {}",
                self.num_per_page
            )));
        }
        Ok(())
    }
}

/// Envelope returned by the reviews operation, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    pub success: bool,
    pub reviews: Vec<Review>,
    pub total_count: u64,
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewPage {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            reviews: Vec::new(),
            total_count: 0,
            has_more: false,
            error: Some(message.into()),
        }
    }
}

/// Steam app ids are plain decimal numbers.
pub fn validate_app_id(app_id: &str) -> SteamResult<()> {
    if app_id.is_empty() {
        return Err(SteamError::InvalidInput("appId must not be empty".to_string()));
    }
    if !app_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SteamError::InvalidInput(format!(
            "appId must be numeric, got \"{app_id}\""
        )));
    }
    Ok(())
}

/// Errors from the Steam Community adapter.
#[derive(thiserror::Error, Debug)]
pub enum SteamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type SteamResult<T> = Result<T, SteamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_options_defaults() {
        let opts: ReviewOptions = serde_json::from_str(r#"{"appId":"1091500"}"#).unwrap();
        assert_eq!(opts, ReviewOptions::new("1091500"));
        assert_eq!(opts.language, ReviewLanguage::Schinese);
        assert_eq!(opts.num_per_page, 10);
        assert_eq!(opts.offset, 0);
    }

    #[test]
    fn test_review_options_wire_names() {
        let opts: ReviewOptions = serde_json::from_str(
            r#"{"appId":"730","language":"english","filter":"recent",
                "reviewType":"negative","purchaseType":"non_steam_purchase",
                "numPerPage":25,"offset":50}"#,
        )
        .unwrap();
        assert_eq!(opts.language, ReviewLanguage::English);
        assert_eq!(opts.filter, ReviewFilter::Recent);
        assert_eq!(opts.review_type, ReviewType::Negative);
        assert_eq!(opts.purchase_type, PurchaseType::NonSteamPurchase);
        assert_eq!(opts.num_per_page, 25);
        assert_eq!(opts.offset, 50);
    }

    #[test]
    fn test_validate_rejects_bad_page_size() {
        let mut opts = ReviewOptions::new("730");
        opts.num_per_page = 0;
        assert!(opts.validate().is_err());
        opts.num_per_page = 51;
        assert!(opts.validate().is_err());
        opts.num_per_page = 50;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate_app_id() {
        assert!(validate_app_id("1091500").is_ok());
        assert!(validate_app_id("").is_err());
        assert!(validate_app_id("../search").is_err());
        assert!(validate_app_id("12a").is_err());
    }

    #[test]
    fn test_failure_page_shape() {
        let page = ReviewPage::failure("boom");
        let v = serde_json::to_value(&page).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["reviews"].as_array().unwrap().len(), 0);
        assert_eq!(v["totalCount"], 0);
        assert_eq!(v["hasMore"], false);
        assert_eq!(v["error"], "boom");
    }

    #[test]
    fn test_success_page_omits_error() {
        let page = ReviewPage {
            success: true,
            reviews: Vec::new(),
            total_count: 3,
            has_more: false,
            error: None,
        };
        let v = serde_json::to_value(&page).unwrap();
        assert!(v.get("error").is_none());
    }
}
