//! steam-community — read-only access to Steam Community game search,
//! hub details, and user reviews.

pub mod extract;
pub mod http;
pub mod query;
pub mod service;
pub mod types;

pub use http::{ClientConfig, HttpClient};
pub use query::DEFAULT_BASE_URL;
pub use service::SteamService;
pub use types::*;
