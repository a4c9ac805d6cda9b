//! Healthtant Feed
//!
//! Platform-neutral core of the Healthtant pages:
//! - models: server DTOs
//! - query: keyword validation and search query strings
//! - feed: the paginated search feed with favorite toggling
//! - favorites: durable favorite cache reconciled against the server
//! - api: the server endpoints (trait + reqwest client)
//! - upload: meal-logging form validation
//! - account, analysis: account form checks and analysis chart data
//! - refine, csrf, config, nav: helpers used by the page bindings

pub mod account;
pub mod analysis;
pub mod api;
pub mod config;
pub mod csrf;
pub mod error;
pub mod favorites;
pub mod feed;
pub mod models;
pub mod nav;
pub mod query;
pub mod refine;
pub mod upload;

pub use api::{FoodApi, HttpFoodApi};
pub use config::{PageConfig, PageKind};
pub use error::{FeedError, FeedResult};
pub use favorites::{DurableStore, FavoriteCache, MemoryStore};
pub use feed::{FeedConfig, FeedItem, PageOutcome, SearchResultFeed};
pub use models::{DietEntry, FoodResult, Meal, Nutrient, ProductDetail};
pub use query::{Filters, Range, SearchMode, SearchQuery, SortOrder};
pub use upload::{DietUpload, DietUploadForm};
