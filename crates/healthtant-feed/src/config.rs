//! Page Configuration
//!
//! The server embeds one JSON block per page instead of templating
//! globals onto `window`. Every component gets its settings from here.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analysis::{CalorieSeries, CategoryCount};
use crate::error::{FeedError, FeedResult};
use crate::feed::FeedConfig;
use crate::models::{DietEntry, FoodResult};
use crate::query::{SearchMode, SortOrder, DEFAULT_PAGE_SIZE};

/// Element id of the `<script type="application/json">` block
pub const PAGE_CONFIG_ELEMENT_ID: &str = "page-config";
/// Element the app mounts into
pub const APP_ROOT_ELEMENT_ID: &str = "app-root";

/// Which server-rendered page the app is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Normal search (`/search/`)
    Search,
    /// Advanced search results with sort and filters
    AdvancedSearch,
    /// Food search when logging a meal
    DietSearch,
    /// Product detail with its favorite button
    Product,
    /// Monthly diet list
    Diets,
    /// Meal-logging form for one food
    DietUpload,
    /// Signed-in user's favorite foods (`/mypage/food/like/`)
    Favorites,
    /// Date-range picker in front of the analysis
    AnalysisDate,
    /// Most-eaten food categories bar chart
    AnalysisCategories,
    /// Daily calorie line chart
    AnalysisDiet,
    /// Password change or reset-from-key form
    PasswordChange,
    /// Account withdrawal confirmation
    Withdraw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub page: PageKind,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub current_year: Option<i32>,
    #[serde(default)]
    pub current_month: Option<u32>,
    /// Defaults to the window origin
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Keyword to search immediately (advanced results are entered with `?keyword=`)
    #[serde(default)]
    pub keyword: Option<String>,
    /// Raw order label from the URL
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub food_id: Option<String>,
    #[serde(default)]
    pub food_name: Option<String>,
    /// Date prefilled on the meal form
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub diets: Vec<DietEntry>,
    #[serde(default)]
    pub favorites: Vec<FoodResult>,
    /// Where natively posted forms go; defaults to the current page
    #[serde(default)]
    pub form_action: Option<String>,
    /// Password change asks for the current password; reset-from-key doesn't
    #[serde(default)]
    pub requires_old_password: bool,
    #[serde(default)]
    pub categories: Vec<CategoryCount>,
    #[serde(default)]
    pub calories: CalorieSeries,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl PageConfig {
    pub fn from_json(raw: &str) -> FeedResult<Self> {
        let config: PageConfig = serde_json::from_str(raw).map_err(|e| FeedError::Config(e.to_string()))?;
        let needs_food = matches!(config.page, PageKind::Product | PageKind::DietUpload);
        if needs_food && config.food_id.is_none() {
            return Err(FeedError::Config(format!("{:?} page without food_id", config.page)));
        }
        Ok(config)
    }

    /// Search endpoint for search pages; diet search reuses the normal one
    pub fn search_mode(&self) -> Option<SearchMode> {
        match self.page {
            PageKind::Search | PageKind::DietSearch => Some(SearchMode::Normal),
            PageKind::AdvancedSearch => Some(SearchMode::Advanced),
            _ => None,
        }
    }

    pub fn feed_config(&self) -> Option<FeedConfig> {
        self.search_mode().map(|mode| FeedConfig::new(mode, self.page_size))
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.order.as_deref().and_then(SortOrder::from_param)
    }

    /// Displayed year/month, falling back to `today` for missing or invalid values
    pub fn year_month(&self, today: NaiveDate) -> (i32, u32) {
        let year = self.current_year.unwrap_or_else(|| today.year());
        let month = self
            .current_month
            .filter(|m| (1..=12).contains(m))
            .unwrap_or_else(|| today.month());
        (year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config = PageConfig::from_json(r#"{"page":"search"}"#).unwrap();
        assert_eq!(config.page_size, 30);
        assert!(!config.is_authenticated);
        assert_eq!(config.search_mode(), Some(SearchMode::Normal));
        assert!(config.diets.is_empty());
    }

    #[test]
    fn test_advanced_config() {
        let config = PageConfig::from_json(
            r#"{"page":"advanced_search","keyword":"milk","order":"열량이 적은","page_size":10}"#,
        )
        .unwrap();
        assert_eq!(config.feed_config(), Some(FeedConfig::new(SearchMode::Advanced, 10)));
        assert_eq!(config.sort_order(), Some(SortOrder::CaloriesLow));
        assert_eq!(config.keyword.as_deref(), Some("milk"));
    }

    #[test]
    fn test_diet_search_uses_normal_endpoint() {
        let config = PageConfig::from_json(r#"{"page":"diet_search"}"#).unwrap();
        assert_eq!(config.search_mode(), Some(SearchMode::Normal));
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(PageConfig::from_json("{}"), Err(FeedError::Config(_))));
        assert!(matches!(PageConfig::from_json(r#"{"page":"product"}"#), Err(FeedError::Config(_))));
        assert!(PageConfig::from_json(r#"{"page":"product","food_id":"P1"}"#).is_ok());
    }

    #[test]
    fn test_diet_upload_config() {
        assert!(matches!(PageConfig::from_json(r#"{"page":"diet_upload"}"#), Err(FeedError::Config(_))));

        let config =
            PageConfig::from_json(r#"{"page":"diet_upload","food_id":"F3","food_name":"Kimbap","date":"2025-05-05"}"#)
                .unwrap();
        assert_eq!(config.date, NaiveDate::from_ymd_opt(2025, 5, 5));
        assert_eq!(config.search_mode(), None);
    }

    #[test]
    fn test_favorites_config() {
        let config = PageConfig::from_json(
            r#"{"page":"favorites","favorites":[{"food_id":"F1","food_name":"Tofu","calorie":80}]}"#,
        )
        .unwrap();
        assert_eq!(config.page, PageKind::Favorites);
        assert_eq!(config.favorites.len(), 1);
        assert_eq!(config.favorites[0].nutrients.calorie, Some(80.0));
    }

    #[test]
    fn test_analysis_config() {
        let config = PageConfig::from_json(
            r#"{"page":"analysis_diet","calories":{"labels":["1/1","1/2"],"data":[1800,2100.5]}}"#,
        )
        .unwrap();
        assert_eq!(config.calories.data, vec![1800.0, 2100.5]);
        assert!(config.categories.is_empty());

        let config = PageConfig::from_json(
            r#"{"page":"analysis_categories","categories":[{"food_category":"Snacks","count":3}]}"#,
        )
        .unwrap();
        assert_eq!(config.categories[0].count, 3);
        assert_eq!(config.search_mode(), None);
    }

    #[test]
    fn test_account_form_config() {
        let config = PageConfig::from_json(
            r#"{"page":"password_change","form_action":"/accounts/password/change/","requires_old_password":true}"#,
        )
        .unwrap();
        assert_eq!(config.form_action.as_deref(), Some("/accounts/password/change/"));
        assert!(config.requires_old_password);

        let config = PageConfig::from_json(r#"{"page":"withdraw"}"#).unwrap();
        assert_eq!(config.form_action, None);
        assert!(!config.requires_old_password);
    }

    #[test]
    fn test_year_month_fallback() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let config = PageConfig::from_json(r#"{"page":"diets","current_year":2024,"current_month":13}"#).unwrap();
        assert_eq!(config.year_month(today), (2024, 6));

        let config = PageConfig::from_json(r#"{"page":"diets"}"#).unwrap();
        assert_eq!(config.year_month(today), (2025, 6));
    }
}
