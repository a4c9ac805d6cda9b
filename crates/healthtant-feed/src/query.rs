//! Search Query
//!
//! Keyword validation and the query string sent to `/search/{mode}/`.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};
use crate::models::Nutrient;

/// Results per page requested from the server
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Characters left unescaped in query values (RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Which search endpoint a feed talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Normal,
    Advanced,
}

impl SearchMode {
    pub fn path(&self) -> &'static str {
        match self {
            SearchMode::Normal => "/search/normal/",
            SearchMode::Advanced => "/search/advanced/",
        }
    }
}

/// Server-side sort orders; the wire value is the label the server matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "단백질이 많은")]
    ProteinHigh,
    #[serde(rename = "당이 적은")]
    SugarLow,
    #[serde(rename = "포화지방이 적은")]
    SaturatedFatLow,
    #[serde(rename = "나트륨이 적은")]
    SodiumLow,
    #[serde(rename = "열량이 많은")]
    CaloriesHigh,
    #[serde(rename = "열량이 적은")]
    CaloriesLow,
}

/// Label for "no order"
pub const DEFAULT_ORDER_LABEL: &str = "기본순";

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::ProteinHigh,
        SortOrder::SugarLow,
        SortOrder::SaturatedFatLow,
        SortOrder::SodiumLow,
        SortOrder::CaloriesHigh,
        SortOrder::CaloriesLow,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::ProteinHigh => "단백질이 많은",
            SortOrder::SugarLow => "당이 적은",
            SortOrder::SaturatedFatLow => "포화지방이 적은",
            SortOrder::SodiumLow => "나트륨이 적은",
            SortOrder::CaloriesHigh => "열량이 많은",
            SortOrder::CaloriesLow => "열량이 적은",
        }
    }

    /// Parse a wire label. The default label and unknown labels mean no order.
    pub fn from_param(value: &str) -> Option<SortOrder> {
        SortOrder::ALL.into_iter().find(|o| o.as_param() == value.trim())
    }

    /// Nutrient sorted on, and whether larger values come first
    pub fn key(&self) -> (Nutrient, bool) {
        match self {
            SortOrder::ProteinHigh => (Nutrient::Protein, true),
            SortOrder::SugarLow => (Nutrient::Sugar, false),
            SortOrder::SaturatedFatLow => (Nutrient::SaturatedFat, false),
            SortOrder::SodiumLow => (Nutrient::Salt, false),
            SortOrder::CaloriesHigh => (Nutrient::Calorie, true),
            SortOrder::CaloriesLow => (Nutrient::Calorie, false),
        }
    }
}

/// Nutrients exposed as range filters on the advanced page
pub const FILTER_FIELDS: [Nutrient; 6] = [
    Nutrient::Calorie,
    Nutrient::Protein,
    Nutrient::Fat,
    Nutrient::Carbohydrate,
    Nutrient::Salt,
    Nutrient::Sugar,
];

/// Query-param prefix of a filterable nutrient (`carb_min`, `salt_max`...)
pub fn filter_param(nutrient: Nutrient) -> Option<&'static str> {
    match nutrient {
        Nutrient::Calorie => Some("calorie"),
        Nutrient::Protein => Some("protein"),
        Nutrient::Fat => Some("fat"),
        Nutrient::Carbohydrate => Some("carb"),
        Nutrient::Salt => Some("salt"),
        Nutrient::Sugar => Some("sugar"),
        Nutrient::SaturatedFat => None,
    }
}

/// Inclusive bounds on one nutrient
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

pub type Filters = BTreeMap<Nutrient, Range>;

/// Trim a keyword, rejecting empty input before any request is made
pub fn validate_keyword(raw: &str) -> FeedResult<String> {
    let keyword = raw.trim();
    if keyword.is_empty() {
        return Err(FeedError::EmptyKeyword);
    }
    Ok(keyword.to_string())
}

/// One page request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keyword: String,
    pub page: u32,
    pub page_size: u32,
    pub order: Option<SortOrder>,
    pub filters: Filters,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, page_size: u32) -> Self {
        Self {
            keyword: keyword.into(),
            page: 1,
            page_size,
            order: None,
            filters: Filters::new(),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Key/value pairs in wire order: keyword, page, limit, order, filters
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("keyword".to_string(), self.keyword.clone()),
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), order.as_param().to_string()));
        }
        for (nutrient, range) in &self.filters {
            let Some(prefix) = filter_param(*nutrient) else {
                continue;
            };
            if let Some(min) = range.min {
                pairs.push((format!("{}_min", prefix), min.to_string()));
            }
            if let Some(max) = range.max {
                pairs.push((format!("{}_max", prefix), max.to_string()));
            }
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.to_pairs())
    }
}

/// Percent-encode one URL component (query value or path segment)
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Percent-encode `key=value` pairs joined by `&`
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}
