//! Navigation Targets
//!
//! URLs the pages send the browser to.

use chrono::NaiveDate;

use crate::models::DietEntry;
use crate::query::{encode_component, encode_pairs, SortOrder};

/// Areas that need a signed-in user
pub const LOGIN_REQUIRED_PREFIXES: [&str; 3] = ["/diets/", "/analysis/", "/mypage"];

/// Food search used when picking what to log
pub const DIET_SEARCH_URL: &str = "/diets/search/page/";

pub fn product_url(food_id: &str) -> String {
    format!("/products/{}/", encode_component(food_id))
}

/// Meal-logging form prefilled with a food and a date
pub fn register_food_url(food_id: &str, date: NaiveDate) -> String {
    format!(
        "/diets/upload/?{}",
        encode_pairs(&[
            ("food".to_string(), food_id.to_string()),
            ("date".to_string(), date.format("%Y-%m-%d").to_string()),
        ])
    )
}

pub fn diet_edit_url(entry: &DietEntry) -> String {
    format!(
        "/diets/form/{}/?{}",
        encode_component(&entry.diet_id),
        encode_pairs(&[
            ("date".to_string(), entry.date.format("%Y-%m-%d").to_string()),
            ("meal".to_string(), entry.meal.as_str().to_string()),
        ])
    )
}

/// Advanced results URL kept in the address bar after a search
pub fn advanced_results_url(keyword: &str, order: Option<SortOrder>) -> String {
    let mut pairs = vec![("keyword".to_string(), keyword.to_string())];
    if let Some(order) = order {
        pairs.push(("order".to_string(), order.as_param().to_string()));
    }
    format!("/search/advanced/?{}", encode_pairs(&pairs))
}

/// Form action that logs `food_id` as a meal
pub fn diet_create_url(food_id: &str) -> String {
    format!("/diets/{}/", encode_component(food_id))
}

/// Move `delta` months, wrapping across years. Years saturate at the `i32` range.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = i64::from(year) * 12 + i64::from(month.clamp(1, 12)) - 1 + i64::from(delta);
    let year = index.div_euclid(12).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (year, index.rem_euclid(12) as u32 + 1)
}

pub fn month_url(path: &str, year: i32, month: u32) -> String {
    format!("{}?year={}&month={}", path, year, month)
}

pub fn requires_login(target: &str) -> bool {
    LOGIN_REQUIRED_PREFIXES.iter().any(|prefix| target.contains(prefix))
}

/// Where a click on `target` should go for the current user
pub fn guard_login(is_authenticated: bool, target: &str) -> String {
    if is_authenticated || !requires_login(target) {
        target.to_string()
    } else {
        format!("/accounts/login/?{}", encode_pairs(&[("next".to_string(), target.to_string())]))
    }
}
