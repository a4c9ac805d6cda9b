//! Feed Models
//!
//! DTOs matching the server's JSON. The client treats them as read-only.

use serde::{Deserialize, Deserializer, Serialize};

/// One search hit (matches the server's `foods[]` entries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodResult {
    pub food_id: String,
    pub food_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub food_img: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub nutri_score_grade: Option<String>,
    #[serde(flatten)]
    pub nutrients: Nutrients,
}

/// Nutrient columns carried by search results.
///
/// The server sends these either as numbers or as numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    #[serde(default, deserialize_with = "lenient_number")]
    pub calorie: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbohydrate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub salt: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sugar: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub saturated_fat: Option<f64>,
}

/// Nutrient a result can be filtered or sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calorie,
    Protein,
    Fat,
    Carbohydrate,
    Salt,
    Sugar,
    SaturatedFat,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::Calorie => self.calorie,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbohydrate => self.carbohydrate,
            Nutrient::Salt => self.salt,
            Nutrient::Sugar => self.sugar,
            Nutrient::SaturatedFat => self.saturated_fat,
        }
    }
}

impl FoodResult {
    /// Nutrient value used by refine; missing values count as 0
    pub fn nutrient_or_zero(&self, nutrient: Nutrient) -> f64 {
        self.nutrients.get(nutrient).unwrap_or(0.0)
    }
}

/// `GET /search/{mode}/` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub foods: Vec<FoodResult>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub search_token: Option<String>,
}

/// `POST /products/{id}/like/` response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub is_favorite: bool,
}

/// `GET /products/{id}/?format=json` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub food_id: String,
    pub food_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub food_img: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calorie: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbohydrate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sodium: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub nutrition_score: Option<f64>,
    #[serde(default)]
    pub letter_grade: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Meal slot of a diet entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// Value the diet form posts; the server stores meals by these labels
    pub fn form_value(&self) -> &'static str {
        match self {
            Meal::Breakfast => "아침",
            Meal::Lunch => "점심",
            Meal::Dinner => "저녁",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }
}

/// Logged meal, templated into the diets page by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietEntry {
    pub diet_id: String,
    pub food_id: String,
    pub food_name: String,
    pub date: chrono::NaiveDate,
    pub meal: Meal,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
