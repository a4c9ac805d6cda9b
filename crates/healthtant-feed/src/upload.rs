//! Diet Upload Form
//!
//! State of the meal-logging form: one food, a date (today unless the
//! page says otherwise) and exactly one meal slot. The form posts
//! natively; it is only let through once `validate` passes.

use chrono::NaiveDate;

use crate::error::{FeedError, FeedResult};
use crate::models::Meal;
use crate::nav;

pub const DATE_FIELD: &str = "date";
pub const MEAL_FIELD: &str = "meal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DietUploadForm {
    pub food_id: String,
    /// Raw `<input type="date">` value; browsers send `""` for invalid input
    pub date: String,
    pub meal: Option<Meal>,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DietUpload {
    pub food_id: String,
    pub date: NaiveDate,
    pub meal: Meal,
}

impl DietUploadForm {
    pub fn new(food_id: impl Into<String>, date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            food_id: food_id.into(),
            date: date.unwrap_or(today).format("%Y-%m-%d").to_string(),
            meal: None,
        }
    }

    /// Checking a slot unchecks the others; unchecking the picked one clears it
    pub fn toggle_meal(&mut self, meal: Meal, checked: bool) {
        if checked {
            self.meal = Some(meal);
        } else if self.meal == Some(meal) {
            self.meal = None;
        }
    }

    pub fn validate(&self) -> FeedResult<DietUpload> {
        if self.food_id.trim().is_empty() {
            return Err(FeedError::MissingField("food".to_string()));
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FeedError::MissingField(DATE_FIELD.to_string()))?;
        let meal = self.meal.ok_or_else(|| FeedError::MissingField(MEAL_FIELD.to_string()))?;
        Ok(DietUpload { food_id: self.food_id.trim().to_string(), date, meal })
    }

    pub fn action_url(&self) -> String {
        nav::diet_create_url(self.food_id.trim())
    }
}

impl DietUpload {
    /// Form fields as posted
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            (DATE_FIELD.to_string(), self.date.format("%Y-%m-%d").to_string()),
            (MEAL_FIELD.to_string(), self.meal.form_value().to_string()),
        ]
    }
}
