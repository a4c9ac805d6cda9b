//! Client-side Refine
//!
//! Sort and range-filter already loaded results without another request.

use std::cmp::Ordering;

use crate::models::FoodResult;
use crate::query::{Filters, SortOrder};

/// Keep results whose nutrient values fall inside every range.
/// Missing values count as 0.
pub fn apply_filters<'a>(foods: impl IntoIterator<Item = &'a FoodResult>, filters: &Filters) -> Vec<&'a FoodResult> {
    foods
        .into_iter()
        .filter(|food| {
            filters
                .iter()
                .all(|(nutrient, range)| range.contains(food.nutrient_or_zero(*nutrient)))
        })
        .collect()
}

/// Stable sort by the order's nutrient. `None` keeps server order.
pub fn sort_foods(foods: &mut [&FoodResult], order: Option<SortOrder>) {
    let Some(order) = order else { return };
    let (nutrient, descending) = order.key();

    foods.sort_by(|a, b| {
        let ord = a
            .nutrient_or_zero(nutrient)
            .partial_cmp(&b.nutrient_or_zero(nutrient))
            .unwrap_or(Ordering::Equal);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// Filter then sort
pub fn refine<'a>(foods: &'a [FoodResult], order: Option<SortOrder>, filters: &Filters) -> Vec<&'a FoodResult> {
    let mut visible = apply_filters(foods, filters);
    sort_foods(&mut visible, order);
    visible
}
