//! Food Card Component
//!
//! One search result. Search pages show a grade tag and a favorite
//! button; the diet search page shows a register button instead.

use leptos::prelude::*;
use leptos::task::spawn_local;

use healthtant_feed::{nav, FeedItem};

use crate::client::FeedHandle;
use crate::components::FavoriteButton;
use crate::dom;

const DEFAULT_FOOD_IMG: &str = "/static/diets/images/default-food.jpg";

/// What the card's trailing button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Favorite toggle; clicking the card opens the product page
    Favorite,
    /// Log this food as a meal today
    Register,
}

#[component]
pub fn FoodCard(feed: FeedHandle, item: FeedItem, action: CardAction) -> impl IntoView {
    let FeedItem { food, is_favorite } = item;
    let shows_grade = action == CardAction::Favorite;

    // Grade comes with advanced results; otherwise fetch it per card
    let grade = RwSignal::new(food.nutri_score_grade.clone());
    let grade_done = RwSignal::new(food.nutri_score_grade.is_some());
    if shows_grade && food.nutri_score_grade.is_none() {
        let feed = feed.get_value();
        let food_id = food.food_id.clone();
        spawn_local(async move {
            match feed.product_grade(&food_id).await {
                Ok(letter) => grade.set(letter),
                Err(e) => log::warn!("[CARD] No grade for {}: {}", food_id, e),
            }
            grade_done.set(true);
        });
    }
    let grade_text = move || match (grade.get(), grade_done.get()) {
        (Some(letter), _) => letter,
        (None, false) => "Grading...".to_string(),
        (None, true) => "No grade".to_string(),
    };

    let card_id = food.food_id.clone();
    let on_card_click = move |_: web_sys::MouseEvent| {
        if shows_grade {
            dom::navigate(&nav::product_url(&card_id));
        }
    };

    let trailing = match action {
        CardAction::Favorite => view! {
            <FavoriteButton feed=feed food_id=food.food_id.clone() initial=is_favorite />
        }
        .into_any(),
        CardAction::Register => {
            let food_id = food.food_id.clone();
            view! {
                <button
                    type="button"
                    class="register-btn"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        dom::navigate(&nav::register_food_url(&food_id, dom::today()));
                    }
                >
                    <span class="plus-icon">"+"</span>
                    <span class="register-text">"Register"</span>
                </button>
            }
            .into_any()
        }
    };

    let image = food.food_img.clone().unwrap_or_else(|| DEFAULT_FOOD_IMG.to_string());
    let company = food
        .company_name
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "Manufacturer unknown".to_string());

    view! {
        <div class="food-card" data-food-id=food.food_id.clone() on:click=on_card_click>
            <div class="food-image">
                <img src=image alt=food.food_name.clone() />
            </div>
            <div class="food-info">
                {shows_grade.then(|| view! { <div class="brand-tag">{grade_text}</div> })}
                <h3 class="food-name">{food.food_name.clone()}</h3>
                <p class="food-company">{company}</p>
            </div>
            {trailing}
        </div>
    }
}
