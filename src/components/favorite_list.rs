//! Favorite List Component
//!
//! The signed-in user's favorite foods. Removing one asks first, then
//! drops the row.

use leptos::prelude::*;

use healthtant_feed::{nav, FoodResult, Nutrient};

use crate::client;
use crate::components::FavoriteButton;
use crate::context::use_app_context;
use crate::dom;

const MYPAGE_URL: &str = "/mypage/";

#[component]
pub fn FavoriteList() -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let feed = client::feed_handle(&config);
    {
        // Everything listed here is a favorite on the server
        let f = feed.get_value();
        for food in &config.favorites {
            f.observe_favorite(&food.food_id, true);
        }
    }
    let foods = RwSignal::new(config.favorites.clone());

    let on_removed = Callback::new(move |food_id: String| {
        foods.update(|list| list.retain(|f| f.food_id != food_id));
        ctx.notify("Removed from favorites.");
    });

    view! {
        <section class="favorite-list">
            <div class="favorite-list-header">
                <button type="button" class="back-btn" on:click=move |_| dom::navigate(MYPAGE_URL)>
                    "‹ My page"
                </button>
                <h2>"Favorite foods"</h2>
            </div>
            <Show when=move || foods.with(|list| list.is_empty())>
                <p class="no-favorites">"No favorite foods yet."</p>
            </Show>
            <div class="favorite-items">
                <For
                    each=move || foods.get()
                    key=|food| food.food_id.clone()
                    children=move |food: FoodResult| {
                        let product_id = food.food_id.clone();
                        let calorie = food.nutrient_or_zero(Nutrient::Calorie);
                        view! {
                            <div
                                class="food-card favorite-item"
                                data-food-id=food.food_id.clone()
                                on:click=move |_| dom::navigate(&nav::product_url(&product_id))
                            >
                                <div class="food-image">
                                    <img src=food.food_img.clone().unwrap_or_default() alt=food.food_name.clone() />
                                </div>
                                <div class="food-info">
                                    <h3 class="food-name">{food.food_name.clone()}</h3>
                                    <p class="food-company">{food.company_name.clone().unwrap_or_default()}</p>
                                    <p class="food-calorie">{format!("{:.0} kcal", calorie)}</p>
                                </div>
                                <FavoriteButton
                                    feed=feed
                                    food_id=food.food_id.clone()
                                    initial=true
                                    confirm_removal="Remove this food from your favorites?"
                                    on_removed=on_removed
                                />
                            </div>
                        }
                    }
                />
            </div>
        </section>
    }
}
