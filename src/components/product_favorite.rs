//! Product Favorite Component
//!
//! Favorite toggle on a product detail page. Goes through a feed so the
//! shared favorite cache stays in step with search pages.

use leptos::prelude::*;

use crate::client;
use crate::components::FavoriteButton;
use crate::context::use_app_context;

#[component]
pub fn ProductFavorite() -> impl IntoView {
    let config = use_app_context().config();
    let feed = client::feed_handle(&config);
    // Presence checked when the page config was parsed
    let food_id = config.food_id.clone().unwrap_or_default();
    // The rendered flag is the server's answer; stale cache entries lose
    feed.get_value().observe_favorite(&food_id, config.is_favorite);

    view! {
        <div class="product-favorite">
            <FavoriteButton feed=feed food_id=food_id initial=config.is_favorite />
        </div>
    }
}
