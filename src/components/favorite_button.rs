//! Favorite Button Component
//!
//! Heart toggle shared by result cards, the product page and the
//! favorites list. The pressed state always comes from the server's answer.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::client::FeedHandle;
use crate::context::use_app_context;
use crate::dom;

#[component]
pub fn FavoriteButton(
    feed: FeedHandle,
    #[prop(into)] food_id: String,
    initial: bool,
    /// When set, un-favoriting asks this question first and goes through
    /// the favorites-list endpoint
    #[prop(optional, into)]
    confirm_removal: Option<String>,
    /// Called with the food id after a confirmed removal
    #[prop(optional)]
    on_removed: Option<Callback<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let pressed = RwSignal::new(initial);
    let pending = RwSignal::new(false);
    let id = StoredValue::new(food_id);
    let confirm_removal = StoredValue::new(confirm_removal);

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        // Cards navigate on click
        ev.stop_propagation();
        if pending.get_untracked() {
            return;
        }

        let removal = match confirm_removal.get_value() {
            Some(question) if pressed.get_untracked() => {
                if !dom::confirm(&question) {
                    return;
                }
                true
            }
            _ => false,
        };
        pending.set(true);

        let feed = feed.get_value();
        let food_id = id.get_value();
        spawn_local(async move {
            if removal {
                let removed = feed.remove_favorite(&food_id).await;
                pending.set(false);
                match removed {
                    Ok(true) => {
                        pressed.set(false);
                        if let Some(on_removed) = on_removed {
                            on_removed.run(food_id);
                        }
                    }
                    Ok(false) => {}
                    Err(e) => ctx.report(&e),
                }
                return;
            }

            match feed.toggle_favorite(&food_id).await {
                Ok(is_favorite) => pressed.set(is_favorite),
                Err(e) => ctx.report(&e),
            }
            pending.set(false);
        });
    };

    view! {
        <button
            type="button"
            class="favorite-btn"
            class:active=move || pressed.get()
            data-product-id=id.get_value()
            data-is-favorite=move || pressed.get().to_string()
            aria-pressed=move || pressed.get().to_string()
            aria-label="Favorite"
            disabled=move || pending.get()
            on:click=on_click
        >
            <span class="heart-path" aria-hidden="true">"♥"</span>
        </button>
    }
}
