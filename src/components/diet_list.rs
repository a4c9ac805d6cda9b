//! Diet List Component
//!
//! Month view of logged meals with edit links, delete and month paging.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use healthtant_feed::{nav, FoodApi, Meal};

use crate::client;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::dom;

pub(crate) fn meal_label(meal: Meal) -> &'static str {
    match meal {
        Meal::Breakfast => "Breakfast",
        Meal::Lunch => "Lunch",
        Meal::Dinner => "Dinner",
    }
}

#[component]
pub fn DietList() -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let api = StoredValue::new_local(Rc::new(client::build_api(&config)));
    let entries = RwSignal::new(config.diets.clone());
    let (year, month) = config.year_month(dom::today());

    let go_month = move |delta: i32| {
        let (y, m) = nav::shift_month(year, month, delta);
        dom::navigate(&nav::month_url(&dom::pathname(), y, m));
    };

    let delete = move |diet_id: String| {
        let api = api.get_value();
        spawn_local(async move {
            match api.delete_diet(&diet_id).await {
                Ok(()) => {
                    log::info!("[DIETS] Deleted {}", diet_id);
                    entries.update(|list| list.retain(|e| e.diet_id != diet_id));
                    ctx.notify("Meal deleted.");
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    view! {
        <section class="diet-list">
            <div class="month-nav">
                <button type="button" class="month-prev" on:click=move |_| go_month(-1)>
                    "‹"
                </button>
                <span class="month-label">{format!("{}.{:02}", year, month)}</span>
                <button type="button" class="month-next" on:click=move |_| go_month(1)>
                    "›"
                </button>
            </div>
            <Show when=move || entries.with(|list| list.is_empty())>
                <p class="no-meals">"No meals logged this month."</p>
            </Show>
            <ul class="meal-list">
                <For
                    each=move || entries.get()
                    key=|entry| entry.diet_id.clone()
                    children=move |entry| {
                        let diet_id = entry.diet_id.clone();
                        view! {
                            <li class="meal-item" data-diet-id=entry.diet_id.clone()>
                                <span class="meal-date">{entry.date.format("%Y-%m-%d").to_string()}</span>
                                <span class="meal-slot">{meal_label(entry.meal)}</span>
                                <span class="meal-food">{entry.food_name.clone()}</span>
                                <a class="meal-edit" href=nav::diet_edit_url(&entry)>"Edit"</a>
                                <DeleteConfirmButton
                                    button_class="delete-btn"
                                    on_confirm=Callback::new(move |_: ()| delete(diet_id.clone()))
                                />
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
