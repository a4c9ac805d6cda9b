//! Diet Upload Component
//!
//! Meal-logging form for one food. Posts natively once a date and exactly
//! one meal are picked; otherwise the submit is blocked with a notice.

use leptos::prelude::*;

use healthtant_feed::upload::{DATE_FIELD, MEAL_FIELD};
use healthtant_feed::{nav, DietUploadForm, Meal};

use super::diet_list::meal_label;
use crate::context::use_app_context;
use crate::dom;

#[component]
pub fn DietUploadPage() -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let form = RwSignal::new(DietUploadForm::new(
        config.food_id.clone().unwrap_or_default(),
        config.date,
        dom::today(),
    ));
    let csrf = dom::csrf_token().unwrap_or_default();
    let food_name = config.food_name.clone().unwrap_or_else(|| "Selected food".to_string());

    let on_submit = move |ev: web_sys::SubmitEvent| match form.with_untracked(|f| f.validate()) {
        Ok(upload) => log::info!(
            "[UPLOAD] Logging {} on {} ({})",
            upload.food_id,
            upload.date,
            upload.meal.as_str()
        ),
        Err(e) => {
            ev.prevent_default();
            ctx.report(&e);
        }
    };

    let meal_options = Meal::ALL
        .into_iter()
        .map(|meal| {
            view! {
                <label class="meal-option">
                    <input
                        type="checkbox"
                        class="meal-check"
                        data-value=meal.form_value()
                        prop:checked=move || form.with(|f| f.meal == Some(meal))
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.toggle_meal(meal, checked));
                        }
                    />
                    <span>{meal_label(meal)}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <form
            id="dietForm"
            class="diet-upload-form"
            method="post"
            action=form.with_untracked(|f| f.action_url())
            on:submit=on_submit
        >
            <input type="hidden" name="csrfmiddlewaretoken" value=csrf />
            <div class="selected-food">
                <span class="food-name">{food_name}</span>
                <button
                    type="button"
                    class="change-food-btn"
                    on:click=move |_| dom::navigate(nav::DIET_SEARCH_URL)
                >
                    "Change"
                </button>
            </div>
            <label for="date">"Date"</label>
            <input
                id="date"
                type="date"
                name=DATE_FIELD
                prop:value=move || form.with(|f| f.date.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.date = value);
                }
            />
            <div class="meal-options">{meal_options}</div>
            <input
                type="hidden"
                id="mealKrHidden"
                name=MEAL_FIELD
                prop:value=move || form.with(|f| f.meal.map(|m| m.form_value()).unwrap_or_default())
            />
            <button type="submit" class="submit-btn">"Save"</button>
        </form>
    }
}
