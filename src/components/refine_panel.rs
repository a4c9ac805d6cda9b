//! Refine Panel Component
//!
//! Sort dropdown and nutrient min/max filters for advanced results.
//! Both are applied locally to the loaded rows and forwarded on later
//! page requests.

use leptos::prelude::*;

use healthtant_feed::query::{DEFAULT_ORDER_LABEL, FILTER_FIELDS};
use healthtant_feed::{Filters, Nutrient, Range, SortOrder};

use crate::client::FeedHandle;
use crate::context::{use_app_context, AppContext};

fn nutrient_label(nutrient: Nutrient) -> &'static str {
    match nutrient {
        Nutrient::Calorie => "Calories (kcal)",
        Nutrient::Protein => "Protein (g)",
        Nutrient::Fat => "Fat (g)",
        Nutrient::Carbohydrate => "Carbohydrate (g)",
        Nutrient::Salt => "Sodium (mg)",
        Nutrient::Sugar => "Sugar (g)",
        Nutrient::SaturatedFat => "Saturated fat (g)",
    }
}

/// Blank means unbounded; unparsable input is reported and ignored
fn parse_bound(ctx: &AppContext, nutrient: Nutrient, side: &str, raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            ctx.notify(format!("Ignoring invalid {} {}.", nutrient_label(nutrient), side));
            None
        }
    }
}

#[component]
pub fn RefinePanel(feed: FeedHandle, #[prop(into)] on_change: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let order = RwSignal::new(feed.get_value().order());
    let fields = StoredValue::new(
        FILTER_FIELDS
            .iter()
            .map(|n| (*n, RwSignal::new(String::new()), RwSignal::new(String::new())))
            .collect::<Vec<_>>(),
    );

    let select_order = move |ev: web_sys::Event| {
        let selected = SortOrder::from_param(&event_target_value(&ev));
        order.set(selected);
        feed.get_value().set_order(selected);
        on_change.run(());
        match selected {
            Some(o) => ctx.notify(format!("Sorted by {}.", o.as_param())),
            None => ctx.notify("Sort cleared."),
        }
    };

    let apply = move |_| {
        let mut filters = Filters::new();
        fields.with_value(|fields| {
            for (nutrient, min, max) in fields {
                let range = Range {
                    min: parse_bound(&ctx, *nutrient, "minimum", &min.get_untracked()),
                    max: parse_bound(&ctx, *nutrient, "maximum", &max.get_untracked()),
                };
                if !range.is_empty() {
                    filters.insert(*nutrient, range);
                }
            }
        });
        log::info!("[REFINE] Applying {} filter(s)", filters.len());
        feed.get_value().set_filters(filters);
        on_change.run(());
    };

    let reset = move |_| {
        fields.with_value(|fields| {
            for (_, min, max) in fields {
                min.set(String::new());
                max.set(String::new());
            }
        });
        order.set(None);
        feed.get_value().reset_refine();
        on_change.run(());
    };

    let filter_rows = fields
        .get_value()
        .into_iter()
        .map(|(nutrient, min, max)| {
            view! {
                <div class="filter-row">
                    <span class="filter-label">{nutrient_label(nutrient)}</span>
                    <input
                        type="number"
                        class="filter-min"
                        placeholder="min"
                        prop:value=move || min.get()
                        on:input=move |ev| min.set(event_target_value(&ev))
                    />
                    <input
                        type="number"
                        class="filter-max"
                        placeholder="max"
                        prop:value=move || max.get()
                        on:input=move |ev| max.set(event_target_value(&ev))
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="refine-panel">
            <select
                id="sortDropdown"
                class="sort-select"
                prop:value=move || order.get().map(|o| o.as_param()).unwrap_or_default()
                on:change=select_order
            >
                <option value="">{DEFAULT_ORDER_LABEL}</option>
                {SortOrder::ALL
                    .iter()
                    .map(|o| view! { <option value=o.as_param()>{o.as_param()}</option> })
                    .collect_view()}
            </select>
            <div class="filter-options">{filter_rows}</div>
            <div class="filter-actions">
                <button type="button" id="applyFilter" on:click=apply>"Apply"</button>
                <button type="button" id="resetFilter" on:click=reset>"Reset"</button>
            </div>
        </div>
    }
}
