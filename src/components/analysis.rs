//! Analysis Components
//!
//! Date-range form, category bar chart and calorie line chart.

use leptos::prelude::*;

use healthtant_feed::analysis::{category_bars, polyline, DateRange, PointMark};
use healthtant_feed::nav;

use crate::context::use_app_context;
use crate::dom;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 240.0;
/// Room around the plot for point markers
const CHART_PAD: f64 = 12.0;

#[component]
pub fn AnalysisDateForm() -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let today = dom::today();
    let initial = DateRange::last_week(today);
    let start = RwSignal::new(initial.start.format("%Y-%m-%d").to_string());
    let end = RwSignal::new(initial.end.format("%Y-%m-%d").to_string());
    let action = config.form_action.clone().unwrap_or_else(dom::pathname);
    let is_authenticated = config.is_authenticated;

    let checked = move || DateRange::parse(&start.get(), &end.get(), today);
    let button_text = move || match checked() {
        Ok(_) => "Analyze".to_string(),
        Err(e) => e.user_message(),
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        if !is_authenticated {
            ev.prevent_default();
            dom::navigate(&nav::guard_login(false, &dom::pathname()));
            return;
        }
        if let Err(e) = DateRange::parse(&start.get_untracked(), &end.get_untracked(), today) {
            ev.prevent_default();
            ctx.report(&e);
        }
    };

    view! {
        <form class="date-selection-form" method="get" action=action on:submit=on_submit>
            <label for="start_date">"From"</label>
            <input
                id="start_date"
                name="start_date"
                type="date"
                prop:max=move || end.get()
                prop:value=move || start.get()
                on:change=move |ev| start.set(event_target_value(&ev))
            />
            <label for="end_date">"To"</label>
            <input
                id="end_date"
                name="end_date"
                type="date"
                prop:min=move || start.get()
                prop:value=move || end.get()
                on:change=move |ev| end.set(event_target_value(&ev))
            />
            <button type="submit" id="analyzeBtn" disabled=move || checked().is_err()>
                {button_text}
            </button>
        </form>
    }
}

#[component]
pub fn CategoryChart() -> impl IntoView {
    let config = use_app_context().config();
    let has_data = !config.categories.is_empty();
    let bars = category_bars(&config.categories);

    view! {
        <div class="chart-surface">
            {(!has_data).then(|| view! { <div class="no-data-message">"Not enough data yet."</div> })}
            <div id="categoryChart" class="bar-chart">
                {bars
                    .into_iter()
                    .map(|bar| {
                        view! {
                            <div class="bar-item">
                                <div class="bar-track" class:empty-bar=!has_data>
                                    <div
                                        class="bar-fill"
                                        class:empty-fill=!has_data
                                        style:height=format!("{}%", bar.percent)
                                    ></div>
                                    {has_data.then(|| view! { <div class="bar-tooltip">{bar.count}</div> })}
                                </div>
                                <div class="bar-label">{bar.label}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn CalorieChart() -> impl IntoView {
    let config = use_app_context().config();
    let points = config.calories.points(CHART_WIDTH, CHART_HEIGHT);
    let line = polyline(&points);
    let view_box = format!(
        "{} {} {} {}",
        -CHART_PAD,
        -CHART_PAD,
        CHART_WIDTH + 2.0 * CHART_PAD,
        CHART_HEIGHT + 2.0 * CHART_PAD
    );

    if points.is_empty() {
        return view! { <div class="no-data-message">"No meals logged in this range."</div> }.into_any();
    }

    view! {
        <div class="calorie-chart">
            <svg id="calorieChart" viewBox=view_box preserveAspectRatio="none">
                <polyline class="calorie-line" points=line fill="none" />
                {points
                    .into_iter()
                    .map(|p| {
                        let class = match p.mark {
                            PointMark::Highest => "calorie-point highest",
                            PointMark::Lowest => "calorie-point lowest",
                            PointMark::Normal => "calorie-point",
                        };
                        view! {
                            <circle class=class cx=format!("{:.1}", p.x) cy=format!("{:.1}", p.y) r="6">
                                <title>{format!("{}: {:.0} kcal", p.label, p.value)}</title>
                            </circle>
                        }
                    })
                    .collect_view()}
            </svg>
        </div>
    }
    .into_any()
}
