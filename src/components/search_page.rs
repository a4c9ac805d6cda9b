//! Search Page Component
//!
//! Keyword search with a "load more" list of result cards. Used for the
//! normal, advanced and diet-registration search pages.

use leptos::prelude::*;
use leptos::task::spawn_local;

use healthtant_feed::query::validate_keyword;
use healthtant_feed::{nav, FeedItem, FeedResult, PageOutcome};

use crate::client;
use crate::components::{CardAction, FoodCard, RefinePanel, SearchBar};
use crate::context::use_app_context;
use crate::dom;

#[component]
pub fn SearchPage(
    action: CardAction,
    /// Show sort/filter controls and keep the address bar in sync
    #[prop(optional)]
    refine: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let feed = client::feed_handle(&config);
    feed.get_value().set_order(config.sort_order());

    let keyword = RwSignal::new(config.keyword.clone().unwrap_or_default());
    let items = RwSignal::new(Vec::<FeedItem>::new());
    let loading = RwSignal::new(false);
    let has_more = RwSignal::new(false);
    let searched = RwSignal::new(false);
    let no_results = RwSignal::new(false);

    // Copy feed state into signals after every change
    let sync = move || {
        let f = feed.get_value();
        items.set(f.visible());
        has_more.set(f.has_more());
        loading.set(f.is_loading());
    };

    let finish = move |result: FeedResult<PageOutcome>| {
        match result {
            Ok(PageOutcome::NoResults) => {
                searched.set(true);
                no_results.set(true);
            }
            Ok(PageOutcome::Replaced { count }) => {
                log::info!("[SEARCH] {} result(s)", count);
                searched.set(true);
                no_results.set(false);
            }
            Ok(_) => {}
            Err(e) => ctx.report(&e),
        }
        sync();
    };

    let run_search = move |raw: String| {
        if let Err(e) = validate_keyword(&raw) {
            ctx.report(&e);
            return;
        }
        items.set(Vec::new());
        no_results.set(false);
        loading.set(true);

        let f = feed.get_value();
        spawn_local(async move {
            let result = f.search(&raw).await;
            if refine && matches!(result, Ok(PageOutcome::Replaced { .. } | PageOutcome::NoResults)) {
                if let Some(k) = f.keyword() {
                    dom::push_history(&nav::advanced_results_url(&k, f.order()));
                }
            }
            finish(result);
        });
    };

    let load_more = move |_| {
        let f = feed.get_value();
        if f.is_loading() || !f.has_more() {
            return;
        }
        loading.set(true);
        spawn_local(async move {
            let result = f.load_more().await;
            finish(result);
        });
    };

    let on_refine = Callback::new(move |_: ()| sync());

    if !keyword.get_untracked().trim().is_empty() {
        run_search(keyword.get_untracked());
    }

    view! {
        <section class="search-page">
            <SearchBar keyword=keyword on_search=Callback::new(move |k: String| run_search(k)) />
            {refine.then(|| view! { <RefinePanel feed=feed on_change=on_refine /> })}
            <div
                id="searchResults"
                class="search-results"
                style:display=move || if searched.get() || loading.get() { "block" } else { "none" }
            >
                <Show when=move || no_results.get()>
                    <div class="no-results">"No foods matched your search."</div>
                </Show>
                <div id="searchResultsList" class="search-results-list">
                    <For
                        each=move || items.get()
                        key=|item| item.food.food_id.clone()
                        children=move |item| view! { <FoodCard feed=feed item=item action=action /> }
                    />
                </div>
                <Show when=move || loading.get()>
                    <div id="loadingIndicator" class="loading-indicator">"Loading..."</div>
                </Show>
                <Show when=move || has_more.get() && !loading.get()>
                    <div id="loadMoreContainer" class="load-more-container">
                        <button type="button" class="load-more-btn" on:click=load_more>
                            "Load more"
                        </button>
                    </div>
                </Show>
            </div>
        </section>
    }
}
