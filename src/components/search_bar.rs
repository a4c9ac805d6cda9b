//! Search Bar Component
//!
//! Keyword input; Enter or the button submits.

use leptos::prelude::*;

#[component]
pub fn SearchBar(
    keyword: RwSignal<String>,
    #[prop(into)] on_search: Callback<String>,
) -> impl IntoView {
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_search.run(keyword.get_untracked());
    };

    view! {
        <form class="search-bar" on:submit=submit>
            <input
                id="searchInput"
                type="search"
                placeholder="Search foods..."
                prop:value=move || keyword.get()
                on:input=move |ev| keyword.set(event_target_value(&ev))
            />
            <button type="submit" id="searchButton">"Search"</button>
        </form>
    }
}
