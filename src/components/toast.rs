//! Toast Stack
//!
//! Renders the transient notices queued on the app context.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| view! { <div class="toast-message">{notice.message}</div> }
            />
        </div>
    }
}
