//! Account Components
//!
//! Password change/reset form and account withdrawal. Both post natively
//! once the local checks pass.

use leptos::prelude::*;

use healthtant_feed::account::{validate_new_password, validate_withdrawal, PasswordMatch};

use crate::context::use_app_context;
use crate::dom;

#[component]
pub fn PasswordForm() -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let action = config.form_action.clone().unwrap_or_else(dom::pathname);
    let csrf = dom::csrf_token().unwrap_or_default();
    let password1 = RwSignal::new(String::new());
    let password2 = RwSignal::new(String::new());

    let state = move || PasswordMatch::check(&password1.get(), &password2.get());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        if let Err(e) = validate_new_password(&password1.get_untracked(), &password2.get_untracked()) {
            ev.prevent_default();
            ctx.report(&e);
        }
    };

    view! {
        <form id="password-change-form" class="password-form" method="post" action=action on:submit=on_submit>
            <input type="hidden" name="csrfmiddlewaretoken" value=csrf />
            {config.requires_old_password.then(|| view! {
                <input type="password" name="oldpassword" placeholder="Current password" autocomplete="current-password" />
            })}
            <input
                id="password1"
                type="password"
                name="password1"
                placeholder="New password"
                autocomplete="new-password"
                on:input=move |ev| password1.set(event_target_value(&ev))
            />
            <input
                id="password2"
                type="password"
                name="password2"
                placeholder="Confirm new password"
                autocomplete="new-password"
                class:matches=move || state() == PasswordMatch::Matches
                class:differs=move || state() == PasswordMatch::Differs
                on:input=move |ev| password2.set(event_target_value(&ev))
            />
            <button type="submit" class="submit-button" disabled=move || !state().allows_submit()>
                "Change password"
            </button>
        </form>
    }
}

#[component]
pub fn WithdrawForm() -> impl IntoView {
    let ctx = use_app_context();
    let action = ctx.config().form_action.unwrap_or_else(dom::pathname);
    let csrf = dom::csrf_token().unwrap_or_default();
    let agreed = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        if let Err(e) = validate_withdrawal(agreed.get_untracked()) {
            ev.prevent_default();
            ctx.report(&e);
            return;
        }
        if !dom::confirm("Really delete your account? This cannot be undone.") {
            ev.prevent_default();
        }
    };

    view! {
        <form id="withdrawForm" class="withdraw-form" method="post" action=action on:submit=on_submit>
            <input type="hidden" name="csrfmiddlewaretoken" value=csrf />
            <label class="agree-label">
                <input
                    id="agreeCheckbox"
                    type="checkbox"
                    name="agree"
                    on:change=move |ev| agreed.set(event_target_checked(&ev))
                />
                "I understand my data will be deleted."
            </label>
            <button
                type="submit"
                id="submitButton"
                class="submit-button"
                class:active=move || agreed.get()
                disabled=move || !agreed.get()
            >
                "Withdraw"
            </button>
        </form>
    }
}
