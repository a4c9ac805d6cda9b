//! DOM Access
//!
//! Everything read from or done to the server-rendered page outside of
//! Leptos views: page config, CSRF token, navigation, the login guard.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use healthtant_feed::config::{APP_ROOT_ELEMENT_ID, PAGE_CONFIG_ELEMENT_ID};
use healthtant_feed::csrf::CsrfSources;
use healthtant_feed::{nav, FeedError, FeedResult, PageConfig};

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Parse the `<script id="page-config" type="application/json">` block
pub fn read_page_config() -> FeedResult<PageConfig> {
    let raw = document()
        .and_then(|doc| doc.get_element_by_id(PAGE_CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .ok_or_else(|| FeedError::Config(format!("#{} not found", PAGE_CONFIG_ELEMENT_ID)))?;
    PageConfig::from_json(&raw)
}

pub fn mount_root() -> Option<web_sys::HtmlElement> {
    document()?
        .get_element_by_id(APP_ROOT_ELEMENT_ID)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

/// Token from the cookie, the form field or the meta tag, in that order
pub fn csrf_token() -> Option<String> {
    let doc = document()?;
    let cookies = doc
        .dyn_ref::<web_sys::HtmlDocument>()
        .and_then(|html| html.cookie().ok())
        .unwrap_or_default();
    let form_field = doc
        .query_selector("[name=csrfmiddlewaretoken]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value());
    let meta = doc
        .query_selector(r#"meta[name="csrf-token"]"#)
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("content"));

    CsrfSources { cookies: &cookies, form_field: form_field.as_deref(), meta: meta.as_deref() }.resolve()
}

pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn pathname() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn navigate(url: &str) {
    if let Some(win) = web_sys::window() {
        if let Err(e) = win.location().set_href(url) {
            log::error!("[DOM] Navigation to {} failed: {:?}", url, e);
        }
    }
}

/// Rewrite the address bar without reloading
pub fn push_history(url: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
            log::warn!("[DOM] History update to {} failed: {:?}", url, e);
        }
    }
}

/// Blocking yes/no dialog; `false` when it can't be shown
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Send anonymous users to the login page (with `?next=`) when they click
/// a link into a signed-in area. Bound once on the document.
pub fn bind_login_guard(is_authenticated: bool) {
    use wasm_bindgen::closure::Closure;

    if is_authenticated {
        return;
    }

    let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(anchor) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest("a[href]").ok().flatten())
        else {
            return;
        };
        let Some(href) = anchor.get_attribute("href") else { return };

        let target = nav::guard_login(false, &href);
        if target != href {
            ev.prevent_default();
            navigate(&target);
        }
    });

    if let Some(doc) = document() {
        if let Err(e) = doc.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
            log::error!("[DOM] Login guard not bound: {:?}", e);
        }
    }
    on_click.forget();
}
