//! Server Client Wiring
//!
//! Builds the API client and feeds from the page configuration.

use std::rc::Rc;

use leptos::prelude::*;

use healthtant_feed::{DurableStore, FeedConfig, HttpFoodApi, PageConfig, SearchResultFeed};

use crate::{dom, storage};

/// Feed used by every page binding
pub type PageFeed = SearchResultFeed<HttpFoodApi, Box<dyn DurableStore>>;

/// Copyable handle to a page's feed for use inside views and event handlers
pub type FeedHandle = StoredValue<Rc<PageFeed>, LocalStorage>;

pub fn build_api(config: &PageConfig) -> HttpFoodApi {
    let base_url = config.base_url.clone().unwrap_or_else(dom::origin);
    let csrf = dom::csrf_token();
    if csrf.is_none() {
        log::warn!("[CLIENT] No CSRF token found on page");
    }
    HttpFoodApi::new(base_url).with_csrf_token(csrf)
}

pub fn build_feed(config: &PageConfig) -> Rc<PageFeed> {
    let feed_config = config.feed_config().unwrap_or_default();
    Rc::new(SearchResultFeed::new(build_api(config), storage::favorites_store(), feed_config))
}

pub fn feed_handle(config: &PageConfig) -> FeedHandle {
    StoredValue::new_local(build_feed(config))
}
