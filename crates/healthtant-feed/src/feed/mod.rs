//! Search Result Feed
//!
//! Keyword search against a paginated endpoint, accumulating results,
//! with per-card favorite toggling.
//!
//! The feed is driven from UI event handlers on a single thread. All
//! methods take `&self`; state lives in `RefCell`s that are never held
//! across an `.await`, so one instance can be shared through `Rc`.


use std::cell::RefCell;
use std::collections::HashSet;

use crate::api::FoodApi;
use crate::error::FeedResult;
use crate::favorites::{DurableStore, FavoriteCache};
use crate::models::FoodResult;
use crate::query::{validate_keyword, Filters, SearchMode, SearchQuery, SortOrder, DEFAULT_PAGE_SIZE};
use crate::refine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub mode: SearchMode,
    pub page_size: u32,
}

impl FeedConfig {
    pub fn new(mode: SearchMode, page_size: u32) -> Self {
        Self { mode, page_size: page_size.max(1) }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(SearchMode::Normal, DEFAULT_PAGE_SIZE)
    }
}

/// What a page request did to the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// First page of a new search replaced the list
    Replaced { count: usize },
    /// A later page was appended
    Appended { count: usize },
    /// First page came back empty
    NoResults,
    /// Nothing requested: a request is in flight, or no more pages
    Skipped,
    /// A newer search started while this request was pending; response dropped
    Superseded,
}

/// A loaded result paired with its effective favorite flag
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub food: FoodResult,
    pub is_favorite: bool,
}

#[derive(Debug, Default)]
struct FeedState {
    keyword: Option<String>,
    /// Page number of the next request
    next_page: u32,
    has_more: bool,
    in_flight: bool,
    /// Bumped by every search; stale responses compare unequal
    generation: u64,
    results: Vec<FoodResult>,
    order: Option<SortOrder>,
    filters: Filters,
}

pub struct SearchResultFeed<A, S> {
    api: A,
    config: FeedConfig,
    state: RefCell<FeedState>,
    favorites: RefCell<FavoriteCache<S>>,
    /// Items with a like request pending
    toggling: RefCell<HashSet<String>>,
}

impl<A: FoodApi, S: DurableStore> SearchResultFeed<A, S> {
    pub fn new(api: A, store: S, config: FeedConfig) -> Self {
        Self {
            api,
            config,
            state: RefCell::new(FeedState { next_page: 1, ..Default::default() }),
            favorites: RefCell::new(FavoriteCache::load(store)),
            toggling: RefCell::new(HashSet::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> FeedConfig {
        self.config
    }

    // ========================
    // Pagination
    // ========================

    /// Start a new search. Empty keywords are rejected before any request.
    pub async fn search(&self, keyword: &str) -> FeedResult<PageOutcome> {
        let keyword = validate_keyword(keyword)?;
        {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.keyword = Some(keyword);
            state.next_page = 1;
            state.has_more = true;
            state.in_flight = false;
            state.results.clear();
        }
        self.fetch_next().await
    }

    /// Request the next page unless one is pending or the last page was short
    pub async fn load_more(&self) -> FeedResult<PageOutcome> {
        {
            let state = self.state.borrow();
            if state.in_flight || !state.has_more || state.keyword.is_none() {
                return Ok(PageOutcome::Skipped);
            }
        }
        self.fetch_next().await
    }

    async fn fetch_next(&self) -> FeedResult<PageOutcome> {
        let (query, generation) = {
            let mut state = self.state.borrow_mut();
            let Some(keyword) = state.keyword.clone() else {
                return Ok(PageOutcome::Skipped);
            };
            state.in_flight = true;
            let mut query = SearchQuery::new(keyword, self.config.page_size).with_page(state.next_page);
            query.order = state.order;
            query.filters = state.filters.clone();
            (query, state.generation)
        };

        log::debug!("[FEED] Loading page {} for '{}'", query.page, query.keyword);
        let response = self.api.search(self.config.mode, &query).await;

        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            log::debug!("[FEED] Dropping stale page {} for '{}'", query.page, query.keyword);
            return Ok(PageOutcome::Superseded);
        }
        state.in_flight = false;

        let response = response.map_err(|e| {
            log::error!("[FEED] Page {} failed: {}", query.page, e);
            e
        })?;

        let received = response.foods.len();
        if received < self.config.page_size as usize {
            state.has_more = false;
        }
        state.next_page = query.page + 1;

        self.favorites.borrow_mut().reconcile(&response.foods);

        // Rows can shift between pages while paginating; keep one row per food
        let mut seen: HashSet<String> = state.results.iter().map(|f| f.food_id.clone()).collect();
        let fresh: Vec<FoodResult> = response
            .foods
            .into_iter()
            .filter(|f| seen.insert(f.food_id.clone()))
            .collect();
        if fresh.len() < received {
            log::debug!("[FEED] Dropped {} repeated results on page {}", received - fresh.len(), query.page);
        }
        let count = fresh.len();
        state.results.extend(fresh);
        log::info!("[FEED] Page {}: {} results (more: {})", query.page, count, state.has_more);

        Ok(match (query.page, count) {
            (1, 0) => PageOutcome::NoResults,
            (1, count) => PageOutcome::Replaced { count },
            (_, count) => PageOutcome::Appended { count },
        })
    }

    pub fn keyword(&self) -> Option<String> {
        self.state.borrow().keyword.clone()
    }

    /// Last page loaded (0 before the first successful page)
    pub fn page(&self) -> u32 {
        self.state.borrow().next_page.saturating_sub(1)
    }

    pub fn has_more(&self) -> bool {
        let state = self.state.borrow();
        state.keyword.is_some() && state.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().in_flight
    }

    pub fn len(&self) -> usize {
        self.state.borrow().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().results.is_empty()
    }

    // ========================
    // Refine
    // ========================

    pub fn order(&self) -> Option<SortOrder> {
        self.state.borrow().order
    }

    pub fn filters(&self) -> Filters {
        self.state.borrow().filters.clone()
    }

    /// Applies to loaded results now and is sent with later page requests
    pub fn set_order(&self, order: Option<SortOrder>) {
        self.state.borrow_mut().order = order;
    }

    pub fn set_filters(&self, filters: Filters) {
        let filters = filters.into_iter().filter(|(_, range)| !range.is_empty()).collect();
        self.state.borrow_mut().filters = filters;
    }

    pub fn reset_refine(&self) {
        let mut state = self.state.borrow_mut();
        state.order = None;
        state.filters.clear();
    }

    /// Loaded results after client-side filter and sort
    pub fn visible(&self) -> Vec<FeedItem> {
        let state = self.state.borrow();
        let favorites = self.favorites.borrow();
        refine::refine(&state.results, state.order, &state.filters)
            .into_iter()
            .map(|food| FeedItem { is_favorite: favorites.is_favorite(&food.food_id), food: food.clone() })
            .collect()
    }

    // ========================
    // Favorites
    // ========================

    pub fn is_favorite(&self, food_id: &str) -> bool {
        self.favorites.borrow().is_favorite(food_id)
    }

    pub fn is_toggling(&self, food_id: &str) -> bool {
        self.toggling.borrow().contains(food_id)
    }

    /// Ask the server to flip the flag and cache what it answers.
    /// On failure the cached state is left untouched.
    pub async fn toggle_favorite(&self, food_id: &str) -> FeedResult<bool> {
        if !self.toggling.borrow_mut().insert(food_id.to_string()) {
            return Ok(self.is_favorite(food_id));
        }

        let result = self.api.toggle_favorite(food_id).await;
        self.toggling.borrow_mut().remove(food_id);

        let is_favorite = result.map_err(|e| {
            log::error!("[FEED] Favorite toggle for {} failed: {}", food_id, e);
            e
        })?;
        self.favorites.borrow_mut().set(food_id, is_favorite);
        Ok(is_favorite)
    }

    /// Adopt a flag the server rendered into the page (product detail)
    pub fn observe_favorite(&self, food_id: &str, is_favorite: bool) {
        self.favorites.borrow_mut().observe(food_id, is_favorite);
    }

    /// Un-favorite from the favorites list. `Ok(false)` means a request for
    /// this food was already pending and nothing was sent.
    pub async fn remove_favorite(&self, food_id: &str) -> FeedResult<bool> {
        if !self.toggling.borrow_mut().insert(food_id.to_string()) {
            return Ok(false);
        }

        let result = self.api.remove_favorite(food_id).await;
        self.toggling.borrow_mut().remove(food_id);

        result.map_err(|e| {
            log::error!("[FEED] Removing favorite {} failed: {}", food_id, e);
            e
        })?;
        self.favorites.borrow_mut().set(food_id, false);
        Ok(true)
    }

    /// Letter grade shown on a card, loaded lazily per result
    pub async fn product_grade(&self, food_id: &str) -> FeedResult<Option<String>> {
        let detail = self.api.product_detail(food_id).await?;
        Ok(detail.letter_grade.filter(|g| !g.trim().is_empty()))
    }
}
