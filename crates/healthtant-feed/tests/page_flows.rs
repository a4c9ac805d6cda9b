//! Page Flow Tests
//!
//! Drives the public API the way the page bindings do: config in, feed
//! built from it, favorites shared through one durable store.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;

use healthtant_feed::favorites::FAVORITES_STORAGE_KEY;
use healthtant_feed::models::{Nutrients, SearchResponse};
use healthtant_feed::query::encode_component;
use healthtant_feed::{
    nav, DurableStore, FeedResult, FoodApi, FoodResult, MemoryStore, PageConfig, PageKind,
    PageOutcome, ProductDetail, SearchMode, SearchQuery, SearchResultFeed, SortOrder,
};

/// Two feeds on one page view share the browser's storage
#[derive(Clone, Default)]
struct SharedStore(Rc<MemoryStore>);

impl DurableStore for SharedStore {
    fn read(&self, key: &str) -> FeedResult<Option<String>> {
        self.0.read(key)
    }

    fn write(&self, key: &str, value: &str) -> FeedResult<()> {
        self.0.write(key, value)
    }
}

/// Server with a fixed catalogue and a real favorite flag per food
#[derive(Default)]
struct Server {
    catalogue: usize,
    /// Send `is_favorite` on search results
    reports_favorites: bool,
    liked: RefCell<Vec<String>>,
    modes: RefCell<Vec<SearchMode>>,
    queries: RefCell<Vec<String>>,
}

fn food(n: usize) -> FoodResult {
    FoodResult {
        food_id: format!("P{:03}", n),
        food_name: format!("Product {}", n),
        company_name: None,
        food_img: None,
        is_favorite: None,
        nutri_score_grade: None,
        nutrients: Nutrients { calorie: Some((n * 10) as f64), ..Default::default() },
    }
}

#[async_trait(?Send)]
impl FoodApi for Server {
    async fn search(&self, mode: SearchMode, query: &SearchQuery) -> FeedResult<SearchResponse> {
        self.modes.borrow_mut().push(mode);
        self.queries.borrow_mut().push(query.to_query_string());
        let size = query.page_size as usize;
        let start = ((query.page as usize - 1) * size).min(self.catalogue);
        let end = (start + size).min(self.catalogue);
        let foods = (start..end)
            .map(food)
            .map(|mut f| {
                if self.reports_favorites {
                    f.is_favorite = Some(self.liked.borrow().contains(&f.food_id));
                }
                f
            })
            .collect();
        Ok(SearchResponse { foods, keyword: Some(query.keyword.clone()), search_token: None })
    }

    async fn toggle_favorite(&self, food_id: &str) -> FeedResult<bool> {
        let mut liked = self.liked.borrow_mut();
        if let Some(pos) = liked.iter().position(|id| id == food_id) {
            liked.remove(pos);
            Ok(false)
        } else {
            liked.push(food_id.to_string());
            Ok(true)
        }
    }

    async fn product_detail(&self, food_id: &str) -> FeedResult<ProductDetail> {
        Ok(ProductDetail {
            food_id: food_id.to_string(),
            food_name: "Product".into(),
            food_img: None,
            calorie: None,
            protein: None,
            fat: None,
            carbohydrate: None,
            sodium: None,
            nutrition_score: None,
            letter_grade: Some("A".into()),
            is_favorite: self.liked.borrow().iter().any(|id| id == food_id),
        })
    }

    async fn remove_favorite(&self, food_id: &str) -> FeedResult<()> {
        self.liked.borrow_mut().retain(|id| id != food_id);
        Ok(())
    }

    async fn delete_diet(&self, _diet_id: &str) -> FeedResult<()> {
        Ok(())
    }
}

fn feed_for(config: &PageConfig, server: Server, store: SharedStore) -> SearchResultFeed<Server, SharedStore> {
    SearchResultFeed::new(server, store, config.feed_config().unwrap_or_default())
}

#[tokio::test]
async fn test_diet_search_page_uses_normal_endpoint() {
    let config = PageConfig::from_json(r#"{"page":"diet_search","page_size":10}"#).unwrap();
    let feed = feed_for(&config, Server { catalogue: 25, ..Default::default() }, SharedStore::default());

    assert_eq!(feed.search("rice").await.unwrap(), PageOutcome::Replaced { count: 10 });
    assert_eq!(feed.load_more().await.unwrap(), PageOutcome::Appended { count: 10 });
    assert_eq!(feed.load_more().await.unwrap(), PageOutcome::Appended { count: 5 });
    assert!(!feed.has_more());
    assert_eq!(feed.load_more().await.unwrap(), PageOutcome::Skipped);

    assert_eq!(*feed.api().modes.borrow(), vec![SearchMode::Normal; 3]);
    assert_eq!(feed.api().queries.borrow()[2], "keyword=rice&page=3&limit=10");
}

#[tokio::test]
async fn test_advanced_results_entered_with_order() {
    let config = PageConfig::from_json(
        r#"{"page":"advanced_search","keyword":"snack","order":"열량이 많은"}"#,
    )
    .unwrap();
    let feed = feed_for(&config, Server { catalogue: 5, ..Default::default() }, SharedStore::default());
    feed.set_order(config.sort_order());

    feed.search(config.keyword.as_deref().unwrap_or_default()).await.unwrap();

    let ids: Vec<String> = feed.visible().into_iter().map(|item| item.food.food_id).collect();
    assert_eq!(ids, vec!["P004", "P003", "P002", "P001", "P000"]);
    assert_eq!(*feed.api().modes.borrow(), vec![SearchMode::Advanced]);
    assert_eq!(feed.order(), Some(SortOrder::CaloriesHigh));
    assert_eq!(
        nav::advanced_results_url("snack", feed.order()),
        format!("/search/advanced/?keyword=snack&order={}", encode_component("열량이 많은")),
    );
}

#[tokio::test]
async fn test_product_page_favorite_seen_by_later_search() {
    let store = SharedStore::default();

    let product = PageConfig::from_json(r#"{"page":"product","food_id":"P002"}"#).unwrap();
    let product_feed = feed_for(&product, Server { catalogue: 5, ..Default::default() }, store.clone());
    assert!(product_feed.toggle_favorite("P002").await.unwrap());

    let stored = store.read(FAVORITES_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(stored, r#"{"P002":true}"#);

    // Server omits the flag, so the cached value is used
    let search = PageConfig::from_json(r#"{"page":"search"}"#).unwrap();
    let search_feed = feed_for(&search, Server { catalogue: 5, ..Default::default() }, store.clone());
    search_feed.search("product").await.unwrap();

    let liked: Vec<String> = search_feed
        .visible()
        .into_iter()
        .filter(|item| item.is_favorite)
        .map(|item| item.food.food_id)
        .collect();
    assert_eq!(liked, vec!["P002"]);
}

#[tokio::test]
async fn test_server_flag_wins_over_stale_cache() {
    let store = SharedStore(Rc::new(MemoryStore::with_entry(FAVORITES_STORAGE_KEY, r#"{"P001":true}"#)));
    let config = PageConfig::from_json(r#"{"page":"search"}"#).unwrap();
    let server = Server { catalogue: 3, reports_favorites: true, ..Default::default() };
    let feed = feed_for(&config, server, store.clone());

    feed.search("product").await.unwrap();

    assert!(!feed.is_favorite("P001"));
    let stored = store.read(FAVORITES_STORAGE_KEY).unwrap().unwrap();
    assert!(stored.contains(r#""P001":false"#));
}

#[tokio::test]
async fn test_product_page_clears_stale_favorite() {
    let store = SharedStore(Rc::new(MemoryStore::with_entry(FAVORITES_STORAGE_KEY, r#"{"P001":true}"#)));

    let product =
        PageConfig::from_json(r#"{"page":"product","food_id":"P001","is_favorite":false}"#).unwrap();
    let product_feed = feed_for(&product, Server::default(), store.clone());
    product_feed.observe_favorite(product.food_id.as_deref().unwrap(), product.is_favorite);

    let search = PageConfig::from_json(r#"{"page":"search"}"#).unwrap();
    let search_feed = feed_for(&search, Server { catalogue: 3, ..Default::default() }, store);
    search_feed.search("product").await.unwrap();

    assert!(search_feed.visible().iter().all(|item| !item.is_favorite));
}

#[tokio::test]
async fn test_favorites_page_removal_seen_by_search() {
    let store = SharedStore::default();
    let server = Server { catalogue: 3, ..Default::default() };
    server.liked.borrow_mut().push("P000".into());

    let config = PageConfig::from_json(
        r#"{"page":"favorites","favorites":[{"food_id":"P000","food_name":"Product 0"}]}"#,
    )
    .unwrap();
    let feed = feed_for(&config, server, store.clone());
    for food in &config.favorites {
        feed.observe_favorite(&food.food_id, true);
    }
    assert!(feed.is_favorite("P000"));

    assert!(feed.remove_favorite("P000").await.unwrap());
    assert!(feed.api().liked.borrow().is_empty());

    let search = PageConfig::from_json(r#"{"page":"search"}"#).unwrap();
    let search_feed = feed_for(&search, Server { catalogue: 3, ..Default::default() }, store);
    search_feed.search("product").await.unwrap();
    assert!(!search_feed.is_favorite("P000"));
}

#[test]
fn test_diets_page_month_navigation() {
    let config = PageConfig::from_json(
        r#"{"page":"diets","is_authenticated":true,"current_year":2024,"current_month":1}"#,
    )
    .unwrap();
    assert_eq!(config.page, PageKind::Diets);

    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let (year, month) = config.year_month(today);
    let (y, m) = nav::shift_month(year, month, -1);
    assert_eq!(nav::month_url("/diets/", y, m), "/diets/?year=2023&month=12");
}

#[test]
fn test_anonymous_visitor_redirected_to_login() {
    let config = PageConfig::from_json(r#"{"page":"search"}"#).unwrap();
    assert!(!config.is_authenticated);
    assert_eq!(
        nav::guard_login(config.is_authenticated, "/diets/"),
        "/accounts/login/?next=%2Fdiets%2F"
    );
    assert_eq!(nav::guard_login(config.is_authenticated, "/products/P001/"), "/products/P001/");
}
