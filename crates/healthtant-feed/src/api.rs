//! Server API
//!
//! The endpoints the pages talk to, behind a trait so the feed can be
//! driven by a fake in tests.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use crate::csrf::CSRF_HEADER;
use crate::error::{FeedError, FeedResult};
use crate::models::{FavoriteResponse, ProductDetail, SearchResponse};
use crate::query::{encode_component, SearchMode, SearchQuery};

#[async_trait(?Send)]
pub trait FoodApi {
    /// `GET /search/{mode}/?keyword=&page=&limit=...`
    async fn search(&self, mode: SearchMode, query: &SearchQuery) -> FeedResult<SearchResponse>;

    /// `POST /products/{id}/like/`, returns the new server-side flag
    async fn toggle_favorite(&self, food_id: &str) -> FeedResult<bool>;

    /// `POST /mypage/food/like/{id}/`, drops the food from the user's favorites
    async fn remove_favorite(&self, food_id: &str) -> FeedResult<()>;

    /// `GET /products/{id}/?format=json`
    async fn product_detail(&self, food_id: &str) -> FeedResult<ProductDetail>;

    /// `DELETE /diets/{id}/`
    async fn delete_diet(&self, diet_id: &str) -> FeedResult<()>;
}

/// reqwest-backed client; on wasm32 this goes through the browser's fetch
#[derive(Debug, Clone)]
pub struct HttpFoodApi {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HttpFoodApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), base_url, csrf_token: None }
    }

    /// Use a preconfigured client (timeouts, proxies)
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        same_origin(builder.header("X-Requested-With", "XMLHttpRequest"))
    }

    /// Attach the CSRF header for state-changing requests
    fn mutating(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = self.request(builder);
        match &self.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => {
                log::warn!("[API] No CSRF token on page; server will likely reject the request");
                builder
            }
        }
    }
}

#[async_trait(?Send)]
impl FoodApi for HttpFoodApi {
    async fn search(&self, mode: SearchMode, query: &SearchQuery) -> FeedResult<SearchResponse> {
        let url = format!("{}?{}", self.url(mode.path()), query.to_query_string());
        log::debug!("[API] GET {}", url);
        let response = self.request(self.client.get(&url)).send().await?;
        Ok(success(response)?.json::<SearchResponse>().await?)
    }

    async fn toggle_favorite(&self, food_id: &str) -> FeedResult<bool> {
        let url = self.url(&format!("/products/{}/like/", segment(food_id)));
        let response = self
            .mutating(self.client.post(&url))
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let body = success(response)?.json::<FavoriteResponse>().await?;
        Ok(body.is_favorite)
    }

    async fn remove_favorite(&self, food_id: &str) -> FeedResult<()> {
        let url = self.url(&format!("/mypage/food/like/{}/", segment(food_id)));
        let response = self
            .mutating(self.client.post(&url))
            .header("Content-Type", "application/json")
            .send()
            .await?;
        success(response)?;
        Ok(())
    }

    async fn product_detail(&self, food_id: &str) -> FeedResult<ProductDetail> {
        let url = self.url(&format!("/products/{}/?format=json", segment(food_id)));
        let response = self.request(self.client.get(&url)).send().await?;
        Ok(success(response)?.json::<ProductDetail>().await?)
    }

    async fn delete_diet(&self, diet_id: &str) -> FeedResult<()> {
        let url = self.url(&format!("/diets/{}/", segment(diet_id)));
        let response = self.mutating(self.client.delete(&url)).send().await?;
        success(response)?;
        Ok(())
    }
}

fn success(response: Response) -> FeedResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FeedError::Status { status: status.as_u16() })
    }
}

fn segment(id: &str) -> String {
    encode_component(id)
}

#[cfg(target_arch = "wasm32")]
fn same_origin(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_same_origin()
}

#[cfg(not(target_arch = "wasm32"))]
fn same_origin(builder: RequestBuilder) -> RequestBuilder {
    builder
}
