//! HTTP Client Tests
//!
//! Runs `HttpFoodApi` against a one-shot local server and checks what
//! goes over the wire and how responses map to errors.

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use healthtant_feed::{FeedError, FoodApi, HttpFoodApi, SearchMode, SearchQuery};

/// Raw request as received by the server
struct Received {
    request_line: String,
    headers: Vec<(String, String)>,
}

impl Received {
    fn parse(raw: &str) -> Self {
        let mut lines = raw.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers = lines
            .take_while(|line| !line.is_empty())
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
            .collect();
        Self { request_line, headers }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == &name.to_ascii_lowercase())
            .map(|(_, v)| v.as_str())
    }
}

/// Accept one connection, answer with `status` and `body`, return the request
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        // The client may hang up early on error statuses
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        Received::parse(&String::from_utf8_lossy(&raw))
    });

    (base_url, handle)
}

fn api(base_url: &str, csrf: Option<&str>) -> HttpFoodApi {
    let client = Client::builder().no_proxy().build().unwrap();
    HttpFoodApi::new(base_url)
        .with_client(client)
        .with_csrf_token(csrf.map(str::to_string))
}

#[tokio::test]
async fn test_search_request_and_body() {
    let (base_url, server) =
        serve_once("200 OK", r#"{"foods":[{"food_id":"F1","food_name":"Green tea","calorie":"2"}]}"#).await;
    let query = SearchQuery::new("green tea", 30).with_page(2);

    let response = api(&base_url, Some("tok")).search(SearchMode::Normal, &query).await.unwrap();

    assert_eq!(response.foods.len(), 1);
    assert_eq!(response.foods[0].nutrients.calorie, Some(2.0));

    let received = server.await.unwrap();
    assert_eq!(received.request_line, "GET /search/normal/?keyword=green%20tea&page=2&limit=30 HTTP/1.1");
    assert_eq!(received.header("X-Requested-With"), Some("XMLHttpRequest"));
    // Reads never carry the token
    assert_eq!(received.header("X-CSRFToken"), None);
}

#[tokio::test]
async fn test_like_sends_csrf_header() {
    let (base_url, server) = serve_once("200 OK", r#"{"is_favorite":true}"#).await;

    let is_favorite = api(&base_url, Some("abc123")).toggle_favorite("P 1").await.unwrap();

    assert!(is_favorite);
    let received = server.await.unwrap();
    assert_eq!(received.request_line, "POST /products/P%201/like/ HTTP/1.1");
    assert_eq!(received.header("X-CSRFToken"), Some("abc123"));
    assert_eq!(received.header("X-Requested-With"), Some("XMLHttpRequest"));
}

#[tokio::test]
async fn test_delete_diet_sends_csrf_header() {
    let (base_url, server) = serve_once("204 No Content", "").await;

    api(&base_url, Some("abc123")).delete_diet("42").await.unwrap();

    let received = server.await.unwrap();
    assert_eq!(received.request_line, "DELETE /diets/42/ HTTP/1.1");
    assert_eq!(received.header("X-CSRFToken"), Some("abc123"));
}

#[tokio::test]
async fn test_remove_favorite_endpoint() {
    let (base_url, server) = serve_once("200 OK", "{}").await;

    api(&base_url, Some("abc123")).remove_favorite("F9").await.unwrap();

    let received = server.await.unwrap();
    assert_eq!(received.request_line, "POST /mypage/food/like/F9/ HTTP/1.1");
    assert_eq!(received.header("X-CSRFToken"), Some("abc123"));
}

#[tokio::test]
async fn test_mutation_without_token_still_sent() {
    let (base_url, server) = serve_once("403 Forbidden", r#"{"detail":"CSRF"}"#).await;

    let err = api(&base_url, None).toggle_favorite("P1").await.unwrap_err();

    assert_eq!(err, FeedError::Status { status: 403 });
    let received = server.await.unwrap();
    assert_eq!(received.header("X-CSRFToken"), None);
}

#[tokio::test]
async fn test_error_status_is_not_decoded() {
    let (base_url, server) = serve_once("500 Internal Server Error", "<html>oops</html>").await;

    let err = api(&base_url, None)
        .search(SearchMode::Advanced, &SearchQuery::new("milk", 30))
        .await
        .unwrap_err();

    assert_eq!(err, FeedError::Status { status: 500 });
    server.await.unwrap();
}

#[tokio::test]
async fn test_wrong_body_shape_is_decode_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"foods":"none"}"#).await;

    let err = api(&base_url, None)
        .search(SearchMode::Normal, &SearchQuery::new("milk", 30))
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Decode(_)), "got {:?}", err);
    assert!(!err.is_validation());
    server.await.unwrap();
}
