use async_trait::async_trait;
use auction_listings::auction::model::{Bid, Comment, Listing, User};
use auction_listings::config::Config;
use auction_listings::create_app;
use auction_listings::error::AppError;
use auction_listings::identity::USER_ID_HEADER;
use auction_listings::state::AppState;
use auction_listings::store::{AuctionStore, MemoryStore, NewListing};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;

/// 인메모리 저장소로 테스트 서버 생성
fn setup() -> TestServer {
    let state = AppState::new(Config::default(), Arc::new(MemoryStore::new()));
    TestServer::new(create_app(state)).unwrap()
}

fn user_header() -> HeaderName {
    HeaderName::from_static(USER_ID_HEADER)
}

fn user_value(user_id: i64) -> HeaderValue {
    HeaderValue::from_str(&user_id.to_string()).unwrap()
}

/// 테스트용 사용자 생성
async fn register(server: &TestServer, username: &str) -> i64 {
    let response = server
        .post("/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "pw",
            "confirmation": "pw",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let user: Value = response.json();
    assert!(user.get("password_hash").is_none());
    user["id"].as_i64().unwrap()
}

/// 테스트용 리스팅 생성
async fn create_listing(server: &TestServer, user_id: i64, name: &str, starting_bid: i64) {
    let response = server
        .post("/listings")
        .add_header(user_header(), user_value(user_id))
        .json(&json!({
            "name": name,
            "description": format!("{name} for sale"),
            "starting_bid": starting_bid,
        }))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

async fn bid(server: &TestServer, user_id: i64, name: &str, amount: i64) -> (StatusCode, Value) {
    let response = server
        .post(&format!("/listing/{name}/bid"))
        .add_header(user_header(), user_value(user_id))
        .json(&json!({ "amount": amount }))
        .await;
    (response.status_code(), response.json())
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = setup();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn test_vase_bidding_scenario() {
    let server = setup();
    let seller = register(&server, "seller").await;
    let bidder = register(&server, "bidder").await;
    create_listing(&server, seller, "Vase", 20).await;

    let (status, body) = bid(&server, bidder, "Vase", 15).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "LOW_BID");
    assert_eq!(body["error"], "Your bid is too low");

    let (status, _) = bid(&server, bidder, "Vase", 25).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = bid(&server, bidder, "Vase", 25).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "LOW_BID");

    let (status, body) = bid(&server, bidder, "Vase", 30).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_bid"]["value"], "30");

    let detail: Value = server.get("/listing/Vase").await.json();
    assert_eq!(detail["current_price"], "30");
    assert_eq!(detail["bid_count"], 2);

    let history: Value = server.get("/listing/Vase/bids").await.json();
    let values: Vec<_> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["value"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["30", "25"]);
}

#[tokio::test]
async fn test_bid_requires_identity() {
    let server = setup();
    let seller = register(&server, "seller").await;
    create_listing(&server, seller, "Vase", 20).await;

    let response = server
        .post("/listing/Vase/bid")
        .json(&json!({ "amount": 50 }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/listing/Vase/bid")
        .add_header(user_header(), user_value(9999))
        .json(&json!({ "amount": 50 }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bid_on_missing_listing() {
    let server = setup();
    let bidder = register(&server, "bidder").await;
    let (status, body) = bid(&server, bidder, "Lamp", 50).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_comments_ignore_blank_content() {
    let server = setup();
    let user = register(&server, "commenter").await;
    create_listing(&server, user, "Vase", 20).await;

    for content in ["", "   "] {
        let response = server
            .post("/listing/Vase/comment")
            .add_header(user_header(), user_value(user))
            .json(&json!({ "content": content }))
            .await;
        response.assert_status_ok();
        let comments: Value = response.json();
        assert_eq!(comments.as_array().unwrap().len(), 0);
    }

    for content in ["first", "hello"] {
        server
            .post("/listing/Vase/comment")
            .add_header(user_header(), user_value(user))
            .json(&json!({ "content": content }))
            .await
            .assert_status_ok();
    }

    let detail: Value = server.get("/listing/Vase").await.json();
    let comments = detail["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "first");
    assert_eq!(comments[1]["content"], "hello");
}

#[tokio::test]
async fn test_watchlist_toggle_is_idempotent() {
    let server = setup();
    let user = register(&server, "watcher").await;
    create_listing(&server, user, "Vase", 20).await;

    for _ in 0..2 {
        let response = server
            .post("/watchlist/Vase/add")
            .add_header(user_header(), user_value(user))
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/listing/Vase"
        );
    }

    let watched: Value = server
        .get("/watchlist")
        .add_header(user_header(), user_value(user))
        .await
        .json();
    assert_eq!(watched.as_array().unwrap().len(), 1);
    assert_eq!(watched[0]["name"], "Vase");

    let detail: Value = server
        .get("/listing/Vase")
        .add_header(user_header(), user_value(user))
        .await
        .json();
    assert_eq!(detail["watched"], true);

    for _ in 0..2 {
        server
            .post("/watchlist/Vase/remove")
            .add_header(user_header(), user_value(user))
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    let watched: Value = server
        .get("/watchlist")
        .add_header(user_header(), user_value(user))
        .await
        .json();
    assert!(watched.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_watchlist_redirects_anonymous_callers() {
    let server = setup();
    let response = server.get("/watchlist").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn test_duplicate_registration_and_listing() {
    let server = setup();
    let user = register(&server, "alice").await;

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "password": "pw",
            "confirmation": "pw",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "Username already taken.");

    create_listing(&server, user, "Vase", 20).await;
    let response = server
        .post("/listings")
        .add_header(user_header(), user_value(user))
        .json(&json!({ "name": "Vase", "starting_bid": 5 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login() {
    let server = setup();
    let user = register(&server, "bob").await;

    let response = server
        .post("/login")
        .json(&json!({ "username": "bob", "password": "pw" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"].as_i64(), Some(user));

    let response = server
        .post("/login")
        .json(&json!({ "username": "bob", "password": "nope" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_index_lists_newest_first() {
    let server = setup();
    let user = register(&server, "seller").await;
    create_listing(&server, user, "Vase", 20).await;
    create_listing(&server, user, "Lamp", 10).await;

    let listings: Value = server.get("/").await.json();
    let names: Vec<_> = listings
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Lamp", "Vase"]);
    assert_eq!(listings[0]["image"], "/images/default.png");
}

#[tokio::test]
async fn test_amounts_outside_the_money_column_are_rejected() {
    let server = setup();
    let seller = register(&server, "seller").await;
    let bidder = register(&server, "bidder").await;

    let response = server
        .post("/listings")
        .add_header(user_header(), user_value(seller))
        .json(&json!({ "name": "Vase", "starting_bid": "20.001" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION");

    create_listing(&server, seller, "Vase", 20).await;
    let (status, _) = bid(&server, bidder, "Vase", 25).await;
    assert_eq!(status, StatusCode::OK);

    for amount in [json!("25.004"), json!(100_000_000_000_i64)] {
        let response = server
            .post("/listing/Vase/bid")
            .add_header(user_header(), user_value(bidder))
            .json(&json!({ "amount": amount }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION");
    }

    let detail: Value = server.get("/listing/Vase").await.json();
    assert_eq!(detail["current_price"], "25");
    assert_eq!(detail["bid_count"], 1);
}

/// 모든 조회가 데이터베이스 오류로 실패하는 저장소
struct UnavailableStore;

fn unavailable<T>() -> Result<T, AppError> {
    Err(AppError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl AuctionStore for UnavailableStore {
    async fn create_user(&self, _: &str, _: &str, _: &str) -> Result<User, AppError> {
        unavailable()
    }

    async fn get_user(&self, _: i64) -> Result<Option<User>, AppError> {
        unavailable()
    }

    async fn find_user_by_username(&self, _: &str) -> Result<Option<User>, AppError> {
        unavailable()
    }

    async fn create_listing(&self, _: NewListing) -> Result<Listing, AppError> {
        unavailable()
    }

    async fn get_listing(&self, _: &str) -> Result<Option<Listing>, AppError> {
        unavailable()
    }

    async fn all_listings(&self) -> Result<Vec<Listing>, AppError> {
        unavailable()
    }

    async fn place_bid(&self, _: &str, _: i64, _: Decimal) -> Result<Bid, AppError> {
        unavailable()
    }

    async fn listing_bids(&self, _: i64) -> Result<Vec<Bid>, AppError> {
        unavailable()
    }

    async fn add_to_watchlist(&self, _: i64, _: &str) -> Result<bool, AppError> {
        unavailable()
    }

    async fn remove_from_watchlist(&self, _: i64, _: &str) -> Result<bool, AppError> {
        unavailable()
    }

    async fn watched_listings(&self, _: i64) -> Result<Vec<Listing>, AppError> {
        unavailable()
    }

    async fn is_watching(&self, _: i64, _: i64) -> Result<bool, AppError> {
        unavailable()
    }

    async fn add_comment(&self, _: &str, _: i64, _: &str) -> Result<Comment, AppError> {
        unavailable()
    }

    async fn listing_comments(&self, _: i64) -> Result<Vec<Comment>, AppError> {
        unavailable()
    }
}

#[tokio::test]
async fn test_optional_identity_surfaces_store_failures() {
    let state = AppState::new(Config::default(), Arc::new(UnavailableStore));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server
        .get("/watchlist")
        .add_header(user_header(), user_value(1))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "INTERNAL");

    server
        .get("/listing/Vase")
        .add_header(user_header(), user_value(1))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    // 헤더가 없으면 저장소를 조회하지 않는다
    let response = server.get("/watchlist").await;
    response.assert_status(StatusCode::SEE_OTHER);

    // 형식이 틀린 헤더는 익명 요청으로 취급한다
    let response = server
        .get("/watchlist")
        .add_header(user_header(), HeaderValue::from_static("abc"))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}
