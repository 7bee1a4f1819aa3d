use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// 사용자 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// 상품(리스팅) 모델
// current_bid_value 는 current_bid_id 가 가리키는 입찰의 금액 (JOIN)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub starting_bid: Decimal,
    pub current_bid_id: Option<i64>,
    pub current_bid_value: Option<Decimal>,
    pub creator_id: i64,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// 새 입찰이 반드시 초과해야 하는 금액 (현재 입찰가, 없으면 시작가)
    pub fn floor(&self) -> Decimal {
        self.current_bid_value.unwrap_or(self.starting_bid)
    }
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub listing_id: i64,
    pub buyer_id: i64,
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
}

// 관심목록 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: i64,
    pub created_at: DateTime<Utc>,
}

// 댓글 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
