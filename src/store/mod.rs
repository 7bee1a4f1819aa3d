/// 저장소 계층
/// 1. PostgresStore: 운영용, 트랜잭션 + 행 잠금 + 유니크 제약으로 원자성 보장
/// 2. MemoryStore: DATABASE_URL 이 없을 때와 테스트용, 단일 뮤텍스로 원자성 보장
// region:    --- Imports
use crate::auction::model::{Bid, Comment, Listing, User};
use crate::error::AppError;
use async_trait::async_trait;
use rust_decimal::Decimal;

// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

// endregion: --- Modules

/// 리스팅 생성 입력 (검증 완료된 값)
#[derive(Debug, Clone)]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub starting_bid: Decimal,
    pub creator_id: i64,
    pub image: String,
}

// region:    --- Auction Store Trait
/// 경매 저장소 트레이트
///
/// 변경 연산은 각각 하나의 원자적 단위로 실행된다.
/// `place_bid` 는 하한선 검사, 입찰 생성, 리스팅 포인터 갱신을 한 번에 처리하며
/// 실패 시 아무 것도 남기지 않는다.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>;

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn create_listing(&self, listing: NewListing) -> Result<Listing, AppError>;

    async fn get_listing(&self, name: &str) -> Result<Option<Listing>, AppError>;

    async fn all_listings(&self) -> Result<Vec<Listing>, AppError>;

    async fn place_bid(
        &self,
        listing_name: &str,
        bidder_id: i64,
        amount: Decimal,
    ) -> Result<Bid, AppError>;

    /// 최신 입찰 먼저
    async fn listing_bids(&self, listing_id: i64) -> Result<Vec<Bid>, AppError>;

    /// 새로 추가되었으면 true
    async fn add_to_watchlist(&self, user_id: i64, listing_name: &str) -> Result<bool, AppError>;

    /// 실제로 삭제되었으면 true
    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_name: &str,
    ) -> Result<bool, AppError>;

    async fn watched_listings(&self, user_id: i64) -> Result<Vec<Listing>, AppError>;

    async fn is_watching(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError>;

    async fn add_comment(
        &self,
        listing_name: &str,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, AppError>;

    /// 작성 순서 (오래된 댓글 먼저)
    async fn listing_comments(&self, listing_id: i64) -> Result<Vec<Comment>, AppError>;
}
// endregion: --- Auction Store Trait

pub(crate) fn listing_not_found(name: &str) -> AppError {
    AppError::NotFound(format!("Listing '{name}'"))
}
