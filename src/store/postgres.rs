// region:    --- Imports
use super::{listing_not_found, AuctionStore, NewListing};
use crate::auction::model::{Bid, Comment, Listing, User};
use crate::bidding::commands::check_bid;
use crate::database::DatabaseManager;
use crate::error::AppError;
use crate::query::queries;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Postgres Store
/// PostgreSQL 저장소 구현체
pub struct PostgresStore {
    db_manager: Arc<DatabaseManager>,
}

impl PostgresStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

/// 유니크 제약 위반이면 DuplicateKey 로 변환
fn unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateKey(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl AuctionStore for PostgresStore {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(queries::INSERT_USER)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(self.db_manager.pool())
            .await
            .map_err(|e| unique_violation(e, "Username already taken."))
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(queries::GET_USER)
            .bind(user_id)
            .fetch_optional(self.db_manager.pool())
            .await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(queries::GET_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.db_manager.pool())
            .await?)
    }

    async fn create_listing(&self, listing: NewListing) -> Result<Listing, AppError> {
        sqlx::query_as::<_, Listing>(queries::INSERT_LISTING)
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(listing.starting_bid)
            .bind(listing.creator_id)
            .bind(&listing.image)
            .fetch_one(self.db_manager.pool())
            .await
            .map_err(|e| unique_violation(e, "A listing with this name already exists."))
    }

    async fn get_listing(&self, name: &str) -> Result<Option<Listing>, AppError> {
        Ok(sqlx::query_as::<_, Listing>(queries::GET_LISTING)
            .bind(name)
            .fetch_optional(self.db_manager.pool())
            .await?)
    }

    async fn all_listings(&self) -> Result<Vec<Listing>, AppError> {
        Ok(sqlx::query_as::<_, Listing>(queries::GET_ALL_LISTINGS)
            .fetch_all(self.db_manager.pool())
            .await?)
    }

    async fn place_bid(
        &self,
        listing_name: &str,
        bidder_id: i64,
        amount: Decimal,
    ) -> Result<Bid, AppError> {
        let listing_name = listing_name.to_string();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    // 같은 리스팅에 대한 동시 입찰은 이 잠금에서 직렬화된다
                    sqlx::query_scalar::<_, i64>(queries::LOCK_LISTING)
                        .bind(&listing_name)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| listing_not_found(&listing_name))?;

                    // 잠금 이후 새 스냅샷으로 현재 입찰가 조회
                    let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                        .bind(&listing_name)
                        .fetch_one(&mut **tx)
                        .await?;

                    check_bid(&listing, amount)?;

                    let bid = sqlx::query_as::<_, Bid>(queries::INSERT_BID)
                        .bind(listing.id)
                        .bind(bidder_id)
                        .bind(amount)
                        .fetch_one(&mut **tx)
                        .await?;

                    sqlx::query(queries::UPDATE_CURRENT_BID)
                        .bind(bid.id)
                        .bind(listing.id)
                        .execute(&mut **tx)
                        .await?;

                    info!(
                        "{:<12} --> 입찰 저장: listing={} bid={} value={}",
                        "Store", listing.id, bid.id, bid.value
                    );
                    Ok::<_, AppError>(bid)
                })
            })
            .await
    }

    async fn listing_bids(&self, listing_id: i64) -> Result<Vec<Bid>, AppError> {
        Ok(sqlx::query_as::<_, Bid>(queries::GET_LISTING_BIDS)
            .bind(listing_id)
            .fetch_all(self.db_manager.pool())
            .await?)
    }

    async fn add_to_watchlist(&self, user_id: i64, listing_name: &str) -> Result<bool, AppError> {
        let listing_name = listing_name.to_string();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let listing_id = sqlx::query_scalar::<_, i64>(queries::GET_LISTING_ID)
                        .bind(&listing_name)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| listing_not_found(&listing_name))?;

                    // 유니크 제약 (user_id, listing_id) 로 중복 삽입 방지
                    let result = sqlx::query(queries::INSERT_WATCHLIST)
                        .bind(user_id)
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?;

                    debug!(
                        "{:<12} --> 관심목록 추가: user={} listing={} inserted={}",
                        "Store",
                        user_id,
                        listing_id,
                        result.rows_affected()
                    );
                    Ok::<_, AppError>(result.rows_affected() > 0)
                })
            })
            .await
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_name: &str,
    ) -> Result<bool, AppError> {
        let listing_name = listing_name.to_string();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let listing_id = sqlx::query_scalar::<_, i64>(queries::GET_LISTING_ID)
                        .bind(&listing_name)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| listing_not_found(&listing_name))?;

                    let result = sqlx::query(queries::DELETE_WATCHLIST)
                        .bind(user_id)
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?;

                    Ok::<_, AppError>(result.rows_affected() > 0)
                })
            })
            .await
    }

    async fn watched_listings(&self, user_id: i64) -> Result<Vec<Listing>, AppError> {
        Ok(sqlx::query_as::<_, Listing>(queries::GET_WATCHED_LISTINGS)
            .bind(user_id)
            .fetch_all(self.db_manager.pool())
            .await?)
    }

    async fn is_watching(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar::<_, bool>(queries::IS_WATCHING)
            .bind(user_id)
            .bind(listing_id)
            .fetch_one(self.db_manager.pool())
            .await?)
    }

    async fn add_comment(
        &self,
        listing_name: &str,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, AppError> {
        let listing_name = listing_name.to_string();
        let content = content.to_string();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let listing_id = sqlx::query_scalar::<_, i64>(queries::GET_LISTING_ID)
                        .bind(&listing_name)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| listing_not_found(&listing_name))?;

                    let comment = sqlx::query_as::<_, Comment>(queries::INSERT_COMMENT)
                        .bind(listing_id)
                        .bind(user_id)
                        .bind(&content)
                        .fetch_one(&mut **tx)
                        .await?;

                    Ok::<_, AppError>(comment)
                })
            })
            .await
    }

    async fn listing_comments(&self, listing_id: i64) -> Result<Vec<Comment>, AppError> {
        Ok(sqlx::query_as::<_, Comment>(queries::GET_LISTING_COMMENTS)
            .bind(listing_id)
            .fetch_all(self.db_manager.pool())
            .await?)
    }
}
// endregion: --- Postgres Store
