// region:    --- Imports
use crate::auction::model::{Bid, Comment, Listing, User};
use crate::error::AppError;
use crate::store::{listing_not_found, AuctionStore};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

// endregion: --- Imports

// region:    --- View Models
/// 리스팅 상세 화면 모델
#[derive(Debug, Serialize)]
pub struct ListingDetail {
    pub listing: Listing,
    /// 현재 입찰가, 입찰이 없으면 시작가
    pub current_price: Decimal,
    pub bid_count: usize,
    pub comments: Vec<Comment>,
    /// 요청자를 알 수 없으면 None
    pub watched: Option<bool>,
}

// endregion: --- View Models

// region:    --- Query Handlers

/// 모든 리스팅 조회 (최신순)
pub async fn get_all_listings(store: &dyn AuctionStore) -> Result<Vec<Listing>, AppError> {
    info!("{:<12} --> 모든 리스팅 조회", "Query");
    store.all_listings().await
}

/// 리스팅 조회
pub async fn get_listing(store: &dyn AuctionStore, name: &str) -> Result<Listing, AppError> {
    info!("{:<12} --> 리스팅 조회 name: {}", "Query", name);
    store
        .get_listing(name)
        .await?
        .ok_or_else(|| listing_not_found(name))
}

/// 리스팅 상세 조회 (입찰, 댓글, 관심목록 여부 조합)
pub async fn get_listing_detail(
    store: &dyn AuctionStore,
    name: &str,
    viewer: Option<&User>,
) -> Result<ListingDetail, AppError> {
    let listing = get_listing(store, name).await?;
    let bids = store.listing_bids(listing.id).await?;
    let comments = store.listing_comments(listing.id).await?;
    let watched = match viewer {
        Some(user) => Some(store.is_watching(user.id, listing.id).await?),
        None => None,
    };

    Ok(ListingDetail {
        current_price: listing.floor(),
        bid_count: bids.len(),
        listing,
        comments,
        watched,
    })
}

/// 리스팅 입찰 이력 조회 (최신순)
pub async fn get_listing_bids(store: &dyn AuctionStore, name: &str) -> Result<Vec<Bid>, AppError> {
    let listing = get_listing(store, name).await?;
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", listing.id);
    store.listing_bids(listing.id).await
}

// endregion: --- Query Handlers
