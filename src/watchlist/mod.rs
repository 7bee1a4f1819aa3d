/// 관심목록 처리
/// 추가와 삭제 모두 멱등: 중복 추가는 무시, 없는 항목 삭제는 no-op
// region:    --- Imports
use crate::auction::model::{Listing, User};
use crate::error::AppError;
use crate::store::AuctionStore;
use tracing::info;

// endregion: --- Imports

/// 관심목록 추가
pub async fn add_to_watchlist(
    store: &dyn AuctionStore,
    user: &User,
    listing_name: &str,
) -> Result<(), AppError> {
    let inserted = store.add_to_watchlist(user.id, listing_name).await?;
    info!(
        "{:<12} --> 관심목록 추가: user={} listing={} new={}",
        "Command", user.id, listing_name, inserted
    );
    Ok(())
}

/// 관심목록 삭제
pub async fn remove_from_watchlist(
    store: &dyn AuctionStore,
    user: &User,
    listing_name: &str,
) -> Result<(), AppError> {
    let removed = store.remove_from_watchlist(user.id, listing_name).await?;
    info!(
        "{:<12} --> 관심목록 삭제: user={} listing={} removed={}",
        "Command", user.id, listing_name, removed
    );
    Ok(())
}

/// 관심목록 조회 (추가한 순서)
pub async fn list_watched(store: &dyn AuctionStore, user: &User) -> Result<Vec<Listing>, AppError> {
    info!("{:<12} --> 관심목록 조회: user={}", "Query", user.id);
    store.watched_listings(user.id).await
}
