/// 댓글 처리
/// 댓글은 추가만 가능 (수정/삭제 없음), 작성 순서대로 조회
// region:    --- Imports
use crate::auction::model::{Comment, User};
use crate::error::AppError;
use crate::store::{listing_not_found, AuctionStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// endregion: --- Imports

/// 댓글 작성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddCommentCommand {
    pub content: String,
}

/// 댓글 작성
/// 빈 문자열, 공백만 있는 내용은 저장하지 않는다.
pub async fn handle_add_comment(
    store: &dyn AuctionStore,
    user: &User,
    listing_name: &str,
    cmd: AddCommentCommand,
) -> Result<Comment, AppError> {
    if cmd.content.trim().is_empty() {
        debug!("{:<12} --> 빈 댓글 무시: listing={}", "Command", listing_name);
        return Err(AppError::Validation(
            "Comment content must not be empty.".to_string(),
        ));
    }

    let comment = store.add_comment(listing_name, user.id, &cmd.content).await?;
    info!(
        "{:<12} --> 댓글 작성: listing={} user={} id={}",
        "Command", listing_name, user.id, comment.id
    );
    Ok(comment)
}

/// 리스팅 댓글 조회
pub async fn list_comments(
    store: &dyn AuctionStore,
    listing_name: &str,
) -> Result<Vec<Comment>, AppError> {
    let listing = store
        .get_listing(listing_name)
        .await?
        .ok_or_else(|| listing_not_found(listing_name))?;
    store.listing_comments(listing.id).await
}
