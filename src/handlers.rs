// region:    --- Imports
use crate::accounts::{handle_login, handle_register, LoginCommand, RegisterCommand};
use crate::auction::commands::{handle_create_listing, CreateListingCommand};
use crate::bidding::commands::{handle_place_bid, PlaceBidCommand};
use crate::comments::{handle_add_comment, list_comments, AddCommentCommand};
use crate::error::AppError;
use crate::identity::{CurrentUser, MaybeUser};
use crate::query;
use crate::state::AppState;
use crate::watchlist;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

fn listing_location(name: &str) -> String {
    format!("/listing/{name}")
}

// region:    --- Command Handlers

/// 입찰 요청 처리
pub async fn handle_bid(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(name): Path<String>,
    Json(cmd): Json<PlaceBidCommand>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 입찰 요청: listing={} {:?}", "Handler", name, cmd);

    let bid = handle_place_bid(state.store.as_ref(), &name, &user, cmd).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Your bid has been successfully placed",
            "current_bid": bid,
        })),
    )
        .into_response())
}

/// 댓글 작성 요청 처리
/// 내용이 비어 있으면 아무 것도 저장하지 않고 기존 목록을 그대로 반환한다.
pub async fn handle_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(name): Path<String>,
    Json(cmd): Json<AddCommentCommand>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 댓글 작성 요청: listing={}", "Handler", name);

    match handle_add_comment(state.store.as_ref(), &user, &name, cmd).await {
        Ok(_) | Err(AppError::Validation(_)) => {}
        Err(e) => return Err(e),
    }

    let comments = list_comments(state.store.as_ref(), &name).await?;
    Ok(Json(comments).into_response())
}

/// 관심목록 추가
pub async fn handle_watchlist_add(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    watchlist::add_to_watchlist(state.store.as_ref(), &user, &name).await?;
    Ok(Redirect::to(&listing_location(&name)))
}

/// 관심목록 삭제
pub async fn handle_watchlist_remove(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    watchlist::remove_from_watchlist(state.store.as_ref(), &user, &name).await?;
    Ok(Redirect::to(&listing_location(&name)))
}

/// 리스팅 생성
pub async fn handle_create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(cmd): Json<CreateListingCommand>,
) -> Result<Redirect, AppError> {
    info!("{:<12} --> 리스팅 생성 요청: {:?}", "Handler", cmd);
    handle_create_listing(state.store.as_ref(), &user, cmd).await?;
    Ok(Redirect::to("/"))
}

/// 회원 가입
pub async fn handle_register_user(
    State(state): State<Arc<AppState>>,
    Json(cmd): Json<RegisterCommand>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 회원 가입 요청: {}", "Handler", cmd.username);
    let user = handle_register(state.store.as_ref(), cmd).await?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

/// 로그인
pub async fn handle_login_user(
    State(state): State<Arc<AppState>>,
    Json(cmd): Json<LoginCommand>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 로그인 요청: {}", "Handler", cmd.username);
    let user = handle_login(state.store.as_ref(), cmd).await?;
    Ok(Json(user).into_response())
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 헬스 체크
pub async fn handle_health() -> &'static str {
    "ok"
}

/// 모든 리스팅 조회
pub async fn handle_get_listings(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let listings = query::handlers::get_all_listings(state.store.as_ref()).await?;
    Ok(Json(listings).into_response())
}

/// 리스팅 상세 조회
pub async fn handle_get_listing(
    State(state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let detail =
        query::handlers::get_listing_detail(state.store.as_ref(), &name, viewer.as_ref()).await?;
    Ok(Json(detail).into_response())
}

/// 리스팅 입찰 이력 조회
pub async fn handle_get_listing_bids(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let bids = query::handlers::get_listing_bids(state.store.as_ref(), &name).await?;
    Ok(Json(bids).into_response())
}

/// 관심목록 조회
/// 요청자를 알 수 없으면 메인 페이지로 이동
pub async fn handle_get_watchlist(
    State(state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Response, AppError> {
    let Some(user) = viewer else {
        info!("{:<12} --> 관심목록: 미인증 요청, / 로 이동", "Handler");
        return Ok(Redirect::to("/").into_response());
    };

    let listings = watchlist::list_watched(state.store.as_ref(), &user).await?;
    Ok(Json(listings).into_response())
}

// endregion: --- Query Handlers
