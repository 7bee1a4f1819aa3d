/// 요청자 식별
/// 인증은 외부 게이트웨이가 처리하고, 확인된 사용자 아이디를 `x-user-id` 헤더로 전달한다.
// region:    --- Imports
use crate::auction::model::User;
use crate::error::AppError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

// endregion: --- Imports

pub const USER_ID_HEADER: &str = "x-user-id";

/// 인증된 요청자
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let missing = || AppError::Unauthorized("Authentication required.".to_string());

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .ok_or_else(missing)?;

        let user = state.store.get_user(user_id).await?.ok_or_else(missing)?;
        Ok(CurrentUser(user))
    }
}

/// 선택적 요청자
/// 헤더가 없거나, 형식이 틀리거나, 없는 사용자면 `None`.
/// 저장소 오류는 그대로 전달한다.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_request_parts(parts, state).await {
            Ok(CurrentUser(user)) => Ok(MaybeUser(Some(user))),
            Err(AppError::Unauthorized(_)) => Ok(MaybeUser(None)),
            Err(e) => Err(e),
        }
    }
}
