// region:    --- Imports
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::error;

// endregion: --- Imports

// region:    --- App Error
#[derive(Error, Debug)]
pub enum AppError {
    /// 입찰 금액이 현재 하한선 이하
    #[error("Your bid is too low")]
    BidRejected { floor: Decimal },

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    DuplicateKey(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Password hashing failed: {0}")]
    Credentials(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BidRejected { .. } => "LOW_BID",
            AppError::Validation(_) => "VALIDATION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateKey(_) => "DUPLICATE_KEY",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Credentials(_) | AppError::Database(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BidRejected { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Credentials(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{:<12} --> 요청 처리 실패: {:?}", "Error", self);
        }

        let body = match &self {
            AppError::BidRejected { floor } => serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
                "floor": floor,
            }),
            _ => serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
// endregion: --- App Error
