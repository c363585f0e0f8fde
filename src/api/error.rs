use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと、リクエスト自体の不備をHTTPレスポンスにマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(BookingApplicationError),
    /// ヘッダーやクエリパラメータの不備
    BadRequest(String),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

// 抽出時のリジェクションはすべて 400 とし、本文は他のエラーと同じ形式で返す
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Application(err) => match err {
                // 404 Not Found - 存在しない、または当事者ではない
                BookingApplicationError::NotFound(ref msg) => {
                    tracing::warn!("Search error: {}", msg);
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }

                // 400 Bad Request - 入力・遷移の不備
                BookingApplicationError::InvalidState(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_STATE", err.to_string())
                }
                BookingApplicationError::InvalidTransition(_) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_TRANSITION",
                    err.to_string(),
                ),
                BookingApplicationError::ValidationError(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                BookingApplicationError::UnknownStateFilter(_) => {
                    (StatusCode::BAD_REQUEST, "UNKNOWN_STATE", err.to_string())
                }

                // 409 Conflict - アイテムが貸出不可
                BookingApplicationError::UnavailableItem(_) => {
                    (StatusCode::CONFLICT, "ITEM_UNAVAILABLE", err.to_string())
                }

                // 500 Internal Server Error - システム障害
                // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
                BookingApplicationError::RepositoryError(ref e) => {
                    tracing::error!("Booking repository error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "REPOSITORY_ERROR",
                        "Failed to access bookings".to_string(),
                    )
                }
                BookingApplicationError::UserServiceError(ref e) => {
                    tracing::error!("User service error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "USER_SERVICE_ERROR",
                        "User service error".to_string(),
                    )
                }
                BookingApplicationError::ItemServiceError(ref e) => {
                    tracing::error!("Item service error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "ITEM_SERVICE_ERROR",
                        "Item service error".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
