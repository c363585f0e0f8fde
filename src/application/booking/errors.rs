use thiserror::Error;

use crate::domain::{BookingPeriodError, DecideBookingError};

/// 予約アプリケーション層のエラー
///
/// 「存在しない」と「閲覧・操作権限がない」はどちらも `NotFound` に寄せる。
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 対象が存在しない、または当事者ではない
    #[error("Not found: {0}")]
    NotFound(String),

    /// 終端状態の予約に対する遷移
    #[error("Invalid booking state: {0}")]
    InvalidState(String),

    /// 承認・却下の指定が不正
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// アイテムが貸出不可
    #[error("Booking rejected: {0}")]
    UnavailableItem(String),

    /// 未知の状態フィルタ
    #[error("Unknown state: {0}")]
    UnknownStateFilter(String),

    /// 予約期間の制約違反
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// BookingRepositoryのエラー
    #[error("Booking repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserServiceのエラー
    #[error("User service error")]
    UserServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemServiceのエラー
    #[error("Item service error")]
    ItemServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<BookingPeriodError> for BookingApplicationError {
    fn from(err: BookingPeriodError) -> Self {
        BookingApplicationError::ValidationError(err.to_string())
    }
}

impl From<DecideBookingError> for BookingApplicationError {
    fn from(err: DecideBookingError) -> Self {
        match err {
            DecideBookingError::NotItemOwner => BookingApplicationError::NotFound(
                "only the item owner can decide on a booking".to_string(),
            ),
            DecideBookingError::AlreadyDecided => {
                BookingApplicationError::InvalidState("already decided".to_string())
            }
            DecideBookingError::MissingDecision => {
                BookingApplicationError::InvalidTransition("missing decision".to_string())
            }
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
