use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::booking::BookingView;
use crate::domain::{
    commands::{CreateBooking, ListBookings, PageRequest},
    value_objects::{ItemId, UserId},
};

/// ページサイズの既定値
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 予約申込リクエスト（POST /bookings）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CreateBookingRequest {
    pub fn to_command(&self, requester_id: UserId) -> CreateBooking {
        CreateBooking {
            requester_id,
            item_id: ItemId::from_uuid(self.item_id),
            start: self.start,
            end: self.end,
        }
    }
}

/// 承認・却下のクエリパラメータ（PATCH /bookings/:id）
#[derive(Debug, Deserialize)]
pub struct DecideBookingQuery {
    pub approved: Option<bool>,
}

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// 状態フィルタ（既定値: ALL）
    pub state: Option<String>,
    /// 先頭からの件数（既定値: 0）
    pub from: Option<u32>,
    /// ページサイズ（既定値: 10、1以上）
    pub size: Option<u32>,
}

impl ListBookingsQuery {
    /// from / size からページ番号を算出してクエリに変換する
    pub fn to_query(&self, viewer_id: UserId) -> Result<ListBookings, String> {
        let from = self.from.unwrap_or(0);
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 {
            return Err("size must be positive".to_string());
        }

        Ok(ListBookings {
            viewer_id,
            state: self.state.clone().unwrap_or_else(|| "ALL".to_string()),
            page: PageRequest::new(from / size, size),
        })
    }
}

/// 予約者の概要
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// アイテムの概要
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
}

/// 予約レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub booker: UserResponse,
    pub item: ItemResponse,
    pub status: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<BookingView> for BookingResponse {
    fn from(view: BookingView) -> Self {
        Self {
            id: view.booking_id.value(),
            booker: UserResponse {
                id: view.booker.user_id.value(),
                name: view.booker.name,
                email: view.booker.email,
            },
            item: ItemResponse {
                id: view.item.item_id.value(),
                name: view.item.name,
                description: view.item.description,
                available: view.item.available,
            },
            status: view.status.as_str().to_string(),
            start: view.start,
            end: view.end,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
