use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, ItemId, UserId};

/// コマンド：アイテムの予約を申し込む
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub requester_id: UserId,
    pub item_id: ItemId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// コマンド：予約を承認または却下する
///
/// `approve` は三値。`None` は「指定なし」で、承認とも却下とも区別される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideBooking {
    pub actor_id: UserId,
    pub booking_id: BookingId,
    pub approve: Option<bool>,
}

/// ページ指定（ページ番号とページサイズ）
///
/// ページ番号の算出は呼び出し側の責務。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// 先頭からのスキップ件数
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

/// クエリ：予約一覧を取得する
///
/// `state` は未検証の文字列のまま受け取り、永続化層に触れる前に検証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookings {
    pub viewer_id: UserId,
    pub state: String,
    pub page: PageRequest,
}
