use crate::domain::{
    booking::Booking,
    commands::PageRequest,
    value_objects::{BookingId, BookingStatus, ItemId, UserId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 閲覧者のロールによる絞り込み
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerScope {
    /// 申込者として（booking.booker_id == viewer）
    Booker(UserId),
    /// アイテム所有者として（booking.item_owner_id == viewer）
    Owner(UserId),
}

impl ViewerScope {
    pub fn viewer_id(&self) -> UserId {
        match self {
            ViewerScope::Booker(id) | ViewerScope::Owner(id) => *id,
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            ViewerScope::Booker(id) => booking.booker_id == *id,
            ViewerScope::Owner(id) => booking.item_owner_id == *id,
        }
    }
}

/// 予約の絞り込み条件
///
/// 時刻を含む条件は、呼び出しごとに一度だけ取得した `now` を保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPredicate {
    /// 条件なし
    Any,
    /// start < now < end
    ActiveAt(DateTime<Utc>),
    /// end < now
    EndedBefore(DateTime<Utc>),
    /// start > now
    StartsAfter(DateTime<Utc>),
    /// status == 指定値
    HasStatus(BookingStatus),
}

impl BookingPredicate {
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            BookingPredicate::Any => true,
            BookingPredicate::ActiveAt(now) => booking.period.contains_strictly(*now),
            BookingPredicate::EndedBefore(now) => booking.end() < *now,
            BookingPredicate::StartsAfter(now) => booking.start() > *now,
            BookingPredicate::HasStatus(status) => booking.status == *status,
        }
    }
}

/// 並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOrder {
    /// start 降順。同一 start は booking_id 降順で決定的にする。
    StartDesc,
}

impl BookingOrder {
    pub fn compare(&self, a: &Booking, b: &Booking) -> std::cmp::Ordering {
        match self {
            BookingOrder::StartDesc => b
                .start()
                .cmp(&a.start())
                .then_with(|| b.booking_id.cmp(&a.booking_id)),
        }
    }
}

/// 予約一覧クエリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuery {
    pub scope: ViewerScope,
    pub predicate: BookingPredicate,
    pub order: BookingOrder,
    pub page: PageRequest,
}

impl BookingQuery {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.scope.matches(booking) && self.predicate.matches(booking)
    }
}

/// 予約リポジトリポート
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 新しい予約を保存する
    async fn insert(&self, booking: Booking) -> Result<()>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// ステータスを条件付きで更新する
    ///
    /// 現在のステータスが `expected` の場合のみ `new_status` に更新し、`true` を返す。
    /// 他の決定が先に反映されていた場合は何も変更せず `false` を返す。
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new_status: BookingStatus,
    ) -> Result<bool>;

    /// 条件・並び順・ページに従って予約を取得する
    async fn find_page(&self, query: &BookingQuery) -> Result<Vec<Booking>>;

    /// アイテムの全予約を取得する
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>>;

    /// 利用者がアイテムについて持つ、`before` より前に開始した承認済み予約を取得する
    async fn find_approved_started_before(
        &self,
        booker_id: UserId,
        item_id: ItemId,
        before: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;
}
