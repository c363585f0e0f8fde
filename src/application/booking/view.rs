use chrono::{DateTime, Utc};

use crate::domain::{
    booking::Booking,
    value_objects::{BookingId, BookingStatus, UserId},
};
use crate::ports::{ItemSummary, UserSummary};

/// 予約ビュー（読み取り用）
///
/// 予約本体に申込者とアイテムの概要を合成したもの。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingView {
    pub booking_id: BookingId,
    pub booker: UserSummary,
    pub item: ItemSummary,
    pub status: BookingStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// アイテム詳細に埋め込む予約の要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInfo {
    pub booking_id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub booker_id: UserId,
}

/// アイテムの直前・直後の承認済み予約
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemBookingSummary {
    pub last: Option<BookingInfo>,
    pub next: Option<BookingInfo>,
}

pub(super) fn build_booking_view(
    booking: &Booking,
    booker: UserSummary,
    item: ItemSummary,
) -> BookingView {
    BookingView {
        booking_id: booking.booking_id,
        booker,
        item,
        status: booking.status,
        start: booking.start(),
        end: booking.end(),
    }
}

pub(super) fn build_booking_info(booking: &Booking) -> BookingInfo {
    BookingInfo {
        booking_id: booking.booking_id,
        start: booking.start(),
        end: booking.end(),
        booker_id: booking.booker_id,
    }
}
