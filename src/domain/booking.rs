use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingPeriod, BookingStatus, DecideBookingError, ItemId, UserId};

/// Booking集約 - 1つのアイテムに対する1回の予約
///
/// 申込者・アイテム・期間は生成後に変更されない。
/// 変更されるのは `status` のみで、それも WAITING からの1回だけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub booking_id: BookingId,

    // 他のコンテキストへの参照（IDのみ）
    pub booker_id: UserId,
    pub item_id: ItemId,
    /// 申込時点のアイテム所有者（所有者向けクエリに使用）
    pub item_owner_id: UserId,

    pub status: BookingStatus,
    pub period: BookingPeriod,

    // 監査情報
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn start(&self) -> DateTime<Utc> {
        self.period.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.period.end()
    }

    /// 申込者またはアイテム所有者か（予約の当事者か）
    pub fn is_party(&self, user_id: UserId) -> bool {
        self.booker_id == user_id || self.item_owner_id == user_id
    }
}

/// 純粋関数：予約を申し込む
///
/// 可否判定（アイテムの貸出可否・自己予約の禁止）は済んでいる前提。
/// 生成される予約は常に WAITING。
pub fn request_booking(
    booker_id: UserId,
    item_id: ItemId,
    item_owner_id: UserId,
    period: BookingPeriod,
    requested_at: DateTime<Utc>,
) -> Booking {
    Booking {
        booking_id: BookingId::new(),
        booker_id,
        item_id,
        item_owner_id,
        status: BookingStatus::Waiting,
        period,
        created_at: requested_at,
    }
}

/// 状態遷移表
///
/// | 現在      | 指定    | 遷移先    |
/// |-----------|---------|-----------|
/// | WAITING   | true    | APPROVED  |
/// | WAITING   | false   | REJECTED  |
/// | WAITING   | None    | 不可      |
/// | 終端状態  | 任意    | 不可      |
pub fn transition(
    current: BookingStatus,
    approve: Option<bool>,
) -> Result<BookingStatus, DecideBookingError> {
    match (current, approve) {
        (BookingStatus::Approved | BookingStatus::Rejected, _) => {
            Err(DecideBookingError::AlreadyDecided)
        }
        (BookingStatus::Waiting, None) => Err(DecideBookingError::MissingDecision),
        (BookingStatus::Waiting, Some(true)) => Ok(BookingStatus::Approved),
        (BookingStatus::Waiting, Some(false)) => Ok(BookingStatus::Rejected),
    }
}

/// 遷移可能か
pub fn can_transition(current: BookingStatus, approve: Option<bool>) -> bool {
    transition(current, approve).is_ok()
}

/// 純粋関数：予約を承認または却下する
///
/// ビジネスルール（判定順）：
/// 1. 操作者がアイテム所有者であること
/// 2. 予約が WAITING であること（決定済みなら値に関わらず失敗）
/// 3. 承認・却下が指定されていること
///
/// 変更されるのは `status` のみ。
pub fn decide_booking(
    booking: &Booking,
    actor_id: UserId,
    approve: Option<bool>,
) -> Result<Booking, DecideBookingError> {
    if booking.item_owner_id != actor_id {
        return Err(DecideBookingError::NotItemOwner);
    }

    let status = transition(booking.status, approve)?;

    Ok(Booking {
        status,
        ..booking.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn waiting_booking(owner: UserId) -> Booking {
        let now = Utc::now();
        let period =
            BookingPeriod::new(now + Duration::days(1), now + Duration::days(2), now).unwrap();
        request_booking(UserId::new(), ItemId::new(), owner, period, now)
    }

    #[test]
    fn test_request_booking_starts_waiting() {
        let now = Utc::now();
        let booker = UserId::new();
        let item = ItemId::new();
        let owner = UserId::new();
        let period =
            BookingPeriod::new(now + Duration::days(1), now + Duration::days(10), now).unwrap();

        let booking = request_booking(booker, item, owner, period, now);

        assert_eq!(booking.status, BookingStatus::Waiting);
        assert_eq!(booking.booker_id, booker);
        assert_eq!(booking.item_id, item);
        assert_eq!(booking.item_owner_id, owner);
        assert_eq!(booking.start(), now + Duration::days(1));
        assert_eq!(booking.end(), now + Duration::days(10));
        assert_eq!(booking.created_at, now);
    }

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;

        assert_eq!(transition(Waiting, Some(true)), Ok(Approved));
        assert_eq!(transition(Waiting, Some(false)), Ok(Rejected));
        assert_eq!(
            transition(Waiting, None),
            Err(DecideBookingError::MissingDecision)
        );
        for terminal in [Approved, Rejected] {
            for approve in [Some(true), Some(false), None] {
                assert_eq!(
                    transition(terminal, approve),
                    Err(DecideBookingError::AlreadyDecided)
                );
            }
        }
    }

    #[test]
    fn test_can_transition_only_from_waiting_with_decision() {
        assert!(can_transition(BookingStatus::Waiting, Some(true)));
        assert!(can_transition(BookingStatus::Waiting, Some(false)));
        assert!(!can_transition(BookingStatus::Waiting, None));
        assert!(!can_transition(BookingStatus::Approved, Some(false)));
        assert!(!can_transition(BookingStatus::Rejected, Some(true)));
    }

    #[test]
    fn test_decide_booking_approve() {
        let owner = UserId::new();
        let booking = waiting_booking(owner);

        let decided = decide_booking(&booking, owner, Some(true)).unwrap();

        assert_eq!(decided.status, BookingStatus::Approved);
        // status 以外は変わらない
        assert_eq!(
            Booking {
                status: BookingStatus::Waiting,
                ..decided
            },
            booking
        );
    }

    #[test]
    fn test_decide_booking_reject() {
        let owner = UserId::new();
        let booking = waiting_booking(owner);

        let decided = decide_booking(&booking, owner, Some(false)).unwrap();
        assert_eq!(decided.status, BookingStatus::Rejected);
    }

    #[test]
    fn test_decide_booking_fails_for_non_owner() {
        let booking = waiting_booking(UserId::new());

        let result = decide_booking(&booking, UserId::new(), Some(true));
        assert_eq!(result.unwrap_err(), DecideBookingError::NotItemOwner);
    }

    #[test]
    fn test_decide_booking_fails_for_booker() {
        let booking = waiting_booking(UserId::new());
        let booker = booking.booker_id;

        let result = decide_booking(&booking, booker, Some(true));
        assert_eq!(result.unwrap_err(), DecideBookingError::NotItemOwner);
    }

    #[test]
    fn test_decide_booking_twice_fails_regardless_of_value() {
        let owner = UserId::new();
        let booking = waiting_booking(owner);
        let approved = decide_booking(&booking, owner, Some(true)).unwrap();

        for approve in [Some(true), Some(false), None] {
            let result = decide_booking(&approved, owner, approve);
            assert_eq!(result.unwrap_err(), DecideBookingError::AlreadyDecided);
        }
    }

    #[test]
    fn test_decide_booking_missing_decision() {
        let owner = UserId::new();
        let booking = waiting_booking(owner);

        let result = decide_booking(&booking, owner, None);
        assert_eq!(result.unwrap_err(), DecideBookingError::MissingDecision);
    }

    #[test]
    fn test_is_party() {
        let owner = UserId::new();
        let booking = waiting_booking(owner);

        assert!(booking.is_party(owner));
        assert!(booking.is_party(booking.booker_id));
        assert!(!booking.is_party(UserId::new()));
    }
}
