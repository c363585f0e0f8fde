//! 予約一覧のクエリ解決
//!
//! (閲覧者ロール, 状態フィルタ, ページ) の組を、具体的な絞り込み条件と並び順に変換する。
//! フィルタごとの条件は分岐ではなく戦略表で定義し、並び順は全フィルタで共通（start 降順）。

use chrono::{DateTime, Utc};

use crate::domain::{BookingStateFilter, BookingStatus, UserId, commands::PageRequest};
use crate::ports::{BookingOrder, BookingPredicate, BookingQuery, ViewerScope};

/// 閲覧者のロール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    /// 申込者として
    Booker,
    /// アイテム所有者として
    Owner,
}

impl ViewerRole {
    fn scope(self, viewer_id: UserId) -> ViewerScope {
        match self {
            ViewerRole::Booker => ViewerScope::Booker(viewer_id),
            ViewerRole::Owner => ViewerScope::Owner(viewer_id),
        }
    }
}

impl std::fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerRole::Booker => f.write_str("booker"),
            ViewerRole::Owner => f.write_str("owner"),
        }
    }
}

type PredicateBuilder = fn(DateTime<Utc>) -> BookingPredicate;

/// 1つの取得モード
struct RetrievalStrategy {
    filter: BookingStateFilter,
    predicate: PredicateBuilder,
}

/// 全フィルタ共通の並び順
const ORDERING: BookingOrder = BookingOrder::StartDesc;

/// 戦略表（`BookingStateFilter` の宣言順に並べる）
static STRATEGIES: [RetrievalStrategy; 6] = [
    RetrievalStrategy {
        filter: BookingStateFilter::All,
        predicate: any,
    },
    RetrievalStrategy {
        filter: BookingStateFilter::Current,
        predicate: BookingPredicate::ActiveAt,
    },
    RetrievalStrategy {
        filter: BookingStateFilter::Past,
        predicate: BookingPredicate::EndedBefore,
    },
    RetrievalStrategy {
        filter: BookingStateFilter::Future,
        predicate: BookingPredicate::StartsAfter,
    },
    RetrievalStrategy {
        filter: BookingStateFilter::Waiting,
        predicate: waiting,
    },
    RetrievalStrategy {
        filter: BookingStateFilter::Rejected,
        predicate: rejected,
    },
];

fn any(_now: DateTime<Utc>) -> BookingPredicate {
    BookingPredicate::Any
}

fn waiting(_now: DateTime<Utc>) -> BookingPredicate {
    BookingPredicate::HasStatus(BookingStatus::Waiting)
}

fn rejected(_now: DateTime<Utc>) -> BookingPredicate {
    BookingPredicate::HasStatus(BookingStatus::Rejected)
}

fn strategy_for(filter: BookingStateFilter) -> &'static RetrievalStrategy {
    let strategy = &STRATEGIES[filter as usize];
    debug_assert_eq!(strategy.filter, filter);
    strategy
}

/// クエリを解決する
///
/// `now` は呼び出し側で一度だけ取得した値を渡す。
pub fn resolve(
    role: ViewerRole,
    viewer_id: UserId,
    filter: BookingStateFilter,
    page: PageRequest,
    now: DateTime<Utc>,
) -> BookingQuery {
    let strategy = strategy_for(filter);

    BookingQuery {
        scope: role.scope(viewer_id),
        predicate: (strategy.predicate)(now),
        order: ORDERING,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BookingPeriod, ItemId,
        booking::{Booking, request_booking},
    };
    use chrono::Duration;

    fn booking_at(
        booker: UserId,
        owner: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BookingStatus,
    ) -> Booking {
        let period = BookingPeriod::restore(start, end).unwrap();
        Booking {
            status,
            ..request_booking(booker, ItemId::new(), owner, period, start)
        }
    }

    #[test]
    fn test_strategy_table_is_ordered_by_filter() {
        for (index, filter) in BookingStateFilter::VARIANTS.into_iter().enumerate() {
            assert_eq!(STRATEGIES[index].filter, filter);
            assert_eq!(strategy_for(filter).filter, filter);
        }
    }

    #[test]
    fn test_resolve_predicates() {
        let now = Utc::now();
        let viewer = UserId::new();
        let page = PageRequest::new(0, 10);

        let expected = [
            (BookingStateFilter::All, BookingPredicate::Any),
            (BookingStateFilter::Current, BookingPredicate::ActiveAt(now)),
            (BookingStateFilter::Past, BookingPredicate::EndedBefore(now)),
            (BookingStateFilter::Future, BookingPredicate::StartsAfter(now)),
            (
                BookingStateFilter::Waiting,
                BookingPredicate::HasStatus(BookingStatus::Waiting),
            ),
            (
                BookingStateFilter::Rejected,
                BookingPredicate::HasStatus(BookingStatus::Rejected),
            ),
        ];

        for (filter, predicate) in expected {
            let query = resolve(ViewerRole::Booker, viewer, filter, page, now);
            assert_eq!(query.predicate, predicate, "filter {}", filter);
            assert_eq!(query.order, BookingOrder::StartDesc);
            assert_eq!(query.page, page);
        }
    }

    #[test]
    fn test_viewer_role_display() {
        assert_eq!(ViewerRole::Booker.to_string(), "booker");
        assert_eq!(ViewerRole::Owner.to_string(), "owner");
    }

    #[test]
    fn test_resolve_scope_by_role() {
        let now = Utc::now();
        let viewer = UserId::new();
        let page = PageRequest::new(1, 5);

        let as_booker = resolve(ViewerRole::Booker, viewer, BookingStateFilter::All, page, now);
        let as_owner = resolve(ViewerRole::Owner, viewer, BookingStateFilter::All, page, now);

        assert_eq!(as_booker.scope, ViewerScope::Booker(viewer));
        assert_eq!(as_owner.scope, ViewerScope::Owner(viewer));
    }

    #[test]
    fn test_current_excludes_boundaries() {
        let now = Utc::now();
        let booker = UserId::new();
        let owner = UserId::new();
        let query = resolve(
            ViewerRole::Booker,
            booker,
            BookingStateFilter::Current,
            PageRequest::new(0, 10),
            now,
        );

        let starts_now = booking_at(
            booker,
            owner,
            now,
            now + Duration::hours(1),
            BookingStatus::Approved,
        );
        let ends_now = booking_at(
            booker,
            owner,
            now - Duration::hours(1),
            now,
            BookingStatus::Approved,
        );
        let spanning = booking_at(
            booker,
            owner,
            now - Duration::hours(1),
            now + Duration::hours(1),
            BookingStatus::Approved,
        );

        assert!(!query.matches(&starts_now));
        assert!(!query.matches(&ends_now));
        assert!(query.matches(&spanning));
    }

    #[test]
    fn test_past_and_future_partition() {
        let now = Utc::now();
        let booker = UserId::new();
        let owner = UserId::new();
        let page = PageRequest::new(0, 10);
        let past = resolve(ViewerRole::Booker, booker, BookingStateFilter::Past, page, now);
        let future = resolve(ViewerRole::Booker, booker, BookingStateFilter::Future, page, now);

        let finished = booking_at(
            booker,
            owner,
            now - Duration::days(3),
            now - Duration::days(2),
            BookingStatus::Approved,
        );
        let upcoming = booking_at(
            booker,
            owner,
            now + Duration::days(1),
            now + Duration::days(10),
            BookingStatus::Waiting,
        );

        assert!(past.matches(&finished));
        assert!(!past.matches(&upcoming));
        assert!(future.matches(&upcoming));
        assert!(!future.matches(&finished));
    }

    #[test]
    fn test_owner_scope_does_not_match_booker() {
        let now = Utc::now();
        let booker = UserId::new();
        let owner = UserId::new();
        let booking = booking_at(
            booker,
            owner,
            now + Duration::days(1),
            now + Duration::days(2),
            BookingStatus::Waiting,
        );
        let page = PageRequest::new(0, 10);

        let owner_query = resolve(ViewerRole::Owner, owner, BookingStateFilter::All, page, now);
        let booker_as_owner =
            resolve(ViewerRole::Owner, booker, BookingStateFilter::All, page, now);

        assert!(owner_query.matches(&booking));
        assert!(!booker_as_owner.matches(&booking));
    }

    #[test]
    fn test_ordering_start_desc_with_id_tiebreak() {
        let now = Utc::now();
        let booker = UserId::new();
        let owner = UserId::new();
        let earlier = booking_at(
            booker,
            owner,
            now + Duration::days(1),
            now + Duration::days(2),
            BookingStatus::Waiting,
        );
        let later = booking_at(
            booker,
            owner,
            now + Duration::days(3),
            now + Duration::days(4),
            BookingStatus::Waiting,
        );
        let same_start = booking_at(
            booker,
            owner,
            now + Duration::days(3),
            now + Duration::days(5),
            BookingStatus::Waiting,
        );

        let mut bookings = vec![earlier.clone(), later.clone(), same_start.clone()];
        bookings.sort_by(|a, b| ORDERING.compare(a, b));

        assert_eq!(bookings[2], earlier);
        assert_eq!(bookings[0].start(), bookings[1].start());
        assert!(bookings[0].booking_id > bookings[1].booking_id);
    }
}
