use crate::domain::{
    self, BookingPeriod, BookingStateFilter, commands::*, value_objects::*,
};
use crate::ports::*;
use futures::future::try_join_all;
use std::sync::Arc;

use super::{
    availability_guard,
    errors::{BookingApplicationError, Result},
    query_engine::{self, ViewerRole},
    view::{BookingView, ItemBookingSummary, build_booking_info, build_booking_view},
};

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// 各操作は依存関係を引数として受け取る関数として実装する。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_repository: Arc<dyn BookingRepository>,
    pub user_service: Arc<dyn UserService>,
    pub item_service: Arc<dyn ItemService>,
    pub clock: Arc<dyn Clock>,
}

/// ユーザーを取得する。存在しなければ `NotFound`。
async fn require_user(user_service: &dyn UserService, user_id: UserId) -> Result<UserSummary> {
    user_service
        .find_by_id(user_id)
        .await
        .map_err(BookingApplicationError::UserServiceError)?
        .ok_or_else(|| BookingApplicationError::NotFound(format!("user {}", user_id)))
}

/// アイテムを取得する。存在しなければ `NotFound`。
async fn require_item(item_service: &dyn ItemService, item_id: ItemId) -> Result<ItemSummary> {
    item_service
        .find_by_id(item_id)
        .await
        .map_err(BookingApplicationError::ItemServiceError)?
        .ok_or_else(|| BookingApplicationError::NotFound(format!("item {}", item_id)))
}

/// 予約を取得する。存在しなければ `NotFound`。
async fn load_booking(
    booking_repository: &dyn BookingRepository,
    booking_id: BookingId,
) -> Result<domain::booking::Booking> {
    booking_repository
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::RepositoryError)?
        .ok_or_else(|| BookingApplicationError::NotFound(format!("booking {}", booking_id)))
}

/// 予約に申込者とアイテムの概要を合成する
async fn compose_view(
    deps: &ServiceDependencies,
    booking: &domain::booking::Booking,
) -> Result<BookingView> {
    let (booker, item) = futures::try_join!(
        require_user(deps.user_service.as_ref(), booking.booker_id),
        require_item(deps.item_service.as_ref(), booking.item_id),
    )?;

    Ok(build_booking_view(booking, booker, item))
}

/// 予約を申し込む
///
/// ビジネスルール：
/// - 期間が妥当であること（start < end、start は過去でない、end は未来）
/// - 申込者が存在すること
/// - アイテムが存在し、貸出可能で、申込者の所有物ではないこと
///
/// 作成された予約は常に WAITING。
pub async fn create_booking(deps: &ServiceDependencies, cmd: CreateBooking) -> Result<BookingView> {
    let now = deps.clock.now();

    // 1. 期間の検証（永続化層に触れる前）
    let period = BookingPeriod::new(cmd.start, cmd.end, now).inspect_err(|e| {
        tracing::warn!("Rejected booking request from user {}: {}", cmd.requester_id, e);
    })?;

    // 2. 申込者の存在確認
    let booker = require_user(deps.user_service.as_ref(), cmd.requester_id).await?;

    // 3. アイテムの可否判定
    let item =
        availability_guard::authorize(deps.item_service.as_ref(), cmd.requester_id, cmd.item_id)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    "Booking of item {} by user {} refused: {}",
                    cmd.item_id,
                    cmd.requester_id,
                    e
                );
            })?;

    // 4. ドメイン層の純粋関数で予約を生成
    let booking = domain::booking::request_booking(
        cmd.requester_id,
        cmd.item_id,
        item.owner_id,
        period,
        now,
    );

    // 5. 保存
    deps.booking_repository
        .insert(booking.clone())
        .await
        .map_err(BookingApplicationError::RepositoryError)?;

    tracing::info!(
        "Booking {} created for item {} by user {}",
        booking.booking_id,
        booking.item_id,
        booking.booker_id
    );

    Ok(build_booking_view(&booking, booker, item))
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 操作者が存在すること
/// - 予約が存在すること
/// - 操作者がアイテム所有者であること（そうでなければ `NotFound`）
/// - 予約が WAITING であること（決定は1回のみ）
/// - 承認・却下が指定されていること
///
/// 申込者とアイテムの概要は更新前に取得する。取得に失敗した場合は何も保存しない。
/// 保存は「現在 WAITING であれば更新」の条件付き更新で行う。
/// 同時に別の決定が反映された場合は `InvalidState` になる。
pub async fn confirm_booking(deps: &ServiceDependencies, cmd: DecideBooking) -> Result<BookingView> {
    // 1. 操作者の存在確認
    require_user(deps.user_service.as_ref(), cmd.actor_id).await?;

    // 2. 予約を取得
    let booking = load_booking(deps.booking_repository.as_ref(), cmd.booking_id).await?;

    // 3. ドメイン層の純粋関数で遷移
    let decided = domain::booking::decide_booking(&booking, cmd.actor_id, cmd.approve)
        .map_err(|e| {
            tracing::warn!(
                "Decision on booking {} by user {} refused: {:?}",
                cmd.booking_id,
                cmd.actor_id,
                e
            );
            BookingApplicationError::from(e)
        })?;

    // 4. レスポンスに必要な概要を先に解決
    let (booker, item) = futures::try_join!(
        require_user(deps.user_service.as_ref(), decided.booker_id),
        require_item(deps.item_service.as_ref(), decided.item_id),
    )?;

    // 5. 条件付き更新
    let updated = deps
        .booking_repository
        .update_status(booking.booking_id, booking.status, decided.status)
        .await
        .map_err(BookingApplicationError::RepositoryError)?;

    if !updated {
        tracing::warn!(
            "Booking {} was decided concurrently; decision by user {} discarded",
            cmd.booking_id,
            cmd.actor_id
        );
        return Err(BookingApplicationError::InvalidState(
            "already decided".to_string(),
        ));
    }

    tracing::info!(
        "Booking {} {} by user {}",
        decided.booking_id,
        decided.status.as_str(),
        cmd.actor_id
    );

    Ok(build_booking_view(&decided, booker, item))
}

/// IDで予約を取得する
///
/// 閲覧できるのは申込者とアイテム所有者のみ。それ以外には `NotFound` を返す。
pub async fn get_booking_by_id(
    deps: &ServiceDependencies,
    viewer_id: UserId,
    booking_id: BookingId,
) -> Result<BookingView> {
    require_user(deps.user_service.as_ref(), viewer_id).await?;

    let booking = load_booking(deps.booking_repository.as_ref(), booking_id).await?;

    if !booking.is_party(viewer_id) {
        return Err(BookingApplicationError::NotFound(format!(
            "booking {}",
            booking_id
        )));
    }

    compose_view(deps, &booking).await
}

/// 申込者として予約一覧を取得する
pub async fn list_by_booker(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<BookingView>> {
    list_bookings(deps, ViewerRole::Booker, query).await
}

/// アイテム所有者として予約一覧を取得する
pub async fn list_by_owner(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<BookingView>> {
    list_bookings(deps, ViewerRole::Owner, query).await
}

async fn list_bookings(
    deps: &ServiceDependencies,
    role: ViewerRole,
    query: ListBookings,
) -> Result<Vec<BookingView>> {
    // 1. 状態フィルタの検証（永続化層に触れる前）
    let filter: BookingStateFilter = query
        .state
        .parse()
        .map_err(|_| BookingApplicationError::UnknownStateFilter(query.state.clone()))?;

    // 2. 閲覧者の存在確認
    require_user(deps.user_service.as_ref(), query.viewer_id).await?;

    // 3. クエリ解決と取得
    let now = deps.clock.now();
    let resolved = query_engine::resolve(role, query.viewer_id, filter, query.page, now);

    let bookings = deps
        .booking_repository
        .find_page(&resolved)
        .await
        .map_err(BookingApplicationError::RepositoryError)?;

    tracing::debug!(
        "Listed {} bookings for user {} as {} with state {}",
        bookings.len(),
        query.viewer_id,
        role,
        filter
    );

    try_join_all(bookings.iter().map(|booking| compose_view(deps, booking))).await
}

/// アイテムの直前・直後の承認済み予約を取得する
///
/// - last: start が現在より前のもののうち、start が最も遅いもの
/// - next: start が現在より後のもののうち、start が最も早いもの
///
/// 閲覧者がアイテム所有者でない場合はどちらも `None`。
pub async fn item_booking_summary(
    deps: &ServiceDependencies,
    item_id: ItemId,
    viewer_id: UserId,
) -> Result<ItemBookingSummary> {
    let item = require_item(deps.item_service.as_ref(), item_id).await?;

    if item.owner_id != viewer_id {
        return Ok(ItemBookingSummary::default());
    }

    let now = deps.clock.now();
    let bookings = deps
        .booking_repository
        .find_by_item(item_id)
        .await
        .map_err(BookingApplicationError::RepositoryError)?;

    let approved = || {
        bookings
            .iter()
            .filter(|booking| booking.status == BookingStatus::Approved)
    };

    let last = approved()
        .filter(|booking| booking.start() < now)
        .max_by_key(|booking| booking.start())
        .map(build_booking_info);

    let next = approved()
        .filter(|booking| booking.start() > now)
        .min_by_key(|booking| booking.start())
        .map(build_booking_info);

    Ok(ItemBookingSummary { last, next })
}

/// 利用者がアイテムを実際に借りたことがあるか
///
/// 承認済みで、開始日時が現在より前の予約があれば `true`。
/// レビュー投稿の可否判定に使用される。
pub async fn has_completed_booking(
    deps: &ServiceDependencies,
    booker_id: UserId,
    item_id: ItemId,
) -> Result<bool> {
    let now = deps.clock.now();

    let bookings = deps
        .booking_repository
        .find_approved_started_before(booker_id, item_id, now)
        .await
        .map_err(BookingApplicationError::RepositoryError)?;

    Ok(!bookings.is_empty())
}
