use crate::application::booking::{
    ServiceDependencies, ViewerRole, confirm_booking as execute_confirm_booking,
    create_booking as execute_create_booking, get_booking_by_id as execute_get_booking_by_id,
    list_by_booker, list_by_owner,
};
use crate::domain::{
    commands::DecideBooking,
    value_objects::{BookingId, UserId},
};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{BookingResponse, CreateBookingRequest, DecideBookingQuery, ListBookingsQuery},
};

/// 操作者を示すリクエストヘッダー
pub const ACTOR_HEADER: &str = "X-Sharer-User-Id";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Extractors
// ============================================================================

/// `X-Sharer-User-Id` ヘッダーから取り出した操作者ID
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ACTOR_HEADER)
            .ok_or_else(|| ApiError::BadRequest(format!("missing header {}", ACTOR_HEADER)))?;

        let uuid = value
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or_else(|| ApiError::BadRequest(format!("invalid header {}", ACTOR_HEADER)))?;

        Ok(Actor(UserId::from_uuid(uuid)))
    }
}

/// リジェクションを `ApiError` に変換するJSONボディ
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// リジェクションを `ApiError` に変換するクエリパラメータ
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// リジェクションを `ApiError` に変換するパスパラメータ
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

// ============================================================================
// Command handlers (POST / PATCH)
// ============================================================================

/// POST /bookings - 予約を申し込む
///
/// 強制されるビジネスルール:
/// - 期間が妥当であること
/// - 申込者とアイテムが存在すること
/// - アイテムが貸出可能で、申込者の所有物ではないこと
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Actor(user_id): Actor,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    tracing::info!("POST /bookings, userId: {}", user_id);

    let view = execute_create_booking(&state.service_deps, req.to_command(user_id)).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(view))))
}

/// PATCH /bookings/:id?approved= - 予約を承認または却下する
///
/// 強制されるビジネスルール:
/// - 操作者がアイテム所有者であること
/// - 予約が承認待ちであること
/// - approvedが指定されていること
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Actor(user_id): Actor,
    ApiPath(booking_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<DecideBookingQuery>,
) -> Result<Json<BookingResponse>, ApiError> {
    tracing::info!("PATCH /bookings/{}, userId: {}", booking_id, user_id);

    let cmd = DecideBooking {
        actor_id: user_id,
        booking_id: BookingId::from_uuid(booking_id),
        approve: query.approved,
    };

    let view = execute_confirm_booking(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(view)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings/:id - 予約詳細をIDで取得
///
/// 申込者またはアイテム所有者以外には404を返す。
pub async fn get_booking_by_id(
    State(state): State<Arc<AppState>>,
    Actor(user_id): Actor,
    ApiPath(booking_id): ApiPath<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    tracing::info!("GET /bookings/{}, userId: {}", booking_id, user_id);

    let view = execute_get_booking_by_id(
        &state.service_deps,
        user_id,
        BookingId::from_uuid(booking_id),
    )
    .await?;

    Ok(Json(BookingResponse::from(view)))
}

/// GET /bookings - 申込者として予約一覧を取得
///
/// クエリパラメータ:
/// - state: ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED（既定値: ALL）
/// - from: 先頭からの件数（既定値: 0）
/// - size: ページサイズ（既定値: 10）
pub async fn list_booker_bookings(
    State(state): State<Arc<AppState>>,
    Actor(user_id): Actor,
    ApiQuery(query): ApiQuery<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    list(&state, ViewerRole::Booker, user_id, query).await
}

/// GET /bookings/owner - アイテム所有者として予約一覧を取得
///
/// クエリパラメータは GET /bookings と同じ。
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    Actor(user_id): Actor,
    ApiQuery(query): ApiQuery<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    list(&state, ViewerRole::Owner, user_id, query).await
}

async fn list(
    state: &AppState,
    role: ViewerRole,
    user_id: UserId,
    query: ListBookingsQuery,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    tracing::info!(
        "GET /bookings as {}, userId: {}, state: {:?}",
        role,
        user_id,
        query.state
    );

    let list_query = query.to_query(user_id).map_err(ApiError::BadRequest)?;

    let views = match role {
        ViewerRole::Booker => list_by_booker(&state.service_deps, list_query).await?,
        ViewerRole::Owner => list_by_owner(&state.service_deps, list_query).await?,
    };

    Ok(Json(views.into_iter().map(BookingResponse::from).collect()))
}
