use crate::domain::{
    booking::Booking,
    value_objects::{BookingId, BookingPeriod, BookingStatus, ItemId, UserId},
};
use crate::ports::booking_repository::{
    BookingOrder, BookingPredicate, BookingQuery, BookingRepository as BookingRepositoryTrait,
    Result, ViewerScope,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use std::str::FromStr;

const SELECT_COLUMNS: &str = r#"
    SELECT
        booking_id,
        booker_id,
        item_id,
        item_owner_id,
        status,
        start_at,
        end_at,
        created_at
    FROM bookings
"#;

/// PostgreSQLの行データをBookingに変換する
///
/// statusの文字列と期間（start_at < end_at）の変換でエラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    let start_at: DateTime<Utc> = row.get("start_at");
    let end_at: DateTime<Utc> = row.get("end_at");
    let period = BookingPeriod::restore(start_at, end_at).map_err(|e| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid booking period: {}", e),
        )) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Booking {
        booking_id: BookingId::from_uuid(row.get("booking_id")),
        booker_id: UserId::from_uuid(row.get("booker_id")),
        item_id: ItemId::from_uuid(row.get("item_id")),
        item_owner_id: UserId::from_uuid(row.get("item_owner_id")),
        status,
        period,
        created_at: row.get("created_at"),
    })
}

/// 一覧クエリのWHERE / ORDER BY / LIMIT / OFFSETを組み立てる
fn push_query_clauses(builder: &mut QueryBuilder<'_, Postgres>, query: &BookingQuery) {
    match query.scope {
        ViewerScope::Booker(user_id) => {
            builder.push(" WHERE booker_id = ").push_bind(user_id.value());
        }
        ViewerScope::Owner(user_id) => {
            builder.push(" WHERE item_owner_id = ").push_bind(user_id.value());
        }
    }

    match query.predicate {
        BookingPredicate::Any => {}
        BookingPredicate::ActiveAt(now) => {
            builder
                .push(" AND start_at < ")
                .push_bind(now)
                .push(" AND end_at > ")
                .push_bind(now);
        }
        BookingPredicate::EndedBefore(now) => {
            builder.push(" AND end_at < ").push_bind(now);
        }
        BookingPredicate::StartsAfter(now) => {
            builder.push(" AND start_at > ").push_bind(now);
        }
        BookingPredicate::HasStatus(status) => {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
    }

    match query.order {
        BookingOrder::StartDesc => {
            builder.push(" ORDER BY start_at DESC, booking_id DESC");
        }
    }

    builder
        .push(" LIMIT ")
        .push_bind(query.page.limit() as i64)
        .push(" OFFSET ")
        .push_bind(query.page.offset() as i64);
}

/// BookingRepositoryのPostgreSQL実装
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// PostgreSQLコネクションプールから新しいBookingRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn insert(&self, booking: Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                booker_id,
                item_id,
                item_owner_id,
                status,
                start_at,
                end_at,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.booking_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.item_id.value())
        .bind(booking.item_owner_id.value())
        .bind(booking.status.as_str())
        .bind(booking.start())
        .bind(booking.end())
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!("{} WHERE booking_id = $1", SELECT_COLUMNS))
            .bind(booking_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// 条件付き更新（compare-and-swap）
    ///
    /// 行レベルの原子性により、同時に2つの決定が来ても1つだけが反映される。
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new_status: BookingStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $1
            WHERE booking_id = $2 AND status = $3
            "#,
        )
        .bind(new_status.as_str())
        .bind(booking_id.value())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// (booker_id | item_owner_id, start_at DESC) のインデックスを使用する
    async fn find_page(&self, query: &BookingQuery) -> Result<Vec<Booking>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_query_clauses(&mut builder, query);

        let rows = builder.build().fetch_all(&self.pool).await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{} WHERE item_id = $1 ORDER BY start_at DESC, booking_id DESC",
            SELECT_COLUMNS
        ))
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_approved_started_before(
        &self,
        booker_id: UserId,
        item_id: ItemId,
        before: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{} WHERE booker_id = $1 AND item_id = $2 AND status = $3 AND start_at < $4",
            SELECT_COLUMNS
        ))
        .bind(booker_id.value())
        .bind(item_id.value())
        .bind(BookingStatus::Approved.as_str())
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }
}
