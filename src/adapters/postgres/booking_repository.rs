//! PostgreSQL implementation of BookingRepository.
//!
//! The one-active-booking rule lives in a partial unique index over
//! non-cancelled future bookings; this adapter translates its violation
//! into `ErrorCode::AlreadyBooked`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::booking::{BookingStatus, DemoBooking};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::BookingRepository;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a demo booking.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    scheduled_at: DateTime<Utc>,
    contact_name: String,
    contact_phone: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for DemoBooking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(DemoBooking {
            id: BookingId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            scheduled_at: Timestamp::from_datetime(row.scheduled_at),
            contact_name: row.contact_name,
            contact_phone: row.contact_phone,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn status_to_str(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Completed => "completed",
    }
}

fn parse_status(s: &str) -> Result<BookingStatus, DomainError> {
    match s {
        "confirmed" => Ok(BookingStatus::Confirmed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "completed" => Ok(BookingStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid booking status: {}", s),
        )),
    }
}

fn fetch_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to fetch booking: {}", e),
    )
}

const BOOKING_COLUMNS: &str = "id, user_id, scheduled_at, contact_name, contact_phone, \
     status, created_at, updated_at";

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn insert(&self, booking: &DemoBooking) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO demo_bookings (
                id, user_id, scheduled_at, contact_name, contact_phone,
                status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.user_id.as_uuid())
        .bind(booking.scheduled_at.as_datetime())
        .bind(&booking.contact_name)
        .bind(&booking.contact_phone)
        .bind(status_to_str(booking.status))
        .bind(booking.created_at.as_datetime())
        .bind(booking.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("demo_bookings_one_active_idx") {
                    return DomainError::new(
                        ErrorCode::AlreadyBooked,
                        "User already has an active booking",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert booking: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<DemoBooking>, DomainError> {
        let sql = format!(
            "SELECT {} FROM demo_bookings WHERE id = $1",
            BOOKING_COLUMNS
        );
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(DemoBooking::try_from).transpose()
    }

    async fn update(&self, booking: &DemoBooking) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE demo_bookings SET
                scheduled_at = $2,
                status = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.scheduled_at.as_datetime())
        .bind(status_to_str(booking.status))
        .bind(booking.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update booking: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id),
            ));
        }

        Ok(())
    }

    async fn count_confirmed_at(
        &self,
        slot_times: &[Timestamp],
    ) -> Result<Vec<(Timestamp, u32)>, DomainError> {
        let times: Vec<DateTime<Utc>> = slot_times.iter().map(|t| *t.as_datetime()).collect();
        let rows: Vec<(DateTime<Utc>, i64)> = sqlx::query_as(
            r#"
            SELECT scheduled_at, COUNT(*)
            FROM demo_bookings
            WHERE status = 'confirmed' AND scheduled_at = ANY($1)
            GROUP BY scheduled_at
            "#,
        )
        .bind(&times)
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(rows
            .into_iter()
            .map(|(at, count)| (Timestamp::from_datetime(at), count as u32))
            .collect())
    }

    async fn confirmed_count(&self, slot_time: Timestamp) -> Result<u32, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM demo_bookings WHERE status = 'confirmed' AND scheduled_at = $1",
        )
        .bind(slot_time.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(result.0 as u32)
    }

    async fn find_active_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<DemoBooking>, DomainError> {
        let sql = format!(
            "SELECT {} FROM demo_bookings \
             WHERE user_id = $1 AND status = 'confirmed' AND scheduled_at > now() \
             ORDER BY scheduled_at \
             LIMIT 1",
            BOOKING_COLUMNS
        );
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(DemoBooking::try_from).transpose()
    }
}
