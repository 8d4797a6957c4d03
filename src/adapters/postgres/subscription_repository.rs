//! PostgreSQL implementation of SubscriptionRepository.
//!
//! A renewal writes the payment row and the advanced subscription in one
//! transaction; the unique gateway payment id constraint makes redelivered
//! renewal webhooks harmless.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, SubscriptionId, Timestamp, UserId};
use crate::domain::payment::Payment;
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: Uuid,
    plan_id: Uuid,
    auto_pay: bool,
    gateway_subscription_id: Option<String>,
    next_billing_date: DateTime<Utc>,
    grace_until: Option<DateTime<Utc>>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan_id: PlanId::from_uuid(row.plan_id),
            auto_pay: row.auto_pay,
            gateway_subscription_id: row.gateway_subscription_id,
            next_billing_date: Timestamp::from_datetime(row.next_billing_date),
            grace_until: row.grace_until.map(Timestamp::from_datetime),
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn status_to_str(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "active",
        SubscriptionStatus::Paused => "paused",
        SubscriptionStatus::GracePeriod => "grace_period",
        SubscriptionStatus::Cancelled => "cancelled",
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s {
        "active" => Ok(SubscriptionStatus::Active),
        "paused" => Ok(SubscriptionStatus::Paused),
        "grace_period" => Ok(SubscriptionStatus::GracePeriod),
        "cancelled" => Ok(SubscriptionStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid subscription status: {}", s),
        )),
    }
}

fn fetch_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to fetch subscription: {}", e),
    )
}

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan_id, auto_pay, gateway_subscription_id, \
     next_billing_date, grace_until, status, created_at, updated_at";

async fn update_tx(
    tx: &mut Transaction<'_, Postgres>,
    subscription: &Subscription,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE subscriptions SET
            auto_pay = $2,
            gateway_subscription_id = $3,
            next_billing_date = $4,
            grace_until = $5,
            status = $6,
            updated_at = $7
        WHERE id = $1
        "#,
    )
    .bind(subscription.id.as_uuid())
    .bind(subscription.auto_pay)
    .bind(&subscription.gateway_subscription_id)
    .bind(subscription.next_billing_date.as_datetime())
    .bind(subscription.grace_until.map(|t| *t.as_datetime()))
    .bind(status_to_str(subscription.status))
    .bind(subscription.updated_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to update subscription: {}", e),
        )
    })?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::SubscriptionNotFound,
            format!("Subscription not found: {}", subscription.id),
        ));
    }

    Ok(())
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, plan_id, auto_pay, gateway_subscription_id,
                next_billing_date, grace_until, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.user_id.as_uuid())
        .bind(subscription.plan_id.as_uuid())
        .bind(subscription.auto_pay)
        .bind(&subscription.gateway_subscription_id)
        .bind(subscription.next_billing_date.as_datetime())
        .bind(subscription.grace_until.map(|t| *t.as_datetime()))
        .bind(status_to_str(subscription.status))
        .bind(subscription.created_at.as_datetime())
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert subscription: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, DomainError> {
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE id = $1",
            SUBSCRIPTION_COLUMNS
        );
        let row: Option<SubscriptionRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(Subscription::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>, DomainError> {
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE user_id = $1 ORDER BY created_at DESC",
            SUBSCRIPTION_COLUMNS
        );
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(fetch_error)?;

        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open transaction: {}", e),
            )
        })?;
        update_tx(&mut tx, subscription).await?;
        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })
    }

    async fn record_renewal(
        &self,
        subscription: &Subscription,
        payment: &Payment,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open transaction: {}", e),
            )
        })?;

        super::payment_repository::insert_payment_tx(&mut tx, payment).await?;
        update_tx(&mut tx, subscription).await?;

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })
    }

    async fn list_billing_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError> {
        let sql = format!(
            "SELECT {} FROM subscriptions \
             WHERE status = 'active' AND auto_pay \
               AND next_billing_date >= $1 AND next_billing_date < $2 \
             ORDER BY next_billing_date",
            SUBSCRIPTION_COLUMNS
        );
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&sql)
            .bind(from.as_datetime())
            .bind(to.as_datetime())
            .fetch_all(&self.pool)
            .await
            .map_err(fetch_error)?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}
