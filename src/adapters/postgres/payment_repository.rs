//! PostgreSQL implementation of PaymentRepository.
//!
//! Multi-row writes (an installment purchase, the settlement of an
//! installment together with its payment) run in a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, InstallmentId, Money, PaymentId, PlanId, Timestamp, UserId,
};
use crate::domain::payment::{
    Installment, InstallmentStatus, Payment, PaymentKind, PaymentStatus,
};
use crate::ports::{PaymentRepository, PendingInstallment};

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: Uuid,
    plan_id: Uuid,
    amount: i64,
    status: String,
    kind: String,
    gateway_order_id: Option<String>,
    gateway_payment_id: Option<String>,
    method: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan_id: PlanId::from_uuid(row.plan_id),
            amount: minor_amount(row.amount)?,
            status: parse_payment_status(&row.status)?,
            kind: parse_payment_kind(&row.kind)?,
            gateway_order_id: row.gateway_order_id,
            gateway_payment_id: row.gateway_payment_id,
            method: row.method,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Database row representation of an installment.
#[derive(Debug, sqlx::FromRow)]
struct InstallmentRow {
    id: Uuid,
    payment_id: Uuid,
    number: i16,
    amount: i64,
    due_date: DateTime<Utc>,
    status: String,
    paid_at: Option<DateTime<Utc>>,
    gateway_payment_id: Option<String>,
}

impl TryFrom<InstallmentRow> for Installment {
    type Error = DomainError;

    fn try_from(row: InstallmentRow) -> Result<Self, Self::Error> {
        Ok(Installment {
            id: InstallmentId::from_uuid(row.id),
            payment_id: PaymentId::from_uuid(row.payment_id),
            number: row.number as u8,
            amount: minor_amount(row.amount)?,
            due_date: Timestamp::from_datetime(row.due_date),
            status: parse_installment_status(&row.status)?,
            paid_at: row.paid_at.map(Timestamp::from_datetime),
            gateway_payment_id: row.gateway_payment_id,
        })
    }
}

fn minor_amount(minor: i64) -> Result<Money, DomainError> {
    Money::from_minor(minor)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid amount: {}", e)))
}

fn payment_status_to_str(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Completed => "completed",
        PaymentStatus::Failed => "failed",
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "completed" => Ok(PaymentStatus::Completed),
        "failed" => Ok(PaymentStatus::Failed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment status: {}", s),
        )),
    }
}

fn payment_kind_to_str(kind: PaymentKind) -> &'static str {
    match kind {
        PaymentKind::OneShot => "one_shot",
        PaymentKind::Installment => "installment",
        PaymentKind::Renewal => "renewal",
    }
}

fn parse_payment_kind(s: &str) -> Result<PaymentKind, DomainError> {
    match s {
        "one_shot" => Ok(PaymentKind::OneShot),
        "installment" => Ok(PaymentKind::Installment),
        "renewal" => Ok(PaymentKind::Renewal),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment kind: {}", s),
        )),
    }
}

fn installment_status_to_str(status: InstallmentStatus) -> &'static str {
    match status {
        InstallmentStatus::Pending => "pending",
        InstallmentStatus::Paid => "paid",
    }
}

fn parse_installment_status(s: &str) -> Result<InstallmentStatus, DomainError> {
    match s {
        "pending" => Ok(InstallmentStatus::Pending),
        "paid" => Ok(InstallmentStatus::Paid),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid installment status: {}", s),
        )),
    }
}

fn map_insert_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("payments_gateway_payment_id_key") {
            return DomainError::new(
                ErrorCode::DuplicatePayment,
                "Gateway payment already recorded",
            );
        }
    }
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to insert payment: {}", e),
    )
}

pub(super) async fn insert_payment_tx(
    tx: &mut Transaction<'_, Postgres>,
    payment: &Payment,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO payments (
            id, user_id, plan_id, amount, status, kind,
            gateway_order_id, gateway_payment_id, method, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(payment.id.as_uuid())
    .bind(payment.user_id.as_uuid())
    .bind(payment.plan_id.as_uuid())
    .bind(payment.amount.as_minor())
    .bind(payment_status_to_str(payment.status))
    .bind(payment_kind_to_str(payment.kind))
    .bind(&payment.gateway_order_id)
    .bind(&payment.gateway_payment_id)
    .bind(&payment.method)
    .bind(payment.created_at.as_datetime())
    .bind(payment.updated_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(map_insert_error)?;

    Ok(())
}

async fn insert_installment_tx(
    tx: &mut Transaction<'_, Postgres>,
    installment: &Installment,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO installments (
            id, payment_id, number, amount, due_date, status, paid_at, gateway_payment_id
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(installment.id.as_uuid())
    .bind(installment.payment_id.as_uuid())
    .bind(i16::from(installment.number))
    .bind(installment.amount.as_minor())
    .bind(installment.due_date.as_datetime())
    .bind(installment_status_to_str(installment.status))
    .bind(installment.paid_at.map(|t| *t.as_datetime()))
    .bind(&installment.gateway_payment_id)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to insert installment: {}", e),
        )
    })?;

    Ok(())
}

fn begin_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to open transaction: {}", e),
    )
}

fn commit_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to commit transaction: {}", e),
    )
}

const PAYMENT_COLUMNS: &str = "id, user_id, plan_id, amount, status, kind, \
     gateway_order_id, gateway_payment_id, method, created_at, updated_at";

const INSTALLMENT_COLUMNS: &str =
    "id, payment_id, number, amount, due_date, status, paid_at, gateway_payment_id";

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;
        insert_payment_tx(&mut tx, payment).await?;
        tx.commit().await.map_err(commit_error)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, DomainError> {
        let sql = format!("SELECT {} FROM payments WHERE id = $1", PAYMENT_COLUMNS);
        let row: Option<PaymentRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE gateway_payment_id = $1",
            PAYMENT_COLUMNS
        );
        let row: Option<PaymentRow> = sqlx::query_as(&sql)
            .bind(gateway_payment_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(Payment::try_from).transpose()
    }

    async fn insert_installment_purchase(
        &self,
        payment: &Payment,
        installments: &[Installment],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;
        insert_payment_tx(&mut tx, payment).await?;
        for installment in installments {
            insert_installment_tx(&mut tx, installment).await?;
        }
        tx.commit().await.map_err(commit_error)
    }

    async fn find_installment(
        &self,
        id: InstallmentId,
    ) -> Result<Option<Installment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM installments WHERE id = $1",
            INSTALLMENT_COLUMNS
        );
        let row: Option<InstallmentRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(Installment::try_from).transpose()
    }

    async fn installments_for_payment(
        &self,
        payment_id: PaymentId,
    ) -> Result<Vec<Installment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM installments WHERE payment_id = $1 ORDER BY number",
            INSTALLMENT_COLUMNS
        );
        let rows: Vec<InstallmentRow> = sqlx::query_as(&sql)
            .bind(payment_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(fetch_error)?;

        rows.into_iter().map(Installment::try_from).collect()
    }

    async fn settle_installment(
        &self,
        payment: &Payment,
        installment: &Installment,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        sqlx::query(
            r#"
            UPDATE installments SET
                status = $2,
                paid_at = $3,
                gateway_payment_id = $4
            WHERE id = $1
            "#,
        )
        .bind(installment.id.as_uuid())
        .bind(installment_status_to_str(installment.status))
        .bind(installment.paid_at.map(|t| *t.as_datetime()))
        .bind(&installment.gateway_payment_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to settle installment: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            UPDATE payments SET
                status = $2,
                method = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment_status_to_str(payment.status))
        .bind(&payment.method)
        .bind(payment.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update payment: {}", e),
            )
        })?;

        tx.commit().await.map_err(commit_error)
    }

    async fn list_pending_installments(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PendingInstallment>, DomainError> {
        #[derive(Debug, sqlx::FromRow)]
        struct JoinedRow {
            i_id: Uuid,
            i_number: i16,
            i_amount: i64,
            i_due_date: DateTime<Utc>,
            i_status: String,
            i_paid_at: Option<DateTime<Utc>>,
            i_gateway_payment_id: Option<String>,
            p_id: Uuid,
            p_user_id: Uuid,
            p_plan_id: Uuid,
            p_amount: i64,
            p_status: String,
            p_kind: String,
            p_gateway_order_id: Option<String>,
            p_gateway_payment_id: Option<String>,
            p_method: Option<String>,
            p_created_at: DateTime<Utc>,
            p_updated_at: DateTime<Utc>,
            plan_name: String,
        }

        let rows: Vec<JoinedRow> = sqlx::query_as(
            r#"
            SELECT i.id AS i_id, i.number AS i_number, i.amount AS i_amount,
                   i.due_date AS i_due_date, i.status AS i_status,
                   i.paid_at AS i_paid_at,
                   i.gateway_payment_id AS i_gateway_payment_id,
                   p.id AS p_id, p.user_id AS p_user_id, p.plan_id AS p_plan_id,
                   p.amount AS p_amount, p.status AS p_status, p.kind AS p_kind,
                   p.gateway_order_id AS p_gateway_order_id,
                   p.gateway_payment_id AS p_gateway_payment_id,
                   p.method AS p_method, p.created_at AS p_created_at,
                   p.updated_at AS p_updated_at,
                   pl.name AS plan_name
            FROM installments i
            JOIN payments p ON p.id = i.payment_id
            JOIN plans pl ON pl.id = p.plan_id
            WHERE p.user_id = $1 AND i.status = 'pending'
            ORDER BY i.due_date
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        rows.into_iter()
            .map(|row| {
                let installment = Installment::try_from(InstallmentRow {
                    id: row.i_id,
                    payment_id: row.p_id,
                    number: row.i_number,
                    amount: row.i_amount,
                    due_date: row.i_due_date,
                    status: row.i_status,
                    paid_at: row.i_paid_at,
                    gateway_payment_id: row.i_gateway_payment_id,
                })?;
                let payment = Payment::try_from(PaymentRow {
                    id: row.p_id,
                    user_id: row.p_user_id,
                    plan_id: row.p_plan_id,
                    amount: row.p_amount,
                    status: row.p_status,
                    kind: row.p_kind,
                    gateway_order_id: row.p_gateway_order_id,
                    gateway_payment_id: row.p_gateway_payment_id,
                    method: row.p_method,
                    created_at: row.p_created_at,
                    updated_at: row.p_updated_at,
                })?;
                Ok(PendingInstallment {
                    installment,
                    payment,
                    plan_name: row.plan_name,
                })
            })
            .collect()
    }
}

fn fetch_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to fetch payment data: {}", e),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_conversion_roundtrips() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
        ] {
            assert_eq!(
                parse_payment_status(payment_status_to_str(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn payment_kind_conversion_roundtrips() {
        for kind in [
            PaymentKind::OneShot,
            PaymentKind::Installment,
            PaymentKind::Renewal,
        ] {
            assert_eq!(parse_payment_kind(payment_kind_to_str(kind)).unwrap(), kind);
        }
    }

    #[test]
    fn invalid_status_strings_are_rejected() {
        assert!(parse_payment_status("settled").is_err());
        assert!(parse_payment_kind("emi").is_err());
        assert!(parse_installment_status("done").is_err());
    }
}
