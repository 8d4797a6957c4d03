//! PostgreSQL implementation of PlanRepository.
//!
//! The plan catalog is seeded by migration and read-only at runtime.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Money, PlanId};
use crate::domain::plan::{InstallmentScheme, Plan};
use crate::ports::PlanRepository;

pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a plan.
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    name: String,
    description: String,
    price: i64,
    validity_months: i32,
    active: bool,
    first_installment_amount: Option<i64>,
    second_installment_amount: Option<i64>,
}

impl TryFrom<PlanRow> for Plan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let installment_scheme = match (
            row.first_installment_amount,
            row.second_installment_amount,
        ) {
            (Some(first), Some(second)) => Some(InstallmentScheme::new(
                minor_amount(first)?,
                minor_amount(second)?,
            )),
            (None, None) => None,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Plan {} has a half-filled installment scheme", row.id),
                ))
            }
        };

        Ok(Plan {
            id: PlanId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            price: minor_amount(row.price)?,
            validity_months: row.validity_months as u32,
            active: row.active,
            installment_scheme,
        })
    }
}

fn minor_amount(minor: i64) -> Result<Money, DomainError> {
    Money::from_minor(minor)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid amount: {}", e)))
}

const PLAN_COLUMNS: &str = "id, name, description, price, validity_months, active, \
     first_installment_amount, second_installment_amount";

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn list_active(&self) -> Result<Vec<Plan>, DomainError> {
        let rows: Vec<PlanRow> = sqlx::query_as(&format!(
            "SELECT {} FROM plans WHERE active ORDER BY display_order",
            PLAN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list plans: {}", e),
            )
        })?;

        rows.into_iter().map(Plan::try_from).collect()
    }

    async fn find_by_id(&self, id: PlanId) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> =
            sqlx::query_as(&format!("SELECT {} FROM plans WHERE id = $1", PLAN_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to fetch plan: {}", e),
                    )
                })?;

        row.map(Plan::try_from).transpose()
    }
}
