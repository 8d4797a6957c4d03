//! Port for the plan catalog.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId};
use crate::domain::plan::Plan;

/// Read access to the seeded plan catalog.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Active plans in display order.
    async fn list_active(&self) -> Result<Vec<Plan>, DomainError>;

    async fn find_by_id(&self, id: PlanId) -> Result<Option<Plan>, DomainError>;
}
