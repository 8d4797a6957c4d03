//! ListPlansHandler - Query handler for the plan catalog.

use std::sync::Arc;

use crate::domain::plan::{Plan, PlanError};
use crate::ports::PlanRepository;

/// Handler returning the purchasable catalog.
pub struct ListPlansHandler {
    plans: Arc<dyn PlanRepository>,
}

impl ListPlansHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self) -> Result<Vec<Plan>, PlanError> {
        let plans = self.plans.list_active().await?;
        Ok(plans)
    }
}
