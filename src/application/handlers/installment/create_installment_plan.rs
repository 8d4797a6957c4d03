//! CreateInstallmentPlanHandler - Command handler for the installment split.

use std::sync::Arc;

use crate::domain::foundation::{Money, PlanId, Timestamp};
use crate::domain::payment::PaymentError;
use crate::domain::plan::InstallmentScheme;
use crate::ports::PlanRepository;

/// Command asking for a plan's installment split.
#[derive(Debug, Clone)]
pub struct CreateInstallmentPlanCommand {
    pub plan_id: PlanId,

    /// Total the client expects to pay. The split must cover exactly this.
    pub expected_total: Money,
}

/// The two-part split the client will be charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentPlanPreview {
    pub first_amount: Money,
    pub second_amount: Money,
    pub total: Money,
    pub second_due_date: Timestamp,
}

/// Handler producing the installment split for a plan.
///
/// The split amounts are business-configured per tier, not derived from the
/// price. If configuration drifts so the amounts no longer cover the
/// expected total, the request fails closed instead of charging a wrong
/// amount.
pub struct CreateInstallmentPlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl CreateInstallmentPlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(
        &self,
        cmd: CreateInstallmentPlanCommand,
    ) -> Result<InstallmentPlanPreview, PaymentError> {
        let plan = self
            .plans
            .find_by_id(cmd.plan_id)
            .await?
            .filter(|p| p.active)
            .ok_or_else(|| PaymentError::plan_not_found(cmd.plan_id))?;

        // Checks the scheme against the plan price and the client total.
        let scheme = plan
            .installment_scheme()
            .map_err(|e| PaymentError::validation_failed("plan", e.message()))?;
        scheme
            .matches_total(cmd.expected_total)
            .map_err(|e| PaymentError::validation_failed("expected_total", e.message()))?;

        Ok(InstallmentPlanPreview {
            first_amount: scheme.first_amount,
            second_amount: scheme.second_amount,
            total: cmd.expected_total,
            second_due_date: Timestamp::now()
                .add_days(InstallmentScheme::SECOND_DUE_AFTER_DAYS),
        })
    }
}
