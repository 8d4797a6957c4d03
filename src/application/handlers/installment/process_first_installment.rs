//! ProcessFirstInstallmentHandler - Command handler for the first
//! installment charge report.

use std::sync::Arc;

use crate::domain::foundation::{PaymentId, PlanId, UserId};
use crate::domain::payment::{
    GatewaySignatureVerifier, Installment, Payment, PaymentError,
};
use crate::ports::{PaymentRepository, PlanRepository};

/// Command carrying the gateway's report of the first installment charge.
#[derive(Debug, Clone)]
pub struct ProcessFirstInstallmentCommand {
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
    pub method: Option<String>,
}

/// The created purchase with its full schedule.
#[derive(Debug, Clone)]
pub struct ProcessFirstInstallmentResult {
    pub payment: Payment,
    pub installments: Vec<Installment>,
}

/// Handler recording a settled first installment.
///
/// Verifies the signature before any write, then lands the pending payment,
/// both installment rows and the paid mark of installment 1 in a single
/// transaction. The payment stays pending until installment 2 settles.
pub struct ProcessFirstInstallmentHandler {
    payments: Arc<dyn PaymentRepository>,
    plans: Arc<dyn PlanRepository>,
    verifier: Arc<GatewaySignatureVerifier>,
}

impl ProcessFirstInstallmentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        plans: Arc<dyn PlanRepository>,
        verifier: Arc<GatewaySignatureVerifier>,
    ) -> Self {
        Self {
            payments,
            plans,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessFirstInstallmentCommand,
    ) -> Result<ProcessFirstInstallmentResult, PaymentError> {
        // 1. Verify the gateway signature before any write.
        self.verifier.verify(
            &cmd.gateway_order_id,
            &cmd.gateway_payment_id,
            &cmd.signature,
        )?;

        // 2. Resolve the plan and its split.
        let plan = self
            .plans
            .find_by_id(cmd.plan_id)
            .await?
            .filter(|p| p.active)
            .ok_or_else(|| PaymentError::plan_not_found(cmd.plan_id))?;
        let scheme = plan
            .installment_scheme()
            .map_err(|e| PaymentError::validation_failed("plan", e.message()))?;

        // 3. Build the purchase: pending payment, two installments, the
        //    first already settled by this charge.
        let mut payment = Payment::start_installments(
            PaymentId::new(),
            cmd.user_id,
            cmd.plan_id,
            plan.price,
            cmd.gateway_order_id,
        );
        payment.method = cmd.method;
        let mut installments = Installment::schedule(payment.id, &scheme).to_vec();
        installments[0]
            .mark_paid(cmd.gateway_payment_id)
            .map_err(PaymentError::from)?;

        // 4. One transaction for all three rows.
        self.payments
            .insert_installment_purchase(&payment, &installments)
            .await?;

        // Reminder delivery is not integrated; the schedule row carries the
        // due date and this log is the hook.
        tracing::info!(
            payment_id = %payment.id,
            due_date = %installments[1].due_date,
            "second installment reminder scheduled"
        );

        Ok(ProcessFirstInstallmentResult {
            payment,
            installments,
        })
    }
}
