//! ProcessPaymentHandler - Command handler for one-shot plan purchases.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, PaymentId, PlanId, UserId};
use crate::domain::payment::{GatewaySignatureVerifier, Payment, PaymentError};
use crate::ports::{PaymentRepository, PlanRepository};

/// Command carrying what the gateway reported after collection.
#[derive(Debug, Clone)]
pub struct ProcessPaymentCommand {
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
    pub method: Option<String>,
}

/// Outcome of processing a gateway payment report.
#[derive(Debug, Clone)]
pub enum ProcessPaymentResult {
    /// The payment was recorded now.
    Recorded(Payment),

    /// The same gateway payment was recorded earlier; nothing was written.
    AlreadyProcessed(Payment),
}

/// Handler recording a settled one-shot purchase.
///
/// The signature is verified before anything touches the database; a
/// replayed gateway payment id is answered with the earlier record instead
/// of a second row.
pub struct ProcessPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    plans: Arc<dyn PlanRepository>,
    verifier: Arc<GatewaySignatureVerifier>,
}

impl ProcessPaymentHandler {
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
        cmd: ProcessPaymentCommand,
    ) -> Result<ProcessPaymentResult, PaymentError> {
        // 1. Verify the gateway signature before any write.
        self.verifier.verify(
            &cmd.gateway_order_id,
            &cmd.gateway_payment_id,
            &cmd.signature,
        )?;

        // 2. Look the plan up for the amount.
        let plan = self
            .plans
            .find_by_id(cmd.plan_id)
            .await?
            .filter(|p| p.active)
            .ok_or_else(|| PaymentError::plan_not_found(cmd.plan_id))?;

        // 3. Replay check ahead of the insert.
        if let Some(existing) = self
            .payments
            .find_by_gateway_payment_id(&cmd.gateway_payment_id)
            .await?
        {
            return Ok(ProcessPaymentResult::AlreadyProcessed(existing));
        }

        // 4. Record the settled purchase. A concurrent replay loses the
        //    race on the unique constraint and is answered the same way.
        let payment = Payment::record_one_shot(
            PaymentId::new(),
            cmd.user_id,
            cmd.plan_id,
            plan.price,
            cmd.gateway_order_id,
            cmd.gateway_payment_id.clone(),
            cmd.method,
        );
        match self.payments.insert(&payment).await {
            Ok(()) => {
                tracing::info!(payment_id = %payment.id, user_id = %cmd.user_id, "one-shot payment recorded");
                Ok(ProcessPaymentResult::Recorded(payment))
            }
            Err(err) if err.code == ErrorCode::DuplicatePayment => {
                let existing = self
                    .payments
                    .find_by_gateway_payment_id(&cmd.gateway_payment_id)
                    .await?
                    .ok_or(PaymentError::Infrastructure(err.message))?;
                Ok(ProcessPaymentResult::AlreadyProcessed(existing))
            }
            Err(err) => Err(err.into()),
        }
    }
}
