//! ProcessSecondInstallmentHandler - Command handler for the second
//! installment charge report.

use std::sync::Arc;

use crate::domain::foundation::PaymentId;
use crate::domain::payment::{GatewaySignatureVerifier, Installment, Payment, PaymentError};
use crate::ports::PaymentRepository;

/// Command carrying the gateway's report of the second installment charge.
#[derive(Debug, Clone)]
pub struct ProcessSecondInstallmentCommand {
    pub payment_id: PaymentId,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

/// The settled installment and the (now possibly completed) payment.
#[derive(Debug, Clone)]
pub struct ProcessSecondInstallmentResult {
    pub payment: Payment,
    pub installment: Installment,
}

/// Handler recording a settled second installment.
///
/// When the second charge settles the whole schedule, the payment flips to
/// completed in the same transaction that marks the installment paid, so no
/// reader ever sees two paid installments next to a pending payment.
pub struct ProcessSecondInstallmentHandler {
    payments: Arc<dyn PaymentRepository>,
    verifier: Arc<GatewaySignatureVerifier>,
}

impl ProcessSecondInstallmentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        verifier: Arc<GatewaySignatureVerifier>,
    ) -> Self {
        Self { payments, verifier }
    }

    pub async fn handle(
        &self,
        cmd: ProcessSecondInstallmentCommand,
    ) -> Result<ProcessSecondInstallmentResult, PaymentError> {
        // 1. Verify the gateway signature before any write.
        self.verifier.verify(
            &cmd.gateway_order_id,
            &cmd.gateway_payment_id,
            &cmd.signature,
        )?;

        // 2. Load the purchase and its schedule.
        let mut payment = self
            .payments
            .find_by_id(cmd.payment_id)
            .await?
            .ok_or_else(|| PaymentError::not_found(cmd.payment_id))?;
        let installments = self
            .payments
            .installments_for_payment(cmd.payment_id)
            .await?;

        let first_paid = installments.iter().any(|i| i.number == 1 && i.is_paid());
        if !first_paid {
            return Err(PaymentError::out_of_order(cmd.payment_id));
        }
        let mut second = installments
            .into_iter()
            .find(|i| i.number == 2)
            .ok_or_else(|| PaymentError::not_found(cmd.payment_id))?;
        if second.is_paid() {
            return Err(PaymentError::already_processed(cmd.gateway_payment_id));
        }

        // 3. Settle the installment; a fully paid schedule completes the
        //    payment in the same write.
        second
            .mark_paid(cmd.gateway_payment_id)
            .map_err(PaymentError::from)?;
        payment.complete().map_err(PaymentError::from)?;

        self.payments.settle_installment(&payment, &second).await?;

        tracing::info!(payment_id = %payment.id, "installment purchase completed");

        Ok(ProcessSecondInstallmentResult {
            payment,
            installment: second,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        plan_with_installments, MockPaymentRepository,
    };
    use crate::domain::foundation::UserId;
    use crate::domain::payment::PaymentStatus;
    use secrecy::Secret;

    fn verifier() -> Arc<GatewaySignatureVerifier> {
        Arc::new(GatewaySignatureVerifier::new(Secret::new(
            "gw_secret_test".to_string(),
        )))
    }

    struct Fixture {
        payments: Arc<MockPaymentRepository>,
        payment: Payment,
    }

    /// Seeds a purchase with installment 1 already settled.
    async fn purchase_after_first() -> Fixture {
        let plan = plan_with_installments();
        let scheme = plan.installment_scheme.unwrap();
        let payments = MockPaymentRepository::new();

        let payment = Payment::start_installments(
            PaymentId::new(),
            UserId::new(),
            plan.id,
            plan.price,
            "order_1".to_string(),
        );
        let mut installments = Installment::schedule(payment.id, &scheme).to_vec();
        installments[0].mark_paid("pay_first".to_string()).unwrap();
        payments
            .insert_installment_purchase(&payment, &installments)
            .await
            .unwrap();

        Fixture { payments, payment }
    }

    fn command(payment_id: PaymentId) -> ProcessSecondInstallmentCommand {
        let signature = verifier().sign("order_2", "pay_second");
        ProcessSecondInstallmentCommand {
            payment_id,
            gateway_order_id: "order_2".to_string(),
            gateway_payment_id: "pay_second".to_string(),
            signature,
        }
    }

    #[tokio::test]
    async fn settling_the_second_completes_the_payment() {
        let fx = purchase_after_first().await;
        let handler = ProcessSecondInstallmentHandler::new(fx.payments.clone(), verifier());

        let result = handler.handle(command(fx.payment.id)).await.unwrap();

        assert!(result.installment.is_paid());
        assert_eq!(result.payment.status, PaymentStatus::Completed);

        // Committed state agrees with the returned one.
        let stored = fx.payments.stored_payments();
        assert_eq!(stored[0].status, PaymentStatus::Completed);
        assert!(fx
            .payments
            .stored_installments()
            .iter()
            .all(|i| i.is_paid()));
    }

    #[tokio::test]
    async fn second_before_first_is_out_of_order() {
        let plan = plan_with_installments();
        let scheme = plan.installment_scheme.unwrap();
        let payments = MockPaymentRepository::new();
        let payment = Payment::start_installments(
            PaymentId::new(),
            UserId::new(),
            plan.id,
            plan.price,
            "order_1".to_string(),
        );
        let installments = Installment::schedule(payment.id, &scheme);
        payments
            .insert_installment_purchase(&payment, &installments)
            .await
            .unwrap();

        let handler = ProcessSecondInstallmentHandler::new(payments, verifier());
        let result = handler.handle(command(payment.id)).await;
        assert!(matches!(
            result,
            Err(PaymentError::InstallmentOutOfOrder { .. })
        ));
    }

    #[tokio::test]
    async fn replayed_second_charge_is_already_processed() {
        let fx = purchase_after_first().await;
        let handler = ProcessSecondInstallmentHandler::new(fx.payments.clone(), verifier());

        handler.handle(command(fx.payment.id)).await.unwrap();
        let replay = handler.handle(command(fx.payment.id)).await;

        assert!(matches!(replay, Err(PaymentError::AlreadyProcessed { .. })));
        assert_eq!(fx.payments.stored_payments().len(), 1);
    }

    #[tokio::test]
    async fn bad_signature_writes_nothing() {
        let fx = purchase_after_first().await;
        let handler = ProcessSecondInstallmentHandler::new(fx.payments.clone(), verifier());

        let mut cmd = command(fx.payment.id);
        cmd.signature = "ffff".to_string();
        assert!(matches!(
            handler.handle(cmd).await,
            Err(PaymentError::InvalidSignature)
        ));
        assert_eq!(fx.payments.stored_payments()[0].status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_payment_is_not_found() {
        let handler =
            ProcessSecondInstallmentHandler::new(MockPaymentRepository::new(), verifier());
        assert!(matches!(
            handler.handle(command(PaymentId::new())).await,
            Err(PaymentError::NotFound(_))
        ));
    }
}
