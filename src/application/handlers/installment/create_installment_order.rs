//! CreateInstallmentOrderHandler - Command handler minting gateway orders
//! for installment charges.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{PaymentId, PlanId, UserId};
use crate::domain::payment::{PaymentError, INSTALLMENT_COUNT};
use crate::ports::{GatewayOrder, OrderRequest, PaymentGateway, PaymentRepository, PlanRepository};

/// Command to mint a gateway order for one installment.
#[derive(Debug, Clone)]
pub struct CreateInstallmentOrderCommand {
    pub user_id: UserId,
    pub plan_id: PlanId,

    /// 1 or 2.
    pub installment_number: u8,

    /// The purchase being continued. Required for the second installment.
    pub payment_id: Option<PaymentId>,
}

/// Handler minting a gateway order for an installment charge.
///
/// Writes nothing locally; the purchase rows appear when the gateway
/// reports the charge back. A second-installment order is refused until
/// installment 1 of the referenced purchase is paid.
pub struct CreateInstallmentOrderHandler {
    plans: Arc<dyn PlanRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateInstallmentOrderHandler {
    pub fn new(
        plans: Arc<dyn PlanRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            plans,
            payments,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateInstallmentOrderCommand,
    ) -> Result<GatewayOrder, PaymentError> {
        if !(1..=INSTALLMENT_COUNT).contains(&cmd.installment_number) {
            return Err(PaymentError::validation_failed(
                "installment_number",
                format!("must be between 1 and {}", INSTALLMENT_COUNT),
            ));
        }

        let plan = self
            .plans
            .find_by_id(cmd.plan_id)
            .await?
            .filter(|p| p.active)
            .ok_or_else(|| PaymentError::plan_not_found(cmd.plan_id))?;
        let scheme = plan
            .installment_scheme()
            .map_err(|e| PaymentError::validation_failed("plan", e.message()))?;

        let amount = match cmd.installment_number {
            1 => scheme.first_amount,
            _ => scheme.second_amount,
        };

        // The second charge only after the first settled.
        if cmd.installment_number == 2 {
            let payment_id = cmd.payment_id.ok_or_else(|| {
                PaymentError::validation_failed("payment_id", "required for installment 2")
            })?;
            let installments = self.payments.installments_for_payment(payment_id).await?;
            if installments.is_empty() {
                return Err(PaymentError::not_found(payment_id));
            }
            let first_paid = installments.iter().any(|i| i.number == 1 && i.is_paid());
            if !first_paid {
                return Err(PaymentError::out_of_order(payment_id));
            }
        }

        let mut notes = HashMap::new();
        notes.insert(
            "installment_number".to_string(),
            cmd.installment_number.to_string(),
        );
        notes.insert(
            "installment_count".to_string(),
            INSTALLMENT_COUNT.to_string(),
        );
        notes.insert("plan_id".to_string(), cmd.plan_id.to_string());

        let order = self
            .gateway
            .create_order(OrderRequest {
                amount,
                receipt: format!("inst{}-{}", cmd.installment_number, cmd.user_id),
                notes,
            })
            .await
            .map_err(|e| PaymentError::gateway_failed(e.to_string()))?;

        tracing::info!(
            order_id = %order.order_id,
            installment = cmd.installment_number,
            "installment order minted"
        );

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        plan_with_installments, MockPaymentGateway, MockPaymentRepository, MockPlanRepository,
    };
    use crate::domain::payment::{Installment, Payment};
    use crate::ports::PaymentRepository as _;

    fn command(plan_id: PlanId, number: u8, payment_id: Option<PaymentId>) -> CreateInstallmentOrderCommand {
        CreateInstallmentOrderCommand {
            user_id: UserId::new(),
            plan_id,
            installment_number: number,
            payment_id,
        }
    }

    #[tokio::test]
    async fn first_order_charges_the_first_amount() {
        let plan = plan_with_installments();
        let gateway = MockPaymentGateway::new();
        let handler = CreateInstallmentOrderHandler::new(
            MockPlanRepository::with_plans(vec![plan.clone()]),
            MockPaymentRepository::new(),
            gateway.clone(),
        );

        let order = handler.handle(command(plan.id, 1, None)).await.unwrap();

        let scheme = plan.installment_scheme.unwrap();
        assert_eq!(order.amount, scheme.first_amount);
        let minted = gateway.orders.lock().unwrap();
        assert_eq!(minted[0].notes.get("installment_number").unwrap(), "1");
        assert_eq!(minted[0].notes.get("installment_count").unwrap(), "2");
    }

    #[tokio::test]
    async fn second_order_requires_first_paid() {
        let plan = plan_with_installments();
        let payments = MockPaymentRepository::new();
        let scheme = plan.installment_scheme.unwrap();

        let payment = Payment::start_installments(
            PaymentId::new(),
            UserId::new(),
            plan.id,
            plan.price,
            "order_1".to_string(),
        );
        let schedule = Installment::schedule(payment.id, &scheme);
        payments
            .insert_installment_purchase(&payment, &schedule)
            .await
            .unwrap();

        let handler = CreateInstallmentOrderHandler::new(
            MockPlanRepository::with_plans(vec![plan.clone()]),
            payments.clone(),
            MockPaymentGateway::new(),
        );

        // first unpaid: refused
        let result = handler
            .handle(command(plan.id, 2, Some(payment.id)))
            .await;
        assert!(matches!(
            result,
            Err(PaymentError::InstallmentOutOfOrder { .. })
        ));

        // settle the first, retry
        let [mut first, _] = schedule;
        first.mark_paid("pay_1".to_string()).unwrap();
        payments.settle_installment(&payment, &first).await.unwrap();

        let order = handler
            .handle(command(plan.id, 2, Some(payment.id)))
            .await
            .unwrap();
        assert_eq!(order.amount, scheme.second_amount);
    }

    #[tokio::test]
    async fn installment_number_out_of_range_is_rejected() {
        let plan = plan_with_installments();
        let handler = CreateInstallmentOrderHandler::new(
            MockPlanRepository::with_plans(vec![plan.clone()]),
            MockPaymentRepository::new(),
            MockPaymentGateway::new(),
        );

        for bad in [0u8, 3] {
            assert!(handler.handle(command(plan.id, bad, None)).await.is_err());
        }
    }

    #[tokio::test]
    async fn gateway_outage_surfaces_as_gateway_failure() {
        let plan = plan_with_installments();
        let handler = CreateInstallmentOrderHandler::new(
            MockPlanRepository::with_plans(vec![plan.clone()]),
            MockPaymentRepository::new(),
            MockPaymentGateway::failing(),
        );

        let result = handler.handle(command(plan.id, 1, None)).await;
        assert!(matches!(result, Err(PaymentError::GatewayFailed { .. })));
    }
}
