//! GetPendingInstallmentsHandler - Query handler for due installments.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::payment::PaymentError;
use crate::ports::{PaymentRepository, PendingInstallment};

/// Handler listing a user's unpaid installments, earliest due first.
pub struct GetPendingInstallmentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl GetPendingInstallmentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Vec<PendingInstallment>, PaymentError> {
        let pending = self.payments.list_pending_installments(user_id).await?;
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        plan_with_installments, MockPaymentRepository,
    };
    use crate::domain::foundation::PaymentId;
    use crate::domain::payment::{Installment, Payment};
    use crate::ports::PaymentRepository as _;

    #[tokio::test]
    async fn lists_only_the_users_unpaid_installments() {
        let plan = plan_with_installments();
        let scheme = plan.installment_scheme.unwrap();
        let payments = MockPaymentRepository::new();
        payments.know_plan(&plan);

        let user_id = UserId::new();
        let payment = Payment::start_installments(
            PaymentId::new(),
            user_id,
            plan.id,
            plan.price,
            "order_1".to_string(),
        );
        let mut installments = Installment::schedule(payment.id, &scheme).to_vec();
        installments[0].mark_paid("pay_1".to_string()).unwrap();
        payments
            .insert_installment_purchase(&payment, &installments)
            .await
            .unwrap();

        // Another user's purchase must not leak in.
        let other = Payment::start_installments(
            PaymentId::new(),
            UserId::new(),
            plan.id,
            plan.price,
            "order_2".to_string(),
        );
        payments
            .insert_installment_purchase(&other, &Installment::schedule(other.id, &scheme))
            .await
            .unwrap();

        let handler = GetPendingInstallmentsHandler::new(payments);
        let pending = handler.handle(user_id).await.unwrap();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].installment.number, 2);
        assert_eq!(pending[0].plan_name, plan.name);
        assert_eq!(pending[0].payment.id, payment.id);
    }

    #[tokio::test]
    async fn empty_for_a_user_with_no_purchases() {
        let handler = GetPendingInstallmentsHandler::new(MockPaymentRepository::new());
        assert!(handler.handle(UserId::new()).await.unwrap().is_empty());
    }
}
