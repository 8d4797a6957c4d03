//! GetPaymentStatusHandler - Query handler for payment status polling.

use std::sync::Arc;

use crate::domain::foundation::PaymentId;
use crate::domain::payment::{Payment, PaymentError};
use crate::ports::PaymentRepository;

/// Handler returning one payment for status polling by the client.
pub struct GetPaymentStatusHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl GetPaymentStatusHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, id: PaymentId) -> Result<Payment, PaymentError> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{money, MockPaymentRepository};
    use crate::domain::foundation::{PlanId, UserId};
    use crate::ports::PaymentRepository as _;

    #[tokio::test]
    async fn returns_the_stored_payment() {
        let payments = MockPaymentRepository::new();
        let payment = Payment::record_one_shot(
            PaymentId::new(),
            UserId::new(),
            PlanId::new(),
            money(999),
            "order_1".to_string(),
            "pay_1".to_string(),
            None,
        );
        payments.insert(&payment).await.unwrap();

        let handler = GetPaymentStatusHandler::new(payments);
        let found = handler.handle(payment.id).await.unwrap();
        assert_eq!(found.status, payment.status);
    }

    #[tokio::test]
    async fn unknown_payment_is_not_found() {
        let handler = GetPaymentStatusHandler::new(MockPaymentRepository::new());
        assert!(matches!(
            handler.handle(PaymentId::new()).await,
            Err(PaymentError::NotFound(_))
        ));
    }
}
