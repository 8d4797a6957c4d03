//! Shared in-memory mocks for handler tests.
//!
//! Each mock honors the same observable contract as the postgres adapter it
//! stands in for, including the unique-constraint errors the handlers rely
//! on (duplicate gateway payment ids, one active booking per user).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::booking::{BookingStatus, DemoBooking};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, InstallmentId, Money, PaymentId, PlanId, SubscriptionId,
    Timestamp, UserId,
};
use crate::domain::payment::{Installment, Payment};
use crate::domain::plan::{InstallmentScheme, Plan};
use crate::domain::subscription::Subscription;
use crate::ports::{
    BookingRepository, GatewayError, GatewayOrder, OrderRequest, PaymentGateway,
    PaymentRepository, PendingInstallment, PlanRepository, SubscriptionRepository,
};

pub fn money(major: i64) -> Money {
    Money::from_major(major).unwrap()
}

/// The worked catalog example: 2499 split as 1299 + 1200.
pub fn plan_with_installments() -> Plan {
    Plan {
        id: PlanId::new(),
        name: "Pro - 12 months".to_string(),
        description: "Full tutoring access".to_string(),
        price: money(2499),
        validity_months: 12,
        active: true,
        installment_scheme: Some(InstallmentScheme::new(money(1299), money(1200))),
    }
}

pub fn plan_without_installments() -> Plan {
    Plan {
        id: PlanId::new(),
        name: "Starter - 3 months".to_string(),
        description: "Trial tier".to_string(),
        price: money(999),
        validity_months: 3,
        active: true,
        installment_scheme: None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Plans
// ════════════════════════════════════════════════════════════════════════════

pub struct MockPlanRepository {
    plans: Mutex<Vec<Plan>>,
}

impl MockPlanRepository {
    pub fn with_plans(plans: Vec<Plan>) -> Arc<Self> {
        Arc::new(Self {
            plans: Mutex::new(plans),
        })
    }
}

#[async_trait]
impl PlanRepository for MockPlanRepository {
    async fn list_active(&self) -> Result<Vec<Plan>, DomainError> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.active)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: PlanId) -> Result<Option<Plan>, DomainError> {
        Ok(self.plans.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Payments and installments
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockPaymentRepository {
    pub payments: Mutex<Vec<Payment>>,
    pub installments: Mutex<Vec<Installment>>,
    plan_names: Mutex<HashMap<PlanId, String>>,
    fail_writes: bool,
}

impl MockPaymentRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_writes: true,
            ..Self::default()
        })
    }

    /// Registers the plan name used by the pending-installments join.
    pub fn know_plan(&self, plan: &Plan) {
        self.plan_names
            .lock()
            .unwrap()
            .insert(plan.id, plan.name.clone());
    }

    pub fn stored_payments(&self) -> Vec<Payment> {
        self.payments.lock().unwrap().clone()
    }

    pub fn stored_installments(&self) -> Vec<Installment> {
        self.installments.lock().unwrap().clone()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated write failure",
            ));
        }
        Ok(())
    }

    fn check_unique_gateway_payment_id(&self, payment: &Payment) -> Result<(), DomainError> {
        if let Some(gp) = &payment.gateway_payment_id {
            let payments = self.payments.lock().unwrap();
            if payments
                .iter()
                .any(|p| p.gateway_payment_id.as_deref() == Some(gp.as_str()))
            {
                return Err(DomainError::new(
                    ErrorCode::DuplicatePayment,
                    format!("gateway payment {} already recorded", gp),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        self.check_writable()?;
        self.check_unique_gateway_payment_id(payment)?;
        self.payments.lock().unwrap().push(payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.gateway_payment_id.as_deref() == Some(gateway_payment_id))
            .cloned())
    }

    async fn insert_installment_purchase(
        &self,
        payment: &Payment,
        installments: &[Installment],
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        self.payments.lock().unwrap().push(payment.clone());
        self.installments
            .lock()
            .unwrap()
            .extend(installments.iter().cloned());
        Ok(())
    }

    async fn find_installment(
        &self,
        id: InstallmentId,
    ) -> Result<Option<Installment>, DomainError> {
        Ok(self
            .installments
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn installments_for_payment(
        &self,
        payment_id: PaymentId,
    ) -> Result<Vec<Installment>, DomainError> {
        let mut found: Vec<Installment> = self
            .installments
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.payment_id == payment_id)
            .cloned()
            .collect();
        found.sort_by_key(|i| i.number);
        Ok(found)
    }

    async fn settle_installment(
        &self,
        payment: &Payment,
        installment: &Installment,
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut installments = self.installments.lock().unwrap();
        if let Some(slot) = installments.iter_mut().find(|i| i.id == installment.id) {
            *slot = installment.clone();
        }
        let mut payments = self.payments.lock().unwrap();
        if let Some(slot) = payments.iter_mut().find(|p| p.id == payment.id) {
            *slot = payment.clone();
        }
        Ok(())
    }

    async fn list_pending_installments(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PendingInstallment>, DomainError> {
        let payments = self.payments.lock().unwrap();
        let plan_names = self.plan_names.lock().unwrap();
        let mut pending: Vec<PendingInstallment> = self
            .installments
            .lock()
            .unwrap()
            .iter()
            .filter(|i| !i.is_paid())
            .filter_map(|i| {
                let payment = payments
                    .iter()
                    .find(|p| p.id == i.payment_id && p.user_id == user_id)?;
                Some(PendingInstallment {
                    installment: i.clone(),
                    payment: payment.clone(),
                    plan_name: plan_names
                        .get(&payment.plan_id)
                        .cloned()
                        .unwrap_or_else(|| "plan".to_string()),
                })
            })
            .collect();
        pending.sort_by_key(|p| p.installment.due_date);
        Ok(pending)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Gateway
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockPaymentGateway {
    counter: Mutex<u32>,
    pub cancelled: Mutex<Vec<String>>,
    pub orders: Mutex<Vec<OrderRequest>>,
    fail: bool,
}

impl MockPaymentGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    fn next(&self) -> u32 {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        *counter
    }

    fn check_reachable(&self) -> Result<(), GatewayError> {
        if self.fail {
            return Err(GatewayError::Unreachable("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError> {
        self.check_reachable()?;
        let amount = request.amount;
        self.orders.lock().unwrap().push(request);
        Ok(GatewayOrder {
            order_id: format!("order_{}", self.next()),
            amount,
        })
    }

    async fn create_plan(
        &self,
        _name: &str,
        _amount: Money,
        _interval_months: u32,
    ) -> Result<String, GatewayError> {
        self.check_reachable()?;
        Ok(format!("gwplan_{}", self.next()))
    }

    async fn create_subscription(&self, _gateway_plan_id: &str) -> Result<String, GatewayError> {
        self.check_reachable()?;
        Ok(format!("gwsub_{}", self.next()))
    }

    async fn cancel_subscription(
        &self,
        gateway_subscription_id: &str,
    ) -> Result<(), GatewayError> {
        self.check_reachable()?;
        self.cancelled
            .lock()
            .unwrap()
            .push(gateway_subscription_id.to_string());
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Subscriptions
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockSubscriptionRepository {
    pub subscriptions: Mutex<Vec<Subscription>>,
    pub renewal_payments: Mutex<Vec<Payment>>,
}

impl MockSubscriptionRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_subscription(subscription: Subscription) -> Arc<Self> {
        let repo = Self::default();
        repo.subscriptions.lock().unwrap().push(subscription);
        Arc::new(repo)
    }

    pub fn stored(&self, id: SubscriptionId) -> Option<Subscription> {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.subscriptions.lock().unwrap().push(subscription.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self.stored(id))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        if let Some(slot) = subscriptions.iter_mut().find(|s| s.id == subscription.id) {
            *slot = subscription.clone();
        }
        Ok(())
    }

    async fn record_renewal(
        &self,
        subscription: &Subscription,
        payment: &Payment,
    ) -> Result<(), DomainError> {
        {
            let renewals = self.renewal_payments.lock().unwrap();
            if let Some(gp) = &payment.gateway_payment_id {
                if renewals
                    .iter()
                    .any(|p| p.gateway_payment_id.as_deref() == Some(gp.as_str()))
                {
                    return Err(DomainError::new(
                        ErrorCode::DuplicatePayment,
                        format!("gateway payment {} already recorded", gp),
                    ));
                }
            }
        }
        self.renewal_payments.lock().unwrap().push(payment.clone());
        self.update(subscription).await
    }

    async fn list_billing_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError> {
        use crate::domain::subscription::SubscriptionStatus;
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                s.status == SubscriptionStatus::Active
                    && s.auto_pay
                    && !s.next_billing_date.is_before(&from)
                    && s.next_billing_date.is_before(&to)
            })
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Bookings
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockBookingRepository {
    pub bookings: Mutex<Vec<DemoBooking>>,
}

impl MockBookingRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_booking(booking: DemoBooking) -> Arc<Self> {
        let repo = Self::default();
        repo.bookings.lock().unwrap().push(booking);
        Arc::new(repo)
    }

    pub fn stored(&self, id: BookingId) -> Option<DemoBooking> {
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn insert(&self, booking: &DemoBooking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.lock().unwrap();
        let now = Timestamp::now();
        // Same rule as the partial unique index.
        let clash = bookings.iter().any(|b| {
            b.user_id == booking.user_id
                && b.status != BookingStatus::Cancelled
                && b.scheduled_at.is_after(&now)
        });
        if clash {
            return Err(DomainError::new(
                ErrorCode::AlreadyBooked,
                "user already has an active booking",
            ));
        }
        bookings.push(booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<DemoBooking>, DomainError> {
        Ok(self.stored(id))
    }

    async fn update(&self, booking: &DemoBooking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(slot) = bookings.iter_mut().find(|b| b.id == booking.id) {
            *slot = booking.clone();
        }
        Ok(())
    }

    async fn count_confirmed_at(
        &self,
        slot_times: &[Timestamp],
    ) -> Result<Vec<(Timestamp, u32)>, DomainError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(slot_times
            .iter()
            .filter_map(|t| {
                let count = bookings
                    .iter()
                    .filter(|b| b.status == BookingStatus::Confirmed && b.scheduled_at == *t)
                    .count() as u32;
                (count > 0).then_some((*t, count))
            })
            .collect())
    }

    async fn confirmed_count(&self, slot_time: Timestamp) -> Result<u32, DomainError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed && b.scheduled_at == slot_time)
            .count() as u32)
    }

    async fn find_active_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<DemoBooking>, DomainError> {
        let now = Timestamp::now();
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| {
                b.user_id == user_id
                    && b.status == BookingStatus::Confirmed
                    && b.scheduled_at.is_after(&now)
            })
            .cloned())
    }
}
