//! Plan catalog entity.
//!
//! Plans are seeded through migrations and read-only at runtime. A plan may
//! carry an installment scheme: two business-configured fixed amounts that
//! split its price into a first and second charge.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, PlanId, ValidationError};

use super::PlanError;

/// Fixed two-part split for one plan tier.
///
/// The amounts are configured per tier, not computed from the price. The
/// scheme is validated against the plan price on load and again whenever an
/// installment plan is created, so configuration drift fails closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentScheme {
    /// Amount charged immediately.
    pub first_amount: Money,

    /// Amount charged 30 days later.
    pub second_amount: Money,
}

impl InstallmentScheme {
    /// Days between the first charge and the second installment's due date.
    pub const SECOND_DUE_AFTER_DAYS: i64 = 30;

    pub fn new(first_amount: Money, second_amount: Money) -> Self {
        Self {
            first_amount,
            second_amount,
        }
    }

    /// Returns the scheme total, erroring on overflow.
    pub fn total(&self) -> Result<Money, ValidationError> {
        self.first_amount.checked_add(self.second_amount).ok_or_else(|| {
            ValidationError::invalid_format("installment_scheme", "amount overflow")
        })
    }

    /// Checks that the fixed amounts cover exactly the given total.
    pub fn matches_total(&self, total: Money) -> Result<(), PlanError> {
        let scheme_total = self
            .total()
            .map_err(|e| PlanError::validation("installment_scheme", e.to_string()))?;
        if scheme_total != total {
            return Err(PlanError::installment_mismatch(scheme_total, total));
        }
        Ok(())
    }
}

/// A purchasable plan tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier for this plan.
    pub id: PlanId,

    /// Display name, e.g. "Pro - 6 months".
    pub name: String,

    /// Marketing description.
    pub description: String,

    /// Advertised price.
    pub price: Money,

    /// Validity period in months (30-day months).
    pub validity_months: u32,

    /// Whether the plan is currently offered.
    pub active: bool,

    /// Optional two-part payment scheme for this tier.
    pub installment_scheme: Option<InstallmentScheme>,
}

impl Plan {
    /// Returns the installment scheme, validated against the plan price.
    ///
    /// # Errors
    ///
    /// - `InstallmentsUnavailable` if the tier has no scheme
    /// - `InstallmentMismatch` if the configured amounts no longer sum to
    ///   the plan price
    pub fn installment_scheme(&self) -> Result<InstallmentScheme, PlanError> {
        let scheme = self
            .installment_scheme
            .ok_or_else(|| PlanError::installments_unavailable(self.id))?;
        scheme.matches_total(self.price)?;
        Ok(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(major: i64) -> Money {
        Money::from_major(major).unwrap()
    }

    fn test_plan(price: i64, scheme: Option<(i64, i64)>) -> Plan {
        Plan {
            id: PlanId::new(),
            name: "Pro - 6 months".to_string(),
            description: "Full tutoring access".to_string(),
            price: money(price),
            validity_months: 6,
            active: true,
            installment_scheme: scheme
                .map(|(a, b)| InstallmentScheme::new(money(a), money(b))),
        }
    }

    #[test]
    fn scheme_matching_price_is_accepted() {
        let plan = test_plan(2499, Some((1299, 1200)));
        let scheme = plan.installment_scheme().unwrap();
        assert_eq!(scheme.first_amount, money(1299));
        assert_eq!(scheme.second_amount, money(1200));
    }

    #[test]
    fn drifted_scheme_fails_closed() {
        let plan = test_plan(2500, Some((1299, 1200)));
        let result = plan.installment_scheme();
        assert!(matches!(result, Err(PlanError::InstallmentMismatch { .. })));
    }

    #[test]
    fn plan_without_scheme_rejects_installments() {
        let plan = test_plan(999, None);
        let result = plan.installment_scheme();
        assert!(matches!(
            result,
            Err(PlanError::InstallmentsUnavailable(_))
        ));
    }

    #[test]
    fn scheme_total_sums_amounts() {
        let scheme = InstallmentScheme::new(money(1299), money(1200));
        assert_eq!(scheme.total().unwrap(), money(2499));
    }
}
