//! Response DTOs for the plan catalog.

use serde::Serialize;

use crate::domain::plan::Plan;

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentSchemeResponse {
    pub first_amount: i64,
    pub second_amount: i64,
}

/// One purchasable plan. Amounts are in minor currency units.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub validity_months: u32,
    pub installments_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment_scheme: Option<InstallmentSchemeResponse>,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        let scheme = plan
            .installment_scheme
            .as_ref()
            .map(|s| InstallmentSchemeResponse {
                first_amount: s.first_amount.as_minor(),
                second_amount: s.second_amount.as_minor(),
            });
        Self {
            id: plan.id.to_string(),
            name: plan.name,
            description: plan.description,
            price: plan.price.as_minor(),
            validity_months: plan.validity_months,
            installments_available: scheme.is_some(),
            installment_scheme: scheme,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanListResponse {
    pub plans: Vec<PlanResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Money, PlanId};
    use crate::domain::plan::InstallmentScheme;

    #[test]
    fn plan_without_scheme_serializes_without_field() {
        let plan = Plan {
            id: PlanId::new(),
            name: "Starter".to_string(),
            description: "3 months".to_string(),
            price: Money::from_minor(99900).unwrap(),
            validity_months: 3,
            active: true,
            installment_scheme: None,
        };
        let json = serde_json::to_string(&PlanResponse::from(plan)).unwrap();
        assert!(!json.contains("installment_scheme"));
        assert!(json.contains("\"installments_available\":false"));
    }

    #[test]
    fn plan_with_scheme_exposes_amounts() {
        let plan = Plan {
            id: PlanId::new(),
            name: "Pro".to_string(),
            description: "12 months".to_string(),
            price: Money::from_minor(249900).unwrap(),
            validity_months: 12,
            active: true,
            installment_scheme: Some(InstallmentScheme::new(
                Money::from_minor(129900).unwrap(),
                Money::from_minor(120000).unwrap(),
            )),
        };
        let resp = PlanResponse::from(plan);
        assert!(resp.installments_available);
        assert_eq!(resp.installment_scheme.unwrap().first_amount, 129900);
    }
}
