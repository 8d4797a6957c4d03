//! HTTP adapter for installment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateInstallmentOrderRequest, CreateInstallmentPlanRequest, InstallmentOrderResponse,
    InstallmentPlanResponse, InstallmentPurchaseResponse, InstallmentResponse,
    PendingInstallmentsResponse, ProcessFirstInstallmentRequest, ProcessSecondInstallmentRequest,
};
pub use handlers::InstallmentHandlers;
pub use routes::installment_routes;
