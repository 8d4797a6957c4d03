//! Two-part installment purchase handlers.

mod create_installment_order;
mod create_installment_plan;
mod get_pending_installments;
mod process_first_installment;
mod process_second_installment;

pub use create_installment_order::{CreateInstallmentOrderCommand, CreateInstallmentOrderHandler};
pub use create_installment_plan::{
    CreateInstallmentPlanCommand, CreateInstallmentPlanHandler, InstallmentPlanPreview,
};
pub use get_pending_installments::GetPendingInstallmentsHandler;
pub use process_first_installment::{
    ProcessFirstInstallmentCommand, ProcessFirstInstallmentHandler, ProcessFirstInstallmentResult,
};
pub use process_second_installment::{
    ProcessSecondInstallmentCommand, ProcessSecondInstallmentHandler,
    ProcessSecondInstallmentResult,
};
