//! Ports: trait seams between the application layer and the outside world.
//!
//! Adapters implement these; handlers depend on them as `Arc<dyn Trait>`.

mod booking_repository;
mod payment_gateway;
mod payment_repository;
mod plan_repository;
mod session_repository;
mod subscription_repository;
mod user_repository;

pub use booking_repository::BookingRepository;
pub use payment_gateway::{GatewayError, GatewayOrder, OrderRequest, PaymentGateway};
pub use payment_repository::{PaymentRepository, PendingInstallment};
pub use plan_repository::PlanRepository;
pub use session_repository::SessionRepository;
pub use subscription_repository::SubscriptionRepository;
pub use user_repository::UserRepository;
