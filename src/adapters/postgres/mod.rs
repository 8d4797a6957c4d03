//! PostgreSQL adapters implementing the repository ports.

mod booking_repository;
mod payment_repository;
mod plan_repository;
mod session_repository;
mod subscription_repository;
mod user_repository;

pub use booking_repository::PostgresBookingRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use plan_repository::PostgresPlanRepository;
pub use session_repository::PostgresSessionRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use user_repository::PostgresUserRepository;
