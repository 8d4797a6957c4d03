//! Port for demo booking persistence.

use async_trait::async_trait;

use crate::domain::booking::DemoBooking;
use crate::domain::foundation::{BookingId, DomainError, Timestamp, UserId};

/// Demo booking storage.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a confirmed booking.
    ///
    /// At most one non-cancelled future booking per user is enforced by a
    /// partial unique index; a second concurrent insert surfaces as
    /// `ErrorCode::AlreadyBooked`.
    async fn insert(&self, booking: &DemoBooking) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: BookingId) -> Result<Option<DemoBooking>, DomainError>;

    /// Persists status and schedule changes.
    async fn update(&self, booking: &DemoBooking) -> Result<(), DomainError>;

    /// Confirmed bookings per slot start time, for the given times.
    /// Times with no bookings are absent from the result.
    async fn count_confirmed_at(
        &self,
        slot_times: &[Timestamp],
    ) -> Result<Vec<(Timestamp, u32)>, DomainError>;

    /// Confirmed bookings at one slot start time.
    async fn confirmed_count(&self, slot_time: Timestamp) -> Result<u32, DomainError>;

    /// The user's confirmed future booking, if any.
    async fn find_active_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<DemoBooking>, DomainError>;
}
