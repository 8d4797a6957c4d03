//! CompleteBookingHandler - Command handler marking a demo class as held.

use std::sync::Arc;

use crate::domain::booking::{BookingError, DemoBooking};
use crate::domain::foundation::BookingId;
use crate::ports::BookingRepository;

/// Handler recording that a demo class took place. Driven by staff tooling,
/// so there is no ownership check here.
pub struct CompleteBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl CompleteBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, booking_id: BookingId) -> Result<DemoBooking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(booking_id))?;

        booking.complete()?;
        self.bookings.update(&booking).await?;

        tracing::info!(booking_id = %booking.id, "demo class completed");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockBookingRepository;
    use crate::domain::booking::BookingStatus;
    use crate::domain::foundation::{Timestamp, UserId};

    fn booking() -> DemoBooking {
        DemoBooking::confirm(
            BookingId::new(),
            UserId::new(),
            Timestamp::now().add_days(1),
            "Asha".to_string(),
            "+911234567890".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn confirmed_booking_can_be_completed() {
        let b = booking();
        let repo = MockBookingRepository::with_booking(b.clone());
        let handler = CompleteBookingHandler::new(repo.clone());

        let completed = handler.handle(b.id).await.unwrap();

        assert_eq!(completed.status, BookingStatus::Completed);
        assert_eq!(repo.stored(b.id).unwrap().status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn cancelled_booking_cannot_be_completed() {
        let mut b = booking();
        b.cancel().unwrap();
        let repo = MockBookingRepository::with_booking(b.clone());
        let handler = CompleteBookingHandler::new(repo);

        let result = handler.handle(b.id).await;

        assert!(matches!(result, Err(BookingError::InvalidState { .. })));
    }
}
