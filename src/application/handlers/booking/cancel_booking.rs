//! CancelBookingHandler - Command handler for releasing a demo class seat.

use std::sync::Arc;

use crate::domain::booking::{BookingError, DemoBooking};
use crate::domain::foundation::{BookingId, UserId};
use crate::ports::BookingRepository;

/// Handler cancelling a booking on the owner's behalf. The released seat
/// becomes bookable again as soon as the status flips.
pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl CancelBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        booking_id: BookingId,
        user_id: UserId,
    ) -> Result<DemoBooking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(booking_id))?;
        booking.ensure_owned_by(user_id)?;

        booking.cancel()?;
        self.bookings.update(&booking).await?;

        tracing::info!(booking_id = %booking.id, "demo booking cancelled");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockBookingRepository;
    use crate::domain::booking::BookingStatus;
    use crate::domain::foundation::Timestamp;

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
    async fn owner_can_cancel_a_confirmed_booking() {
        let b = booking();
        let repo = MockBookingRepository::with_booking(b.clone());
        let handler = CancelBookingHandler::new(repo.clone());

        let cancelled = handler.handle(b.id, b.user_id).await.unwrap();

        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(repo.stored(b.id).unwrap().status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn another_user_cannot_cancel_the_booking() {
        let b = booking();
        let repo = MockBookingRepository::with_booking(b.clone());
        let handler = CancelBookingHandler::new(repo.clone());

        let result = handler.handle(b.id, UserId::new()).await;

        assert!(matches!(result, Err(BookingError::NotOwner(_))));
        assert_eq!(repo.stored(b.id).unwrap().status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn cancelling_twice_is_an_invalid_state() {
        let b = booking();
        let repo = MockBookingRepository::with_booking(b.clone());
        let handler = CancelBookingHandler::new(repo);
        handler.handle(b.id, b.user_id).await.unwrap();

        let result = handler.handle(b.id, b.user_id).await;

        assert!(matches!(result, Err(BookingError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let handler = CancelBookingHandler::new(MockBookingRepository::new());

        let result = handler.handle(BookingId::new(), UserId::new()).await;

        assert!(matches!(result, Err(BookingError::NotFound(_))));
    }
}
