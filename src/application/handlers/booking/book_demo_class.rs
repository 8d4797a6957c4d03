//! BookDemoClassHandler - Command handler for reserving a demo class seat.

use std::sync::Arc;

use crate::domain::booking::{decode_slot_id, BookingError, DemoBooking, SLOT_CAPACITY};
use crate::domain::foundation::{BookingId, ErrorCode, Timestamp, UserId};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct BookDemoClassCommand {
    pub user_id: UserId,
    pub slot_id: String,
    pub contact_name: String,
    pub contact_phone: String,
}

/// Handler reserving a seat in a demo slot.
///
/// The capacity check here is advisory; the one-active-booking rule is
/// enforced by a partial unique index, surfaced by the repository as an
/// already-booked error.
pub struct BookDemoClassHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl BookDemoClassHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, cmd: BookDemoClassCommand) -> Result<DemoBooking, BookingError> {
        // 1. Resolve the slot and reject ones that already started.
        let scheduled_at = decode_slot_id(&cmd.slot_id)?;
        if !scheduled_at.is_after(&Timestamp::now()) {
            return Err(BookingError::slot_in_past(&cmd.slot_id));
        }

        // 2. Check remaining seats.
        let booked = self.bookings.confirmed_count(scheduled_at).await?;
        if booked >= SLOT_CAPACITY {
            return Err(BookingError::slot_full(&cmd.slot_id));
        }

        // 3. Build and persist the booking.
        let booking = DemoBooking::confirm(
            BookingId::new(),
            cmd.user_id,
            scheduled_at,
            cmd.contact_name,
            cmd.contact_phone,
        )
        .map_err(|e| BookingError::validation_failed("contact", e.to_string()))?;

        match self.bookings.insert(&booking).await {
            Ok(()) => {
                tracing::info!(
                    booking_id = %booking.id,
                    user_id = %booking.user_id,
                    scheduled_at = %booking.scheduled_at,
                    "demo class booked"
                );
                Ok(booking)
            }
            Err(err) if err.code == ErrorCode::AlreadyBooked => {
                Err(BookingError::already_booked(cmd.user_id))
            }
            Err(err) => Err(err.into()),
        }
    }
}
