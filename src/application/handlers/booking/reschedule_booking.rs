//! RescheduleBookingHandler - Command handler for moving a booking to a new slot.

use std::sync::Arc;

use crate::domain::booking::{decode_slot_id, BookingError, DemoBooking, SLOT_CAPACITY};
use crate::domain::foundation::{BookingId, Timestamp, UserId};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct RescheduleBookingCommand {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub new_slot_id: String,
}

/// Handler moving a confirmed booking to a different slot. The new slot goes
/// through the same past and capacity checks as a fresh booking.
pub struct RescheduleBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl RescheduleBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        cmd: RescheduleBookingCommand,
    ) -> Result<DemoBooking, BookingError> {
        // 1. Validate the target slot before touching the booking.
        let new_time = decode_slot_id(&cmd.new_slot_id)?;
        if !new_time.is_after(&Timestamp::now()) {
            return Err(BookingError::slot_in_past(&cmd.new_slot_id));
        }

        let mut booking = self
            .bookings
            .find_by_id(cmd.booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;
        booking.ensure_owned_by(cmd.user_id)?;

        // 2. Seats at the new time, not counting the seat being moved.
        let booked = self.bookings.confirmed_count(new_time).await?;
        if booking.scheduled_at != new_time && booked >= SLOT_CAPACITY {
            return Err(BookingError::slot_full(&cmd.new_slot_id));
        }

        // 3. Apply the move.
        booking.reschedule(new_time)?;
        self.bookings.update(&booking).await?;

        tracing::info!(
            booking_id = %booking.id,
            scheduled_at = %booking.scheduled_at,
            "demo booking rescheduled"
        );
        Ok(booking)
    }
}
