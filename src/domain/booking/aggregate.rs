//! Demo booking aggregate entity.
//!
//! # Invariants
//!
//! - At most one non-cancelled future booking per user (partial unique
//!   index in the database; the insert path relies on it)
//! - Only the owner may cancel or reschedule
//! - Status transitions follow [`BookingStatus`] state machine rules

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, StateMachine, Timestamp, UserId, ValidationError};

use super::{BookingError, BookingStatus};

/// Demo class booking aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoBooking {
    /// Unique identifier for this booking.
    pub id: BookingId,

    /// User holding the seat.
    pub user_id: UserId,

    /// Slot start time.
    pub scheduled_at: Timestamp,

    /// Contact name for the class.
    pub contact_name: String,

    /// Contact phone for the class.
    pub contact_phone: String,

    /// Current lifecycle status.
    pub status: BookingStatus,

    /// When the booking was created.
    pub created_at: Timestamp,

    /// When the booking was last updated.
    pub updated_at: Timestamp,
}

impl DemoBooking {
    /// Creates a confirmed booking for a future slot.
    ///
    /// # Errors
    ///
    /// Returns a validation error on empty contact fields.
    pub fn confirm(
        id: BookingId,
        user_id: UserId,
        scheduled_at: Timestamp,
        contact_name: String,
        contact_phone: String,
    ) -> Result<Self, ValidationError> {
        if contact_name.trim().is_empty() {
            return Err(ValidationError::empty_field("contact_name"));
        }
        if contact_phone.trim().is_empty() {
            return Err(ValidationError::empty_field("contact_phone"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            scheduled_at,
            contact_name,
            contact_phone,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        })
    }

    /// Ensures the booking belongs to the given user.
    pub fn ensure_owned_by(&self, user_id: UserId) -> Result<(), BookingError> {
        if self.user_id != user_id {
            return Err(BookingError::not_owner(self.id));
        }
        Ok(())
    }

    /// Cancels the booking, releasing its seat.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        self.transition_to(BookingStatus::Cancelled, "cancel")
    }

    /// Marks the class as having taken place.
    pub fn complete(&mut self) -> Result<(), BookingError> {
        self.transition_to(BookingStatus::Completed, "complete")
    }

    /// Moves a confirmed booking to a different slot.
    pub fn reschedule(&mut self, new_time: Timestamp) -> Result<(), BookingError> {
        if self.status != BookingStatus::Confirmed {
            return Err(BookingError::invalid_state(
                self.status.as_str(),
                "reschedule",
            ));
        }
        self.scheduled_at = new_time;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn transition_to(
        &mut self,
        target: BookingStatus,
        attempted: &str,
    ) -> Result<(), BookingError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| BookingError::invalid_state(self.status.as_str(), attempted))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn new_booking_is_confirmed() {
        assert_eq!(booking().status, BookingStatus::Confirmed);
    }

    #[test]
    fn empty_contact_fields_are_rejected() {
        let result = DemoBooking::confirm(
            BookingId::new(),
            UserId::new(),
            Timestamp::now().add_days(1),
            "  ".to_string(),
            "+911234567890".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn cancelled_booking_cannot_be_rescheduled() {
        let mut b = booking();
        b.cancel().unwrap();
        assert!(b.reschedule(Timestamp::now().add_days(2)).is_err());
        assert!(b.complete().is_err());
    }

    #[test]
    fn completed_booking_cannot_be_cancelled() {
        let mut b = booking();
        b.complete().unwrap();
        assert!(b.cancel().is_err());
    }

    #[test]
    fn ownership_guard_rejects_other_users() {
        let b = booking();
        assert!(b.ensure_owned_by(b.user_id).is_ok());
        assert!(b.ensure_owned_by(UserId::new()).is_err());
    }

    #[test]
    fn reschedule_moves_the_slot_time() {
        let mut b = booking();
        let new_time = Timestamp::now().add_days(3);
        b.reschedule(new_time).unwrap();
        assert_eq!(b.scheduled_at, new_time);
        assert_eq!(b.status, BookingStatus::Confirmed);
    }
}
