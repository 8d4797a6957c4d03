//! Booking-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | NotOwner | 403 |
//! | AlreadyBooked | 409 |
//! | SlotFull | 409 |
//! | SlotInPast | 400 |
//! | InvalidSlotId | 400 |
//! | InvalidState | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{BookingId, DomainError, UserId};

/// Demo class booking errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Booking was not found.
    NotFound(BookingId),

    /// The booking belongs to another user.
    NotOwner(BookingId),

    /// The user already holds a non-cancelled future booking.
    AlreadyBooked(UserId),

    /// Every seat in the slot is taken.
    SlotFull { slot_id: String },

    /// The slot start time is in the past.
    SlotInPast { slot_id: String },

    /// The slot identifier could not be decoded.
    InvalidSlotId { slot_id: String },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn not_owner(id: BookingId) -> Self {
        BookingError::NotOwner(id)
    }

    pub fn already_booked(user_id: UserId) -> Self {
        BookingError::AlreadyBooked(user_id)
    }

    pub fn slot_full(slot_id: impl Into<String>) -> Self {
        BookingError::SlotFull {
            slot_id: slot_id.into(),
        }
    }

    pub fn slot_in_past(slot_id: impl Into<String>) -> Self {
        BookingError::SlotInPast {
            slot_id: slot_id.into(),
        }
    }

    pub fn invalid_slot_id(slot_id: impl Into<String>) -> Self {
        BookingError::InvalidSlotId {
            slot_id: slot_id.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BookingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation_failed(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            BookingError::NotFound(id) => format!("Booking {} not found", id),
            BookingError::NotOwner(id) => {
                format!("Booking {} belongs to a different user", id)
            }
            BookingError::AlreadyBooked(_) => {
                "You already have an upcoming demo class booked".to_string()
            }
            BookingError::SlotFull { slot_id } => format!("Slot {} is fully booked", slot_id),
            BookingError::SlotInPast { slot_id } => {
                format!("Slot {} has already started", slot_id)
            }
            BookingError::InvalidSlotId { slot_id } => {
                format!("Invalid slot identifier: {}", slot_id)
            }
            BookingError::InvalidState { current, attempted } => {
                format!("Cannot {} while booking is {}", attempted, current)
            }
            BookingError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            BookingError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        BookingError::Infrastructure(err.to_string())
    }
}
