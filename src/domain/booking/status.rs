//! Demo booking state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of a demo class booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booked and holding a seat.
    Confirmed,

    /// Cancelled by the user. Terminal; the seat is released.
    Cancelled,

    /// Class took place. Terminal.
    Completed,
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!((self, target), (Confirmed, Cancelled) | (Confirmed, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Confirmed => vec![Cancelled, Completed],
            Cancelled => vec![],
            Completed => vec![],
        }
    }
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_can_cancel_or_complete() {
        assert!(BookingStatus::Confirmed.can_transition_to(&BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_transition_to(&BookingStatus::Completed));
    }

    #[test]
    fn cancelled_and_completed_are_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
    }
}
