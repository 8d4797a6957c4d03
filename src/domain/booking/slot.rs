//! Demo class slot grid.
//!
//! Slots are not stored. Each day exposes nine hourly slots starting 09:00
//! through 17:00 UTC, each with a fixed capacity; availability is derived by
//! counting confirmed bookings at the slot time. A slot is addressed by an
//! identifier that encodes its start time.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::BookingError;

/// First slot start hour of the day (UTC).
pub const FIRST_SLOT_HOUR: u32 = 9;

/// Last slot start hour of the day (UTC).
pub const LAST_SLOT_HOUR: u32 = 17;

/// Seats per slot.
pub const SLOT_CAPACITY: u32 = 5;

const SLOT_ID_PREFIX: &str = "slot-";

/// One bookable slot with its derived availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoSlot {
    /// Opaque slot identifier, decodable back to the start time.
    pub id: String,

    /// Slot start time.
    pub starts_at: Timestamp,

    /// Seats in the slot.
    pub capacity: u32,

    /// Confirmed bookings at this start time.
    pub booked: u32,
}

impl DemoSlot {
    pub fn new(starts_at: Timestamp, booked: u32) -> Self {
        Self {
            id: encode_slot_id(starts_at),
            starts_at,
            capacity: SLOT_CAPACITY,
            booked,
        }
    }

    pub fn is_full(&self) -> bool {
        self.booked >= self.capacity
    }
}

/// Returns the start times of every slot on a date, earliest first.
pub fn slot_times_for_date(date: NaiveDate) -> Vec<Timestamp> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .filter_map(|hour| Timestamp::on_date_at_hour(date, hour))
        .collect()
}

/// Encodes a slot start time into its identifier.
pub fn encode_slot_id(starts_at: Timestamp) -> String {
    format!("{}{}", SLOT_ID_PREFIX, starts_at.as_unix_secs())
}

/// Decodes a slot identifier back into its start time.
///
/// # Errors
///
/// Returns `BookingError::InvalidSlotId` on any malformed identifier.
pub fn decode_slot_id(slot_id: &str) -> Result<Timestamp, BookingError> {
    let secs = slot_id
        .strip_prefix(SLOT_ID_PREFIX)
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| BookingError::invalid_slot_id(slot_id))?;
    Timestamp::from_unix_secs(secs).ok_or_else(|| BookingError::invalid_slot_id(slot_id))
}
