//! Demo class booking domain: slot grid, bookings and their lifecycle.

mod aggregate;
mod errors;
mod slot;
mod status;

pub use aggregate::DemoBooking;
pub use errors::BookingError;
pub use slot::{
    decode_slot_id, encode_slot_id, slot_times_for_date, DemoSlot, FIRST_SLOT_HOUR,
    LAST_SLOT_HOUR, SLOT_CAPACITY,
};
pub use status::BookingStatus;
