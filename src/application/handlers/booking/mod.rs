//! Demo class booking handlers: slot listing, booking lifecycle.

mod book_demo_class;
mod cancel_booking;
mod complete_booking;
mod get_available_slots;
mod reschedule_booking;

pub use book_demo_class::{BookDemoClassCommand, BookDemoClassHandler};
pub use cancel_booking::CancelBookingHandler;
pub use complete_booking::CompleteBookingHandler;
pub use get_available_slots::{GetAvailableSlotsHandler, GetAvailableSlotsQuery};
pub use reschedule_booking::{RescheduleBookingCommand, RescheduleBookingHandler};
