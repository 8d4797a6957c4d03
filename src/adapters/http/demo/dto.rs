//! Request/response DTOs for demo class endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{BookingStatus, DemoBooking, DemoSlot};

#[derive(Debug, Clone, Deserialize)]
pub struct SlotsQuery {
    /// Calendar date in YYYY-MM-DD, interpreted as UTC.
    pub date: chrono::NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookDemoClassRequest {
    pub slot_id: String,
    pub contact_name: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleBookingRequest {
    pub slot_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub starts_at: String,
    pub capacity: u32,
    pub booked: u32,
    pub available: bool,
}

impl From<DemoSlot> for SlotResponse {
    fn from(slot: DemoSlot) -> Self {
        let available = !slot.is_full();
        Self {
            id: slot.id,
            starts_at: slot.starts_at.as_datetime().to_rfc3339(),
            capacity: slot.capacity,
            booked: slot.booked,
            available,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub scheduled_at: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub status: BookingStatus,
}

impl From<DemoBooking> for BookingResponse {
    fn from(booking: DemoBooking) -> Self {
        Self {
            id: booking.id.to_string(),
            scheduled_at: booking.scheduled_at.as_datetime().to_rfc3339(),
            contact_name: booking.contact_name,
            contact_phone: booking.contact_phone,
            status: booking.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn slots_query_parses_iso_date() {
        let query: SlotsQuery = serde_json::from_str(r#"{"date":"2026-09-01"}"#).unwrap();
        assert_eq!(query.date.to_string(), "2026-09-01");
    }

    #[test]
    fn full_slot_reads_unavailable() {
        let slot = DemoSlot::new(Timestamp::now().add_hours(2), 5);
        let resp = SlotResponse::from(slot);
        assert!(!resp.available);
        assert_eq!(resp.booked, 5);
    }
}
