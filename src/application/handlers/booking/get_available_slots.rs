//! GetAvailableSlotsHandler - Query handler for the daily demo slot grid.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::booking::{slot_times_for_date, BookingError, DemoSlot};
use crate::domain::foundation::Timestamp;
use crate::ports::BookingRepository;

#[derive(Debug, Clone, Copy)]
pub struct GetAvailableSlotsQuery {
    pub date: NaiveDate,
}

/// Handler listing the bookable slots on a date with their remaining seats.
/// Slots that have already started are omitted; full slots stay in the list
/// so clients can render them as unavailable.
pub struct GetAvailableSlotsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl GetAvailableSlotsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        query: GetAvailableSlotsQuery,
    ) -> Result<Vec<DemoSlot>, BookingError> {
        let now = Timestamp::now();
        let upcoming: Vec<Timestamp> = slot_times_for_date(query.date)
            .into_iter()
            .filter(|start| start.is_after(&now))
            .collect();
        if upcoming.is_empty() {
            return Ok(Vec::new());
        }

        let counts = self.bookings.count_confirmed_at(&upcoming).await?;
        let slots = upcoming
            .into_iter()
            .map(|start| {
                let booked = counts
                    .iter()
                    .find(|(time, _)| *time == start)
                    .map(|(_, count)| *count)
                    .unwrap_or(0);
                DemoSlot::new(start, booked)
            })
            .collect();
        Ok(slots)
    }
}
