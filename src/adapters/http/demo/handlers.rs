//! HTTP handlers for demo class endpoints.
//!
//! Completing a booking is done by tutoring staff after the class runs, not
//! by the learner, so that endpoint skips the ownership check the others
//! enforce.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireSession;
use crate::application::handlers::booking::{
    BookDemoClassCommand, BookDemoClassHandler, CancelBookingHandler, CompleteBookingHandler,
    GetAvailableSlotsHandler, GetAvailableSlotsQuery, RescheduleBookingCommand,
    RescheduleBookingHandler,
};
use crate::domain::foundation::BookingId;

use super::dto::{
    BookDemoClassRequest, BookingResponse, RescheduleBookingRequest, SlotResponse, SlotsQuery,
    SlotsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DemoHandlers {
    get_slots_handler: Arc<GetAvailableSlotsHandler>,
    book_handler: Arc<BookDemoClassHandler>,
    cancel_handler: Arc<CancelBookingHandler>,
    reschedule_handler: Arc<RescheduleBookingHandler>,
    complete_handler: Arc<CompleteBookingHandler>,
}

impl DemoHandlers {
    pub fn new(
        get_slots_handler: Arc<GetAvailableSlotsHandler>,
        book_handler: Arc<BookDemoClassHandler>,
        cancel_handler: Arc<CancelBookingHandler>,
        reschedule_handler: Arc<RescheduleBookingHandler>,
        complete_handler: Arc<CompleteBookingHandler>,
    ) -> Self {
        Self {
            get_slots_handler,
            book_handler,
            cancel_handler,
            reschedule_handler,
            complete_handler,
        }
    }
}

fn parse_booking_id(raw: &str) -> Result<BookingId, ApiError> {
    raw.parse::<BookingId>()
        .map_err(|_| ApiError::bad_request("booking id must be a UUID"))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/demo/slots?date=YYYY-MM-DD - Hourly slots still open for booking
pub async fn get_slots(
    State(handlers): State<DemoHandlers>,
    RequireSession(_session): RequireSession,
    Query(query): Query<SlotsQuery>,
) -> Response {
    let query = GetAvailableSlotsQuery { date: query.date };

    match handlers.get_slots_handler.handle(query).await {
        Ok(slots) => {
            let response = SlotsResponse {
                slots: slots.into_iter().map(SlotResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/demo/bookings - Book a demo class seat
pub async fn book_demo_class(
    State(handlers): State<DemoHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<BookDemoClassRequest>,
) -> Response {
    let cmd = BookDemoClassCommand {
        user_id: session.user_id,
        slot_id: req.slot_id,
        contact_name: req.contact_name,
        contact_phone: req.contact_phone,
    };

    match handlers.book_handler.handle(cmd).await {
        Ok(booking) => {
            (StatusCode::CREATED, Json(BookingResponse::from(booking))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/demo/bookings/:id/cancel
pub async fn cancel_booking(
    State(handlers): State<DemoHandlers>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Response {
    let booking_id = match parse_booking_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers
        .cancel_handler
        .handle(booking_id, session.user_id)
        .await
    {
        Ok(booking) => (StatusCode::OK, Json(BookingResponse::from(booking))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT /api/demo/bookings/:id/reschedule
pub async fn reschedule_booking(
    State(handlers): State<DemoHandlers>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
    Json(req): Json<RescheduleBookingRequest>,
) -> Response {
    let booking_id = match parse_booking_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = RescheduleBookingCommand {
        booking_id,
        user_id: session.user_id,
        new_slot_id: req.slot_id,
    };

    match handlers.reschedule_handler.handle(cmd).await {
        Ok(booking) => (StatusCode::OK, Json(BookingResponse::from(booking))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/demo/bookings/:id/complete - Staff marks the class as held
pub async fn complete_booking(
    State(handlers): State<DemoHandlers>,
    Path(id): Path<String>,
) -> Response {
    let booking_id = match parse_booking_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers.complete_handler.handle(booking_id).await {
        Ok(booking) => (StatusCode::OK, Json(BookingResponse::from(booking))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
