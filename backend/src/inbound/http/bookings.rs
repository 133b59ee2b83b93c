//! Booking endpoints.
//!
//! ```text
//! POST   /bookings
//! GET    /users/{user_id}/bookings
//! DELETE /bookings/{booking_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::timestamp::format_datetime;
use crate::domain::{Booking, BookingId, BookingRequest, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, Issues, Section, body_not_object, parse_path_int, require_datetime, require_int,
    require_positive_int,
};

const USER_ID: FieldName = FieldName::new("user_id");
const ROOM_ID: FieldName = FieldName::new("room_id");
const START: FieldName = FieldName::new("start");
const END: FieldName = FieldName::new("end");
const GROUP_SIZE: FieldName = FieldName::new("group_size");
const BOOKING_ID: FieldName = FieldName::new("booking_id");

/// Booking creation payload.
///
/// Fields are read loosely so type mismatches surface as
/// `VALIDATION_ERROR` issues naming the offending field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    /// Requesting user.
    #[schema(value_type = i64, example = 1)]
    pub user_id: Option<Value>,
    /// Room to book.
    #[schema(value_type = i64, example = 1)]
    pub room_id: Option<Value>,
    /// ISO-8601 date-time.
    #[schema(value_type = String, example = "2025-11-16T13:00:00")]
    pub start: Option<Value>,
    /// ISO-8601 date-time, after `start`.
    #[schema(value_type = String, example = "2025-11-16T14:00:00")]
    pub end: Option<Value>,
    /// Number of people, at least one.
    #[schema(value_type = i64, minimum = 1, example = 2)]
    pub group_size: Option<Value>,
}

impl CreateBookingRequest {
    /// Parse a raw JSON body.
    fn from_body(body: Value) -> Result<Self, Error> {
        if !body.is_object() {
            return Err(Error::validation(vec![body_not_object()]));
        }
        serde_json::from_value(body).map_err(|_| Error::validation(vec![body_not_object()]))
    }
}

/// Group sizes above `u32::MAX` become `u32::MAX`, which no room can seat.
impl TryFrom<CreateBookingRequest> for BookingRequest {
    type Error = Error;

    fn try_from(payload: CreateBookingRequest) -> Result<Self, Self::Error> {
        let mut issues = Issues::new();
        let user_id = issues.check(require_int(
            Section::Body,
            USER_ID,
            payload.user_id.as_ref(),
        ));
        let room_id = issues.check(require_int(
            Section::Body,
            ROOM_ID,
            payload.room_id.as_ref(),
        ));
        let start = issues.check(require_datetime(
            Section::Body,
            START,
            payload.start.as_ref(),
        ));
        let end = issues.check(require_datetime(Section::Body, END, payload.end.as_ref()));
        let group_size = issues.check(require_positive_int(
            Section::Body,
            GROUP_SIZE,
            payload.group_size.as_ref(),
        ));

        match (user_id, room_id, start, end, group_size) {
            (Some(user_id), Some(room_id), Some(start), Some(end), Some(group_size)) => Ok(Self {
                user_id: UserId(user_id),
                room_id,
                start,
                end,
                group_size: u32::try_from(group_size).unwrap_or(u32::MAX),
            }),
            _ => Err(issues.into_error()),
        }
    }
}

/// Booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    /// Booking identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Owner of the booking.
    #[schema(example = 1)]
    pub user_id: i64,
    /// Booked room.
    #[schema(example = 1)]
    pub room_id: i64,
    /// Start, `YYYY-MM-DDTHH:MM:SS`.
    #[schema(example = "2025-11-16T13:00:00")]
    pub start: String,
    /// End, `YYYY-MM-DDTHH:MM:SS`.
    #[schema(example = "2025-11-16T14:00:00")]
    pub end: String,
    /// Number of people.
    #[schema(example = 2)]
    pub group_size: u32,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.0,
            user_id: booking.user_id.0,
            room_id: booking.room_id.get(),
            start: format_datetime(booking.window.start()),
            end: format_datetime(booking.window.end()),
            group_size: booking.group_size,
        }
    }
}

/// Create a booking.
#[utoipa::path(
    post,
    path = "/bookings",
    description = "Validate and record a booking, then write a confirmation to the outbox. Rules are checked in order: room exists, end after start, capacity, overlap, daily hour cap.",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking recorded", body = BookingResponse),
        (status = 400, description = "End not after start", body = ErrorEnvelope),
        (status = 404, description = "Room not found", body = ErrorEnvelope),
        (status = 409, description = "Overlapping booking", body = ErrorEnvelope),
        (status = 422, description = "Capacity, daily cap or validation failure", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let request = CreateBookingRequest::from_body(payload.into_inner())?;
    let booking = state.bookings.create_booking(request.try_into()?).await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(&booking)))
}

/// List a user's bookings.
#[utoipa::path(
    get,
    path = "/users/{user_id}/bookings",
    description = "Return the bookings owned by the user in id order; possibly empty.",
    params(("user_id" = i64, Path, description = "Owner of the bookings")),
    responses(
        (status = 200, description = "Bookings for the user", body = [BookingResponse]),
        (status = 422, description = "Malformed user id", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["bookings"],
    operation_id = "listUserBookings"
)]
#[get("/users/{user_id}/bookings")]
pub async fn list_user_bookings(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId(parse_path_int(USER_ID, &path)?);
    let bookings = state.bookings_query.list_for_user(user_id).await?;
    let body: Vec<BookingResponse> = bookings.iter().map(BookingResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Cancel a booking.
#[utoipa::path(
    delete,
    path = "/bookings/{booking_id}",
    description = "Remove a booking unless it starts within the cancellation cutoff.",
    params(("booking_id" = i64, Path, description = "Booking to cancel")),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 404, description = "Booking not found", body = ErrorEnvelope),
        (status = 422, description = "Inside the cancellation cutoff or malformed id", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[delete("/bookings/{booking_id}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let booking_id = BookingId(parse_path_int(BOOKING_ID, &path)?);
    state.bookings.cancel_booking(booking_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
