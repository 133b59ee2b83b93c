//! On-disk record shapes for rooms and bookings.
//!
//! Reading is lenient: integer fields may be JSON numbers or numeric
//! strings, names are trimmed, and a missing booking id becomes `0`. Each
//! record is normalised on its own so one bad entry never hides the rest.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::coerce::int_from_json;
use crate::domain::timestamp::{format_datetime, parse_datetime};
use crate::domain::{
    Booking, BookingId, BookingValidationError, Room, RoomId, RoomValidationError, UserId,
};

/// Reasons a stored record is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The entry is not a JSON object.
    #[error("entry must be an object")]
    NotAnObject,
    /// A required field is absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    /// A field is not an integer within `i64` range.
    #[error("'{0}' must be an integer")]
    NotAnInteger(&'static str),
    /// A timestamp field is not a supported date-time.
    #[error("'{0}' must be an ISO 8601 date-time")]
    BadTimestamp(&'static str),
    /// The fields form an invalid room.
    #[error(transparent)]
    Room(#[from] RoomValidationError),
    /// The fields form an invalid booking.
    #[error(transparent)]
    Booking(#[from] BookingValidationError),
}

#[derive(Debug, Serialize)]
pub(crate) struct RoomRecord<'a> {
    pub id: i64,
    pub name: &'a str,
    pub capacity: u32,
    pub location: &'a str,
}

impl<'a> From<&'a Room> for RoomRecord<'a> {
    fn from(room: &'a Room) -> Self {
        Self {
            id: room.id().get(),
            name: room.name(),
            capacity: room.capacity(),
            location: room.location(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BookingRecord {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub start: String,
    pub end: String,
    pub group_size: u32,
}

impl From<&Booking> for BookingRecord {
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

fn as_object(value: &Value) -> Result<&Map<String, Value>, RecordError> {
    value.as_object().ok_or(RecordError::NotAnObject)
}

fn int_field(record: &Map<String, Value>, field: &'static str) -> Result<i64, RecordError> {
    let value = record.get(field).ok_or(RecordError::MissingField(field))?;
    int_from_json(value).ok_or(RecordError::NotAnInteger(field))
}

fn text_field<'a>(record: &'a Map<String, Value>, field: &'static str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or_default()
}

fn timestamp_field(
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<chrono::NaiveDateTime, RecordError> {
    let value = record.get(field).ok_or(RecordError::MissingField(field))?;
    value
        .as_str()
        .and_then(parse_datetime)
        .ok_or(RecordError::BadTimestamp(field))
}

/// Normalise one stored room.
pub(crate) fn room_from_value(value: &Value) -> Result<Room, RecordError> {
    let record = as_object(value)?;
    let id = int_field(record, "id")?;
    let capacity = int_field(record, "capacity")?;
    Ok(Room::new(
        id,
        text_field(record, "name"),
        capacity,
        text_field(record, "location"),
    )?)
}

/// Normalise one stored booking.
pub(crate) fn booking_from_value(value: &Value) -> Result<Booking, RecordError> {
    let record = as_object(value)?;
    let id = match record.get("id") {
        None | Some(Value::Null) => 0,
        Some(raw) => int_from_json(raw).ok_or(RecordError::NotAnInteger("id"))?,
    };
    let user_id = int_field(record, "user_id")?;
    let room_id = RoomId::new(int_field(record, "room_id")?)?;
    let group_size = int_field(record, "group_size")?;
    let start = timestamp_field(record, "start")?;
    let end = timestamp_field(record, "end")?;
    Ok(Booking::new(
        BookingId(id),
        UserId(user_id),
        room_id,
        start,
        end,
        group_size,
    )?)
}
