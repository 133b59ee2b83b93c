//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and wraps them in the JSON error envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::RequestId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A date or time could not be parsed.
    BadDatetimeFormat,
    /// The requested window ends at or before its start.
    EndNotAfterStart,
    /// The referenced room does not exist.
    RoomNotFound,
    /// The group does not fit in the room.
    CapacityExceeded,
    /// The room is already booked for part of the window.
    OverlapConflict,
    /// The user would exceed the daily booking-hour cap.
    DailyCapExceeded,
    /// The referenced booking does not exist.
    BookingNotFound,
    /// The booking starts too soon to be cancelled.
    CancelCutoff,
    /// The request payload, query or path failed validation.
    ValidationError,
    /// An unexpected error occurred inside the service.
    InternalError,
    /// A transport-level failure such as an unmatched route.
    HttpError,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadDatetimeFormat => "BAD_DATETIME_FORMAT",
            Self::EndNotAfterStart => "END_NOT_AFTER_START",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::OverlapConflict => "OVERLAP_CONFLICT",
            Self::DailyCapExceeded => "DAILY_CAP_EXCEEDED",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::CancelCutoff => "CANCEL_CUTOFF",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::HttpError => "HTTP_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
///
/// `loc` is the path to the offending value, e.g. `["body", "group_size"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path to the offending value.
    pub loc: Vec<Value>,
    /// Human-readable description.
    pub msg: String,
    /// Issue type such as `int_parsing`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    /// Build an issue located at `section.field`.
    pub fn new(
        section: &str,
        field: impl Into<Value>,
        msg: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            loc: vec![Value::from(section), field.into()],
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// Build a `missing` issue for a required field.
    pub fn missing(section: &str, field: &str) -> Self {
        Self::new(section, field, "Field required", "missing")
    }
}

/// Domain error payload.
///
/// The request identifier in scope when the error is constructed is captured
/// so adapters can echo it without access to the request.
///
/// # Examples
/// ```
/// use study_rooms::domain::{Error, ErrorCode};
///
/// let err = Error::room_not_found(7);
/// assert_eq!(err.code(), ErrorCode::RoomNotFound);
/// assert_eq!(err.message(), "room not found");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    hint: Option<String>,
    extras: Option<Map<String, Value>>,
    validation_errors: Vec<ValidationIssue>,
    request_id: Option<String>,
}

impl Error {
    /// Create a new error, capturing the current request identifier.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
            extras: None,
            validation_errors: Vec::new(),
            request_id: RequestId::current().map(|id| id.to_string()),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Optional remediation hint.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Code-specific context.
    pub fn extras(&self) -> Option<&Map<String, Value>> {
        self.extras.as_ref()
    }

    /// Field-level issues, empty unless `VALIDATION_ERROR`.
    pub fn validation_errors(&self) -> &[ValidationIssue] {
        &self.validation_errors
    }

    /// Request the error was raised in.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Attach a human-readable hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Attach structured extras. Non-object values are ignored.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use study_rooms::domain::{Error, ErrorCode};
    ///
    /// let err = Error::new(ErrorCode::HttpError, "Not Found")
    ///     .with_extras(json!({ "path": "/nope" }));
    /// assert!(err.extras().is_some());
    /// ```
    pub fn with_extras(mut self, extras: Value) -> Self {
        if let Value::Object(map) = extras {
            self.extras = Some(map);
        }
        self
    }

    /// Override the captured request identifier.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Search date or time could not be parsed.
    pub fn bad_datetime_format() -> Self {
        Self::new(
            ErrorCode::BadDatetimeFormat,
            "use YYYY-MM-DD for date and HH:MM for time",
        )
        .with_hint("Example: /search?date=2025-11-16&start=13:00&end=14:00")
    }

    /// Window is empty or reversed.
    pub fn end_not_after_start() -> Self {
        Self::new(ErrorCode::EndNotAfterStart, "end must be after start")
            .with_hint("Ensure end time is later than start time.")
    }

    /// No room with `room_id`.
    pub fn room_not_found(room_id: i64) -> Self {
        Self::new(ErrorCode::RoomNotFound, "room not found")
            .with_extras(json!({ "room_id": room_id }))
    }

    /// Group larger than the room seats.
    pub fn capacity_exceeded(room_capacity: u32) -> Self {
        Self::new(ErrorCode::CapacityExceeded, "group_size exceeds room capacity")
            .with_hint(format!("Room capacity is {room_capacity}."))
            .with_extras(json!({ "room_capacity": room_capacity }))
    }

    /// Room already booked for part of the window.
    pub fn overlap_conflict(room_id: i64) -> Self {
        Self::new(ErrorCode::OverlapConflict, "room already booked for that window")
            .with_hint("Pick a different time or room.")
            .with_extras(json!({ "room_id": room_id }))
    }

    /// User would exceed the daily hour cap.
    pub fn daily_cap_exceeded(max_hours_per_day: u32) -> Self {
        Self::new(ErrorCode::DailyCapExceeded, "daily booking hours limit exceeded")
            .with_hint(format!("Max per day is {max_hours_per_day} hours."))
            .with_extras(json!({ "max_hours_per_day": max_hours_per_day }))
    }

    /// No booking with `booking_id`.
    pub fn booking_not_found(booking_id: i64) -> Self {
        Self::new(ErrorCode::BookingNotFound, "booking not found")
            .with_extras(json!({ "booking_id": booking_id }))
    }

    /// Cancellation attempted too close to the start.
    pub fn cancel_cutoff(cutoff_minutes: u32) -> Self {
        Self::new(
            ErrorCode::CancelCutoff,
            format!("cannot cancel within {cutoff_minutes} minutes of start"),
        )
        .with_hint(format!("Cutoff is {cutoff_minutes} minutes."))
        .with_extras(json!({ "cutoff_minutes": cutoff_minutes }))
    }

    /// Request validation failure carrying per-field issues.
    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        let mut err = Self::new(ErrorCode::ValidationError, "Request validation failed")
            .with_hint("Check field names and types; see 'validation_errors'.");
        err.validation_errors = issues;
        err
    }

    /// Unexpected failure. The message is for logs only and is redacted at
    /// the transport boundary.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
            .with_hint("Try again or contact the developer.")
    }

    /// Transport-level failure such as an unmatched route.
    pub fn http(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::HttpError, message)
    }
}

#[cfg(test)]
mod tests;
