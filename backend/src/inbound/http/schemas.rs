//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in the error envelope.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A date or time could not be parsed.
    #[schema(rename = "BAD_DATETIME_FORMAT")]
    BadDatetimeFormat,
    /// The window ends at or before its start.
    #[schema(rename = "END_NOT_AFTER_START")]
    EndNotAfterStart,
    /// The room does not exist.
    #[schema(rename = "ROOM_NOT_FOUND")]
    RoomNotFound,
    /// The group is larger than the room capacity.
    #[schema(rename = "CAPACITY_EXCEEDED")]
    CapacityExceeded,
    /// The room is already booked for part of the window.
    #[schema(rename = "OVERLAP_CONFLICT")]
    OverlapConflict,
    /// The user would exceed the daily booking-hour cap.
    #[schema(rename = "DAILY_CAP_EXCEEDED")]
    DailyCapExceeded,
    /// The booking does not exist.
    #[schema(rename = "BOOKING_NOT_FOUND")]
    BookingNotFound,
    /// The booking starts too soon to be cancelled.
    #[schema(rename = "CANCEL_CUTOFF")]
    CancelCutoff,
    /// The request failed validation.
    #[schema(rename = "VALIDATION_ERROR")]
    ValidationError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "INTERNAL_ERROR")]
    InternalError,
    /// Transport-level failure such as an unknown route.
    #[schema(rename = "HTTP_ERROR")]
    HttpError,
}

/// OpenAPI schema for [`crate::domain::ValidationIssue`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ValidationIssue)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ValidationIssueSchema {
    /// Path to the offending value.
    #[schema(value_type = Vec<serde_json::Value>, example = json!(["body", "group_size"]))]
    loc: Vec<serde_json::Value>,
    /// Human-readable description.
    #[schema(example = "Input should be greater than or equal to 1")]
    msg: String,
    /// Machine-readable issue kind.
    #[schema(rename = "type", example = "greater_than_equal")]
    kind: String,
}
