//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning domain
//! failures into the JSON error envelope:
//!
//! ```text
//! {"error": {"code", "message", "hint"?, "extras"?, "status", "path",
//!            "method", "request_id", "ts", "validation_errors"?}}
//! ```
//!
//! Internal errors are redacted before they reach the client; the unredacted
//! detail only goes to the error log.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, REQUEST_ID_HEADER, ValidationIssue};
use crate::inbound::http::schemas::{ErrorCodeSchema, ValidationIssueSchema};
use crate::middleware::{ErrorLogEntry, RequestContext};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Unexpected server error";

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadDatetimeFormat | ErrorCode::EndNotAfterStart => StatusCode::BAD_REQUEST,
        ErrorCode::RoomNotFound | ErrorCode::BookingNotFound | ErrorCode::HttpError => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::OverlapConflict => StatusCode::CONFLICT,
        ErrorCode::CapacityExceeded
        | ErrorCode::DailyCapExceeded
        | ErrorCode::CancelCutoff
        | ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Error details.
    pub error: ErrorBody,
}

/// Body of [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    #[schema(value_type = ErrorCodeSchema)]
    pub code: ErrorCode,
    /// Human-readable summary.
    #[schema(example = "room already booked for that window")]
    pub message: String,
    /// Suggested fix, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Pick a different time or room.")]
    pub hint: Option<String>,
    /// Code-specific context such as `room_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub extras: Option<Map<String, Value>>,
    /// HTTP status code.
    #[schema(example = 409)]
    pub status: u16,
    /// Request path.
    #[schema(example = "/bookings")]
    pub path: String,
    /// Request method.
    #[schema(example = "POST")]
    pub method: String,
    /// Correlation identifier, matching `X-Request-ID`.
    #[schema(example = "3f2b8c1d9e7a4b6c8d0e1f2a3b4c5d6e")]
    pub request_id: Option<String>,
    /// UTC timestamp of the failure, RFC 3339 with milliseconds.
    #[schema(example = "2025-11-16T12:00:00.000Z")]
    pub ts: String,
    /// Field-level issues for `VALIDATION_ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<ValidationIssueSchema>>)]
    pub validation_errors: Option<Vec<ValidationIssue>>,
}

impl ErrorEnvelope {
    /// Build the envelope for `error`, filling request metadata from
    /// `context` when available.
    pub fn new(error: &Error, status: StatusCode, context: Option<&RequestContext>) -> Self {
        let request_id = error
            .request_id()
            .map(str::to_owned)
            .or_else(|| context.map(|ctx| ctx.request_id.to_string()));
        let validation_errors = match error.validation_errors() {
            [] => None,
            issues => Some(issues.to_vec()),
        };
        Self {
            error: ErrorBody {
                code: error.code(),
                message: error.message().to_owned(),
                hint: error.hint().map(str::to_owned),
                extras: error.extras().cloned(),
                status: status.as_u16(),
                path: context.map(|ctx| ctx.path.clone()).unwrap_or_default(),
                method: context.map(|ctx| ctx.method.clone()).unwrap_or_default(),
                request_id,
                ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                validation_errors,
            },
        }
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(REDACTED_MESSAGE);
        if let Some(id) = error.request_id() {
            redacted = redacted.with_request_id(id);
        }
        redacted
    } else {
        error.clone()
    }
}

/// Copy of the envelope destined for the error log. Internal errors keep
/// their original detail here.
fn log_entry(error: &Error, envelope: &ErrorEnvelope) -> Option<Value> {
    let mut logged = envelope.clone();
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut extras = Map::new();
        extras.insert("detail".to_owned(), Value::from(error.message()));
        logged.error.extras = Some(extras);
    }
    serde_json::to_value(logged)
        .inspect_err(|err| warn!(error = %err, "failed to encode error log entry"))
        .ok()
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(detail = %self.message(), "internal error returned to client");
        }
        let context = RequestContext::current();
        let envelope = ErrorEnvelope::new(&redact_if_internal(self), status, context.as_ref());

        let mut builder = HttpResponse::build(status);
        if let Some(id) = envelope.error.request_id.as_deref() {
            builder.insert_header((REQUEST_ID_HEADER, id.to_owned()));
        }
        let mut response = builder.json(&envelope);
        if let Some(entry) = log_entry(self, &envelope) {
            response.extensions_mut().insert(ErrorLogEntry(entry));
        }
        response
    }
}
