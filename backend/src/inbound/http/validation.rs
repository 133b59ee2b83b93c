//! Shared validation helpers for inbound HTTP adapters.
//!
//! Payload fields arrive as loose JSON values and are coerced here so every
//! failure is reported as a [`ValidationIssue`] with a `loc` of
//! `[section, field]`, rather than as an opaque deserialisation error.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::domain::coerce::int_from_json;
use crate::domain::timestamp::parse_datetime;
use crate::domain::{Error, ValidationIssue};

/// Request section a field was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Body,
    Query,
    Path,
}

impl Section {
    fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Validation issue kinds reported in `validation_errors[].type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IssueKind {
    IntParsing,
    GreaterThanEqual,
    DatetimeParsing,
}

impl IssueKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::IntParsing => "int_parsing",
            Self::GreaterThanEqual => "greater_than_equal",
            Self::DatetimeParsing => "datetime_parsing",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::IntParsing => "Input should be a valid integer",
            Self::GreaterThanEqual => "Input should be greater than or equal to 1",
            Self::DatetimeParsing => "Input should be a valid datetime",
        }
    }
}

fn issue(section: Section, field: FieldName, kind: IssueKind) -> ValidationIssue {
    ValidationIssue::new(section.as_str(), field.as_str(), kind.message(), kind.as_str())
}

/// Accumulates issues so a request reports every bad field at once.
#[derive(Debug, Default)]
pub(crate) struct Issues(Vec<ValidationIssue>);

impl Issues {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a field check, yielding the value when valid.
    pub(crate) fn check<T>(&mut self, outcome: Result<T, ValidationIssue>) -> Option<T> {
        outcome.map_err(|issue| self.0.push(issue)).ok()
    }

    /// Convert into a `VALIDATION_ERROR` when any issue was recorded.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    pub(crate) fn into_error(self) -> Error {
        Error::validation(self.0)
    }
}

fn present(
    section: Section,
    field: FieldName,
    value: Option<&Value>,
) -> Result<&Value, ValidationIssue> {
    match value {
        None | Some(Value::Null) => Err(ValidationIssue::missing(section.as_str(), field.as_str())),
        Some(value) => Ok(value),
    }
}

/// Require an integer field.
pub(crate) fn require_int(
    section: Section,
    field: FieldName,
    value: Option<&Value>,
) -> Result<i64, ValidationIssue> {
    let value = present(section, field, value)?;
    int_from_json(value).ok_or_else(|| issue(section, field, IssueKind::IntParsing))
}

/// Require an integer field that is at least one.
pub(crate) fn require_positive_int(
    section: Section,
    field: FieldName,
    value: Option<&Value>,
) -> Result<i64, ValidationIssue> {
    let parsed = require_int(section, field, value)?;
    if parsed < 1 {
        return Err(issue(section, field, IssueKind::GreaterThanEqual));
    }
    Ok(parsed)
}

/// Require an ISO-8601 date-time field.
pub(crate) fn require_datetime(
    section: Section,
    field: FieldName,
    value: Option<&Value>,
) -> Result<NaiveDateTime, ValidationIssue> {
    let value = present(section, field, value)?;
    value
        .as_str()
        .and_then(parse_datetime)
        .ok_or_else(|| issue(section, field, IssueKind::DatetimeParsing))
}

/// Require a string field, such as a raw query parameter.
pub(crate) fn require_text(
    section: Section,
    field: FieldName,
    value: Option<&str>,
) -> Result<String, ValidationIssue> {
    value
        .map(str::to_owned)
        .ok_or_else(|| ValidationIssue::missing(section.as_str(), field.as_str()))
}

/// Parse an integer path segment such as `/bookings/{booking_id}`.
pub(crate) fn parse_path_int(field: FieldName, raw: &str) -> Result<i64, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::validation(vec![issue(Section::Path, field, IssueKind::IntParsing)]))
}

/// Issue reported when the request body is not a JSON object.
pub(crate) fn body_not_object() -> ValidationIssue {
    ValidationIssue {
        loc: vec![Value::from(Section::Body.as_str())],
        msg: "Input should be a valid dictionary".to_owned(),
        kind: "model_attributes_type".to_owned(),
    }
}
