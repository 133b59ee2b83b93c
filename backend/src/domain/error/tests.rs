//! Tests for domain error construction and request id capture.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::bad_datetime_format(), ErrorCode::BadDatetimeFormat, "BAD_DATETIME_FORMAT")]
#[case(Error::end_not_after_start(), ErrorCode::EndNotAfterStart, "END_NOT_AFTER_START")]
#[case(Error::room_not_found(9), ErrorCode::RoomNotFound, "ROOM_NOT_FOUND")]
#[case(Error::booking_not_found(3), ErrorCode::BookingNotFound, "BOOKING_NOT_FOUND")]
#[case(Error::internal("boom"), ErrorCode::InternalError, "INTERNAL_ERROR")]
#[case(Error::http("Not Found"), ErrorCode::HttpError, "HTTP_ERROR")]
fn constructors_set_code(#[case] err: Error, #[case] code: ErrorCode, #[case] wire: &str) {
    assert_eq!(err.code(), code);
    assert_eq!(err.code().as_str(), wire);
    assert_eq!(
        serde_json::to_value(code).expect("serialise code"),
        json!(wire)
    );
}

#[rstest]
fn capacity_exceeded_carries_hint_and_extras() {
    let err = Error::capacity_exceeded(4);
    assert_eq!(err.hint(), Some("Room capacity is 4."));
    assert_eq!(
        err.extras().and_then(|extras| extras.get("room_capacity")),
        Some(&json!(4))
    );
}

#[rstest]
fn daily_cap_exceeded_carries_hint_and_extras() {
    let err = Error::daily_cap_exceeded(2);
    assert_eq!(err.hint(), Some("Max per day is 2 hours."));
    assert_eq!(
        err.extras().and_then(|extras| extras.get("max_hours_per_day")),
        Some(&json!(2))
    );
}

#[rstest]
fn cancel_cutoff_interpolates_minutes() {
    let err = Error::cancel_cutoff(30);
    assert_eq!(err.message(), "cannot cancel within 30 minutes of start");
    assert_eq!(err.hint(), Some("Cutoff is 30 minutes."));
    assert_eq!(
        err.extras().and_then(|extras| extras.get("cutoff_minutes")),
        Some(&json!(30))
    );
}

#[rstest]
fn validation_keeps_issues() {
    let err = Error::validation(vec![ValidationIssue::missing("body", "user_id")]);
    assert_eq!(err.code(), ErrorCode::ValidationError);
    let [issue] = err.validation_errors() else {
        panic!("expected one issue");
    };
    assert_eq!(issue.loc, vec![json!("body"), json!("user_id")]);
    assert_eq!(issue.kind, "missing");
}

#[rstest]
fn validation_issue_serialises_kind_as_type() {
    let issue = ValidationIssue::new("query", "date", "Field required", "missing");
    let value = serde_json::to_value(issue).expect("serialise issue");
    assert_eq!(
        value,
        json!({"loc": ["query", "date"], "msg": "Field required", "type": "missing"})
    );
}

#[rstest]
fn non_object_extras_are_ignored() {
    let err = Error::http("Not Found").with_extras(json!([1, 2]));
    assert!(err.extras().is_none());
}

#[rstest]
fn request_id_is_none_out_of_scope() {
    assert!(Error::internal("boom").request_id().is_none());
}

#[tokio::test]
async fn request_id_is_captured_in_scope() {
    let id = RequestId::generate();
    let err = RequestId::scope(id, async { Error::room_not_found(1) }).await;
    assert_eq!(err.request_id(), Some(id.to_string().as_str()));
}
