//! End-to-end tests for the booking API over a temporary data directory.

use std::path::Path;

use actix_http::Request;
use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use chrono::{Duration, Local};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use study_rooms::domain::{BookingRules, REQUEST_ID_HEADER};
use study_rooms::inbound::http::health::HealthState;
use study_rooms::server::{ServerConfig, build_app, build_dependencies};
use tempfile::TempDir;

const DAY: &str = "2099-11-16";

#[fixture]
fn data_dir() -> TempDir {
    tempfile::tempdir().expect("temporary data directory")
}

async fn init_app(
    dir: &Path,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let config = ServerConfig::new(dir, ("127.0.0.1".to_owned(), 0), BookingRules::default());
    let deps = build_dependencies(web::Data::new(HealthState::new()), &config)
        .await
        .expect("dependencies load");
    test::init_service(build_app(deps)).await
}

fn at(time: &str) -> String {
    format!("{DAY}T{time}:00")
}

fn booking(user_id: i64, room_id: i64, start: &str, end: &str, group_size: i64) -> Value {
    json!({
        "user_id": user_id,
        "room_id": room_id,
        "start": start,
        "end": end,
        "group_size": group_size,
    })
}

async fn post_booking<S>(app: &S, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = TestRequest::post()
        .uri("/bookings")
        .set_json(body)
        .to_request();
    let res = test::call_service(app, req).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

#[rstest]
#[actix_web::test]
async fn overlapping_booking_is_rejected(data_dir: TempDir) {
    let app = init_app(data_dir.path()).await;

    let (status, created) =
        post_booking(&app, booking(1, 1, &at("13:00"), &at("14:00"), 2)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["start"], at("13:00"));

    let (status, body) = post_booking(&app, booking(2, 1, &at("13:30"), &at("14:30"), 2)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "OVERLAP_CONFLICT");
    assert_eq!(body["error"]["hint"], "Pick a different time or room.");
    assert_eq!(body["error"]["path"], "/bookings");

    let (status, _) = post_booking(&app, booking(2, 1, &at("14:00"), &at("15:00"), 2)).await;
    assert_eq!(status, StatusCode::CREATED, "touching windows do not overlap");
}

#[rstest]
#[case(booking(1, 1, &at("09:00"), &at("10:00"), 5), StatusCode::UNPROCESSABLE_ENTITY, "CAPACITY_EXCEEDED")]
#[case(booking(1, 99, &at("09:00"), &at("10:00"), 1), StatusCode::NOT_FOUND, "ROOM_NOT_FOUND")]
#[case(booking(1, 1, &at("10:00"), &at("10:00"), 1), StatusCode::BAD_REQUEST, "END_NOT_AFTER_START")]
#[case(booking(1, 1, &at("09:00"), &at("10:00"), 0), StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")]
#[actix_web::test]
async fn rule_violations_map_to_error_codes(
    data_dir: TempDir,
    #[case] body: Value,
    #[case] expected_status: StatusCode,
    #[case] expected_code: &str,
) {
    let app = init_app(data_dir.path()).await;
    let (status, envelope) = post_booking(&app, body).await;
    assert_eq!(status, expected_status);
    assert_eq!(envelope["error"]["code"], expected_code);
    assert_eq!(envelope["error"]["status"], expected_status.as_u16());
}

#[rstest]
#[case(json!({"user_id": 1, "room_id": 1, "start": "+262142-12-31T10:00:00", "end": "+262142-12-31T11:00:00", "group_size": 1}), "start", "datetime_parsing")]
#[case(json!({"user_id": 1, "room_id": 1, "start": "0000-01-01T10:00:00", "end": "0000-01-01T11:00:00", "group_size": 1}), "start", "datetime_parsing")]
#[case(json!({"user_id": f64::MAX, "room_id": 1, "start": at("09:00"), "end": at("10:00"), "group_size": 1}), "user_id", "int_parsing")]
#[actix_web::test]
async fn out_of_range_fields_are_validation_errors(
    data_dir: TempDir,
    #[case] body: Value,
    #[case] field: &str,
    #[case] kind: &str,
) {
    let app = init_app(data_dir.path()).await;
    let (status, envelope) = post_booking(&app, body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");
    let first = &envelope["error"]["validation_errors"][0];
    assert_eq!(first["loc"], json!(["body", field]));
    assert_eq!(first["type"], kind);

    let req = TestRequest::get().uri("/users/1/bookings").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn daily_cap_counts_hours_across_rooms(data_dir: TempDir) {
    let app = init_app(data_dir.path()).await;

    for (room, start, end) in [(1, "09:00", "10:00"), (2, "11:00", "12:00")] {
        let (status, _) = post_booking(&app, booking(7, room, &at(start), &at(end), 1)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = post_booking(&app, booking(7, 3, &at("15:00"), &at("15:30"), 1)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "DAILY_CAP_EXCEEDED");
    assert_eq!(body["error"]["hint"], "Max per day is 2 hours.");
}

#[rstest]
#[actix_web::test]
async fn search_excludes_rooms_with_intersecting_bookings(data_dir: TempDir) {
    let app = init_app(data_dir.path()).await;
    let (status, _) = post_booking(&app, booking(1, 1, &at("13:00"), &at("14:00"), 1)).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = TestRequest::get()
        .uri(&format!("/search?date={DAY}&start=13:30&end=14:00"))
        .to_request();
    let rooms: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<i64> = rooms
        .as_array()
        .expect("room list")
        .iter()
        .filter_map(|room| room["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[rstest]
#[actix_web::test]
async fn cancellation_respects_cutoff(data_dir: TempDir) {
    let app = init_app(data_dir.path()).await;
    let soon = Local::now().naive_local() + Duration::minutes(10);
    let fmt = "%Y-%m-%dT%H:%M:%S";
    let (status, created) = post_booking(
        &app,
        booking(
            3,
            2,
            &soon.format(fmt).to_string(),
            &(soon + Duration::minutes(30)).format(fmt).to_string(),
            1,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let req = TestRequest::delete()
        .uri(&format!("/bookings/{}", created["id"]))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "CANCEL_CUTOFF");
    assert_eq!(body["error"]["hint"], "Cutoff is 30 minutes.");

    let (status, later) = post_booking(&app, booking(3, 2, &at("13:00"), &at("14:00"), 1)).await;
    assert_eq!(status, StatusCode::CREATED);
    let req = TestRequest::delete()
        .uri(&format!("/bookings/{}", later["id"]))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn bookings_survive_restart(data_dir: TempDir) {
    {
        let app = init_app(data_dir.path()).await;
        let (status, _) = post_booking(&app, booking(4, 3, &at("10:00"), &at("11:00"), 6)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let app = init_app(data_dir.path()).await;
    let req = TestRequest::get().uri("/users/4/bookings").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        listed,
        json!([{
            "id": 1,
            "user_id": 4,
            "room_id": 3,
            "start": at("10:00"),
            "end": at("11:00"),
            "group_size": 6,
        }])
    );

    let (_, next) = post_booking(&app, booking(4, 1, &at("12:00"), &at("12:30"), 1)).await;
    assert_eq!(next["id"], 2, "ids continue after the highest stored id");
}

#[rstest]
#[actix_web::test]
async fn confirmation_is_written_to_outbox(data_dir: TempDir) {
    let app = init_app(data_dir.path()).await;
    let (status, _) = post_booking(&app, booking(5, 1, &at("08:00"), &at("09:00"), 1)).await;
    assert_eq!(status, StatusCode::CREATED);

    let message = std::fs::read_to_string(data_dir.path().join("outbox").join("booking_1.txt"))
        .expect("confirmation file");
    assert!(message.starts_with("To: user5@example.edu\n"));
    assert!(message.contains("Subject: Booking Confirmation #1"));
}

#[rstest]
#[actix_web::test]
async fn unmatched_route_is_logged_with_request_id(data_dir: TempDir) {
    let app = init_app(data_dir.path()).await;
    let res = test::call_service(&app, TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let request_id = res
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("request id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "HTTP_ERROR");
    assert_eq!(body["error"]["request_id"], request_id.as_str());

    let log = std::fs::read_to_string(data_dir.path().join("errors.ndjson")).expect("error log");
    let last: Value = log
        .lines()
        .last()
        .map(serde_json::from_str)
        .expect("one logged line")
        .expect("logged line is JSON");
    assert_eq!(last["error"]["code"], "HTTP_ERROR");
    assert_eq!(last["error"]["request_id"], request_id.as_str());
    assert_eq!(last["error"]["path"], "/nope");
}

#[rstest]
#[actix_web::test]
async fn successful_responses_carry_request_id(data_dir: TempDir) {
    let app = init_app(data_dir.path()).await;
    let res = test::call_service(&app, TestRequest::get().uri("/rooms").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    let rooms: Value = test::read_body_json(res).await;
    assert_eq!(rooms.as_array().map(Vec::len), Some(3));
    assert!(!data_dir.path().join("errors.ndjson").exists());
}
