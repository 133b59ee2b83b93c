//! Tests for the booking service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    BookingRepositoryError, ConfirmationOutboxError, FixtureBookingRepository,
    FixtureConfirmationOutbox, FixtureRoomRepository, MockBookingRepository,
    MockConfirmationOutbox,
};
use crate::domain::{ErrorCode, RoomId, default_catalogue};

struct FixedClock(NaiveDateTime);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Local
            .from_local_datetime(&self.0)
            .earliest()
            .expect("fixture time exists in local zone")
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

fn at(date: &str, time: &str) -> NaiveDateTime {
    combine_date_time(date, time).expect("valid fixture timestamp")
}

fn clock_at(date: &str, time: &str) -> Arc<dyn Clock> {
    Arc::new(FixedClock(at(date, time)))
}

fn request(user: i64, room: i64, start: &str, end: &str, group_size: u32) -> BookingRequest {
    BookingRequest {
        user_id: UserId(user),
        room_id: room,
        start: at("2025-11-16", start),
        end: at("2025-11-16", end),
        group_size,
    }
}

fn stored(id: i64, user: i64, room: i64, start: &str, end: &str) -> Booking {
    Booking::new(
        BookingId(id),
        UserId(user),
        RoomId::new(room).expect("valid room id"),
        at("2025-11-16", start),
        at("2025-11-16", end),
        1,
    )
    .expect("valid fixture booking")
}

type FixtureService = BookingService<FixtureBookingRepository, FixtureConfirmationOutbox>;

fn fixture_service(bookings: Vec<Booking>) -> FixtureService {
    BookingService::new(
        default_catalogue(),
        bookings,
        Arc::new(FixtureBookingRepository),
        Arc::new(FixtureConfirmationOutbox),
        clock_at("2025-11-16", "08:00"),
        BookingRules::default(),
    )
}

fn availability(start: &str, end: &str) -> AvailabilityQuery {
    AvailabilityQuery {
        date: "2025-11-16".to_owned(),
        start: start.to_owned(),
        end: end.to_owned(),
    }
}

#[tokio::test]
async fn bootstrap_loads_rooms_and_bookings() {
    let mut repo = MockBookingRepository::new();
    repo.expect_load_bookings()
        .times(1)
        .return_once(|| Ok(vec![stored(2, 1, 1, "10:00", "11:00")]));

    let service = BookingService::bootstrap(
        &FixtureRoomRepository,
        Arc::new(repo),
        Arc::new(FixtureConfirmationOutbox),
        clock_at("2025-11-16", "08:00"),
        BookingRules::default(),
    )
    .await
    .expect("bootstrap succeeds");

    let rooms = service.list_rooms().await.expect("rooms listed");
    assert_eq!(rooms.len(), 3);
    let mine = service.list_for_user(UserId(1)).await.expect("bookings listed");
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn bootstrap_maps_store_failures_to_internal() {
    let mut repo = MockBookingRepository::new();
    repo.expect_load_bookings()
        .times(1)
        .return_once(|| Err(BookingRepositoryError::io("disk gone")));

    let result = BookingService::bootstrap(
        &FixtureRoomRepository,
        Arc::new(repo),
        Arc::new(FixtureConfirmationOutbox),
        clock_at("2025-11-16", "08:00"),
        BookingRules::default(),
    )
    .await;

    let Err(err) = result else {
        panic!("bootstrap should fail");
    };
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn create_then_overlap_is_rejected() {
    let service = fixture_service(Vec::new());

    let first = service
        .create_booking(request(1, 1, "13:00", "14:00", 2))
        .await
        .expect("first booking succeeds");
    assert_eq!(first.id, BookingId(1));

    let err = service
        .create_booking(request(2, 1, "13:30", "14:30", 2))
        .await
        .expect_err("overlap rejected");
    assert_eq!(err.code(), ErrorCode::OverlapConflict);
}

#[rstest]
#[case(request(1, 99, "13:00", "14:00", 1), ErrorCode::RoomNotFound)]
#[case(request(1, 99, "14:00", "13:00", 99), ErrorCode::RoomNotFound)]
#[case(request(1, 1, "14:00", "13:00", 99), ErrorCode::EndNotAfterStart)]
#[case(request(1, 1, "13:00", "14:00", 5), ErrorCode::CapacityExceeded)]
#[case(request(1, 1, "10:30", "11:30", 9), ErrorCode::CapacityExceeded)]
#[case(request(1, 1, "10:30", "11:30", 1), ErrorCode::OverlapConflict)]
#[case(request(3, 2, "12:00", "13:30", 1), ErrorCode::DailyCapExceeded)]
#[tokio::test]
async fn create_checks_rules_in_order(#[case] request: BookingRequest, #[case] code: ErrorCode) {
    let service = fixture_service(vec![
        stored(1, 7, 1, "10:00", "11:00"),
        stored(2, 3, 3, "09:00", "10:00"),
    ]);

    let err = service
        .create_booking(request)
        .await
        .expect_err("request rejected");
    assert_eq!(err.code(), code);
}

#[tokio::test]
async fn create_assigns_next_id_after_maximum() {
    let service = fixture_service(vec![stored(7, 1, 2, "09:00", "10:00")]);
    let booking = service
        .create_booking(request(2, 1, "09:00", "10:00", 1))
        .await
        .expect("booking succeeds");
    assert_eq!(booking.id, BookingId(8));
}

#[tokio::test]
async fn create_fails_cleanly_when_ids_are_exhausted() {
    let service = fixture_service(vec![stored(i64::MAX, 1, 2, "09:00", "10:00")]);
    let err = service
        .create_booking(request(2, 1, "13:00", "14:00", 1))
        .await
        .expect_err("no id left to assign");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(
        service
            .list_for_user(UserId(2))
            .await
            .expect("listed")
            .is_empty()
    );
    let owned = service.list_for_user(UserId(1)).await.expect("listed");
    assert_eq!(owned.len(), 1);
}

#[tokio::test]
async fn create_rolls_back_when_persist_fails() {
    let mut repo = MockBookingRepository::new();
    repo.expect_save_bookings()
        .times(1)
        .return_once(|_| Err(BookingRepositoryError::io("read-only")));
    let service = BookingService::new(
        default_catalogue(),
        Vec::new(),
        Arc::new(repo),
        Arc::new(FixtureConfirmationOutbox),
        clock_at("2025-11-16", "08:00"),
        BookingRules::default(),
    );

    let err = service
        .create_booking(request(1, 1, "13:00", "14:00", 1))
        .await
        .expect_err("persist failure surfaces");
    assert_eq!(err.code(), ErrorCode::InternalError);
    let mine = service.list_for_user(UserId(1)).await.expect("listed");
    assert!(mine.is_empty());
}

#[tokio::test]
async fn create_survives_confirmation_failure() {
    let mut outbox = MockConfirmationOutbox::new();
    outbox
        .expect_write_confirmation()
        .times(1)
        .withf(|confirmation| {
            confirmation.booking_id == BookingId(1) && confirmation.user_id == UserId(4)
        })
        .return_once(|_| Err(ConfirmationOutboxError::write("disk full")));
    let service = BookingService::new(
        default_catalogue(),
        Vec::new(),
        Arc::new(FixtureBookingRepository),
        Arc::new(outbox),
        clock_at("2025-11-16", "08:00"),
        BookingRules::default(),
    );

    let booking = service
        .create_booking(request(4, 2, "13:00", "14:00", 1))
        .await
        .expect("booking kept despite confirmation failure");
    assert_eq!(booking.id, BookingId(1));
}

#[tokio::test]
async fn create_persists_the_full_ledger() {
    let mut repo = MockBookingRepository::new();
    repo.expect_save_bookings()
        .times(1)
        .withf(|bookings| bookings.len() == 2 && bookings[1].id == BookingId(2))
        .return_once(|_| Ok(()));
    let service = BookingService::new(
        default_catalogue(),
        vec![stored(1, 9, 3, "09:00", "10:00")],
        Arc::new(repo),
        Arc::new(FixtureConfirmationOutbox),
        clock_at("2025-11-16", "08:00"),
        BookingRules::default(),
    );

    service
        .create_booking(request(1, 1, "13:00", "14:00", 1))
        .await
        .expect("booking succeeds");
}

#[rstest]
#[case("12:00", true)]
#[case("12:30", true)]
#[case("12:31", false)]
#[case("13:30", false)]
#[tokio::test]
async fn cancel_respects_cutoff(#[case] now: &str, #[case] allowed: bool) {
    let service = BookingService::new(
        default_catalogue(),
        vec![stored(1, 1, 1, "13:00", "14:00")],
        Arc::new(FixtureBookingRepository),
        Arc::new(FixtureConfirmationOutbox),
        clock_at("2025-11-16", now),
        BookingRules::default(),
    );

    let result = service.cancel_booking(BookingId(1)).await;
    let remaining = service.list_for_user(UserId(1)).await.expect("listed");
    if allowed {
        assert!(result.is_ok());
        assert!(remaining.is_empty());
    } else {
        let err = result.expect_err("cancel rejected");
        assert_eq!(err.code(), ErrorCode::CancelCutoff);
        assert_eq!(remaining.len(), 1);
    }
}

#[tokio::test]
async fn cancel_unknown_booking_is_not_found() {
    let service = fixture_service(Vec::new());
    let err = service
        .cancel_booking(BookingId(42))
        .await
        .expect_err("missing booking");
    assert_eq!(err.code(), ErrorCode::BookingNotFound);
}

#[tokio::test]
async fn cancel_rolls_back_when_persist_fails() {
    let mut repo = MockBookingRepository::new();
    repo.expect_save_bookings()
        .times(1)
        .return_once(|_| Err(BookingRepositoryError::io("read-only")));
    let service = BookingService::new(
        default_catalogue(),
        vec![stored(1, 1, 1, "13:00", "14:00")],
        Arc::new(repo),
        Arc::new(FixtureConfirmationOutbox),
        clock_at("2025-11-16", "08:00"),
        BookingRules::default(),
    );

    let err = service
        .cancel_booking(BookingId(1))
        .await
        .expect_err("persist failure surfaces");
    assert_eq!(err.code(), ErrorCode::InternalError);
    let remaining = service.list_for_user(UserId(1)).await.expect("listed");
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn search_excludes_overlapping_rooms() {
    let service = fixture_service(vec![stored(1, 1, 1, "13:00", "14:00")]);

    let rooms = service
        .search_available(availability("13:30", "14:30"))
        .await
        .expect("search succeeds");
    let ids: Vec<_> = rooms.iter().map(|room| room.id().get()).collect();
    assert_eq!(ids, vec![2, 3]);

    let rooms = service
        .search_available(availability("14:00", "15:00"))
        .await
        .expect("search succeeds");
    assert_eq!(rooms.len(), 3);
}

#[rstest]
#[case("2025-11-16", "1pm", "14:00", ErrorCode::BadDatetimeFormat)]
#[case("16/11/2025", "13:00", "14:00", ErrorCode::BadDatetimeFormat)]
#[case("2025-11-16", "14:00", "13:00", ErrorCode::EndNotAfterStart)]
#[case("2025-11-16", "13:00", "13:00", ErrorCode::EndNotAfterStart)]
#[case("+262142-12-31", "13:00", "14:00", ErrorCode::BadDatetimeFormat)]
#[tokio::test]
async fn search_rejects_bad_windows(
    #[case] date: &str,
    #[case] start: &str,
    #[case] end: &str,
    #[case] code: ErrorCode,
) {
    let service = fixture_service(Vec::new());
    let query = AvailabilityQuery {
        date: date.to_owned(),
        start: start.to_owned(),
        end: end.to_owned(),
    };
    let err = service
        .search_available(query)
        .await
        .expect_err("search rejected");
    assert_eq!(err.code(), code);
}

#[tokio::test]
async fn list_for_user_filters_in_id_order() {
    let service = fixture_service(vec![
        stored(3, 1, 2, "09:00", "10:00"),
        stored(1, 1, 1, "13:00", "14:00"),
        stored(2, 2, 3, "13:00", "14:00"),
    ]);

    let mine = service.list_for_user(UserId(1)).await.expect("listed");
    let ids: Vec<_> = mine.iter().map(|booking| booking.id).collect();
    assert_eq!(ids, vec![BookingId(1), BookingId(3)]);
    assert!(service
        .list_for_user(UserId(5))
        .await
        .expect("listed")
        .is_empty());
}
