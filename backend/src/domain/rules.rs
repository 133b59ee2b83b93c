//! Pure booking rules: overlap, daily cap and cancellation cutoff.
//!
//! These functions take the ledger as a slice and never mutate it, so the
//! booking service can evaluate them while holding its lock.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use super::{Booking, RoomId, TimeWindow, UserId};

/// Default cap on a user's booked hours per calendar day.
pub const DEFAULT_MAX_HOURS_PER_DAY: u32 = 2;
/// Default minimum lead time for cancellations.
pub const DEFAULT_CANCEL_CUTOFF_MINUTES: u32 = 30;

/// Tunable limits applied by the booking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Hours a user may book per calendar day.
    pub max_hours_per_day: u32,
    /// Minimum lead time for cancellation.
    pub cancel_cutoff_minutes: u32,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            max_hours_per_day: DEFAULT_MAX_HOURS_PER_DAY,
            cancel_cutoff_minutes: DEFAULT_CANCEL_CUTOFF_MINUTES,
        }
    }
}

impl BookingRules {
    /// Cancellation cutoff as a duration.
    pub fn cancel_cutoff(&self) -> Duration {
        Duration::minutes(i64::from(self.cancel_cutoff_minutes))
    }
}

/// Half-open interval intersection test.
///
/// # Examples
/// ```
/// use study_rooms::domain::rules::intervals_overlap;
/// use study_rooms::domain::timestamp::combine_date_time;
///
/// let t = |hm| combine_date_time("2025-11-16", hm).expect("valid time");
/// assert!(intervals_overlap(t("13:00"), t("14:00"), t("13:30"), t("14:30")));
/// assert!(!intervals_overlap(t("13:00"), t("14:00"), t("14:00"), t("15:00")));
/// ```
#[must_use]
pub fn intervals_overlap(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// True if any booking of `room_id` intersects `window`.
#[must_use]
pub fn has_overlap(bookings: &[Booking], room_id: RoomId, window: &TimeWindow) -> bool {
    bookings
        .iter()
        .filter(|booking| booking.room_id == room_id)
        .any(|booking| booking.window.overlaps(window))
}

/// True if adding `[start, end)` would push the user's hours for the day of
/// `start` past `max_hours`.
///
/// Only existing bookings lying entirely inside `[midnight, midnight + 1 day]`
/// count towards the total.
#[must_use]
pub fn exceeds_daily_cap(
    bookings: &[Booking],
    user_id: UserId,
    start: NaiveDateTime,
    end: NaiveDateTime,
    max_hours: u32,
) -> bool {
    let day_start = start.date().and_time(NaiveTime::MIN);
    let day_end = day_start
        .checked_add_signed(Duration::days(1))
        .unwrap_or(NaiveDateTime::MAX);
    let booked: i64 = bookings
        .iter()
        .filter(|booking| booking.user_id == user_id)
        .filter(|booking| booking.window.start() >= day_start && booking.window.end() <= day_end)
        .map(|booking| booking.window.duration().num_seconds())
        .sum();
    let total = booked + (end - start).num_seconds();
    total > i64::from(max_hours) * 3600
}

/// True when `start` is less than `cutoff` away from `now`.
///
/// Bookings that already started are always inside the cutoff.
#[must_use]
pub fn within_cancel_cutoff(start: NaiveDateTime, now: NaiveDateTime, cutoff: Duration) -> bool {
    start - now < cutoff
}
