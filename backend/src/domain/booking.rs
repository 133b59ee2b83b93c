//! Booking records and the time windows they occupy.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

use super::RoomId;

/// Validation errors returned when constructing bookings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingValidationError {
    /// The window is empty or reversed.
    #[error("end must be after start")]
    EndNotAfterStart,
    /// The group is smaller than one person or does not fit in `u32`.
    #[error("group size must be at least 1, got {0}")]
    GroupSizeTooSmall(i64),
}

/// Identifier of the user owning a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential booking identifier.
///
/// Records persisted without an id load as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingId(pub i64);

impl BookingId {
    /// Identifier following the highest one in `existing`, or 1.
    ///
    /// Returns `None` once the highest id is `i64::MAX`.
    ///
    /// # Examples
    /// ```
    /// use study_rooms::domain::BookingId;
    ///
    /// assert_eq!(BookingId::next_after(Vec::new()), Some(BookingId(1)));
    /// assert_eq!(
    ///     BookingId::next_after([BookingId(4), BookingId(2)]),
    ///     Some(BookingId(5))
    /// );
    /// assert_eq!(BookingId::next_after([BookingId(i64::MAX)]), None);
    /// ```
    #[must_use]
    pub fn next_after(existing: impl IntoIterator<Item = BookingId>) -> Option<Self> {
        match existing.into_iter().max() {
            None => Some(Self(1)),
            Some(BookingId(max)) => max.checked_add(1).map(Self),
        }
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open interval `[start, end)` with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Build a window, rejecting `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, BookingValidationError> {
        if end <= start {
            return Err(BookingValidationError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Inclusive start.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when both windows share any instant.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        super::rules::intervals_overlap(self.start, self.end, other.start, other.end)
    }
}

/// A confirmed room booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Ledger identifier.
    pub id: BookingId,
    /// Owner of the booking.
    pub user_id: UserId,
    /// Booked room.
    pub room_id: RoomId,
    /// Occupied interval.
    pub window: TimeWindow,
    /// Number of people, at least one.
    pub group_size: u32,
}

impl Booking {
    /// Validate raw fields into a booking.
    pub fn new(
        id: BookingId,
        user_id: UserId,
        room_id: RoomId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        group_size: i64,
    ) -> Result<Self, BookingValidationError> {
        let window = TimeWindow::new(start, end)?;
        let group_size = u32::try_from(group_size)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(BookingValidationError::GroupSizeTooSmall(group_size))?;
        Ok(Self {
            id,
            user_id,
            room_id,
            window,
            group_size,
        })
    }
}

/// Unvalidated booking request as received from a driving adapter.
///
/// `room_id` stays raw so an unknown or non-positive id reports
/// `ROOM_NOT_FOUND` before any other rule runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Requesting user.
    pub user_id: UserId,
    /// Requested room, not yet resolved against the catalogue.
    pub room_id: i64,
    /// Requested start.
    pub start: NaiveDateTime,
    /// Requested end.
    pub end: NaiveDateTime,
    /// Number of people.
    pub group_size: u32,
}

/// Confirmation artefact written after a booking is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Booking being confirmed.
    pub booking_id: BookingId,
    /// Recipient user.
    pub user_id: UserId,
    /// When the booking was recorded.
    pub recorded_at: NaiveDateTime,
}

impl Confirmation {
    /// Placeholder address the confirmation is "sent" to.
    pub fn recipient(&self) -> String {
        format!("user{}@example.edu", self.user_id)
    }
}
