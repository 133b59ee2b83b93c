//! Booking domain service.
//!
//! Owns the room catalogue and the in-memory booking ledger and implements
//! the driving ports. Every mutation runs under a single async mutex and is
//! persisted before the lock is released; a failed persist rolls the ledger
//! back so memory and disk never diverge.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::ports::{
    AvailabilityQuery, BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError,
    ConfirmationOutbox, RoomRepository, RoomRepositoryError, RoomsQuery,
};
use crate::domain::rules::{BookingRules, exceeds_daily_cap, has_overlap, within_cancel_cutoff};
use crate::domain::timestamp::combine_date_time;
use crate::domain::{
    Booking, BookingId, BookingRequest, Confirmation, Error, Room, TimeWindow, UserId,
};

/// Booking service implementing [`RoomsQuery`], [`BookingCommand`] and
/// [`BookingQuery`].
pub struct BookingService<B, O> {
    rooms: Vec<Room>,
    bookings: Mutex<Vec<Booking>>,
    booking_repo: Arc<B>,
    outbox: Arc<O>,
    clock: Arc<dyn Clock>,
    rules: BookingRules,
}

impl<B, O> BookingService<B, O> {
    /// Create a service over an already-loaded catalogue and ledger.
    ///
    /// Rooms and bookings are sorted by id.
    pub fn new(
        mut rooms: Vec<Room>,
        mut bookings: Vec<Booking>,
        booking_repo: Arc<B>,
        outbox: Arc<O>,
        clock: Arc<dyn Clock>,
        rules: BookingRules,
    ) -> Self {
        rooms.sort_by_key(Room::id);
        bookings.sort_by_key(|booking| booking.id);
        Self {
            rooms,
            bookings: Mutex::new(bookings),
            booking_repo,
            outbox,
            clock,
            rules,
        }
    }

    /// Business rule parameters in force.
    pub fn rules(&self) -> BookingRules {
        self.rules
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.local().naive_local()
    }

    fn find_room(&self, room_id: i64) -> Result<&Room, Error> {
        self.rooms
            .iter()
            .find(|room| room.id().get() == room_id)
            .ok_or_else(|| Error::room_not_found(room_id))
    }

    fn map_booking_repo_error(error: BookingRepositoryError) -> Error {
        match error {
            BookingRepositoryError::Io { message } => {
                Error::internal(format!("booking store unavailable: {message}"))
            }
            BookingRepositoryError::Encode { message } => {
                Error::internal(format!("booking store encoding failed: {message}"))
            }
        }
    }

    fn map_room_repo_error(error: RoomRepositoryError) -> Error {
        Error::internal(format!("room store error: {error}"))
    }
}

impl<B, O> BookingService<B, O>
where
    B: BookingRepository,
    O: ConfirmationOutbox,
{
    /// Load the catalogue and ledger from their repositories and build the
    /// service.
    pub async fn bootstrap<R>(
        room_repo: &R,
        booking_repo: Arc<B>,
        outbox: Arc<O>,
        clock: Arc<dyn Clock>,
        rules: BookingRules,
    ) -> Result<Self, Error>
    where
        R: RoomRepository + ?Sized,
    {
        let rooms = room_repo
            .load_rooms()
            .await
            .map_err(Self::map_room_repo_error)?;
        let bookings = booking_repo
            .load_bookings()
            .await
            .map_err(Self::map_booking_repo_error)?;
        info!(
            rooms = rooms.len(),
            bookings = bookings.len(),
            "booking service loaded"
        );
        Ok(Self::new(rooms, bookings, booking_repo, outbox, clock, rules))
    }

    async fn persist(&self, bookings: &[Booking]) -> Result<(), Error> {
        self.booking_repo
            .save_bookings(bookings)
            .await
            .map_err(Self::map_booking_repo_error)
    }

    async fn confirm(&self, booking: &Booking) {
        let confirmation = Confirmation {
            booking_id: booking.id,
            user_id: booking.user_id,
            recorded_at: self.now(),
        };
        if let Err(err) = self.outbox.write_confirmation(&confirmation).await {
            warn!(
                booking_id = booking.id.0,
                error = %err,
                "confirmation write failed; booking kept"
            );
        }
    }
}

#[async_trait]
impl<B, O> RoomsQuery for BookingService<B, O>
where
    B: BookingRepository,
    O: ConfirmationOutbox,
{
    async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        Ok(self.rooms.clone())
    }

    async fn search_available(&self, query: AvailabilityQuery) -> Result<Vec<Room>, Error> {
        let start = combine_date_time(&query.date, &query.start)
            .ok_or_else(Error::bad_datetime_format)?;
        let end =
            combine_date_time(&query.date, &query.end).ok_or_else(Error::bad_datetime_format)?;
        let window = TimeWindow::new(start, end).map_err(|_| Error::end_not_after_start())?;
        let bookings = self.bookings.lock().await;
        Ok(self
            .rooms
            .iter()
            .filter(|room| !has_overlap(&bookings, room.id(), &window))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<B, O> BookingCommand for BookingService<B, O>
where
    B: BookingRepository,
    O: ConfirmationOutbox,
{
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error> {
        let room = self.find_room(request.room_id)?;
        let window = TimeWindow::new(request.start, request.end)
            .map_err(|_| Error::end_not_after_start())?;
        if request.group_size > room.capacity() {
            return Err(Error::capacity_exceeded(room.capacity()));
        }

        let mut bookings = self.bookings.lock().await;
        if has_overlap(&bookings, room.id(), &window) {
            return Err(Error::overlap_conflict(room.id().get()));
        }
        if exceeds_daily_cap(
            &bookings,
            request.user_id,
            window.start(),
            window.end(),
            self.rules.max_hours_per_day,
        ) {
            return Err(Error::daily_cap_exceeded(self.rules.max_hours_per_day));
        }

        let id = BookingId::next_after(bookings.iter().map(|existing| existing.id))
            .ok_or_else(|| {
                error!("no booking id left after i64::MAX");
                Error::internal("booking id space exhausted")
            })?;
        let booking = Booking {
            id,
            user_id: request.user_id,
            room_id: room.id(),
            window,
            group_size: request.group_size,
        };
        bookings.push(booking.clone());
        if let Err(err) = self.persist(&bookings).await {
            bookings.pop();
            error!(booking_id = booking.id.0, error = %err, "persisting new booking failed");
            return Err(err);
        }
        drop(bookings);

        info!(
            booking_id = booking.id.0,
            user_id = booking.user_id.0,
            room_id = booking.room_id.get(),
            "booking created"
        );
        self.confirm(&booking).await;
        Ok(booking)
    }

    async fn cancel_booking(&self, booking_id: BookingId) -> Result<(), Error> {
        let mut bookings = self.bookings.lock().await;
        let (index, start) = bookings
            .iter()
            .enumerate()
            .find(|(_, booking)| booking.id == booking_id)
            .map(|(index, booking)| (index, booking.window.start()))
            .ok_or_else(|| Error::booking_not_found(booking_id.0))?;
        if within_cancel_cutoff(start, self.now(), self.rules.cancel_cutoff()) {
            return Err(Error::cancel_cutoff(self.rules.cancel_cutoff_minutes));
        }

        let removed = bookings.remove(index);
        if let Err(err) = self.persist(&bookings).await {
            bookings.insert(index, removed);
            error!(booking_id = booking_id.0, error = %err, "persisting cancellation failed");
            return Err(err);
        }
        info!(booking_id = booking_id.0, "booking cancelled");
        Ok(())
    }
}

#[async_trait]
impl<B, O> BookingQuery for BookingService<B, O>
where
    B: BookingRepository,
    O: ConfirmationOutbox,
{
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, Error> {
        let bookings = self.bookings.lock().await;
        Ok(bookings
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
