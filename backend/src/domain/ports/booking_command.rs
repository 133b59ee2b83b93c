//! Driving port for booking mutations.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, BookingRequest, Error};

/// Driving port for creating and cancelling bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate, record and confirm a booking.
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error>;

    /// Cancel a booking outside the cutoff window.
    async fn cancel_booking(&self, booking_id: BookingId) -> Result<(), Error>;
}

/// Fixture command rejecting cancellations and refusing creation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingCommand;

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error> {
        Err(Error::room_not_found(request.room_id))
    }

    async fn cancel_booking(&self, booking_id: BookingId) -> Result<(), Error> {
        Err(Error::booking_not_found(booking_id.0))
    }
}
