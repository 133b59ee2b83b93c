//! Port for the booking ledger store.
//!
//! The whole ledger is loaded once at startup and rewritten on every
//! mutation, so the contract is a plain load/save pair rather than row-level
//! operations.

use async_trait::async_trait;

use crate::domain::Booking;

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// The backing store could not be read or written.
        Io { message: String } => "booking store i/o failed: {message}",
        /// Bookings could not be encoded for storage.
        Encode { message: String } => "booking store encoding failed: {message}",
    }
}

/// Port for loading and saving the booking ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Load every valid booking, sorted by id.
    async fn load_bookings(&self) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Replace the stored ledger with `bookings`.
    async fn save_bookings(&self, bookings: &[Booking]) -> Result<(), BookingRepositoryError>;
}

/// Fixture repository with an empty ledger that discards saves.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingRepository;

#[async_trait]
impl BookingRepository for FixtureBookingRepository {
    async fn load_bookings(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(Vec::new())
    }

    async fn save_bookings(&self, _bookings: &[Booking]) -> Result<(), BookingRepositoryError> {
        Ok(())
    }
}
