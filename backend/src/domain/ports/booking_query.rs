//! Driving port for per-user booking listings.

use async_trait::async_trait;

use crate::domain::{Booking, Error, UserId};

/// Driving port for reading bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Bookings owned by `user_id`, in id order. Possibly empty.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, Error>;
}

/// Fixture query returning no bookings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingQuery;

#[async_trait]
impl BookingQuery for FixtureBookingQuery {
    async fn list_for_user(&self, _user_id: UserId) -> Result<Vec<Booking>, Error> {
        Ok(Vec::new())
    }
}
