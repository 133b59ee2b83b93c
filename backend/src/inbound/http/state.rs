//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, BookingQuery, FixtureBookingCommand, FixtureBookingQuery, FixtureRoomsQuery,
    RoomsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Room catalogue and availability search.
    pub rooms: Arc<dyn RoomsQuery>,
    /// Booking creation and cancellation.
    pub bookings: Arc<dyn BookingCommand>,
    /// Per-user booking listings.
    pub bookings_query: Arc<dyn BookingQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        rooms: Arc<dyn RoomsQuery>,
        bookings: Arc<dyn BookingCommand>,
        bookings_query: Arc<dyn BookingQuery>,
    ) -> Self {
        Self {
            rooms,
            bookings,
            bookings_query,
        }
    }

    /// Share one service implementing every driving port.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RoomsQuery + BookingCommand + BookingQuery + 'static,
    {
        Self {
            rooms: service.clone(),
            bookings: service.clone(),
            bookings_query: service,
        }
    }

    /// State backed entirely by fixture ports.
    ///
    /// # Examples
    /// ```
    /// use actix_web::web;
    /// use study_rooms::inbound::http::state::HttpState;
    ///
    /// let _data = web::Data::new(HttpState::fixture());
    /// ```
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixtureRoomsQuery),
            Arc::new(FixtureBookingCommand),
            Arc::new(FixtureBookingQuery),
        )
    }
}
