//! Driving port for room catalogue and availability queries.

use async_trait::async_trait;

use crate::domain::{Error, Room, default_catalogue};

/// Raw availability search as supplied by the caller.
///
/// Parsing happens in the domain so malformed values report
/// `BAD_DATETIME_FORMAT` rather than a transport validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Window start, `HH:MM` or `HH:MM:SS`.
    pub start: String,
    /// Window end, `HH:MM` or `HH:MM:SS`.
    pub end: String,
}

/// Driving port for the room catalogue and availability search.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomsQuery: Send + Sync {
    /// Every room, sorted by id.
    async fn list_rooms(&self) -> Result<Vec<Room>, Error>;

    /// Rooms with no booking intersecting the requested window.
    async fn search_available(&self, query: AvailabilityQuery) -> Result<Vec<Room>, Error>;
}

/// Fixture query serving the default catalogue as always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoomsQuery;

#[async_trait]
impl RoomsQuery for FixtureRoomsQuery {
    async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        Ok(default_catalogue())
    }

    async fn search_available(&self, _query: AvailabilityQuery) -> Result<Vec<Room>, Error> {
        Ok(default_catalogue())
    }
}
