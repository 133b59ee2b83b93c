//! Port for the room catalogue store.

use async_trait::async_trait;

use crate::domain::{Room, default_catalogue};

use super::define_port_error;

define_port_error! {
    /// Errors raised by room repository adapters.
    pub enum RoomRepositoryError {
        /// The backing store could not be read or written.
        Io { message: String } => "room store i/o failed: {message}",
        /// Rooms could not be encoded for storage.
        Encode { message: String } => "room store encoding failed: {message}",
    }
}

/// Port for loading and saving the room catalogue.
///
/// Implementations return rooms sorted by id with duplicates removed.
/// Unreadable records are the adapter's concern: they are skipped rather than
/// failing the whole load.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Load the catalogue.
    async fn load_rooms(&self) -> Result<Vec<Room>, RoomRepositoryError>;

    /// Replace the stored catalogue.
    async fn save_rooms(&self, rooms: &[Room]) -> Result<(), RoomRepositoryError>;
}

/// Fixture repository serving the default catalogue and discarding saves.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoomRepository;

#[async_trait]
impl RoomRepository for FixtureRoomRepository {
    async fn load_rooms(&self) -> Result<Vec<Room>, RoomRepositoryError> {
        Ok(default_catalogue())
    }

    async fn save_rooms(&self, _rooms: &[Room]) -> Result<(), RoomRepositoryError> {
        Ok(())
    }
}
