//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ConfirmationOutbox`], [`ErrorLog`]) expose
//! typed errors so adapters map their failures into predictable variants.
//! Driving ports return the domain [`Error`](crate::domain::Error) directly.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_command;
mod booking_query;
mod booking_repository;
mod confirmation_outbox;
mod error_log;
mod room_repository;
mod rooms_query;

#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{BookingCommand, FixtureBookingCommand};
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::{BookingQuery, FixtureBookingQuery};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError, FixtureBookingRepository};
#[cfg(test)]
pub use confirmation_outbox::MockConfirmationOutbox;
pub use confirmation_outbox::{
    ConfirmationOutbox, ConfirmationOutboxError, FixtureConfirmationOutbox,
};
#[cfg(test)]
pub use error_log::MockErrorLog;
pub use error_log::{ErrorLog, ErrorLogError, FixtureErrorLog};
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::{FixtureRoomRepository, RoomRepository, RoomRepositoryError};
#[cfg(test)]
pub use rooms_query::MockRoomsQuery;
pub use rooms_query::{AvailabilityQuery, FixtureRoomsQuery, RoomsQuery};
