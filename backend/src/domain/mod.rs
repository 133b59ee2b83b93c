//! Domain primitives, rules and services.
//!
//! Purpose: define the room catalogue and booking ledger types, the pure rule
//! functions evaluated against them, and the service that owns the ledger.
//! Nothing here knows about HTTP or the filesystem; adapters reach the domain
//! through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode / ValidationIssue: transport-agnostic failures.
//! - Room / Booking / TimeWindow: catalogue and ledger entries.
//! - BookingService: implementation of the driving ports.
//! - RequestId: task-local correlation identifier.

pub mod booking;
pub mod booking_service;
pub mod coerce;
pub mod error;
pub mod ports;
pub mod request_id;
pub mod room;
pub mod rules;
pub mod timestamp;

pub use self::booking::{
    Booking, BookingId, BookingRequest, BookingValidationError, Confirmation, TimeWindow, UserId,
};
pub use self::booking_service::BookingService;
pub use self::error::{Error, ErrorCode, ValidationIssue};
pub use self::request_id::{REQUEST_ID_HEADER, RequestId};
pub use self::room::{Room, RoomId, RoomValidationError, default_catalogue};
pub use self::rules::BookingRules;
