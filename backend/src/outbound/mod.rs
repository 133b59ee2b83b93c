//! Outbound adapters implementing domain ports on the local filesystem.
//!
//! - **persistence**: JSON files for rooms and bookings, written atomically.
//! - **outbox**: one text file per booking confirmation.
//! - **error_log**: newline-delimited JSON record of every error envelope.
//!
//! Adapters translate between domain types and file formats. They contain
//! no business rules.

pub mod error_log;
pub mod outbox;
pub mod persistence;

pub use error_log::NdjsonErrorLog;
pub use outbox::FileOutbox;
pub use persistence::JsonFileStore;
