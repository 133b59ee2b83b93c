//! File-backed persistence for the room catalogue and booking ledger.

mod atomic_io;
mod json_file_store;
mod records;

pub use json_file_store::JsonFileStore;
pub use records::RecordError;
