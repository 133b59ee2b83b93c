//! Port for the append-only error log.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by error log adapters.
    pub enum ErrorLogError {
        /// The entry could not be appended.
        Append { message: String } => "error log append failed: {message}",
    }
}

/// Sink receiving one JSON document per error envelope.
///
/// Callers treat failures as non-fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ErrorLog: Send + Sync {
    /// Append one envelope.
    async fn append(&self, entry: &Value) -> Result<(), ErrorLogError>;
}

/// Fixture log that discards entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureErrorLog;

#[async_trait]
impl ErrorLog for FixtureErrorLog {
    async fn append(&self, _entry: &Value) -> Result<(), ErrorLogError> {
        Ok(())
    }
}
