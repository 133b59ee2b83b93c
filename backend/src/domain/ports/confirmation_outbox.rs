//! Port for booking confirmation delivery.
//!
//! Delivery is simulated: adapters persist an artefact standing in for an
//! e-mail.

use async_trait::async_trait;

use crate::domain::Confirmation;

use super::define_port_error;

define_port_error! {
    /// Errors raised by confirmation outbox adapters.
    pub enum ConfirmationOutboxError {
        /// The artefact could not be written.
        Write { message: String } => "confirmation write failed: {message}",
    }
}

/// Driven port delivering booking confirmations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmationOutbox: Send + Sync {
    /// Deliver one confirmation.
    async fn write_confirmation(
        &self,
        confirmation: &Confirmation,
    ) -> Result<(), ConfirmationOutboxError>;
}

/// Fixture outbox that drops every confirmation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConfirmationOutbox;

#[async_trait]
impl ConfirmationOutbox for FixtureConfirmationOutbox {
    /// Deliver one confirmation.
    async fn write_confirmation(
        &self,
        _confirmation: &Confirmation,
    ) -> Result<(), ConfirmationOutboxError> {
        Ok(())
    }
}
