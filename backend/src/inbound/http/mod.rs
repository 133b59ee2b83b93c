//! HTTP inbound adapter exposing REST endpoints.

pub mod bookings;
pub mod error;
pub mod fallback;
pub mod health;
pub mod meta;
pub mod rooms;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
