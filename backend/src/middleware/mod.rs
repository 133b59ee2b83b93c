//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently
//! request identification and error-envelope logging.

pub mod request_context;

pub use request_context::{ErrorLogEntry, RequestContext, RequestTrace};
