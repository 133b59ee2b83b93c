//! Study room booking service: domain rules, HTTP adapters, file-backed
//! persistence and the API client used by the command-line tool.

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
