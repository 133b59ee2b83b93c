//! Service metadata endpoints.
//!
//! ```text
//! GET /      -> {"ok": true, "docs": "/docs"}
//! GET /api   -> service name, version and endpoint list
//! ```

use actix_web::{HttpResponse, get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Human-readable service title.
pub const SERVICE_NAME: &str = "Study Room Booking – Lite";

/// Advertised API version.
pub const API_VERSION: &str = "0.3.0";

const DOCS_PATH: &str = "/docs";

const ENDPOINTS: [&str; 4] = [
    "/rooms",
    "/search",
    "/bookings",
    "/users/{user_id}/bookings",
];

/// Root landing payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    /// Always `true`.
    pub ok: bool,
    /// Location of the interactive API docs.
    #[schema(example = "/docs")]
    pub docs: String,
}

/// Service description returned by `GET /api`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiInfoResponse {
    /// Always `true`.
    pub ok: bool,
    /// Service title.
    #[schema(example = "Study Room Booking – Lite")]
    pub service: String,
    /// API version.
    #[schema(example = "0.3.0")]
    pub version: String,
    /// Location of the interactive API docs.
    #[schema(example = "/docs")]
    pub docs: String,
    /// Method and path of every endpoint.
    pub endpoints: Vec<String>,
}

impl ApiInfoResponse {
    fn current() -> Self {
        Self {
            ok: true,
            service: SERVICE_NAME.to_owned(),
            version: API_VERSION.to_owned(),
            docs: DOCS_PATH.to_owned(),
            endpoints: ENDPOINTS.iter().map(|path| (*path).to_owned()).collect(),
        }
    }
}

/// Landing endpoint pointing at the interactive docs.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = RootResponse)),
    tags = ["meta"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        ok: true,
        docs: DOCS_PATH.to_owned(),
    })
}

/// Describe the service and its main endpoints.
#[utoipa::path(
    get,
    path = "/api",
    responses((status = 200, description = "Service metadata", body = ApiInfoResponse)),
    tags = ["meta"],
    operation_id = "apiInfo"
)]
#[get("/api")]
pub async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(ApiInfoResponse::current())
}
