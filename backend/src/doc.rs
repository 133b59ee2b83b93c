//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the response DTOs and the domain wrappers ([`ErrorCodeSchema`],
//! [`ValidationIssueSchema`]) that describe domain types without coupling them
//! to utoipa.
//!
//! The document backs Swagger UI under `/docs` (debug builds) and is exported
//! by `cargo run --bin openapi-dump`.

use crate::inbound::http::bookings::{BookingResponse, CreateBookingRequest};
use crate::inbound::http::error::{ErrorBody, ErrorEnvelope};
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::meta::{ApiInfoResponse, RootResponse};
use crate::inbound::http::rooms::RoomResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ValidationIssueSchema};
use utoipa::OpenApi;

/// OpenAPI document for the booking API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Study Room Booking – Lite",
        version = "0.3.0",
        description = "Browse study rooms, search free windows and manage bookings. \
            Every response carries an `X-Request-ID` header; failures use a uniform \
            JSON error envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::meta::root,
        crate::inbound::http::meta::api_info,
        crate::inbound::http::health::health,
        crate::inbound::http::rooms::list_rooms,
        crate::inbound::http::rooms::search_rooms,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_user_bookings,
        crate::inbound::http::bookings::cancel_booking,
    ),
    components(schemas(
        RoomResponse,
        BookingResponse,
        CreateBookingRequest,
        RootResponse,
        ApiInfoResponse,
        HealthResponse,
        ErrorEnvelope,
        ErrorBody,
        ErrorCodeSchema,
        ValidationIssueSchema,
    )),
    tags(
        (name = "meta", description = "Service metadata"),
        (name = "health", description = "Readiness probe"),
        (name = "rooms", description = "Room catalogue and availability search"),
        (name = "bookings", description = "Creating, listing and cancelling bookings")
    )
)]
pub struct ApiDoc;
