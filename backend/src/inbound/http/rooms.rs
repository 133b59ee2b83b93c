//! Room catalogue and availability endpoints.
//!
//! ```text
//! GET /rooms
//! GET /search?date=2025-11-16&start=13:00&end=14:00
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Room};
use crate::domain::ports::AvailabilityQuery;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, Issues, Section, require_text};

/// Room as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoomResponse {
    /// Room identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Room A")]
    pub name: String,
    /// Maximum group size.
    #[schema(example = 4)]
    pub capacity: u32,
    /// Building and floor.
    #[schema(example = "Library L1")]
    pub location: String,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id().get(),
            name: room.name().to_owned(),
            capacity: room.capacity(),
            location: room.location().to_owned(),
        }
    }
}

fn to_responses(rooms: &[Room]) -> Vec<RoomResponse> {
    rooms.iter().map(RoomResponse::from).collect()
}

/// Query string accepted by `GET /search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Calendar day, `YYYY-MM-DD`.
    #[param(example = "2025-11-16")]
    pub date: Option<String>,
    /// Window start, `HH:MM` or `HH:MM:SS`.
    #[param(example = "13:00")]
    pub start: Option<String>,
    /// Window end, `HH:MM` or `HH:MM:SS`.
    #[param(example = "14:00")]
    pub end: Option<String>,
}

impl SearchParams {
    /// Require every parameter, reporting each missing one.
    fn into_query(self) -> Result<AvailabilityQuery, Error> {
        let mut issues = Issues::new();
        let date = issues.check(require_text(
            Section::Query,
            FieldName::new("date"),
            self.date.as_deref(),
        ));
        let start = issues.check(require_text(
            Section::Query,
            FieldName::new("start"),
            self.start.as_deref(),
        ));
        let end = issues.check(require_text(
            Section::Query,
            FieldName::new("end"),
            self.end.as_deref(),
        ));
        match (date, start, end) {
            (Some(date), Some(start), Some(end)) => Ok(AvailabilityQuery { date, start, end }),
            _ => Err(issues.into_error()),
        }
    }
}

/// List every room, sorted by id.
#[utoipa::path(
    get,
    path = "/rooms",
    description = "Return the full room catalogue sorted by id.",
    responses(
        (status = 200, description = "Room catalogue", body = [RoomResponse]),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let rooms = state.rooms.list_rooms().await?;
    Ok(HttpResponse::Ok().json(to_responses(&rooms)))
}

/// Find rooms free for the whole requested window.
#[utoipa::path(
    get,
    path = "/search",
    description = "Return rooms with no booking intersecting the half-open window [start, end) on the given date.",
    params(SearchParams),
    responses(
        (status = 200, description = "Available rooms", body = [RoomResponse]),
        (status = 400, description = "Malformed date or time, or end not after start", body = ErrorEnvelope),
        (status = 422, description = "Missing query parameter", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["rooms"],
    operation_id = "searchRooms"
)]
#[get("/search")]
pub async fn search_rooms(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<HttpResponse> {
    let query = params.into_inner().into_query()?;
    let rooms = state.rooms.search_available(query).await?;
    Ok(HttpResponse::Ok().json(to_responses(&rooms)))
}
